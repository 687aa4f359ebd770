use core::fmt;
use core::str::FromStr;

/// Byte order used for every multi-byte value written or read by one [`Writer`](crate::Writer)
/// or [`Reader`](crate::Reader).
///
/// The byte order is fixed when the instance is constructed. A stream must be read back with the
/// same byte order it was written with; the stream itself does not record it.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum Endian {
    /// Most significant byte first.
    Big,
    /// Least significant byte first.
    #[default]
    Little,
}

macro_rules! scalar_codec {
    ($($ty:ty => $encode:ident, $decode:ident, $n:literal;)*) => {
        $(
            #[doc = concat!("Encodes a `", stringify!($ty), "` as ", stringify!($n), " bytes in this byte order.")]
            #[inline(always)]
            pub fn $encode(self, value: $ty) -> [u8; $n] {
                match self {
                    Self::Big => value.to_be_bytes(),
                    Self::Little => value.to_le_bytes(),
                }
            }

            #[doc = concat!("Decodes a `", stringify!($ty), "` from ", stringify!($n), " bytes in this byte order.")]
            #[inline(always)]
            pub fn $decode(self, bytes: [u8; $n]) -> $ty {
                match self {
                    Self::Big => <$ty>::from_be_bytes(bytes),
                    Self::Little => <$ty>::from_le_bytes(bytes),
                }
            }
        )*
    };
}

impl Endian {
    /// The byte order of the machine this code was compiled for.
    #[cfg(target_endian = "little")]
    pub const NATIVE: Endian = Endian::Little;

    /// The byte order of the machine this code was compiled for.
    #[cfg(target_endian = "big")]
    pub const NATIVE: Endian = Endian::Big;

    /// Returns `true` for [`Endian::Big`].
    pub fn is_big(self) -> bool {
        self == Self::Big
    }

    // `to_be_bytes` / `to_le_bytes` on floats go through the IEEE-754 bit pattern.
    scalar_codec! {
        u16 => encode_u16, decode_u16, 2;
        i16 => encode_i16, decode_i16, 2;
        u32 => encode_u32, decode_u32, 4;
        i32 => encode_i32, decode_i32, 4;
        u64 => encode_u64, decode_u64, 8;
        i64 => encode_i64, decode_i64, 8;
        f32 => encode_f32, decode_f32, 4;
        f64 => encode_f64, decode_f64, 8;
    }
}

impl fmt::Display for Endian {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Big => f.write_str("big-endian"),
            Self::Little => f.write_str("little-endian"),
        }
    }
}

impl FromStr for Endian {
    type Err = ParseEndianError;

    /// Accepts `big`, `be`, `little` and `le`, ignoring ASCII case.
    fn from_str(s: &str) -> core::result::Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("big") || s.eq_ignore_ascii_case("be") {
            Ok(Self::Big)
        } else if s.eq_ignore_ascii_case("little") || s.eq_ignore_ascii_case("le") {
            Ok(Self::Little)
        } else {
            Err(ParseEndianError(s.to_owned()))
        }
    }
}

/// Error returned when parsing an [`Endian`] from text that names no byte order.
#[derive(Clone, Eq, PartialEq, Debug, thiserror::Error)]
#[error("unknown byte order {0:?}, expected one of: big, be, little, le")]
pub struct ParseEndianError(String);
