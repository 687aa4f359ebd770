use std::io::{Read, Write};

use crate::error::Result;
use crate::reader::Reader;
use crate::writer::Writer;

/// A value with a fixed, statically known shape: an ordered list of primitive fields.
///
/// The encoding is the concatenation of each field's encoding, in declaration order, with no
/// padding, length or type tag. A reader must know the exact shape in advance.
///
/// Implementations are provided for the primitive numeric types, `bool`, fixed-size arrays and
/// tuples. Structs declare their field order with [`fixed_layout!`](crate::fixed_layout).
pub trait FixedLayout {
    /// Number of bytes in the encoding.
    const SIZE: usize;

    /// Writes every field, in order.
    fn encode<W: Write>(&self, w: &mut Writer<W>) -> Result<()>;

    /// Reads every field, in order, overwriting `self` in place.
    ///
    /// If this fails, `self` may be partially overwritten.
    fn decode<R: Read>(&mut self, r: &mut Reader<R>) -> Result<()>;
}

macro_rules! primitive_layout {
    ($($ty:ty => $size:literal, $write:ident, $read:ident;)*) => {
        $(
            impl FixedLayout for $ty {
                const SIZE: usize = $size;

                #[inline(always)]
                fn encode<W: Write>(&self, w: &mut Writer<W>) -> Result<()> {
                    w.$write(*self)
                }

                #[inline(always)]
                fn decode<R: Read>(&mut self, r: &mut Reader<R>) -> Result<()> {
                    *self = r.$read()?;
                    Ok(())
                }
            }
        )*
    };
}

primitive_layout! {
    bool => 1, write_bool, read_bool;
    u8 => 1, write_u8, read_u8;
    i8 => 1, write_i8, read_i8;
    u16 => 2, write_u16, read_u16;
    i16 => 2, write_i16, read_i16;
    u32 => 4, write_u32, read_u32;
    i32 => 4, write_i32, read_i32;
    u64 => 8, write_u64, read_u64;
    i64 => 8, write_i64, read_i64;
    f32 => 4, write_f32, read_f32;
    f64 => 8, write_f64, read_f64;
}

impl<T: FixedLayout, const N: usize> FixedLayout for [T; N] {
    const SIZE: usize = T::SIZE * N;

    fn encode<W: Write>(&self, w: &mut Writer<W>) -> Result<()> {
        self.iter().try_for_each(|item| item.encode(w))
    }

    fn decode<R: Read>(&mut self, r: &mut Reader<R>) -> Result<()> {
        self.iter_mut().try_for_each(|item| item.decode(r))
    }
}

macro_rules! tuple_layout {
    ($($name:ident . $idx:tt),+) => {
        impl<$($name: FixedLayout),+> FixedLayout for ($($name,)+) {
            const SIZE: usize = 0 $(+ $name::SIZE)+;

            fn encode<W: Write>(&self, w: &mut Writer<W>) -> Result<()> {
                $(self.$idx.encode(w)?;)+
                Ok(())
            }

            fn decode<R: Read>(&mut self, r: &mut Reader<R>) -> Result<()> {
                $(self.$idx.decode(r)?;)+
                Ok(())
            }
        }
    };
}

tuple_layout!(A.0);
tuple_layout!(A.0, B.1);
tuple_layout!(A.0, B.1, C.2);
tuple_layout!(A.0, B.1, C.2, D.3);
tuple_layout!(A.0, B.1, C.2, D.3, E.4);
tuple_layout!(A.0, B.1, C.2, D.3, E.4, F.5);

/// Implements [`FixedLayout`] for a struct by listing its fields in encoding order.
///
/// Every listed field type must itself implement `FixedLayout`, and must match the type of the
/// field it names.
///
/// ```
/// use ordered_binary_io::{fixed_layout, Endian, FixedLayout, Writer};
///
/// #[derive(Default)]
/// struct Sample {
///     valid: bool,
///     reading: i32,
/// }
///
/// fixed_layout!(Sample { valid: bool, reading: i32 });
///
/// assert_eq!(Sample::SIZE, 5);
///
/// let mut w = Writer::new(Vec::new(), Endian::Big);
/// w.write_fixed(&Sample { valid: true, reading: 7 }).unwrap();
/// assert_eq!(w.into_inner(), [1, 0, 0, 0, 7]);
/// ```
#[macro_export]
macro_rules! fixed_layout {
    ($ty:ty { $($field:ident : $fty:ty),+ $(,)? }) => {
        impl $crate::FixedLayout for $ty {
            const SIZE: usize = 0 $(+ <$fty as $crate::FixedLayout>::SIZE)+;

            fn encode<W: ::std::io::Write>(
                &self,
                w: &mut $crate::Writer<W>,
            ) -> $crate::Result<()> {
                $(<$fty as $crate::FixedLayout>::encode(&self.$field, w)?;)+
                Ok(())
            }

            fn decode<R: ::std::io::Read>(
                &mut self,
                r: &mut $crate::Reader<R>,
            ) -> $crate::Result<()> {
                $(<$fty as $crate::FixedLayout>::decode(&mut self.$field, r)?;)+
                Ok(())
            }
        }
    };
}
