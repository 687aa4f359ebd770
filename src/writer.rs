use std::io::{self, Write};

use zerocopy::byteorder::{BigEndian, LittleEndian, F32, F64, I32, U32};
use zerocopy::{Immutable, IntoBytes};

use crate::endian::Endian;
use crate::error::{CodecError, Result};
use crate::layout::FixedLayout;
use crate::varint::{encode_uvarint, encode_varint, MAX_VARINT_LEN};

/// Encodes binary values into a [`Write`] sink, using the byte order chosen at construction.
///
/// The first failure reported by the sink is stored. That call returns it, and every later call
/// returns the same error without writing anything. See the [crate docs](crate) for the encoding.
pub struct Writer<W> {
    out: W,
    endian: Endian,
    error: Option<CodecError>,
}

impl<W: Write> Writer<W> {
    /// Constructor
    pub fn new(out: W, endian: Endian) -> Self {
        Self {
            out,
            endian,
            error: None,
        }
    }

    /// The byte order used for every multi-byte value.
    pub fn endian(&self) -> Endian {
        self.endian
    }

    /// The stored error, if any operation has failed.
    pub fn error(&self) -> Option<&CodecError> {
        self.error.as_ref()
    }

    /// Returns `Ok(())` if no operation has failed, or else the stored error.
    #[inline(always)]
    pub fn check(&self) -> Result<()> {
        match &self.error {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    /// Accesses the inner sink
    pub fn get_ref(&self) -> &W {
        &self.out
    }

    /// Accesses the inner sink mutably. Writing to it directly bypasses the stored error.
    pub fn inner_mut(&mut self) -> &mut W {
        &mut self.out
    }

    /// Extracts the inner sink
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Stores `err` unless an earlier error is already stored, and returns the stored one.
    fn poison(&mut self, err: CodecError) -> CodecError {
        if let Some(first) = &self.error {
            return first.clone();
        }
        log::debug!("{} writer stopped: {err}", self.endian);
        self.error = Some(err.clone());
        err
    }

    /// Writes all of `bytes` to the sink, or records the failure.
    fn put(&mut self, bytes: &[u8]) -> Result<()> {
        self.check()?;
        match self.out.write_all(bytes) {
            Ok(()) => Ok(()),
            Err(e) => Err(self.poison(e.into())),
        }
    }

    /// Encodes every element with `wire` into one buffer, then issues a single write.
    fn put_array<T: Copy, X: IntoBytes + Immutable>(
        &mut self,
        values: &[T],
        wire: fn(T) -> X,
    ) -> Result<()> {
        self.check()?;
        let words: Vec<X> = values.iter().map(|&v| wire(v)).collect();
        self.put(words.as_bytes())
    }

    /// Writes a small, fixed-size array of bytes.
    pub fn write_cbytes<const N: usize>(&mut self, value: [u8; N]) -> Result<()> {
        self.put(&value)
    }

    /// Writes `bytes` verbatim, with no length prefix.
    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        self.put(bytes)
    }

    /// Writes the UTF-8 bytes of `s` verbatim, with no length prefix.
    pub fn write_str(&mut self, s: &str) -> Result<()> {
        self.put(s.as_bytes())
    }

    /// Writes a single `u8` value
    pub fn write_u8(&mut self, value: u8) -> Result<()> {
        self.put(&[value])
    }

    /// Writes a single `i8` value
    pub fn write_i8(&mut self, value: i8) -> Result<()> {
        self.put(&[value as u8])
    }

    /// Writes a `bool` value. True is encoded as 1. False is encoded as 0.
    pub fn write_bool(&mut self, value: bool) -> Result<()> {
        self.write_u8(value as u8)
    }

    /// Writes a single `u16` value
    pub fn write_u16(&mut self, value: u16) -> Result<()> {
        self.write_cbytes(self.endian.encode_u16(value))
    }

    /// Writes a single `i16` value
    pub fn write_i16(&mut self, value: i16) -> Result<()> {
        self.write_cbytes(self.endian.encode_i16(value))
    }

    /// Writes a single `u32` value
    pub fn write_u32(&mut self, value: u32) -> Result<()> {
        self.write_cbytes(self.endian.encode_u32(value))
    }

    /// Writes a single `i32` value
    pub fn write_i32(&mut self, value: i32) -> Result<()> {
        self.write_cbytes(self.endian.encode_i32(value))
    }

    /// Writes a single `u64` value
    pub fn write_u64(&mut self, value: u64) -> Result<()> {
        self.write_cbytes(self.endian.encode_u64(value))
    }

    /// Writes a single `i64` value
    pub fn write_i64(&mut self, value: i64) -> Result<()> {
        self.write_cbytes(self.endian.encode_i64(value))
    }

    /// Writes an `f32` value, using the 4 bytes of its IEEE-754 bit pattern.
    pub fn write_f32(&mut self, value: f32) -> Result<()> {
        self.write_cbytes(self.endian.encode_f32(value))
    }

    /// Writes an `f64` value, using the 8 bytes of its IEEE-754 bit pattern.
    pub fn write_f64(&mut self, value: f64) -> Result<()> {
        self.write_cbytes(self.endian.encode_f64(value))
    }

    /// Writes each element as 4 bytes, in order, using a single write.
    pub fn write_f32_array(&mut self, values: &[f32]) -> Result<()> {
        match self.endian {
            Endian::Big => self.put_array(values, F32::<BigEndian>::new),
            Endian::Little => self.put_array(values, F32::<LittleEndian>::new),
        }
    }

    /// Writes each element as 8 bytes, in order, using a single write.
    pub fn write_f64_array(&mut self, values: &[f64]) -> Result<()> {
        match self.endian {
            Endian::Big => self.put_array(values, F64::<BigEndian>::new),
            Endian::Little => self.put_array(values, F64::<LittleEndian>::new),
        }
    }

    /// Writes each element as 4 bytes, in order, using a single write.
    pub fn write_i32_array(&mut self, values: &[i32]) -> Result<()> {
        match self.endian {
            Endian::Big => self.put_array(values, I32::<BigEndian>::new),
            Endian::Little => self.put_array(values, I32::<LittleEndian>::new),
        }
    }

    /// Writes each element as 4 bytes, in order, using a single write.
    pub fn write_u32_array(&mut self, values: &[u32]) -> Result<()> {
        match self.endian {
            Endian::Big => self.put_array(values, U32::<BigEndian>::new),
            Endian::Little => self.put_array(values, U32::<LittleEndian>::new),
        }
    }

    /// Encodes a `u64` value using a variable-length encoding of 1 to 10 bytes.
    pub fn write_uvarint(&mut self, value: u64) -> Result<()> {
        let mut buf = [0u8; MAX_VARINT_LEN];
        let len = encode_uvarint(value, &mut buf);
        self.put(&buf[..len])
    }

    /// Encodes an `i64` value using zig-zag followed by the [`write_uvarint`](Self::write_uvarint)
    /// encoding. Unlike a plain varint, small negative values stay short.
    pub fn write_varint(&mut self, value: i64) -> Result<()> {
        let mut buf = [0u8; MAX_VARINT_LEN];
        let len = encode_varint(value, &mut buf);
        self.put(&buf[..len])
    }

    /// Writes the fields of `value` in declaration order. No length or type tag is written.
    pub fn write_fixed<T: FixedLayout>(&mut self, value: &T) -> Result<()> {
        self.check()?;
        log::trace!("writing {} byte fixed-layout value", T::SIZE);
        value.encode(self)
    }

    /// Writes every element of `values` with [`write_fixed`](Self::write_fixed).
    pub fn write_fixed_array<T: FixedLayout>(&mut self, values: &[T]) -> Result<()> {
        self.check()?;
        values.iter().try_for_each(|value| value.encode(self))
    }

    /// Passes `buf` to a single write of the sink and returns the count it reports.
    pub fn write_raw(&mut self, buf: &[u8]) -> Result<usize> {
        self.check()?;
        match self.out.write(buf) {
            Ok(n) => Ok(n),
            Err(e) => Err(self.poison(e.into())),
        }
    }
}

impl Writer<Vec<u8>> {
    /// Creates a new `Writer` over a `Vec<u8>` with the given capacity.
    pub fn with_capacity(len: usize, endian: Endian) -> Self {
        Self::new(Vec::with_capacity(len), endian)
    }
}

impl<W: Write> Write for Writer<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Ok(self.write_raw(buf)?)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.check()?;
        match self.out.flush() {
            Ok(()) => Ok(()),
            Err(e) => Err(self.poison(e.into()).into()),
        }
    }
}
