use std::io::{self, Read};

use zerocopy::byteorder::{BigEndian, LittleEndian, F32, F64, I32, U32};
use zerocopy::{FromBytes, Immutable, KnownLayout};

use crate::endian::Endian;
use crate::error::{CodecError, Result};
use crate::layout::FixedLayout;
use crate::varint::{read_uvarint, read_varint, ReadByte};

/// Decodes binary values from a [`Read`] source, using the byte order chosen at construction.
///
/// Values must be read in the same order, with the same lengths, as they were written. Every
/// read is exact: if the source ends early the read fails with [`CodecError::UnexpectedEof`].
///
/// The first failure is stored. That call returns it, and every later call returns the same
/// error without reading from the source.
///
/// Reads of byte arrays and numeric arrays with a length of zero return `Ok(None)` rather than
/// an empty vector, and do not touch the source.
pub struct Reader<R> {
    input: R,
    endian: Endian,
    error: Option<CodecError>,
}

impl<R: Read> Reader<R> {
    /// Constructor
    pub fn new(input: R, endian: Endian) -> Self {
        Self {
            input,
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

    /// Accesses the inner source
    pub fn get_ref(&self) -> &R {
        &self.input
    }

    /// Accesses the inner source mutably. Reading from it directly bypasses the stored error.
    pub fn inner_mut(&mut self) -> &mut R {
        &mut self.input
    }

    /// Extracts the inner source
    pub fn into_inner(self) -> R {
        self.input
    }

    /// Stores `err` unless an earlier error is already stored, and returns the stored one.
    fn poison(&mut self, err: CodecError) -> CodecError {
        if let Some(first) = &self.error {
            return first.clone();
        }
        log::debug!("{} reader stopped: {err}", self.endian);
        self.error = Some(err.clone());
        err
    }

    /// Records `result`'s error, if it has one.
    fn track<T>(&mut self, result: Result<T>) -> Result<T> {
        result.map_err(|err| self.poison(err))
    }

    /// Fills all of `buf` from the source, or records the failure.
    fn fill(&mut self, buf: &mut [u8]) -> Result<()> {
        self.check()?;
        match self.input.read_exact(buf) {
            Ok(()) => Ok(()),
            Err(e) => Err(self.poison(e.into())),
        }
    }

    /// Reads exactly `len` bytes into a buffer that only grows as data arrives, so a length
    /// larger than the source fails with [`CodecError::UnexpectedEof`] instead of allocating it.
    fn fill_vec(&mut self, len: usize) -> Result<Vec<u8>> {
        self.check()?;
        let mut data = Vec::new();
        let result = (&mut self.input).take(len as u64).read_to_end(&mut data);
        match result {
            Ok(n) if n == len => Ok(data),
            Ok(_) => Err(self.poison(CodecError::UnexpectedEof)),
            Err(e) => Err(self.poison(e.into())),
        }
    }

    /// Reads `n` wire-format elements with one exact read, then converts each with `native`.
    fn get_array<X, T>(&mut self, n: usize, native: fn(X) -> T) -> Result<Option<Vec<T>>>
    where
        X: FromBytes + KnownLayout + Immutable + Copy,
    {
        self.check()?;
        if n == 0 {
            return Ok(None);
        }
        // No source can hold more than `usize::MAX` bytes.
        let Some(len) = n.checked_mul(core::mem::size_of::<X>()) else {
            return Err(self.poison(CodecError::UnexpectedEof));
        };
        let data = self.fill_vec(len)?;
        let words = <[X]>::ref_from_bytes(&data).map_err(|_| CodecError::UnexpectedEof);
        let words = self.track(words)?;
        Ok(Some(words.iter().map(|&w| native(w)).collect()))
    }

    /// Reads a small array of bytes, with a constant length.
    #[inline(always)]
    pub fn read_cbytes<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut buf = [0u8; N];
        self.fill(&mut buf)?;
        Ok(buf)
    }

    /// Reads a single `u8` value.
    #[inline(always)]
    pub fn read_u8(&mut self) -> Result<u8> {
        let [b] = self.read_cbytes::<1>()?;
        Ok(b)
    }

    /// Reads a single `i8` value.
    #[inline(always)]
    pub fn read_i8(&mut self) -> Result<i8> {
        Ok(self.read_u8()? as i8)
    }

    /// Reads a `bool` value. Any non-zero byte is `true`.
    #[inline(always)]
    pub fn read_bool(&mut self) -> Result<bool> {
        Ok(self.read_u8()? != 0)
    }

    /// Reads a `u16` in the configured byte order.
    #[inline(always)]
    pub fn read_u16(&mut self) -> Result<u16> {
        Ok(self.endian.decode_u16(self.read_cbytes()?))
    }

    /// Reads a `i16` in the configured byte order.
    #[inline(always)]
    pub fn read_i16(&mut self) -> Result<i16> {
        Ok(self.endian.decode_i16(self.read_cbytes()?))
    }

    /// Reads a `u32` in the configured byte order.
    #[inline(always)]
    pub fn read_u32(&mut self) -> Result<u32> {
        Ok(self.endian.decode_u32(self.read_cbytes()?))
    }

    /// Reads a `i32` in the configured byte order.
    #[inline(always)]
    pub fn read_i32(&mut self) -> Result<i32> {
        Ok(self.endian.decode_i32(self.read_cbytes()?))
    }

    /// Reads a `u64` in the configured byte order.
    #[inline(always)]
    pub fn read_u64(&mut self) -> Result<u64> {
        Ok(self.endian.decode_u64(self.read_cbytes()?))
    }

    /// Reads a `i64` in the configured byte order.
    #[inline(always)]
    pub fn read_i64(&mut self) -> Result<i64> {
        Ok(self.endian.decode_i64(self.read_cbytes()?))
    }

    /// Reads an `f32` from the 4 bytes of its IEEE-754 bit pattern.
    #[inline(always)]
    pub fn read_f32(&mut self) -> Result<f32> {
        Ok(self.endian.decode_f32(self.read_cbytes()?))
    }

    /// Reads an `f64` from the 8 bytes of its IEEE-754 bit pattern.
    #[inline(always)]
    pub fn read_f64(&mut self) -> Result<f64> {
        Ok(self.endian.decode_f64(self.read_cbytes()?))
    }

    /// Reads exactly `len` bytes. Returns `Ok(None)` if `len` is zero.
    pub fn read_bytes(&mut self, len: usize) -> Result<Option<Vec<u8>>> {
        self.check()?;
        if len == 0 {
            return Ok(None);
        }
        Ok(Some(self.fill_vec(len)?))
    }

    /// Reads `len` elements of 4 bytes each. Returns `Ok(None)` if `len` is zero.
    pub fn read_f32_array(&mut self, len: usize) -> Result<Option<Vec<f32>>> {
        match self.endian {
            Endian::Big => self.get_array(len, F32::<BigEndian>::get),
            Endian::Little => self.get_array(len, F32::<LittleEndian>::get),
        }
    }

    /// Reads `len` elements of 8 bytes each. Returns `Ok(None)` if `len` is zero.
    pub fn read_f64_array(&mut self, len: usize) -> Result<Option<Vec<f64>>> {
        match self.endian {
            Endian::Big => self.get_array(len, F64::<BigEndian>::get),
            Endian::Little => self.get_array(len, F64::<LittleEndian>::get),
        }
    }

    /// Reads `len` elements of 4 bytes each. Returns `Ok(None)` if `len` is zero.
    pub fn read_i32_array(&mut self, len: usize) -> Result<Option<Vec<i32>>> {
        match self.endian {
            Endian::Big => self.get_array(len, I32::<BigEndian>::get),
            Endian::Little => self.get_array(len, I32::<LittleEndian>::get),
        }
    }

    /// Reads `len` elements of 4 bytes each. Returns `Ok(None)` if `len` is zero.
    pub fn read_u32_array(&mut self, len: usize) -> Result<Option<Vec<u32>>> {
        match self.endian {
            Endian::Big => self.get_array(len, U32::<BigEndian>::get),
            Endian::Little => self.get_array(len, U32::<LittleEndian>::get),
        }
    }

    /// Reads `len` bytes and validates that they are well-formed UTF-8.
    ///
    /// Returns an empty string, without reading, if `len` is zero. Malformed input fails with
    /// [`CodecError::InvalidUtf8`], which is stored like any other error.
    pub fn read_string(&mut self, len: usize) -> Result<String> {
        let Some(bytes) = self.read_bytes(len)? else {
            return Ok(String::new());
        };
        let decoded = String::from_utf8(bytes).map_err(|_| CodecError::InvalidUtf8);
        self.track(decoded)
    }

    /// Reads `len` bytes as UTF-8. Byte sequences that are not valid UTF-8 are replaced with the
    /// Unicode replacement character.
    pub fn read_string_lossy(&mut self, len: usize) -> Result<String> {
        let Some(bytes) = self.read_bytes(len)? else {
            return Ok(String::new());
        };
        Ok(match String::from_utf8(bytes) {
            Ok(s) => s,
            Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
        })
    }

    /// Reads `len` bytes as a byte string. The contents are not validated.
    #[cfg(feature = "bstr")]
    pub fn read_bstring(&mut self, len: usize) -> Result<bstr::BString> {
        Ok(bstr::BString::from(self.read_bytes(len)?.unwrap_or_default()))
    }

    /// Reads an unsigned varint written by [`Writer::write_uvarint`](crate::Writer::write_uvarint).
    pub fn read_uvarint(&mut self) -> Result<u64> {
        self.check()?;
        let decoded = read_uvarint(self);
        self.track(decoded)
    }

    /// Reads a signed varint written by [`Writer::write_varint`](crate::Writer::write_varint).
    pub fn read_varint(&mut self) -> Result<i64> {
        self.check()?;
        let decoded = read_varint(self);
        self.track(decoded)
    }

    /// Decodes the fields of `value`, in declaration order, overwriting it in place.
    pub fn read_fixed_into<T: FixedLayout>(&mut self, value: &mut T) -> Result<()> {
        self.check()?;
        log::trace!("reading {} byte fixed-layout value", T::SIZE);
        value.decode(self)
    }

    /// Decodes a new `T`, starting from its default value.
    pub fn read_fixed<T: FixedLayout + Default>(&mut self) -> Result<T> {
        let mut value = T::default();
        self.read_fixed_into(&mut value)?;
        Ok(value)
    }

    /// Decodes `len` consecutive `T` values. Returns `Ok(None)` if `len` is zero.
    pub fn read_fixed_array<T: FixedLayout + Default>(
        &mut self,
        len: usize,
    ) -> Result<Option<Vec<T>>> {
        self.check()?;
        if len == 0 {
            return Ok(None);
        }
        let values = (0..len)
            .map(|_| self.read_fixed())
            .collect::<Result<Vec<T>>>()?;
        Ok(Some(values))
    }

    /// Fills all of `buf` from the source and returns its length. A source that ends before
    /// `buf` is full is an error, not a short read.
    pub fn read_raw(&mut self, buf: &mut [u8]) -> Result<usize> {
        self.fill(buf)?;
        Ok(buf.len())
    }
}

impl<R: Read> ReadByte for Reader<R> {
    fn read_byte(&mut self) -> Result<u8> {
        self.read_u8()
    }
}

/// Passthrough to [`Reader::read_raw`]. Every `read` is exact-size: end of stream is an
/// [`io::ErrorKind::UnexpectedEof`] error, never `Ok(0)`, so do not hand a `Reader` to
/// `read_to_end`, `io::copy` or other consumers that read until end of stream.
impl<R: Read> Read for Reader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        Ok(self.read_raw(buf)?)
    }
}
