use crate::error::{CodecError, Result};

/// Maximum number of bytes in the encoding of a 64-bit varint.
pub const MAX_VARINT_LEN: usize = 10;

const MORE: u8 = 0x80; // bit indicating there are more bytes
const MASK: u8 = 0x7f;

/// A source that can produce one byte at a time. This is all that the varint decoder needs.
pub trait ReadByte {
    /// Reads exactly one byte.
    fn read_byte(&mut self) -> Result<u8>;
}

impl ReadByte for &[u8] {
    fn read_byte(&mut self) -> Result<u8> {
        let (&b, rest) = self.split_first().ok_or(CodecError::UnexpectedEof)?;
        *self = rest;
        Ok(b)
    }
}

/// Maps a signed value onto an unsigned one so that values of small magnitude stay small:
/// `0, -1, 1, -2, 2, ...` become `0, 1, 2, 3, 4, ...`.
#[inline(always)]
pub fn zigzag_encode(value: i64) -> u64 {
    ((value << 1) ^ (value >> 63)) as u64
}

/// Inverse of [`zigzag_encode`].
#[inline(always)]
pub fn zigzag_decode(value: u64) -> i64 {
    ((value >> 1) as i64) ^ -((value & 1) as i64)
}

/// Returns the number of bytes [`encode_uvarint`] produces for `value`.
pub fn uvarint_len(value: u64) -> usize {
    let bits = 64 - (value | 1).leading_zeros() as usize;
    bits.div_ceil(7)
}

/// Encodes `value` into `buf` as an unsigned varint and returns the number of bytes used.
///
/// Each byte holds 7 bits of the value, least significant group first. The high bit of a byte
/// is set when another byte follows.
pub fn encode_uvarint(value: u64, buf: &mut [u8; MAX_VARINT_LEN]) -> usize {
    let mut n = value;
    let mut i = 0;
    while n >= MORE as u64 {
        buf[i] = (n as u8 & MASK) | MORE;
        n >>= 7;
        i += 1;
    }
    buf[i] = n as u8;
    i + 1
}

/// Encodes `value` into `buf` as a zig-zag signed varint and returns the number of bytes used.
pub fn encode_varint(value: i64, buf: &mut [u8; MAX_VARINT_LEN]) -> usize {
    encode_uvarint(zigzag_encode(value), buf)
}

/// Decodes an unsigned varint, reading one byte at a time from `src`.
///
/// Fails with [`CodecError::VarintOverflow`] if the encoding does not terminate within
/// [`MAX_VARINT_LEN`] bytes or if the tenth byte carries more than the single remaining bit.
pub fn read_uvarint<B: ReadByte + ?Sized>(src: &mut B) -> Result<u64> {
    let mut shift: u32 = 0;
    let mut n: u64 = 0;

    for i in 0..MAX_VARINT_LEN {
        let b = src.read_byte()?;
        if (b & MORE) == 0 {
            // The tenth byte only has room for bit 63.
            if i == MAX_VARINT_LEN - 1 && b > 1 {
                return Err(CodecError::VarintOverflow);
            }
            return Ok(n | (b as u64) << shift);
        }
        n |= ((b & MASK) as u64) << shift;
        shift += 7;
    }

    Err(CodecError::VarintOverflow)
}

/// Decodes a zig-zag signed varint, reading one byte at a time from `src`.
pub fn read_varint<B: ReadByte + ?Sized>(src: &mut B) -> Result<i64> {
    Ok(zigzag_decode(read_uvarint(src)?))
}
