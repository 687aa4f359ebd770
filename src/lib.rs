//! Reads and writes streams of binary values in a byte order chosen by the caller.
//!
//! A [`Writer`] wraps any [`std::io::Write`] and a [`Reader`] wraps any [`std::io::Read`].
//! The caller writes a sequence of typed values and later reads back the same sequence, in the
//! same order and with the same [`Endian`], to reconstruct them. Nothing in the stream describes
//! its own shape: lengths of byte arrays, numeric arrays and strings are agreed on out of band.
//!
//! Both types are "sticky": the first failure is stored in the instance, returned from the call
//! that hit it, and returned again from every later call without touching the channel. A long
//! sequence of operations can therefore be issued with `?` or checked once at the end with
//! [`Writer::check`] / [`Reader::check`].
//!
//! # Encoding
//! * Fixed-width integers and floats use exactly 2, 4 or 8 bytes in the configured byte order.
//!   Floats are encoded through their IEEE-754 bit pattern.
//! * Byte sequences and strings are written verbatim, with no length prefix.
//! * Numeric arrays are the concatenation of their elements' encodings.
//! * Unsigned varints use little-endian base-128 groups with a continuation bit, at most
//!   [`MAX_VARINT_LEN`] bytes. Signed varints are zig-zag encoded first.
//! * [`FixedLayout`] values are the concatenation of their fields, in declaration order, with no
//!   padding or tags.

#![forbid(unsafe_code)]
#![forbid(unused_must_use)]
#![warn(missing_docs)]

mod endian;
mod error;
mod layout;
mod reader;
mod varint;
mod writer;


pub use endian::{Endian, ParseEndianError};
pub use error::{CodecError, Result};
pub use layout::FixedLayout;
pub use reader::Reader;
pub use varint::{
    encode_uvarint, encode_varint, read_uvarint, read_varint, uvarint_len, zigzag_decode,
    zigzag_encode, ReadByte, MAX_VARINT_LEN,
};
pub use writer::Writer;
