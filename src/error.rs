use std::io;
use std::sync::Arc;

/// Result type used by every operation of [`Writer`](crate::Writer) and [`Reader`](crate::Reader).
pub type Result<T> = core::result::Result<T, CodecError>;

/// Error type shared by [`Writer`](crate::Writer) and [`Reader`](crate::Reader).
///
/// Once an instance has returned one of these, it returns a clone of the same value from every
/// later call. Clones of an [`CodecError::Io`] share the underlying `io::Error`, and two `Io`
/// values compare equal only if they are clones of the same failure.
#[derive(Clone, Debug, thiserror::Error)]
pub enum CodecError {
    /// The source ended before an exact-size read could be completed.
    #[error("unexpected end of stream")]
    UnexpectedEof,

    /// A varint did not terminate within 10 bytes, or its value does not fit in 64 bits.
    #[error("varint overflows a 64-bit integer")]
    VarintOverflow,

    /// A string read with [`Reader::read_string`](crate::Reader::read_string) was not UTF-8.
    #[error("string is not valid UTF-8")]
    InvalidUtf8,

    /// The underlying channel reported a failure.
    #[error("stream I/O failed: {0}")]
    Io(#[source] Arc<io::Error>),
}

impl PartialEq for CodecError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::UnexpectedEof, Self::UnexpectedEof) => true,
            (Self::VarintOverflow, Self::VarintOverflow) => true,
            (Self::InvalidUtf8, Self::InvalidUtf8) => true,
            (Self::Io(a), Self::Io(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<io::Error> for CodecError {
    fn from(err: io::Error) -> Self {
        if err.kind() == io::ErrorKind::UnexpectedEof {
            Self::UnexpectedEof
        } else {
            Self::Io(Arc::new(err))
        }
    }
}

impl From<CodecError> for io::Error {
    fn from(err: CodecError) -> Self {
        let kind = match &err {
            CodecError::UnexpectedEof => io::ErrorKind::UnexpectedEof,
            CodecError::VarintOverflow | CodecError::InvalidUtf8 => io::ErrorKind::InvalidData,
            CodecError::Io(inner) => inner.kind(),
        };
        io::Error::new(kind, err)
    }
}
