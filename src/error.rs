use std::error;
use std::fmt;

/// Represents errors that can occur while decoding sensor data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The supplied buffer is shorter than the structure being decoded. Contains the
    /// name of the structure, the number of bytes required, and the number available.
    BufferTooShort {
        what: &'static str,
        wanted: usize,
        got: usize,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::BufferTooShort { what, wanted, got } => {
                write!(
                    f,
                    "buffer too short for {}: wanted {} bytes, got {}",
                    what, wanted, got
                )
            }
        }
    }
}

impl error::Error for Error {}

/// A specialized `Result` type for packet decoding operations.
pub type Result<T> = std::result::Result<T, Error>;
