//! Error types.

use core::fmt;

/// Error type.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Error {
    /// A length or value argument is out of range: even or oversized modulus,
    /// integer wider than the context, undersized output buffer.
    Value,

    /// Allocating limb storage failed.
    Memory,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Value => write!(f, "field error: value out of range"),
            Error::Memory => write!(f, "field error: allocation failed"),
        }
    }
}

impl core::error::Error for Error {}

/// Result type.
pub type Result<T> = core::result::Result<T, Error>;
