//! Error types.

use core::fmt;

/// Error type.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Error {
    /// A required argument was not supplied.
    Null,

    /// A length or value argument is out of range.
    Value,

    /// Coordinates do not describe a point on the curve.
    EcPoint,

    /// Points belong to different curves, or the operation is not defined
    /// for this curve.
    EcCurve,

    /// Allocating scratch or point storage failed.
    Memory,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Error::Null => "missing argument",
            Error::Value => "value out of range",
            Error::EcPoint => "point is not on the curve",
            Error::EcCurve => "curve mismatch",
            Error::Memory => "allocation failed",
        })
    }
}

impl core::error::Error for Error {}

impl From<montfield::Error> for Error {
    fn from(err: montfield::Error) -> Self {
        match err {
            montfield::Error::Value => Error::Value,
            montfield::Error::Memory => Error::Memory,
        }
    }
}

/// Result type.
pub type Result<T> = core::result::Result<T, Error>;
