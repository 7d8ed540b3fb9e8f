use std::fmt;
use thiserror::Error;

/// Why a value is carrying the Invalid marker instead of a concrete instant
/// or unit breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidKind {
    /// A string input did not conform to the accepted ISO or pattern form.
    Unparsable,
    /// The input was not one of the enumerated construction shapes.
    UnsupportedShape,
    /// A duration mapping contained a key outside the recognized unit set.
    UnknownUnit,
    /// The computed civil time cannot be represented (range overflow or a
    /// local-zone gap).
    OutOfRange,
}

impl fmt::Display for InvalidKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidKind::Unparsable => write!(f, "unparsable input"),
            InvalidKind::UnsupportedShape => write!(f, "unsupported input shape"),
            InvalidKind::UnknownUnit => write!(f, "unrecognized duration unit"),
            InvalidKind::OutOfRange => write!(f, "out of representable range"),
        }
    }
}

/// Terminal error raised when an Invalid value reaches a consuming
/// operation. Construction itself never fails; invalidity travels as data
/// until a caller asks for a concrete result.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TemporalError {
    #[error("operation on invalid date value: {0}")]
    InvalidDate(InvalidKind),
    #[error("operation on invalid duration value: {0}")]
    InvalidDuration(InvalidKind),
}

pub type TemporalResult<T> = Result<T, TemporalError>;
