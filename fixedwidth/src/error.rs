//! Basic error reporting.

use std::error::Error as StdError;
use std::fmt::{self, Debug, Display, Formatter};

/// Broad classification of a failure.  Callers which only want to
/// know what sort of thing went wrong (rather than the details)
/// should match on this.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A width, bit index or bit field lies outside the value.
    OutOfRange,
    /// The operation is not (yet) defined for this kind of value, or
    /// the input uses a notation we do not accept.
    Unsupported,
    /// The input is malformed.
    InvalidArgument,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        f.write_str(match self {
            ErrorKind::OutOfRange => "out of range",
            ErrorKind::Unsupported => "unsupported",
            ErrorKind::InvalidArgument => "invalid argument",
        })
    }
}

/// Represents a failure of one of the operations on
/// [`FixedWidthInteger`](crate::FixedWidthInteger) or of the free
/// helper functions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// A width was requested which is not in 1..=64.
    WidthOutOfRange(u32),
    /// `expand` was asked to make a value narrower.
    NotWider { current: u32, requested: u32 },
    /// A bit field `[msb, lsb]` does not lie within the value.
    FieldOutOfRange { msb: u32, lsb: u32, width: u32 },
    /// A bit index is not less than the width of the value.
    BitIndexOutOfRange { index: u32, width: u32 },
    /// Sign extension of signed values has not been designed yet.
    SignedExpand,
    /// Saturation of signed values has not been designed yet.
    SignedSaturate,
    /// A hexadecimal string contained a character which is not a hex
    /// digit.
    InvalidHexDigit(char),
    /// A decimal string could not be parsed.
    InvalidDecimal(String),
    /// A binary string contained a character other than 0 or 1.
    InvalidBinaryDigit(char),
    /// The text to be parsed was empty.
    EmptyText,
    /// The text denotes a value which needs more than 64 bits.
    TooLarge(String),
    /// The radix name or number is not one we know.
    UnknownRadix(String),
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::WidthOutOfRange(_)
            | Error::FieldOutOfRange { .. }
            | Error::BitIndexOutOfRange { .. }
            | Error::TooLarge(_) => ErrorKind::OutOfRange,
            Error::SignedExpand | Error::SignedSaturate | Error::InvalidHexDigit(_) => {
                ErrorKind::Unsupported
            }
            Error::NotWider { .. }
            | Error::InvalidDecimal(_)
            | Error::InvalidBinaryDigit(_)
            | Error::EmptyText
            | Error::UnknownRadix(_) => ErrorKind::InvalidArgument,
        }
    }
}

impl StdError for Error {}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        match self {
            Error::WidthOutOfRange(w) => {
                write!(f, "width {w} is out of range (must be between 1 and 64)")
            }
            Error::NotWider { current, requested } => write!(
                f,
                "cannot expand a {current}-bit value to {requested} bits"
            ),
            Error::FieldOutOfRange { msb, lsb, width } => write!(
                f,
                "bit field [{msb}, {lsb}] does not lie within a {width}-bit value"
            ),
            Error::BitIndexOutOfRange { index, width } => {
                write!(f, "bit index {index} is out of range for a {width}-bit value")
            }
            Error::SignedExpand => f.write_str("expanding a signed value is not supported"),
            Error::SignedSaturate => f.write_str("saturating a signed value is not supported"),
            Error::InvalidHexDigit(ch) => write!(f, "{ch:?} is not a hexadecimal digit"),
            Error::InvalidDecimal(text) => write!(f, "{text:?} is not a decimal number"),
            Error::InvalidBinaryDigit(ch) => write!(f, "{ch:?} is not a binary digit"),
            Error::EmptyText => f.write_str("no digits were given"),
            Error::TooLarge(text) => write!(f, "{text:?} does not fit in 64 bits"),
            Error::UnknownRadix(name) => write!(f, "{name:?} is not a known radix"),
        }
    }
}

#[test]
fn test_error_kinds() {
    assert_eq!(Error::WidthOutOfRange(65).kind(), ErrorKind::OutOfRange);
    assert_eq!(Error::SignedExpand.kind(), ErrorKind::Unsupported);
    assert_eq!(Error::SignedSaturate.kind(), ErrorKind::Unsupported);
    assert_eq!(Error::InvalidHexDigit('g').kind(), ErrorKind::Unsupported);
    assert_eq!(
        Error::InvalidDecimal("12a".to_string()).kind(),
        ErrorKind::InvalidArgument
    );
}

#[test]
fn test_error_display() {
    assert_eq!(
        Error::BitIndexOutOfRange { index: 8, width: 8 }.to_string(),
        "bit index 8 is out of range for a 8-bit value"
    );
    assert_eq!(
        Error::InvalidHexDigit('z').to_string(),
        "'z' is not a hexadecimal digit"
    );
}
