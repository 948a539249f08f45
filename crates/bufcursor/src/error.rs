use alloc::boxed::Box;
use core::fmt;

use bstr::BString;
use thiserror::Error;

/// A transport-level failure raised by a concrete [`Source`](crate::Source).
///
/// The cursor never inspects it; it is carried to the caller unchanged and can
/// be downcast back to the source's own error type.
pub type SourceError = Box<dyn core::error::Error + Send + Sync + 'static>;

/// Result alias used throughout the crate.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// An error raised while reading or parsing, tagged with the absolute stream
/// offset at which it happened.
#[derive(Error, Debug)]
#[error("{kind} at byte {offset}")]
pub struct Error {
    pub(crate) kind: ErrorKind,
    pub(crate) offset: u64,
}

impl Error {
    pub(crate) fn new(kind: impl Into<ErrorKind>, offset: u64) -> Self {
        Self {
            kind: kind.into(),
            offset,
        }
    }

    /// What went wrong.
    #[must_use]
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// Number of bytes the cursor had passed when the error was raised.
    #[must_use]
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Discards the offset and returns the error kind.
    #[must_use]
    pub fn into_kind(self) -> ErrorKind {
        self.kind
    }

    /// The parse error, if this is one.
    #[must_use]
    pub fn as_parse_error(&self) -> Option<&ParseError> {
        match &self.kind {
            ErrorKind::Parse(err) => Some(err),
            _ => None,
        }
    }
}

/// The failure taxonomy shared by every read and parse operation.
#[derive(Error, Debug)]
pub enum ErrorKind {
    /// A strict skip asked for more bytes than the source could ever provide.
    #[error("attempt to read after end of stream ({missing} bytes missing)")]
    EndOfStream {
        /// Bytes that were still owed when the source ran dry.
        missing: usize,
    },
    /// A fixed-width read could not be fully satisfied.
    #[error("cannot read all data: expected {expected} bytes, got {read}")]
    ShortRead {
        /// Bytes requested.
        expected: usize,
        /// Bytes actually available before end of stream.
        read: usize,
    },
    /// Malformed input.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),
    /// The concrete source failed while refilling.
    #[error("source error: {0}")]
    Source(#[source] SourceError),
}

/// Malformed-input errors from the text codecs.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The value did not start with the expected quote byte.
    #[error("cannot parse quoted string: expected opening quote {}", quote_byte(.quote))]
    ExpectedOpeningQuote {
        /// The delimiter that was expected.
        quote: u8,
    },
    /// The stream ended inside a quoted value.
    #[error("cannot parse quoted string: expected closing quote {}", quote_byte(.quote))]
    ExpectedClosingQuote {
        /// The delimiter that was expected.
        quote: u8,
    },
    /// The stream ended right after a backslash.
    #[error("cannot parse escape sequence: unexpected end of stream")]
    UnterminatedEscape,
    /// A `\x` escape was followed by something other than two hex digits.
    #[error("invalid hex escape \\x{digits}")]
    InvalidHexEscape {
        /// The two bytes that followed `\x`.
        digits: BString,
    },
    /// An integer was expected but no decimal digit was found.
    #[error("expected decimal digit")]
    ExpectedDigit,
    /// The decimal text does not fit the requested integer width.
    #[error("integer does not fit the target type")]
    IntegerOverflow,
}

/// Renders a delimiter byte as itself when it is printable ASCII, and as
/// `\xHH` otherwise.
struct QuoteByte(u8);

#[allow(clippy::trivially_copy_pass_by_ref)]
fn quote_byte(quote: &u8) -> QuoteByte {
    QuoteByte(*quote)
}

impl fmt::Display for QuoteByte {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_ascii_graphic() {
            write!(f, "{}", char::from(self.0))
        } else {
            write!(f, "\\x{:02X}", self.0)
        }
    }
}
