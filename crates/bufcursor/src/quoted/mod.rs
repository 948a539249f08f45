//! Quoted, escaped string values.
//!
//! The parser walks a [`ReadCursor`] chunk by chunk. Inside a chunk it jumps
//! straight to the next `\` or quote byte with `memchr2` and appends the run
//! before it to the output in one piece, so a long value that spans many
//! chunks is never staged in a temporary first.
//!
//! Two dialects are supported. In both, `\` starts an escape sequence. With
//! SQL-style doubling enabled, a doubled quote byte inside the value is a
//! literal quote as well.

mod escape;
mod write;


use bstr::BString;
use memchr::memchr2;

pub use escape::parse_escape_sequence;
pub use write::write_quoted;

use crate::{
    error::{ParseError, Result},
    read_cursor::ReadCursor,
    sink::ByteSink,
    source::Source,
};

/// The delimiters used by the named entry points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quote {
    /// `'`, SQL string literals.
    Single,
    /// `` ` ``, SQL identifiers.
    Back,
    /// `"`, generic quoted text.
    Double,
}

impl Quote {
    /// The delimiter byte.
    #[must_use]
    pub const fn byte(self) -> u8 {
        match self {
            Quote::Single => b'\'',
            Quote::Back => b'`',
            Quote::Double => b'"',
        }
    }
}

impl From<Quote> for u8 {
    fn from(quote: Quote) -> Self {
        quote.byte()
    }
}

/// Parses a value delimited by `quote`, appending the decoded bytes to `out`.
///
/// The cursor must sit on the opening quote; on success it is left just past
/// the closing one. On failure `out` holds whatever was decoded so far and the
/// cursor has consumed the bytes examined.
///
/// # Errors
///
/// - [`ParseError::ExpectedOpeningQuote`] if the stream is empty or does not
///   start with `quote`.
/// - [`ParseError::ExpectedClosingQuote`] if the stream ends inside the value.
/// - Escape failures: [`ParseError::UnterminatedEscape`],
///   [`ParseError::InvalidHexEscape`], or
///   [`ErrorKind::ShortRead`](crate::ErrorKind::ShortRead) for a truncated
///   `\x`.
pub fn parse_quoted<O, S>(
    out: &mut O,
    cursor: &mut ReadCursor<S>,
    quote: u8,
    sql_style_doubling: bool,
) -> Result<()>
where
    O: ByteSink + ?Sized,
    S: Source,
{
    if cursor.peek()? != Some(quote) {
        return Err(cursor.error(ParseError::ExpectedOpeningQuote {
            quote,
        }));
    }
    cursor.consume(1);

    while !cursor.at_end()? {
        let (run, found) = {
            let pending = cursor.pending();
            let run = memchr2(b'\\', quote, pending).unwrap_or(pending.len());
            out.write(&pending[..run]);
            (run, pending.get(run).copied())
        };
        cursor.consume(run);

        match found {
            // Chunk ran out before a delimiter; `at_end` refills.
            None => {}
            Some(b) if b == quote => {
                cursor.consume(1);
                if sql_style_doubling && cursor.peek()? == Some(quote) {
                    out.write_byte(quote);
                    cursor.consume(1);
                    continue;
                }
                return Ok(());
            }
            Some(_) => escape::parse_complex_escape_sequence(out, cursor)?,
        }
    }

    Err(cursor.error(ParseError::ExpectedClosingQuote {
        quote,
    }))
}

/// Copies every remaining byte into `out`, without escape processing.
///
/// # Errors
///
/// Only source failures.
pub fn read_string_until_eof_into<O, S>(out: &mut O, cursor: &mut ReadCursor<S>) -> Result<()>
where
    O: ByteSink + ?Sized,
    S: Source,
{
    while !cursor.at_end()? {
        let pending = cursor.pending();
        let n = pending.len();
        out.write(pending);
        cursor.consume(n);
    }
    Ok(())
}

/// Reads everything up to the end of the stream into a fresh string.
///
/// # Errors
///
/// Only source failures.
pub fn read_string_until_eof<S: Source>(cursor: &mut ReadCursor<S>) -> Result<BString> {
    let mut out = BString::default();
    read_string_until_eof_into(&mut out, cursor)?;
    Ok(out)
}

macro_rules! quoted_entry_points {
    ($(
        $(#[$meta:meta])*
        ($into:ident, $fresh:ident, $quote:expr, $sql:expr);
    )*) => {$(
        $(#[$meta])*
        ///
        /// Appends to `out`.
        ///
        /// # Errors
        ///
        /// See [`parse_quoted`].
        pub fn $into<O, S>(out: &mut O, cursor: &mut ReadCursor<S>) -> Result<()>
        where
            O: ByteSink + ?Sized,
            S: Source,
        {
            parse_quoted(out, cursor, $quote.byte(), $sql)
        }

        $(#[$meta])*
        ///
        /// Returns the value as a fresh string.
        ///
        /// # Errors
        ///
        /// See [`parse_quoted`].
        pub fn $fresh<S: Source>(cursor: &mut ReadCursor<S>) -> Result<BString> {
            let mut out = BString::default();
            $into(&mut out, cursor)?;
            Ok(out)
        }
    )*};
}

quoted_entry_points! {
    /// Parses a `'`-quoted SQL string literal with backslash escapes.
    (read_quoted_string_into, read_quoted_string, Quote::Single, false);
    /// Parses a `'`-quoted SQL string literal where `''` is also a literal
    /// quote.
    (read_quoted_string_with_sql_style_into, read_quoted_string_with_sql_style, Quote::Single, true);
    /// Parses a `` ` ``-quoted SQL identifier with backslash escapes.
    (read_back_quoted_string_into, read_back_quoted_string, Quote::Back, false);
    /// Parses a `` ` ``-quoted SQL identifier where ``` `` ``` is also a
    /// literal backtick.
    (read_back_quoted_string_with_sql_style_into, read_back_quoted_string_with_sql_style, Quote::Back, true);
    /// Parses a `"`-quoted string with backslash escapes.
    (read_double_quoted_string_into, read_double_quoted_string, Quote::Double, false);
    /// Parses a `"`-quoted string where `""` is also a literal quote.
    (read_double_quoted_string_with_sql_style_into, read_double_quoted_string_with_sql_style, Quote::Double, true);
}
