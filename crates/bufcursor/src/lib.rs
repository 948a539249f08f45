//! Buffered byte cursors and the text codecs built on them.
//!
//! The crate has two halves that mirror each other:
//!
//! - The read side: a [`ReadCursor`] walks the chunks handed out by a
//!   [`Source`], refilling transparently at chunk boundaries. The quoted-string
//!   parser ([`parse_quoted`] and its named entry points) and the integer text
//!   parser ([`read_int_text`]) consume it.
//! - The write side: a [`WriteCursor`] fills a fixed chunk and flushes it into
//!   a [`ByteSink`]. The integer text encoder ([`write_int_text`]) and the
//!   quoted-string writer ([`write_quoted`]) produce into it.
//!
//! ```rust
//! use bufcursor::{ReadCursor, SliceSource, WriteCursor, read_quoted_string_with_sql_style};
//!
//! // Two-byte chunks: the quoted value straddles several refills.
//! let mut cursor = ReadCursor::new(SliceSource::with_chunk_size(b"'it''s' tail", 2));
//! let value = read_quoted_string_with_sql_style(&mut cursor).unwrap();
//! assert_eq!(value, "it's");
//!
//! let mut out = WriteCursor::new(Vec::new());
//! bufcursor::write_int_text(-42_i32, &mut out);
//! assert_eq!(out.finish(), b"-42");
//! ```

#![no_std]
extern crate alloc;

#[cfg(any(test, feature = "std"))]
extern crate std;

mod cursor;
mod error;
mod int_text;
mod options;
mod quoted;
mod read_cursor;
mod sink;
mod source;
mod write_cursor;

#[cfg(any(test, feature = "fuzzing"))]
pub mod chunk_utils;


pub use cursor::Cursor;
pub use error::{Error, ErrorKind, ParseError, Result, SourceError};
pub use int_text::{
    IntText, MAX_INT_WIDTH, SignedInt, UnsignedInt, digit_count, read_int_text, read_signed_text,
    read_unsigned_text, write_int_text, write_signed_text, write_unsigned_digits,
    write_unsigned_text,
};
pub use options::{ReadOptions, WriteOptions};
pub use quoted::{
    Quote, parse_escape_sequence, parse_quoted, read_back_quoted_string,
    read_back_quoted_string_into, read_back_quoted_string_with_sql_style,
    read_back_quoted_string_with_sql_style_into, read_double_quoted_string,
    read_double_quoted_string_into, read_double_quoted_string_with_sql_style,
    read_double_quoted_string_with_sql_style_into, read_quoted_string, read_quoted_string_into,
    read_quoted_string_with_sql_style, read_quoted_string_with_sql_style_into,
    read_string_until_eof, read_string_until_eof_into, write_quoted,
};
pub use read_cursor::ReadCursor;
#[cfg(feature = "std")]
pub use sink::IoSink;
pub use sink::ByteSink;
#[cfg(feature = "std")]
pub use source::ReaderSource;
pub use source::{ChunkedSource, Refill, Region, SliceSource, Source};
pub use write_cursor::WriteCursor;
