use memchr::memchr2;

use crate::{sink::ByteSink, write_cursor::WriteCursor};

/// Writes `value` wrapped in `quote`, escaping `\` and `quote` with a
/// backslash.
///
/// For the [`Quote`] delimiters the output reads back to `value` through
/// [`parse_quoted`] in either dialect. A letter used as `quote` would collide
/// with the escape table.
///
/// [`Quote`]: crate::Quote
/// [`parse_quoted`]: crate::parse_quoted
pub fn write_quoted<S: ByteSink>(value: &[u8], quote: u8, cursor: &mut WriteCursor<S>) {
    cursor.write_byte(quote);
    let mut rest = value;
    while let Some(i) = memchr2(b'\\', quote, rest) {
        cursor.write(&rest[..i]);
        cursor.write_byte(b'\\');
        cursor.write_byte(rest[i]);
        rest = &rest[i + 1..];
    }
    cursor.write(rest);
    cursor.write_byte(quote);
}
