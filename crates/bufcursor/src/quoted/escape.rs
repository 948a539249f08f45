//! Backslash escape decoding.

use bstr::BString;

use crate::{
    error::{ParseError, Result},
    read_cursor::ReadCursor,
    sink::ByteSink,
    source::Source,
};

/// Decodes the byte after a backslash in a single-character escape.
///
/// `a b e f n r t v 0` map to their control characters. Every other byte,
/// including `\`, the quote characters and unknown letters, stands for
/// itself.
#[must_use]
pub fn parse_escape_sequence(c: u8) -> u8 {
    match c {
        b'a' => 0x07,
        b'b' => 0x08,
        b'e' => 0x1B,
        b'f' => 0x0C,
        b'n' => b'\n',
        b'r' => b'\r',
        b't' => b'\t',
        b'v' => 0x0B,
        b'0' => 0x00,
        other => other,
    }
}

#[inline]
fn hex_val(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

/// Decodes the escape sequence at the cursor, which must sit on a `\`, and
/// appends its value to `out`.
///
/// `\xHH` yields one byte, `\N` (a NULL marker) yields nothing, anything else
/// goes through [`parse_escape_sequence`].
pub(crate) fn parse_complex_escape_sequence<O, S>(
    out: &mut O,
    cursor: &mut ReadCursor<S>,
) -> Result<()>
where
    O: ByteSink + ?Sized,
    S: Source,
{
    debug_assert_eq!(cursor.pending().first(), Some(&b'\\'));
    cursor.consume(1);
    let Some(c) = cursor.peek()? else {
        return Err(cursor.error(ParseError::UnterminatedEscape));
    };
    cursor.consume(1);

    match c {
        b'x' => {
            let mut digits = [0u8; 2];
            cursor.read_exact(&mut digits)?;
            match (hex_val(digits[0]), hex_val(digits[1])) {
                (Some(hi), Some(lo)) => out.write_byte((hi << 4) | lo),
                _ => {
                    return Err(cursor.error(ParseError::InvalidHexEscape {
                        digits: BString::from(&digits[..]),
                    }));
                }
            }
        }
        b'N' => {}
        other => out.write_byte(parse_escape_sequence(other)),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use rstest::rstest;

    use super::{parse_complex_escape_sequence, parse_escape_sequence};
    use crate::{ErrorKind, ParseError, ReadCursor, SliceSource};

    #[rstest]
    #[case(b'n', b'\n')]
    #[case(b't', b'\t')]
    #[case(b'r', b'\r')]
    #[case(b'0', 0)]
    #[case(b'e', 0x1B)]
    #[case(b'\\', b'\\')]
    #[case(b'\'', b'\'')]
    #[case(b'`', b'`')]
    #[case(b'"', b'"')]
    #[case(b'q', b'q')]
    fn single_char_table(#[case] input: u8, #[case] expected: u8) {
        assert_eq!(parse_escape_sequence(input), expected);
    }

    fn decode(input: &[u8], chunk: usize) -> crate::Result<Vec<u8>> {
        let mut cursor = ReadCursor::new(SliceSource::with_chunk_size(input, chunk));
        cursor.refill_if_exhausted()?;
        let mut out = Vec::new();
        parse_complex_escape_sequence(&mut out, &mut cursor)?;
        Ok(out)
    }

    #[rstest]
    #[case(1)]
    #[case(2)]
    #[case(16)]
    fn hex_escape_across_chunks(#[case] chunk: usize) {
        assert_eq!(decode(br"\x4a", chunk).unwrap(), b"J");
        assert_eq!(decode(br"\xFF", chunk).unwrap(), [0xFF_u8]);
        assert_eq!(decode(br"\N", chunk).unwrap(), b"");
        assert_eq!(decode(br"\n", chunk).unwrap(), b"\n");
    }

    #[test]
    fn hex_escape_short_read() {
        let err = decode(br"\x4", 16).unwrap_err();
        assert!(matches!(
            err.kind(),
            ErrorKind::ShortRead {
                expected: 2,
                read: 1
            }
        ));
    }

    #[test]
    fn hex_escape_invalid_digits() {
        let err = decode(br"\xg1", 16).unwrap_err();
        assert_eq!(
            err.as_parse_error(),
            Some(&ParseError::InvalidHexEscape {
                digits: "g1".into()
            })
        );
    }

    #[test]
    fn backslash_at_end_of_stream() {
        let err = decode(b"\\", 1).unwrap_err();
        assert_eq!(err.as_parse_error(), Some(&ParseError::UnterminatedEscape));
        assert_eq!(err.offset(), 1);
    }
}
