#![expect(missing_docs)]

use bufcursor::{
    ChunkedSource, ReadCursor, SliceSource, read_back_quoted_string, read_int_text,
    read_quoted_string, read_quoted_string_with_sql_style,
};

fn cursor(input: &[u8]) -> ReadCursor<SliceSource<'_>> {
    ReadCursor::new(SliceSource::with_chunk_size(input, 2))
}

#[test]
fn snapshot_quote_errors() {
    let err = read_quoted_string_with_sql_style(&mut cursor(b"'abc")).unwrap_err();
    insta::assert_snapshot!(err, @"parse error: cannot parse quoted string: expected closing quote ' at byte 4");

    let err = read_back_quoted_string(&mut cursor(b"abc`")).unwrap_err();
    insta::assert_snapshot!(err, @"parse error: cannot parse quoted string: expected opening quote ` at byte 0");
}

#[test]
fn snapshot_escape_errors() {
    let err = read_quoted_string(&mut cursor(br"'ok\xg1'")).unwrap_err();
    insta::assert_snapshot!(err, @r"parse error: invalid hex escape \xg1 at byte 7");

    let err = read_quoted_string(&mut cursor(br"'ok\x4")).unwrap_err();
    insta::assert_snapshot!(err, @"cannot read all data: expected 2 bytes, got 1 at byte 6");

    let err = read_quoted_string(&mut cursor(br"'ok\")).unwrap_err();
    insta::assert_snapshot!(err, @"parse error: cannot parse escape sequence: unexpected end of stream at byte 4");
}

#[test]
fn snapshot_stream_errors() {
    let mut c = ReadCursor::new(ChunkedSource::from_chunks([&b"ab"[..], b"c"]));
    let err = c.skip(5).unwrap_err();
    insta::assert_snapshot!(err, @"attempt to read after end of stream (2 bytes missing) at byte 3");

    let err = read_int_text::<u8, _>(&mut cursor(b"1000")).unwrap_err();
    insta::assert_snapshot!(err, @"parse error: integer does not fit the target type at byte 4");

    let err = read_int_text::<i32, _>(&mut cursor(b"-x")).unwrap_err();
    insta::assert_snapshot!(err, @"parse error: expected decimal digit at byte 1");
}
