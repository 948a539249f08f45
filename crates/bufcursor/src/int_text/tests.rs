use alloc::{string::ToString, vec::Vec};

use quickcheck::QuickCheck;
use rstest::rstest;

use super::*;
use crate::{ErrorKind, SliceSource};

fn tests() -> u64 {
    #[cfg(not(any(miri, feature = "test-fast")))]
    let tests = if is_ci::cached() { 10_000 } else { 1_000 };
    #[cfg(any(miri, feature = "test-fast"))]
    let tests = 10;
    tests
}

fn format<T: IntText>(x: T, capacity: usize) -> Vec<u8> {
    let mut w = WriteCursor::with_capacity(capacity, Vec::new());
    write_int_text(x, &mut w);
    w.finish()
}

fn parse<T: IntText>(text: &[u8], chunk: usize) -> crate::Result<T> {
    read_int_text(&mut ReadCursor::new(SliceSource::with_chunk_size(text, chunk)))
}

#[rstest]
#[case(0, 1)]
#[case(9, 1)]
#[case(10, 2)]
#[case(99, 2)]
#[case(100, 3)]
#[case(99_999, 5)]
#[case(100_000, 6)]
#[case(9_999_999, 7)]
#[case(99_999_999_999, 11)]
#[case(999_999_999_999, 12)]
#[case(1_000_000_000_000, 13)]
#[case(99_999_999_999_999, 14)]
#[case(u64::MAX, 20)]
fn digit_count_ladder(#[case] x: u64, #[case] expected: u32) {
    assert_eq!(digit_count(x), expected);
}

#[test]
fn digit_count_matches_decimal_length() {
    fn prop(x: u64, shift: u8) -> bool {
        // Spread samples over every magnitude.
        let x = x >> (shift % 64);
        digit_count(x) as usize == x.to_string().len()
    }
    QuickCheck::new()
        .tests(tests())
        .quickcheck(prop as fn(u64, u8) -> bool);

    let mut p = 1u64;
    for expected in 1..=19 {
        assert_eq!(digit_count(p), expected);
        assert_eq!(digit_count(p - 1), (expected - 1).max(1));
        p *= 10;
    }
}

#[test]
fn unsigned_digits_into_raw_buffer() {
    let mut dst = [b'#'; MAX_INT_WIDTH + 2];
    assert_eq!(write_unsigned_digits(1_234_567, &mut dst), 7);
    assert_eq!(&dst[..8], b"1234567#");
    assert_eq!(write_unsigned_digits(u64::MAX, &mut dst), 20);
    assert_eq!(&dst[..20], b"18446744073709551615");
    assert_eq!(write_unsigned_digits(5, &mut dst), 1);
    assert_eq!(dst[0], b'5');
}

#[test]
fn zero_is_a_single_digit() {
    assert_eq!(format(0u64, 64), b"0");
    assert_eq!(format(0u8, 1), b"0");
    assert_eq!(format(0i32, 64), b"0");
}

#[rstest]
#[case(-128i8, "-128")]
#[case(i8::MIN + 1, "-127")]
fn signed_min_i8(#[case] x: i8, #[case] expected: &str) {
    assert_eq!(format(x, 64), expected.as_bytes());
}

#[rstest]
fn signed_min_literals(#[values(1, 3, 64)] capacity: usize) {
    assert_eq!(format(i8::MIN, capacity), b"-128");
    assert_eq!(format(i16::MIN, capacity), b"-32768");
    assert_eq!(format(i32::MIN, capacity), b"-2147483648");
    assert_eq!(format(i64::MIN, capacity), b"-9223372036854775808");
    assert_eq!(format(isize::MIN, capacity), isize::MIN.to_string().as_bytes());
}

#[test]
fn slow_path_matches_fast_path() {
    // 19 free bytes forces the fallback, 64 takes the fast path.
    for x in [1u64, 42, 1_000, 98_765_432_101, u64::MAX] {
        assert_eq!(format(x, MAX_INT_WIDTH - 1), format(x, 64));
        assert_eq!(format(x, 64), x.to_string().as_bytes());
    }
}

#[test]
fn fast_path_writes_in_place() {
    let mut w = WriteCursor::with_capacity(64, Vec::new());
    write_unsigned_text(12_345u32, &mut w);
    // Nothing flushed: the digits went straight into the chunk.
    assert!(w.get_ref().is_empty());
    assert_eq!(w.cursor().offset(), 5);
    write_signed_text(-6i16, &mut w);
    assert_eq!(w.finish(), b"12345-6");
}

#[test]
fn sign_byte_refills_exhausted_chunk() {
    let mut w = WriteCursor::with_capacity(2, Vec::new());
    w.write(b"ab");
    assert_eq!(w.available(), 0);
    write_int_text(-5i64, &mut w);
    assert_eq!(w.finish(), b"ab-5");
}

#[test]
fn unsigned_round_trip_any_capacity() {
    fn prop(x: u64, capacity: u8) -> bool {
        let text = format(x, usize::from(capacity));
        text.len() == digit_count(x) as usize
            && parse::<u64>(&text, usize::from(capacity % 7) + 1).unwrap() == x
    }
    QuickCheck::new()
        .tests(tests())
        .quickcheck(prop as fn(u64, u8) -> bool);
}

#[test]
fn signed_round_trip_any_capacity() {
    fn prop(x: i64, y: i16, z: i8, capacity: u8) -> bool {
        let capacity = usize::from(capacity);
        let chunk = capacity % 5 + 1;
        parse::<i64>(&format(x, capacity), chunk).unwrap() == x
            && parse::<i16>(&format(y, capacity), chunk).unwrap() == y
            && parse::<i8>(&format(z, capacity), chunk).unwrap() == z
            && format(x, capacity) == x.to_string().as_bytes()
    }
    QuickCheck::new()
        .tests(tests())
        .quickcheck(prop as fn(i64, i16, i8, u8) -> bool);
}

#[test]
fn extremes_round_trip() {
    assert_eq!(parse::<i8>(b"-128", 1).unwrap(), i8::MIN);
    assert_eq!(parse::<i64>(b"-9223372036854775808", 3).unwrap(), i64::MIN);
    assert_eq!(parse::<i64>(b"9223372036854775807", 3).unwrap(), i64::MAX);
    assert_eq!(parse::<u64>(b"18446744073709551615", 4).unwrap(), u64::MAX);
    assert_eq!(parse::<u8>(b"255", 1).unwrap(), u8::MAX);
    assert_eq!(parse::<i32>(b"+17", 1).unwrap(), 17);
    assert_eq!(parse::<usize>(b"007", 2).unwrap(), 7);
}

#[rstest]
#[case(b"")]
#[case(b"-")]
#[case(b"x1")]
#[case(b"+-1")]
fn expected_digit(#[case] text: &[u8]) {
    let err = parse::<i32>(text, 1).unwrap_err();
    assert_eq!(err.as_parse_error(), Some(&ParseError::ExpectedDigit));
}

#[test]
fn unsigned_rejects_sign() {
    let err = parse::<u32>(b"-1", 4).unwrap_err();
    assert_eq!(err.as_parse_error(), Some(&ParseError::ExpectedDigit));
}

#[rstest]
#[case::u8_max_plus_one(b"256", 3)]
#[case::u64_max_plus_one(b"18446744073709551616", 20)]
#[case::huge(b"99999999999999999999999", 23)]
fn unsigned_overflow(#[case] text: &[u8], #[case] offset: u64) {
    let err = if text.len() <= 3 {
        parse::<u8>(text, 2).unwrap_err()
    } else {
        parse::<u64>(text, 2).unwrap_err()
    };
    assert_eq!(err.as_parse_error(), Some(&ParseError::IntegerOverflow));
    assert_eq!(err.offset(), offset);
}

#[test]
fn signed_overflow() {
    let err = parse::<i8>(b"-129", 2).unwrap_err();
    assert_eq!(err.as_parse_error(), Some(&ParseError::IntegerOverflow));
    let err = parse::<i8>(b"128", 2).unwrap_err();
    assert_eq!(err.as_parse_error(), Some(&ParseError::IntegerOverflow));
}

#[rstest]
fn parse_stops_at_delimiter(#[values(1, 2, 64)] chunk: usize) {
    let mut c = ReadCursor::new(SliceSource::with_chunk_size(b"123,-45\t", chunk));
    assert_eq!(read_unsigned_text::<u16, _>(&mut c).unwrap(), 123);
    c.skip_one().unwrap();
    assert_eq!(read_signed_text::<i32, _>(&mut c).unwrap(), -45);
    assert_eq!(c.peek().unwrap(), Some(b'\t'));
}

#[test]
fn short_stream_is_not_a_short_read() {
    // Digits simply end with the stream.
    let err = parse::<u8>(b"", 1).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::Parse(ParseError::ExpectedDigit)));
}
