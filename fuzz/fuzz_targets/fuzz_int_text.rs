#![no_main]

use arbitrary::Arbitrary;
use bufcursor::{
    ChunkedSource, ReadCursor, WriteCursor, chunk_utils::partition, read_int_text, write_int_text,
};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input {
    values: Vec<i64>,
    capacity: u8,
    splits: Vec<usize>,
}

fuzz_target!(|input: Input| {
    let mut w = WriteCursor::with_capacity(usize::from(input.capacity), Vec::new());
    for &v in &input.values {
        write_int_text(v, &mut w);
        w.write_byte(b';');
    }
    let text = w.finish();
    let expected: String = input.values.iter().map(|v| format!("{v};")).collect();
    assert_eq!(text, expected.as_bytes());

    let mut r = ReadCursor::new(ChunkedSource::from_chunks(partition(&text, &input.splits)));
    for &v in &input.values {
        assert_eq!(read_int_text::<i64, _>(&mut r).unwrap(), v);
        r.skip_one().unwrap();
    }
    assert!(r.at_end().unwrap());
});
