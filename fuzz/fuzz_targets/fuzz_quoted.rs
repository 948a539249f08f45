#![no_main]

use arbitrary::Arbitrary;
use bufcursor::{
    ChunkedSource, Quote, ReadCursor, SliceSource, Source, WriteCursor, chunk_utils::partition,
    parse_quoted, write_quoted,
};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input {
    quote: u8,
    sql: bool,
    splits: Vec<usize>,
    payload: Vec<u8>,
}

type Outcome = (Vec<u8>, Result<(), String>, u64);

fn run<S: Source>(cursor: &mut ReadCursor<S>, quote: u8, sql: bool) -> Outcome {
    let mut out = Vec::new();
    let result = parse_quoted(&mut out, cursor, quote, sql).map_err(|e| e.to_string());
    (out, result, cursor.count())
}

fuzz_target!(|input: Input| {
    let Input { quote, sql, splits, payload } = input;

    // Raw bytes: whatever the outcome, chunking must not change it.
    let mut whole = ReadCursor::new(SliceSource::new(&payload));
    let mut split = ReadCursor::new(ChunkedSource::from_chunks(partition(&payload, &splits)));
    assert_eq!(run(&mut whole, quote, sql), run(&mut split, quote, sql));

    // Escaped bytes: always parse back to the payload.
    // Only delimiters that decode to themselves after a backslash round-trip.
    let quote = [Quote::Single, Quote::Back, Quote::Double][usize::from(quote % 3)].byte();
    let mut w = WriteCursor::with_capacity(splits.first().copied().unwrap_or(1) % 64, Vec::new());
    write_quoted(&payload, quote, &mut w);
    let text = w.finish();
    let mut split = ReadCursor::new(ChunkedSource::from_chunks(partition(&text, &splits)));
    let (out, result, count) = run(&mut split, quote, sql);
    assert_eq!(result, Ok(()));
    assert_eq!(out, payload);
    assert_eq!(count, text.len() as u64);
});
