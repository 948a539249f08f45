//! Helpers for feeding one payload through differently sized chunks.

use alloc::vec::Vec;

/// Split `payload` into approximately equal-sized chunks.
///
/// # Panics
///
/// Panics if `parts` is zero.
#[must_use]
pub fn produce_chunks(payload: &[u8], parts: usize) -> Vec<&[u8]> {
    assert!(parts > 0);
    let len = payload.len();
    let chunk_size = len.div_ceil(parts);
    let mut chunks = Vec::new();
    let mut start = 0;
    while start < len {
        let end = core::cmp::min(start + chunk_size, len);
        chunks.push(&payload[start..end]);
        start = end;
    }
    chunks
}

/// Split `payload` into non-empty chunks whose sizes are derived from
/// `splits`: each split picks `1 + split % remaining` bytes, and whatever is
/// left after the last split forms the final chunk.
#[must_use]
pub fn partition<'a>(payload: &'a [u8], splits: &[usize]) -> Vec<&'a [u8]> {
    let mut chunks = Vec::new();
    let mut rest = payload;
    for &s in splits {
        if rest.is_empty() {
            break;
        }
        let size = 1 + (s % rest.len());
        let (head, tail) = rest.split_at(size);
        chunks.push(head);
        rest = tail;
    }
    if !rest.is_empty() {
        chunks.push(rest);
    }
    chunks
}
