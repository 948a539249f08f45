//! The write-side cursor: a fixed chunk that is flushed into a [`ByteSink`]
//! whenever it fills up.
//!
//! Encoders either write straight into [`WriteCursor::spare_mut`] when the
//! chunk has room for their worst case, or go through
//! [`WriteCursor::write`], which flushes at chunk boundaries.

use alloc::{boxed::Box, vec};

use tracing::trace;

use crate::{cursor::Cursor, options::WriteOptions, sink::ByteSink};

/// Buffered writer over a [`ByteSink`].
#[derive(Debug)]
pub struct WriteCursor<S> {
    sink: S,
    buf: Box<[u8]>,
    cursor: Cursor,
    /// Bytes flushed to the sink so far.
    bytes: u64,
}

impl<S: ByteSink> WriteCursor<S> {
    /// A cursor with the default chunk capacity.
    pub fn new(sink: S) -> Self {
        Self::with_options(sink, WriteOptions::default())
    }

    /// A cursor with a chunk of `options.buffer_capacity` bytes.
    pub fn with_options(sink: S, options: WriteOptions) -> Self {
        Self::with_capacity(options.buffer_capacity, sink)
    }

    /// A cursor with a chunk of `capacity` bytes (at least one).
    pub fn with_capacity(capacity: usize, sink: S) -> Self {
        let capacity = capacity.max(1);
        Self {
            sink,
            buf: vec![0u8; capacity].into_boxed_slice(),
            cursor: Cursor::new(0, capacity, 0),
            bytes: 0,
        }
    }

    /// The underlying sink. Bytes still sitting in the chunk are not in it
    /// yet.
    pub fn get_ref(&self) -> &S {
        &self.sink
    }

    /// Position bookkeeping for the current chunk.
    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    /// Total bytes written, flushed or not.
    pub fn count(&self) -> u64 {
        self.bytes + self.cursor.offset() as u64
    }

    /// Free space left in the current chunk.
    #[inline]
    pub fn available(&self) -> usize {
        self.cursor.available()
    }

    /// The free part of the current chunk, for encoders that write in place
    /// and then call [`WriteCursor::advance`].
    #[inline]
    pub fn spare_mut(&mut self) -> &mut [u8] {
        self.cursor.pending_mut(&mut self.buf)
    }

    /// Commits `n` bytes written into [`WriteCursor::spare_mut`].
    ///
    /// # Panics
    ///
    /// Panics if `n` exceeds the free space.
    #[inline]
    pub fn advance(&mut self, n: usize) {
        self.cursor.advance(n);
    }

    /// Hands the filled part of the chunk to the sink and starts over.
    pub fn next_chunk(&mut self) {
        let filled = self.cursor.offset();
        if filled == 0 {
            return;
        }
        trace!(bytes = filled, "flushing write chunk");
        self.sink.write(self.cursor.consumed(&self.buf));
        self.bytes += filled as u64;
        self.cursor.rewind();
    }

    /// Flushes only if the chunk is full.
    #[inline]
    pub fn next_chunk_if_full(&mut self) {
        if !self.cursor.has_pending_data() {
            self.next_chunk();
        }
    }

    /// Writes one byte.
    #[inline]
    pub fn write_byte(&mut self, byte: u8) {
        self.next_chunk_if_full();
        self.spare_mut()[0] = byte;
        self.cursor.advance(1);
    }

    /// Writes `bytes`, flushing as many chunks as needed.
    pub fn write(&mut self, mut bytes: &[u8]) {
        while !bytes.is_empty() {
            self.next_chunk_if_full();
            let spare = self.spare_mut();
            let n = spare.len().min(bytes.len());
            spare[..n].copy_from_slice(&bytes[..n]);
            self.cursor.advance(n);
            bytes = &bytes[n..];
        }
    }

    /// Flushes what is left and returns the sink.
    pub fn finish(mut self) -> S {
        self.next_chunk();
        self.sink
    }
}
