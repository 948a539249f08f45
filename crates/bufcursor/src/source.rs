//! Concrete byte providers behind a [`ReadCursor`](crate::ReadCursor).
//!
//! A [`Source`] owns (or borrows) the backing memory and, on every
//! [`refill`](Source::refill), reports which contiguous [`Region`] of that
//! memory now holds fresh data. The cursor does the rest: position tracking,
//! chunk-boundary crossing and byte accounting.

use alloc::{boxed::Box, collections::VecDeque, vec::Vec};

use crate::error::SourceError;

/// The part of a source's buffer filled by the latest refill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    /// Index of the first byte inside [`Source::buffer`].
    pub start: usize,
    /// Number of bytes filled.
    pub len: usize,
    /// Leading bytes of the region to discard before exposing it, used when a
    /// refill logically resumes in the middle of a chunk.
    pub skip: usize,
}

impl Region {
    /// A region of `len` bytes at `start`, nothing to skip.
    #[must_use]
    pub fn new(start: usize, len: usize) -> Self {
        Self { start, len, skip: 0 }
    }
}

/// Outcome of a refill attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Refill {
    /// New data is available in the given region.
    Filled(Region),
    /// The source has no more data. Normal end of stream, not an error.
    Exhausted,
}

/// Something that can replenish the bytes a read cursor exposes.
pub trait Source {
    /// Loads the next chunk into the buffer.
    ///
    /// Return `Err` only for transport failures; running out of data is
    /// [`Refill::Exhausted`]. A filled region may expose no bytes (zero
    /// `len`, or `skip == len`); the cursor then refills again.
    ///
    /// # Errors
    ///
    /// Whatever the underlying transport reports. The cursor propagates it
    /// unchanged.
    fn refill(&mut self) -> Result<Refill, SourceError>;

    /// The backing memory that the last [`Region`] refers to.
    fn buffer(&self) -> &[u8];

    /// Transfers bytes straight into `dest`, bypassing the chunk buffer.
    ///
    /// Returns `Ok(None)` if the source has no such path, in which case the
    /// cursor falls back to its generic copy loop; `Ok(Some(0))` means the
    /// source is exhausted. Only called with the current chunk fully consumed.
    /// The count must not exceed `dest.len()`.
    ///
    /// # Errors
    ///
    /// Same as [`Source::refill`].
    fn read_direct(&mut self, dest: &mut [u8]) -> Result<Option<usize>, SourceError> {
        let _ = dest;
        Ok(None)
    }
}

impl<S: Source + ?Sized> Source for &mut S {
    fn refill(&mut self) -> Result<Refill, SourceError> {
        (**self).refill()
    }

    fn buffer(&self) -> &[u8] {
        (**self).buffer()
    }

    fn read_direct(&mut self, dest: &mut [u8]) -> Result<Option<usize>, SourceError> {
        (**self).read_direct(dest)
    }
}

impl<S: Source + ?Sized> Source for Box<S> {
    fn refill(&mut self) -> Result<Refill, SourceError> {
        (**self).refill()
    }

    fn buffer(&self) -> &[u8] {
        (**self).buffer()
    }

    fn read_direct(&mut self, dest: &mut [u8]) -> Result<Option<usize>, SourceError> {
        (**self).read_direct(dest)
    }
}

/// Zero-copy source over a borrowed slice, handed out in fixed-size chunks.
#[derive(Debug, Clone)]
pub struct SliceSource<'a> {
    data: &'a [u8],
    chunk_size: usize,
    next: usize,
    skip: usize,
}

impl<'a> SliceSource<'a> {
    /// The whole slice as a single chunk.
    #[must_use]
    pub fn new(data: &'a [u8]) -> Self {
        Self::with_chunk_size(data, data.len())
    }

    /// The slice in chunks of `chunk_size` bytes (at least one).
    #[must_use]
    pub fn with_chunk_size(data: &'a [u8], chunk_size: usize) -> Self {
        Self {
            data,
            chunk_size: chunk_size.max(1),
            next: 0,
            skip: 0,
        }
    }

    /// Resumes reading at `position`.
    ///
    /// Chunks stay aligned to multiples of `chunk_size`, so the first refill
    /// delivers the whole aligned chunk containing `position` and asks the
    /// cursor to skip the bytes before it.
    ///
    /// # Panics
    ///
    /// Panics if `position` is past the end of `data`.
    #[must_use]
    pub fn starting_at(data: &'a [u8], chunk_size: usize, position: usize) -> Self {
        assert!(
            position <= data.len(),
            "start position {position} past end of {} bytes",
            data.len()
        );
        let mut source = Self::with_chunk_size(data, chunk_size);
        if position == data.len() {
            // Nothing left to resume into, even in an unaligned last chunk.
            source.next = position;
            return source;
        }
        source.next = position - position % source.chunk_size;
        source.skip = position - source.next;
        source
    }

    /// Bytes not yet handed out by a refill.
    #[must_use]
    pub fn remaining(&self) -> &'a [u8] {
        &self.data[self.next..]
    }
}

impl Source for SliceSource<'_> {
    fn refill(&mut self) -> Result<Refill, SourceError> {
        if self.next >= self.data.len() {
            return Ok(Refill::Exhausted);
        }
        let len = self.chunk_size.min(self.data.len() - self.next);
        let region = Region {
            start: self.next,
            len,
            skip: core::mem::take(&mut self.skip),
        };
        self.next += len;
        Ok(Refill::Filled(region))
    }

    fn buffer(&self) -> &[u8] {
        self.data
    }
}

/// Owned source fed one chunk at a time, with arbitrary chunk boundaries.
///
/// Models a transport that delivers packets: every pushed chunk becomes one
/// refill. Empty chunks are skipped rather than read as end of stream.
#[derive(Debug, Clone, Default)]
pub struct ChunkedSource {
    queued: VecDeque<Vec<u8>>,
    current: Vec<u8>,
}

impl ChunkedSource {
    /// A source with nothing queued.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A source that will deliver `chunks` in order.
    pub fn from_chunks<I, C>(chunks: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Vec<u8>>,
    {
        let mut source = Self::new();
        for chunk in chunks {
            source.push(chunk);
        }
        source
    }

    /// Queues one more chunk.
    pub fn push(&mut self, chunk: impl Into<Vec<u8>>) {
        self.queued.push_back(chunk.into());
    }

    /// Number of chunks not yet delivered.
    #[must_use]
    pub fn queued(&self) -> usize {
        self.queued.len()
    }
}

impl Source for ChunkedSource {
    fn refill(&mut self) -> Result<Refill, SourceError> {
        while let Some(chunk) = self.queued.pop_front() {
            if chunk.is_empty() {
                continue;
            }
            self.current = chunk;
            return Ok(Refill::Filled(Region::new(0, self.current.len())));
        }
        self.current.clear();
        Ok(Refill::Exhausted)
    }

    fn buffer(&self) -> &[u8] {
        &self.current
    }
}

#[cfg(feature = "std")]
pub use reader::ReaderSource;

#[cfg(feature = "std")]
mod reader {
    use alloc::{boxed::Box, vec};
    use std::io::{self, Read};

    use tracing::debug;

    use super::{Refill, Region, Source};
    use crate::{error::SourceError, options::ReadOptions};

    /// Buffered source over any [`std::io::Read`] (files, sockets, pipes).
    ///
    /// Large reads through [`ReadCursor::read_large`](crate::ReadCursor::read_large)
    /// go straight into the caller's buffer.
    #[derive(Debug)]
    pub struct ReaderSource<R> {
        inner: R,
        buf: Box<[u8]>,
    }

    impl<R: Read> ReaderSource<R> {
        /// Wraps `inner` with the default buffer capacity.
        #[must_use]
        pub fn new(inner: R) -> Self {
            Self::with_options(inner, ReadOptions::default())
        }

        /// Wraps `inner` with a buffer of `options.buffer_capacity` bytes.
        #[must_use]
        pub fn with_options(inner: R, options: ReadOptions) -> Self {
            Self::with_capacity(options.buffer_capacity, inner)
        }

        /// Wraps `inner` with a buffer of `capacity` bytes (at least one).
        #[must_use]
        pub fn with_capacity(capacity: usize, inner: R) -> Self {
            Self {
                inner,
                buf: vec![0u8; capacity.max(1)].into_boxed_slice(),
            }
        }

        /// Returns a reference to the underlying reader.
        #[must_use]
        pub fn get_ref(&self) -> &R {
            &self.inner
        }

        /// Consumes the source and returns the underlying reader.
        ///
        /// Bytes buffered but not yet consumed are lost.
        #[must_use]
        pub fn into_inner(self) -> R {
            self.inner
        }

        /// Capacity of the chunk buffer.
        #[must_use]
        pub fn capacity(&self) -> usize {
            self.buf.len()
        }
    }

    fn read_retrying(inner: &mut impl Read, dest: &mut [u8]) -> io::Result<usize> {
        loop {
            match inner.read(dest) {
                Err(err) if err.kind() == io::ErrorKind::Interrupted => {
                    debug!("read interrupted, retrying");
                }
                other => return other,
            }
        }
    }

    impl<R: Read> Source for ReaderSource<R> {
        fn refill(&mut self) -> Result<Refill, SourceError> {
            match read_retrying(&mut self.inner, &mut self.buf)? {
                0 => Ok(Refill::Exhausted),
                n => Ok(Refill::Filled(Region::new(0, n))),
            }
        }

        fn buffer(&self) -> &[u8] {
            &self.buf
        }

        fn read_direct(&mut self, dest: &mut [u8]) -> Result<Option<usize>, SourceError> {
            Ok(Some(read_retrying(&mut self.inner, dest)?))
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use rstest::rstest;

    use super::{ChunkedSource, Refill, Region, SliceSource, Source};

    fn drain(source: &mut impl Source) -> Vec<Vec<u8>> {
        let mut chunks = Vec::new();
        while let Refill::Filled(region) = source.refill().unwrap() {
            let start = region.start + region.skip;
            chunks.push(source.buffer()[start..region.start + region.len].to_vec());
        }
        chunks
    }

    #[test]
    fn slice_source_single_chunk() {
        let mut s = SliceSource::new(b"hello");
        assert_eq!(drain(&mut s), [b"hello".to_vec()]);
        assert_eq!(s.refill().unwrap(), Refill::Exhausted);
    }

    #[test]
    fn slice_source_empty_is_exhausted() {
        let mut s = SliceSource::new(b"");
        assert_eq!(s.refill().unwrap(), Refill::Exhausted);
    }

    #[test]
    fn slice_source_fixed_chunks() {
        let mut s = SliceSource::with_chunk_size(b"abcdefg", 3);
        assert_eq!(
            drain(&mut s),
            [b"abc".to_vec(), b"def".to_vec(), b"g".to_vec()]
        );
    }

    #[test]
    fn slice_source_starting_mid_chunk_reports_skip() {
        let mut s = SliceSource::starting_at(b"abcdefgh", 4, 5);
        assert_eq!(
            s.refill().unwrap(),
            Refill::Filled(Region {
                start: 4,
                len: 4,
                skip: 1
            })
        );
        // Only the first region carries a skip.
        assert_eq!(s.refill().unwrap(), Refill::Exhausted);
        let mut s = SliceSource::starting_at(b"abcdefghij", 4, 5);
        assert_eq!(drain(&mut s), [b"fgh".to_vec(), b"ij".to_vec()]);
    }

    #[rstest]
    #[case(8, 3)]
    #[case(8, 4)]
    #[case(0, 2)]
    fn slice_source_starting_at_end_is_exhausted(#[case] len: usize, #[case] chunk: usize) {
        let data = b"abcdefgh";
        let mut s = SliceSource::starting_at(&data[..len], chunk, len);
        assert_eq!(s.refill().unwrap(), Refill::Exhausted);
        assert!(s.remaining().is_empty());
    }

    #[test]
    fn chunked_source_skips_empty_chunks() {
        let mut s = ChunkedSource::from_chunks([&b"ab"[..], b"", b"c"]);
        assert_eq!(s.queued(), 3);
        assert_eq!(drain(&mut s), [b"ab".to_vec(), b"c".to_vec()]);
        assert!(s.buffer().is_empty());
        s.push(b"late".to_vec());
        assert_eq!(drain(&mut s), [b"late".to_vec()]);
    }

    #[cfg(feature = "std")]
    #[test]
    fn reader_source_reads_through_buffer() {
        use super::ReaderSource;

        let mut s = ReaderSource::with_capacity(4, &b"0123456789"[..]);
        assert_eq!(s.capacity(), 4);
        assert_eq!(
            drain(&mut s),
            [b"0123".to_vec(), b"4567".to_vec(), b"89".to_vec()]
        );
    }
}
