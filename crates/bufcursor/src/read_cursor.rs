//! The refillable read cursor.
//!
//! Reading is a two-state machine. In `HasData` the cursor's position is
//! strictly before the end of the current region. In `Exhausted` it sits at
//! the end. Any operation that needs a byte while exhausted calls
//! [`ReadCursor::advance_to_next_chunk`], which asks the source for a new
//! region. A source that reports no more data leaves the cursor on an empty
//! region for good.
//!
//! Note that [`ReadCursor::at_end`] is *not* a pure predicate: checking for
//! the end of the stream is exactly what triggers the refill, and every read
//! loop in the crate relies on that.

use tracing::{debug, trace};

use crate::{
    cursor::Cursor,
    error::{Error, ErrorKind, Result},
    options::ReadOptions,
    source::{Refill, Region, Source},
};

/// A read cursor over the chunks produced by a [`Source`].
#[derive(Debug)]
pub struct ReadCursor<S> {
    source: S,
    cursor: Cursor,
    /// Bytes passed in all chunks before the current one.
    bytes: u64,
    /// Bytes to discard from the start of the region being installed.
    pending_offset: usize,
    options: ReadOptions,
}

impl<S: Source> ReadCursor<S> {
    /// A cursor with nothing readable yet; the first access refills.
    pub fn new(source: S) -> Self {
        Self::with_options(source, ReadOptions::default())
    }

    /// Same as [`ReadCursor::new`] with explicit options.
    pub fn with_options(source: S, options: ReadOptions) -> Self {
        Self {
            source,
            cursor: Cursor::empty(0),
            bytes: 0,
            pending_offset: 0,
            options,
        }
    }

    /// A cursor over data the source already holds in `region`.
    ///
    /// # Panics
    ///
    /// Panics if `region` does not fit the source's buffer.
    pub fn with_region(source: S, region: Region) -> Self {
        Self::with_region_and_options(source, region, ReadOptions::default())
    }

    /// Same as [`ReadCursor::with_region`] with explicit options.
    ///
    /// # Panics
    ///
    /// Panics if `region` does not fit the source's buffer.
    pub fn with_region_and_options(source: S, region: Region, options: ReadOptions) -> Self {
        let mut this = Self::with_options(source, options);
        this.install(region);
        this
    }

    /// The underlying source.
    pub fn get_ref(&self) -> &S {
        &self.source
    }

    /// Consumes the cursor and returns the source. Unread buffered bytes are
    /// lost.
    pub fn into_inner(self) -> S {
        self.source
    }

    /// The options this cursor was built with.
    pub fn options(&self) -> &ReadOptions {
        &self.options
    }

    /// Position bookkeeping for the current region.
    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    /// Total number of bytes passed so far, including bytes skipped at the
    /// start of resumed chunks.
    pub fn count(&self) -> u64 {
        self.bytes + self.cursor.offset() as u64
    }

    /// Whether the current region still has unread bytes. Never refills.
    #[inline]
    pub fn has_pending_data(&self) -> bool {
        self.cursor.has_pending_data()
    }

    /// Unread bytes of the current region. Never refills.
    #[inline]
    pub fn pending(&self) -> &[u8] {
        self.cursor.pending(self.source.buffer())
    }

    /// Marks `n` bytes of the current region as read.
    ///
    /// # Panics
    ///
    /// Panics if fewer than `n` bytes are pending in the current region.
    #[inline]
    pub fn consume(&mut self, n: usize) {
        self.cursor.advance(n);
    }

    /// Loads the next chunk from the source.
    ///
    /// Returns `false`, leaving the visible region empty, once the source is
    /// exhausted.
    ///
    /// # Errors
    ///
    /// [`ErrorKind::Source`] if the source fails; the cursor is then left on
    /// an empty region.
    pub fn advance_to_next_chunk(&mut self) -> Result<bool> {
        self.bytes += self.cursor.offset() as u64;
        self.cursor = Cursor::empty(0);
        match self.source.refill() {
            Ok(Refill::Filled(region)) => {
                self.install(region);
                trace!(
                    chunk_len = region.len,
                    skip = region.skip,
                    consumed = self.bytes,
                    "refilled read chunk"
                );
                Ok(true)
            }
            Ok(Refill::Exhausted) => {
                debug!(consumed = self.bytes, "source exhausted");
                Ok(false)
            }
            Err(err) => Err(self.error(ErrorKind::Source(err))),
        }
    }

    fn install(&mut self, region: Region) {
        let buffer_len = self.source.buffer().len();
        assert!(
            region.start + region.len <= buffer_len,
            "region {}..{} outside source buffer of {buffer_len} bytes",
            region.start,
            region.start + region.len,
        );
        assert!(
            region.skip <= region.len,
            "skip of {} past region of {} bytes",
            region.skip,
            region.len
        );
        self.pending_offset = region.skip;
        self.cursor = Cursor::new(region.start, region.len, self.pending_offset);
        self.pending_offset = 0;
    }

    /// Refills if the current region has been fully read.
    ///
    /// Regions that expose no bytes are refilled past, so afterwards either
    /// data is pending or the source is exhausted.
    ///
    /// # Errors
    ///
    /// Propagates source failures.
    #[inline]
    pub fn refill_if_exhausted(&mut self) -> Result<()> {
        self.at_end()?;
        Ok(())
    }

    /// `true` if nothing is pending and refilling brings nothing either.
    ///
    /// May refill, so it mutates the cursor. A `false` result guarantees at
    /// least one pending byte.
    ///
    /// # Errors
    ///
    /// Propagates source failures.
    #[inline]
    pub fn at_end(&mut self) -> Result<bool> {
        while !self.has_pending_data() {
            if !self.advance_to_next_chunk()? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// The next byte without consuming it, or `None` at end of stream.
    ///
    /// # Errors
    ///
    /// Propagates source failures.
    #[inline]
    pub fn peek(&mut self) -> Result<Option<u8>> {
        if self.at_end()? {
            return Ok(None);
        }
        Ok(Some(self.pending()[0]))
    }

    /// Skips one byte.
    ///
    /// # Errors
    ///
    /// [`ErrorKind::EndOfStream`] if the stream is already at its end.
    pub fn skip_one(&mut self) -> Result<()> {
        if self.at_end()? {
            return Err(self.error(ErrorKind::EndOfStream { missing: 1 }));
        }
        self.cursor.advance(1);
        Ok(())
    }

    /// Skips exactly `n` bytes, crossing chunk boundaries.
    ///
    /// # Errors
    ///
    /// [`ErrorKind::EndOfStream`] if the stream ends first. The bytes that
    /// did exist are consumed.
    pub fn skip(&mut self, n: usize) -> Result<()> {
        let skipped = self.try_skip(n)?;
        if skipped < n {
            return Err(self.error(ErrorKind::EndOfStream {
                missing: n - skipped,
            }));
        }
        Ok(())
    }

    /// Skips up to `n` bytes and returns how many were skipped.
    ///
    /// # Errors
    ///
    /// Only source failures; the end of stream just shortens the count.
    pub fn try_skip(&mut self, n: usize) -> Result<usize> {
        let mut skipped = 0;
        while skipped < n && !self.at_end()? {
            let step = self.cursor.available().min(n - skipped);
            self.cursor.advance(step);
            skipped += step;
        }
        Ok(skipped)
    }

    /// Copies up to `dest.len()` bytes into `dest`, crossing chunk boundaries.
    /// Returns fewer bytes only at end of stream.
    ///
    /// # Errors
    ///
    /// Only source failures.
    pub fn read_into(&mut self, dest: &mut [u8]) -> Result<usize> {
        let mut copied = 0;
        while copied < dest.len() && !self.at_end()? {
            copied += self.copy_pending(&mut dest[copied..]);
        }
        Ok(copied)
    }

    /// Fills all of `dest`.
    ///
    /// # Errors
    ///
    /// [`ErrorKind::ShortRead`] if the stream ends first.
    pub fn read_exact(&mut self, dest: &mut [u8]) -> Result<()> {
        let read = self.read_into(dest)?;
        if read != dest.len() {
            return Err(self.error(ErrorKind::ShortRead {
                expected: dest.len(),
                read,
            }));
        }
        Ok(())
    }

    /// Like [`ReadCursor::read_into`], tuned for big blocks.
    ///
    /// Once the current region is drained, requests of at least
    /// [`ReadOptions::direct_read_threshold`] bytes are offered to
    /// [`Source::read_direct`] so a capable source can skip its own buffer.
    /// The bytes delivered are the same either way.
    ///
    /// # Errors
    ///
    /// Only source failures.
    pub fn read_large(&mut self, dest: &mut [u8]) -> Result<usize> {
        let mut copied = self.copy_pending(dest);
        while dest.len() - copied >= self.options.direct_read_threshold.max(1) {
            // The current region is drained at this point.
            self.bytes += self.cursor.offset() as u64;
            self.cursor = Cursor::empty(0);
            match self.source.read_direct(&mut dest[copied..]) {
                Ok(Some(0)) => return Ok(copied),
                Ok(Some(n)) => {
                    assert!(
                        n <= dest.len() - copied,
                        "read_direct reported {n} bytes for a {} byte destination",
                        dest.len() - copied
                    );
                    trace!(bytes = n, "direct read");
                    self.bytes += n as u64;
                    copied += n;
                }
                Ok(None) => break,
                Err(err) => return Err(self.error(ErrorKind::Source(err))),
            }
        }
        Ok(copied + self.read_into(&mut dest[copied..])?)
    }

    fn copy_pending(&mut self, dest: &mut [u8]) -> usize {
        let pending = self.cursor.pending(self.source.buffer());
        let n = pending.len().min(dest.len());
        dest[..n].copy_from_slice(&pending[..n]);
        self.cursor.advance(n);
        n
    }

    pub(crate) fn error(&self, kind: impl Into<ErrorKind>) -> Error {
        Error::new(kind, self.count())
    }
}
