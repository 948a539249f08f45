//! Position bookkeeping over a byte region owned by someone else.
//!
//! A [`Cursor`] stores indices, not memory: `begin <= position <= end`, where
//! `begin..end` is the valid region inside a backing buffer held by the owning
//! component (a source's chunk buffer, a write cursor's scratch). Accessors that
//! touch bytes take the backing buffer as an argument, so every access is bounds
//! checked against the real slice.

/// Index-based view of a contiguous region with a movable position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    begin: usize,
    position: usize,
    end: usize,
}

impl Cursor {
    /// A cursor over `begin..begin + size`, positioned `offset` bytes in.
    ///
    /// # Panics
    ///
    /// Panics if `offset > size`.
    #[must_use]
    pub fn new(begin: usize, size: usize, offset: usize) -> Self {
        assert!(offset <= size, "cursor offset {offset} past region of {size} bytes");
        Self {
            begin,
            position: begin + offset,
            end: begin + size,
        }
    }

    /// A cursor whose readable region is empty, anchored at `begin`.
    ///
    /// Used for freshly allocated buffers that have not been filled yet, so
    /// that the first access forces a refill.
    #[must_use]
    pub fn empty(begin: usize) -> Self {
        Self::new(begin, 0, 0)
    }

    /// Start of the valid region.
    #[inline]
    #[must_use]
    pub fn begin(&self) -> usize {
        self.begin
    }

    /// Exclusive end of the valid region.
    #[inline]
    #[must_use]
    pub fn end(&self) -> usize {
        self.end
    }

    /// Current position, always within `begin()..=end()`.
    #[inline]
    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Size of the valid region.
    #[inline]
    #[must_use]
    pub fn size(&self) -> usize {
        self.end - self.begin
    }

    /// Bytes passed since `begin()`.
    #[inline]
    #[must_use]
    pub fn offset(&self) -> usize {
        self.position - self.begin
    }

    /// Bytes left between the position and `end()`.
    #[inline]
    #[must_use]
    pub fn available(&self) -> usize {
        self.end - self.position
    }

    /// `position() < end()`.
    #[inline]
    #[must_use]
    pub fn has_pending_data(&self) -> bool {
        self.position < self.end
    }

    /// Moves the position forward by `n` bytes.
    ///
    /// # Panics
    ///
    /// Panics if that would pass `end()`.
    #[inline]
    pub fn advance(&mut self, n: usize) {
        assert!(
            n <= self.available(),
            "advance by {n} past end of region ({} bytes left)",
            self.available()
        );
        self.position += n;
    }

    /// Rewinds the position to `begin()`.
    #[inline]
    pub fn rewind(&mut self) {
        self.position = self.begin;
    }

    /// Shrinks the valid region to nothing, keeping `begin()`.
    #[inline]
    pub fn truncate(&mut self) {
        self.position = self.begin;
        self.end = self.begin;
    }

    /// The bytes between the position and `end()` inside `buffer`.
    ///
    /// # Panics
    ///
    /// Panics if the region does not lie inside `buffer`.
    #[inline]
    #[must_use]
    pub fn pending<'a>(&self, buffer: &'a [u8]) -> &'a [u8] {
        &buffer[self.position..self.end]
    }

    /// Mutable access to the bytes between the position and `end()`.
    ///
    /// # Panics
    ///
    /// Panics if the region does not lie inside `buffer`.
    #[inline]
    #[must_use]
    pub fn pending_mut<'a>(&self, buffer: &'a mut [u8]) -> &'a mut [u8] {
        &mut buffer[self.position..self.end]
    }

    /// The bytes between `begin()` and the position inside `buffer`.
    ///
    /// # Panics
    ///
    /// Panics if the region does not lie inside `buffer`.
    #[inline]
    #[must_use]
    pub fn consumed<'a>(&self, buffer: &'a [u8]) -> &'a [u8] {
        &buffer[self.begin..self.position]
    }
}
