/// Configuration for the read side.
///
/// # Examples
///
/// ```rust
/// use bufcursor::{ReadCursor, ReadOptions, SliceSource};
///
/// let options = ReadOptions {
///     direct_read_threshold: 4096,
///     ..Default::default()
/// };
/// let cursor = ReadCursor::with_options(SliceSource::new(b"abc"), options);
/// # drop(cursor);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadOptions {
    /// Size of the chunk buffer owned by buffered sources such as
    /// `ReaderSource`.
    ///
    /// # Default
    ///
    /// 1 MiB
    pub buffer_capacity: usize,

    /// Smallest remaining request for which [`ReadCursor::read_large`] lets
    /// the source transfer directly into the destination instead of going
    /// through its chunk buffer.
    ///
    /// Smaller requests always take the generic copy loop.
    ///
    /// # Default
    ///
    /// 64 KiB
    ///
    /// [`ReadCursor::read_large`]: crate::ReadCursor::read_large
    pub direct_read_threshold: usize,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            buffer_capacity: DEFAULT_BUFFER_CAPACITY,
            direct_read_threshold: 64 * 1024,
        }
    }
}

/// Configuration for the write side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteOptions {
    /// Size of the chunk a [`WriteCursor`](crate::WriteCursor) fills before
    /// flushing to its sink. Clamped to at least one byte.
    ///
    /// # Default
    ///
    /// 1 MiB
    pub buffer_capacity: usize,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            buffer_capacity: DEFAULT_BUFFER_CAPACITY,
        }
    }
}

const DEFAULT_BUFFER_CAPACITY: usize = 1024 * 1024;
