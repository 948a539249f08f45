use alloc::vec::Vec;

use bstr::BString;

/// An append-only byte destination.
///
/// Sinks are infallible from the writer's point of view; a sink backed by a
/// fallible transport reports failures out of band (see `IoSink`).
pub trait ByteSink {
    /// Appends `bytes`.
    fn write(&mut self, bytes: &[u8]);

    /// Appends one byte.
    #[inline]
    fn write_byte(&mut self, byte: u8) {
        self.write(&[byte]);
    }
}

impl ByteSink for Vec<u8> {
    #[inline]
    fn write(&mut self, bytes: &[u8]) {
        self.extend_from_slice(bytes);
    }

    #[inline]
    fn write_byte(&mut self, byte: u8) {
        self.push(byte);
    }
}

impl ByteSink for BString {
    #[inline]
    fn write(&mut self, bytes: &[u8]) {
        self.extend_from_slice(bytes);
    }

    #[inline]
    fn write_byte(&mut self, byte: u8) {
        self.push(byte);
    }
}

impl<S: ByteSink + ?Sized> ByteSink for &mut S {
    #[inline]
    fn write(&mut self, bytes: &[u8]) {
        (**self).write(bytes);
    }

    #[inline]
    fn write_byte(&mut self, byte: u8) {
        (**self).write_byte(byte);
    }
}

#[cfg(feature = "std")]
pub use io::IoSink;

#[cfg(feature = "std")]
mod io {
    use std::io::{self, Write};

    use super::ByteSink;

    /// Adapts a [`std::io::Write`] into a [`ByteSink`].
    ///
    /// The first I/O error is latched and every later write is dropped;
    /// [`IoSink::into_inner`] reports it.
    #[derive(Debug)]
    pub struct IoSink<W> {
        inner: W,
        error: Option<io::Error>,
    }

    impl<W: Write> IoSink<W> {
        /// Wraps `inner`.
        pub fn new(inner: W) -> Self {
            Self { inner, error: None }
        }

        /// Returns a reference to the underlying writer.
        pub fn get_ref(&self) -> &W {
            &self.inner
        }

        /// Whether a write has failed.
        pub fn has_failed(&self) -> bool {
            self.error.is_some()
        }

        /// Flushes the writer and returns it, or the first error seen.
        ///
        /// # Errors
        ///
        /// The latched write error, or the flush error.
        pub fn into_inner(mut self) -> io::Result<W> {
            if let Some(err) = self.error.take() {
                return Err(err);
            }
            self.inner.flush()?;
            Ok(self.inner)
        }
    }

    impl<W: Write> ByteSink for IoSink<W> {
        fn write(&mut self, bytes: &[u8]) {
            if self.error.is_none() {
                if let Err(err) = self.inner.write_all(bytes) {
                    self.error = Some(err);
                }
            }
        }
    }
}
