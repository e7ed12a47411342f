//! Byte source abstraction.
//!
//! This module provides the [ByteSource] trait, the single pull-based
//! interface shared by [FileByteSource](crate::FileByteSource),
//! [BufferByteSource](crate::BufferByteSource) and
//! [TextByteSource](crate::TextByteSource), together with the [Bytes]
//! iterator adapter.

use crate::source::source_error::SourceError;

// =#========================================================================#=
// BYTE SOURCE (Trait)
// =#========================================================================T=
/// Trait defining the interface for different byte sources.
///
/// This trait abstracts over different ways of accessing byte data:
/// - Files read chunk by chunk ([FileByteSource](crate::FileByteSource))
/// - Owned in-memory buffers ([BufferByteSource](crate::BufferByteSource))
/// - UTF-8 encoded text ([TextByteSource](crate::TextByteSource))
///
/// By using this trait, the same consumer (say, an XML tokenizer) can pull
/// bytes from a small string or a large file without caring which.
///
/// Sources are forward-only: once [next_byte()](ByteSource::next_byte)
/// returned `Ok(None)`, every later call returns `Ok(None)` as well.
pub trait ByteSource {
    /// Get the next byte and advance the position (consume it).
    ///
    /// # Returns
    /// * `Ok(Some(u8))` - The next byte if available
    /// * `Ok(None)` - If at end of data (EOF)
    ///
    /// # Errors
    /// Returns a [SourceError] if the underlying data could not be read.
    /// The source is exhausted afterwards.
    fn next_byte(&mut self) -> Result<Option<u8>, SourceError>;

    /// Turns the source into an iterator over its bytes.
    ///
    /// The iterator yields `Ok(byte)` for each byte, at most one `Err`,
    /// and then stops for good.
    fn bytes(self) -> Bytes<Self>
    where
        Self: Sized,
    {
        Bytes { source: self, done: false }
    }
}

impl<S: ByteSource + ?Sized> ByteSource for &mut S {
    #[inline]
    fn next_byte(&mut self) -> Result<Option<u8>, SourceError> {
        (**self).next_byte()
    }
}

impl<S: ByteSource + ?Sized> ByteSource for Box<S> {
    #[inline]
    fn next_byte(&mut self) -> Result<Option<u8>, SourceError> {
        (**self).next_byte()
    }
}

// =#========================================================================#=
// BYTES (Iterator adapter)
// =#========================================================================$=
/// Iterator over the bytes of a [ByteSource].
///
/// Created by [ByteSource::bytes]. Fused: after end-of-data or the first
/// error it only returns `None`.
pub struct Bytes<S> {
    source: S,
    done: bool,
}

impl<S> Bytes<S> {
    /// Returns the wrapped source.
    pub fn into_inner(self) -> S {
        self.source
    }
}

impl<S: ByteSource> Iterator for Bytes<S> {
    type Item = Result<u8, SourceError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.source.next_byte() {
            Ok(Some(byte)) => Some(Ok(byte)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(err) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }
}

impl<S: ByteSource> std::iter::FusedIterator for Bytes<S> {}

// =#========================================================================#=
// TESTS - BYTE SOURCE
// =#========================================================================$=
#[cfg(test)]
mod tests {
    use super::*;

    /// Yields a fixed number of bytes, then fails once, then reports EOF.
    struct Flaky {
        left: u8,
        failed: bool,
    }

    impl ByteSource for Flaky {
        fn next_byte(&mut self) -> Result<Option<u8>, SourceError> {
            if self.left > 0 {
                self.left -= 1;
                return Ok(Some(self.left));
            }
            if !self.failed {
                self.failed = true;
                return Err(SourceError::read("flaky", "gone"));
            }
            Ok(None)
        }
    }

    #[test]
    fn test_bytes_stops_after_error() {
        let mut bytes = Flaky { left: 2, failed: false }.bytes();
        assert_eq!(bytes.next().unwrap().unwrap(), 1);
        assert_eq!(bytes.next().unwrap().unwrap(), 0);
        assert!(bytes.next().unwrap().is_err());
        assert!(bytes.next().is_none());
        assert!(bytes.next().is_none());
    }

    #[test]
    fn test_dyn_source_through_box() {
        let mut source: Box<dyn ByteSource> = Box::new(Flaky { left: 1, failed: true });
        assert_eq!(source.next_byte().unwrap(), Some(0));
        assert_eq!(source.next_byte().unwrap(), None);
    }

    #[test]
    fn test_by_mut_ref_keeps_source() {
        let mut flaky = Flaky { left: 3, failed: true };
        let first: Vec<u8> = (&mut flaky).bytes().take(1).map(Result::unwrap).collect();
        assert_eq!(first, vec![2]);
        assert_eq!(flaky.next_byte().unwrap(), Some(1));
    }
}
