//! UTF-8 text implementation of byte source.
//!
//! [TextByteSource] encodes its text once, up front, and then serves the
//! resulting bytes exactly like a [BufferByteSource].

use crate::source::buffer_byte_source::{BufferByteSource, read_file};
use crate::source::byte_source::ByteSource;
use crate::source::source_error::SourceError;
use std::path::Path;

// =#========================================================================#=
// TEXT BYTE SOURCE
// =#========================================================================$=
/// A byte source over the UTF-8 encoding of a string.
#[derive(Debug, Clone)]
pub struct TextByteSource {
    inner: BufferByteSource,
}

impl TextByteSource {
    /// Creates a byte source over the UTF-8 bytes of `text`.
    ///
    /// A Rust string is UTF-8 by construction, so this cannot fail; use
    /// [from_utf8()](Self::from_utf8) for bytes not yet known to be text.
    pub fn new<S: Into<String>>(text: S) -> Self {
        Self {
            inner: BufferByteSource::new(text.into().into_bytes()),
        }
    }

    /// Creates a byte source from bytes that must form valid UTF-8 text.
    ///
    /// # Errors
    /// Returns [SourceError::Encoding] if `bytes` is not valid UTF-8.
    pub fn from_utf8(bytes: Vec<u8>) -> Result<Self, SourceError> {
        let text = String::from_utf8(bytes).map_err(SourceError::encoding)?;
        Ok(Self::new(text))
    }

    /// Creates a byte source from a text file.
    ///
    /// # Arguments
    /// * `path` - Path to the file (accepting `&str`, `String`, `Path`, or `PathBuf`)
    ///
    /// # Errors
    /// Returns [SourceError::Open] or [SourceError::Read] if the file cannot
    /// be loaded, and [SourceError::Encoding] if it is not valid UTF-8.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SourceError> {
        Self::from_utf8(read_file(path.as_ref())?)
    }

    /// The text this source serves.
    pub fn as_str(&self) -> &str {
        // Only ever built from a `String`.
        std::str::from_utf8(self.inner.as_slice()).unwrap_or_default()
    }

    /// Total number of encoded bytes.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Whether the text is empty.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Number of bytes consumed so far.
    pub fn position(&self) -> usize {
        self.inner.position()
    }
}

impl ByteSource for TextByteSource {
    #[inline(always)]
    fn next_byte(&mut self) -> Result<Option<u8>, SourceError> {
        self.inner.next_byte()
    }
}

impl From<&str> for TextByteSource {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for TextByteSource {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}
