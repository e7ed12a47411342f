//! In-memory implementation of byte source.

use crate::source::byte_source::ByteSource;
use crate::source::source_error::SourceError;
use std::fs::File;
use std::io::Read;
use std::path::Path;

// =#========================================================================#=
// BUFFER BYTE SOURCE
// =#========================================================================$=
/// An in-memory byte source that owns its data.
///
/// This is the most efficient byte source for data
/// that fits entirely in memory. It never fails while reading.
#[derive(Debug, Clone)]
pub struct BufferByteSource {
    /// The owned byte data
    input: Vec<u8>,
    /// Index of the next unread byte
    pos: usize,
}

impl BufferByteSource {
    /// Creates a new in-memory byte source.
    ///
    /// # Arguments
    /// * `bytes` - The bytes to serve (accepting `Vec<u8>`, `&[u8]`, `String`, ...)
    pub fn new<B: Into<Vec<u8>>>(bytes: B) -> Self {
        Self {
            input: bytes.into(),
            pos: 0,
        }
    }

    /// Creates a byte source holding the full contents of a file.
    ///
    /// # Arguments
    /// * `path` - Path to the file (accepting `&str`, `String`, `Path`, or `PathBuf`)
    ///
    /// # Errors
    /// Returns [SourceError::Open] if the file cannot be opened and
    /// [SourceError::Read] if reading it fails.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<BufferByteSource, SourceError> {
        Ok(Self::new(read_file(path.as_ref())?))
    }

    /// Total number of bytes held by the source.
    pub fn len(&self) -> usize {
        self.input.len()
    }

    /// Whether the source holds no bytes at all.
    pub fn is_empty(&self) -> bool {
        self.input.is_empty()
    }

    /// Number of bytes consumed so far.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Number of bytes left to consume.
    pub fn remaining(&self) -> usize {
        self.input.len() - self.pos
    }

    pub(crate) fn as_slice(&self) -> &[u8] {
        &self.input
    }
}

impl ByteSource for BufferByteSource {
    #[inline(always)]
    fn next_byte(&mut self) -> Result<Option<u8>, SourceError> {
        let byte = self.input.get(self.pos).copied();
        if byte.is_some() {
            self.pos += 1;
        }
        Ok(byte)
    }
}

impl From<Vec<u8>> for BufferByteSource {
    fn from(bytes: Vec<u8>) -> Self {
        Self::new(bytes)
    }
}

impl From<&[u8]> for BufferByteSource {
    fn from(bytes: &[u8]) -> Self {
        Self::new(bytes)
    }
}

/// Reads a whole file, mapping failures onto open and read errors.
pub(crate) fn read_file(path: &Path) -> Result<Vec<u8>, SourceError> {
    let mut file = File::open(path).map_err(|err| SourceError::open(path, err))?;
    let mut contents = Vec::new();
    file.read_to_end(&mut contents)
        .map_err(|err| SourceError::read(path, err))?;
    log::debug!("loaded {} bytes from {}", contents.len(), path.display());
    Ok(contents)
}
