//! Chunked file reader implementation of byte source.
//!
//! This module provides [FileByteSource], which reads a file in fixed-size
//! chunks into its own buffer and serves single bytes from there. Use this
//! for large files where loading everything into memory would be
//! impractical, and [FileByteSourceBuilder] to configure it.

use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::{Path, PathBuf};

use log::{debug, trace};
use url::Url;

use crate::source::byte_source::ByteSource;
use crate::source::source_error::SourceError;

/// Default number of bytes fetched from the file per read.
pub const DEFAULT_CHUNK_SIZE: usize = 1024;

// =#========================================================================#=
// FILE BYTE SOURCE
// =#========================================================================$=
/// A byte source streaming a file chunk by chunk.
///
/// The file size is queried once when the source is opened and trusted from
/// then on. Each refill reads exactly `min(chunk size, bytes left)` bytes;
/// if the file delivers fewer (for instance because it was truncated in the
/// meantime) the source fails with [SourceError::Read] and is exhausted.
///
/// The file handle is released as soon as the last byte has been fetched,
/// on a read failure, on [close()](FileByteSource::close), or when the
/// source is dropped, whichever comes first.
///
/// # Example
/// ```no_run
/// use bytestream::{ByteSource, FileByteSource};
///
/// let mut source = FileByteSource::builder("track.gpx")
///     .with_chunk_size(64 * 1024)
///     .open()?;
///
/// let mut count = 0;
/// while let Some(_byte) = source.next_byte()? {
///     count += 1;
/// }
/// println!("{count} bytes read");
/// # Ok::<(), bytestream::SourceError>(())
/// ```
#[derive(Debug)]
pub struct FileByteSource {
    /// Path of the file, used for error reporting
    path: PathBuf,

    /// Open handle, `None` once released
    file: Option<File>,

    /// Size of the file when it was opened
    file_size: u64,

    /// Number of bytes fetched per read
    chunk_size: usize,

    /// Number of bytes fetched from the file so far
    read_from_file: u64,

    /// Last chunk fetched, empty if none
    buffer: Vec<u8>,

    /// Index of the next unread byte in `buffer`
    buffer_pos: usize,

    /// Number of bytes handed out to the caller
    read_from_source: u64,
}

impl FileByteSource {
    /// Opens a file with the [default chunk size](DEFAULT_CHUNK_SIZE).
    ///
    /// # Arguments
    /// * `path` - Path to the file (accepting `&str`, `String`, `Path`, or `PathBuf`)
    ///
    /// # Errors
    /// Returns [SourceError::Open] if the file cannot be opened or its size
    /// cannot be determined.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<FileByteSource, SourceError> {
        Self::with_chunk_size(path, DEFAULT_CHUNK_SIZE)
    }

    /// Opens a file that is read `chunk_size` bytes at a time.
    ///
    /// Larger chunks mean fewer reads at the cost of a larger buffer.
    ///
    /// # Errors
    /// Returns [SourceError::InvalidChunkSize] if `chunk_size` is zero, and
    /// [SourceError::Open] if the file cannot be opened.
    pub fn with_chunk_size<P: AsRef<Path>>(
        path: P,
        chunk_size: usize,
    ) -> Result<FileByteSource, SourceError> {
        if chunk_size == 0 {
            return Err(SourceError::InvalidChunkSize);
        }

        let path = path.as_ref();
        let file = File::open(path).map_err(|err| SourceError::open(path, err))?;
        let metadata = file.metadata().map_err(|err| SourceError::open(path, err))?;
        if metadata.is_dir() {
            return Err(SourceError::open(path, "is a directory"));
        }
        let file_size = metadata.len();
        debug!(
            "opened {} ({file_size} bytes, chunk size {chunk_size})",
            path.display()
        );

        Ok(Self {
            path: path.to_path_buf(),
            file: Some(file),
            file_size,
            chunk_size,
            read_from_file: 0,
            buffer: Vec::new(),
            buffer_pos: 0,
            read_from_source: 0,
        })
    }

    /// Opens the file behind a `file://` URL with the default chunk size.
    ///
    /// # Errors
    /// Returns [SourceError::Open] if the URL does not denote a local file
    /// or the file cannot be opened.
    pub fn from_url(url: &Url) -> Result<FileByteSource, SourceError> {
        Self::from_url_with_chunk_size(url, DEFAULT_CHUNK_SIZE)
    }

    /// Opens the file behind a `file://` URL, read `chunk_size` bytes at a time.
    ///
    /// # Errors
    /// See [from_url()](Self::from_url) and
    /// [with_chunk_size()](Self::with_chunk_size).
    pub fn from_url_with_chunk_size(
        url: &Url,
        chunk_size: usize,
    ) -> Result<FileByteSource, SourceError> {
        let path = url
            .to_file_path()
            .map_err(|()| SourceError::open(url.as_str(), "not a local file URL"))?;
        Self::with_chunk_size(path, chunk_size)
    }

    /// Creates a [FileByteSourceBuilder] for the given path.
    pub fn builder<P: AsRef<Path>>(path: P) -> FileByteSourceBuilder {
        FileByteSourceBuilder::for_file(path)
    }

    /// Path of the underlying file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Size of the file at the time it was opened.
    pub fn file_size(&self) -> u64 {
        self.file_size
    }

    /// Number of bytes fetched per read.
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Whether the file handle is still held.
    pub fn is_open(&self) -> bool {
        self.file.is_some()
    }

    /// Number of bytes handed out so far.
    pub fn position(&self) -> u64 {
        self.read_from_source
    }

    /// Releases the file handle and discards any buffered bytes.
    ///
    /// The source is exhausted afterwards. Calling this more than once has
    /// no further effect.
    pub fn close(&mut self) {
        self.buffer.clear();
        self.buffer_pos = 0;
        if self.file.take().is_some() {
            debug!(
                "closed {} after {} bytes",
                self.path.display(),
                self.read_from_source
            );
        }
    }
}

impl ByteSource for FileByteSource {
    fn next_byte(&mut self) -> Result<Option<u8>, SourceError> {
        loop {
            // Fast path: serve from the current chunk
            if let Some(&byte) = self.buffer.get(self.buffer_pos) {
                self.buffer_pos += 1;
                self.read_from_source += 1;
                return Ok(Some(byte));
            }

            let Some(file) = self.file.as_mut() else {
                return Ok(None);
            };

            if self.read_from_file >= self.file_size {
                self.close();
                return Ok(None);
            }

            let remaining = self.file_size - self.read_from_file;
            let len = remaining.min(self.chunk_size as u64) as usize;
            self.buffer.resize(len, 0);
            if let Err(err) = file.read_exact(&mut self.buffer) {
                let reason = match err.kind() {
                    ErrorKind::UnexpectedEof => format!(
                        "expected {len} bytes at offset {}, but file ended early",
                        self.read_from_file
                    ),
                    _ => err.to_string(),
                };
                self.close();
                return Err(SourceError::read(&self.path, reason));
            }

            self.read_from_file += len as u64;
            self.buffer_pos = 0;
            trace!(
                "fetched {len} bytes from {} ({}/{})",
                self.path.display(),
                self.read_from_file,
                self.file_size
            );
        }
    }
}

// =#========================================================================#=
// FILE BYTE SOURCE BUILDER
// =#========================================================================$=
/// Builder for configuring and opening a [FileByteSource].
///
/// # Configuration Options
/// * **Chunk size**: Number of bytes fetched per read
///   - [`with_chunk_size()`](Self::with_chunk_size)
///     — defaults to [DEFAULT_CHUNK_SIZE]
///
/// # Example
/// ```no_run
/// use bytestream::FileByteSourceBuilder;
///
/// let source = FileByteSourceBuilder::for_file("ditr.xml")
///     .with_chunk_size(4096)
///     .open()?;
/// assert_eq!(source.chunk_size(), 4096);
/// # Ok::<(), bytestream::SourceError>(())
/// ```
#[derive(Debug, Clone)]
pub struct FileByteSourceBuilder {
    path: PathBuf,
    chunk_size: usize,
}

impl FileByteSourceBuilder {
    /// Creates a new builder for a file with default settings.
    ///
    /// Nothing is opened until [open()](Self::open) is called.
    ///
    /// # Arguments
    /// * `path` - Path to the file (accepting `&str`, `String`, `Path`, or `PathBuf`)
    pub fn for_file<P: AsRef<Path>>(path: P) -> Self {
        FileByteSourceBuilder {
            path: path.as_ref().to_path_buf(),
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }

    /// Configure the number of bytes fetched per read.
    ///
    /// A value of zero is rejected by [open()](Self::open).
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    /// Opens the configured file.
    ///
    /// # Errors
    /// See [FileByteSource::with_chunk_size].
    pub fn open(self) -> Result<FileByteSource, SourceError> {
        FileByteSource::with_chunk_size(self.path, self.chunk_size)
    }
}

// =#========================================================================#=
// TESTS - FILE BYTE SOURCE
// =#========================================================================$=
#[cfg(test)]
mod tests {
    use super::*;
    use crate::SourceErrorKind;
    use std::fs::OpenOptions;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn temp_file_with(bytes: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(bytes).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_chunks_of_two_for_three_bytes() {
        let file = temp_file_with(&[0x41, 0x42, 0x43]);
        let mut source = FileByteSource::with_chunk_size(file.path(), 2).unwrap();

        assert_eq!(source.next_byte().unwrap(), Some(0x41));
        assert_eq!(source.buffer.len(), 2);
        assert_eq!(source.next_byte().unwrap(), Some(0x42));
        assert_eq!(source.next_byte().unwrap(), Some(0x43));
        assert_eq!(source.buffer.len(), 1);
        assert_eq!(source.read_from_file, 3);
        assert!(source.is_open());

        assert_eq!(source.next_byte().unwrap(), None);
        assert!(!source.is_open());
        assert_eq!(source.next_byte().unwrap(), None);
    }

    #[test]
    fn test_empty_file() {
        let file = temp_file_with(&[]);
        let mut source = FileByteSource::open(file.path()).unwrap();
        assert_eq!(source.file_size(), 0);
        assert_eq!(source.next_byte().unwrap(), None);
        assert!(!source.is_open());
    }

    #[test]
    fn test_zero_chunk_size_rejected() {
        let file = temp_file_with(b"abc");
        let err = FileByteSource::with_chunk_size(file.path(), 0).unwrap_err();
        assert_eq!(err.kind(), SourceErrorKind::InvalidChunkSize);
    }

    #[test]
    fn test_directory_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let err = FileByteSource::open(dir.path()).unwrap_err();
        assert_eq!(err.kind(), SourceErrorKind::Open);
        assert_eq!(err.path(), Some(dir.path()));
    }

    #[test]
    fn test_truncated_while_reading() {
        let file = temp_file_with(&[7u8; 3000]);
        let mut source = FileByteSource::with_chunk_size(file.path(), 1024).unwrap();
        assert_eq!(source.next_byte().unwrap(), Some(7));

        OpenOptions::new()
            .write(true)
            .open(file.path())
            .unwrap()
            .set_len(100)
            .unwrap();

        // Rest of the first chunk is still buffered
        for _ in 1..1024 {
            assert_eq!(source.next_byte().unwrap(), Some(7));
        }
        let err = source.next_byte().unwrap_err();
        assert_eq!(err.kind(), SourceErrorKind::Read);
        assert_eq!(err.path(), Some(file.path()));
        assert!(!source.is_open());
        assert_eq!(source.next_byte().unwrap(), None);
    }

    #[test]
    fn test_close_exhausts() {
        let file = temp_file_with(b"<gpx></gpx>");
        let mut source = FileByteSource::open(file.path()).unwrap();
        assert_eq!(source.next_byte().unwrap(), Some(b'<'));
        source.close();
        source.close();
        assert_eq!(source.next_byte().unwrap(), None);
    }

    #[test]
    fn test_position() {
        let file = temp_file_with(b"abcdef");
        let mut source = FileByteSource::with_chunk_size(file.path(), 4).unwrap();
        assert_eq!(source.position(), 0);
        source.next_byte().unwrap();
        assert_eq!(source.position(), 1);
        for _ in 0..4 {
            source.next_byte().unwrap();
        }
        assert_eq!(source.position(), 5);
    }

    #[test]
    fn test_position_after_close() {
        let file = temp_file_with(b"abcdef");
        let mut source = FileByteSource::with_chunk_size(file.path(), 4).unwrap();
        assert_eq!(source.next_byte().unwrap(), Some(b'a'));
        source.close();
        assert_eq!(source.position(), 1);
        assert_eq!(source.next_byte().unwrap(), None);
        assert_eq!(source.position(), 1);
    }

    #[test]
    fn test_position_after_eof() {
        let file = temp_file_with(b"abc");
        let mut source = FileByteSource::with_chunk_size(file.path(), 2).unwrap();
        while source.next_byte().unwrap().is_some() {}
        assert!(!source.is_open());
        assert_eq!(source.position(), 3);
    }

    #[test]
    fn test_from_url() {
        let file = temp_file_with(b"xy");
        let url = Url::from_file_path(file.path()).unwrap();
        let mut source = FileByteSource::from_url(&url).unwrap();
        assert_eq!(source.next_byte().unwrap(), Some(b'x'));

        let remote = Url::parse("https://example.com/track.gpx").unwrap();
        let err = FileByteSource::from_url(&remote).unwrap_err();
        assert_eq!(err.kind(), SourceErrorKind::Open);
    }

    #[test]
    fn test_builder_defaults() {
        let file = temp_file_with(b"x");
        let source = FileByteSource::builder(file.path()).open().unwrap();
        assert_eq!(source.chunk_size(), DEFAULT_CHUNK_SIZE);
        assert_eq!(source.path(), file.path());
    }
}
