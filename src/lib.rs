//! Bytestream provides sequential, pull-based access to bytes from a file,
//! an in-memory buffer, or UTF-8 text through one interface.
//!
//! Core functionality provided:
//! - [ByteSource]: the single capability, `next_byte()` returning a byte,
//!   end-of-data (`Ok(None)`), or a [SourceError].
//! - [FileByteSource]: streams a file in fixed-size chunks (default
//!   [DEFAULT_CHUNK_SIZE] bytes) and releases the handle once exhausted.
//! - [BufferByteSource]: serves bytes already held in memory.
//! - [TextByteSource]: serves the UTF-8 encoding of a string.
//!
//! Limitations:
//! - Forward only, no seeking or peeking
//! - No writing
//! - Text is always treated as UTF-8
//!
//! # Usage patterns
//! Pull bytes until the source reports end-of-data:
//! ```no_run
//! use bytestream::{ByteSource, FileByteSource};
//!
//! let mut source = FileByteSource::open("ditr.xml")?;
//! let mut count = 0;
//! while let Some(_byte) = source.next_byte()? {
//!     count += 1;
//! }
//! println!("{count} bytes read");
//! # Ok::<(), bytestream::SourceError>(())
//! ```
//!
//! Or treat any source as an iterator:
//! ```
//! use bytestream::{ByteSource, TextByteSource};
//!
//! let bytes: Result<Vec<u8>, _> = TextByteSource::new("<gpx/>").bytes().collect();
//! assert_eq!(bytes.unwrap(), b"<gpx/>");
//! ```

pub mod source;

pub use source::{
    BufferByteSource, ByteSource, Bytes, DEFAULT_CHUNK_SIZE, FileByteSource,
    FileByteSourceBuilder, SourceError, SourceErrorKind, TextByteSource,
};
