//! Byte sources: one pull-based interface, three backing stores.
pub(crate) mod buffer_byte_source;
pub(crate) mod byte_source;
pub(crate) mod file_byte_source;
pub mod source_error;
pub(crate) mod text_byte_source;

pub use buffer_byte_source::BufferByteSource;
pub use byte_source::{ByteSource, Bytes};
pub use file_byte_source::{DEFAULT_CHUNK_SIZE, FileByteSource, FileByteSourceBuilder};
pub use source_error::{SourceError, SourceErrorKind};
pub use text_byte_source::TextByteSource;
