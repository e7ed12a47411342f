//! Error types for byte sources.
//!
//! This module provides [SourceError] and [SourceErrorKind] for representing
//! failures while constructing or reading from a byte source.

use std::path::{Path, PathBuf};
use thiserror::Error;

// =#========================================================================#=
// SOURCE ERROR KIND
// =#========================================================================$=
/// Coarse classification of a [SourceError].
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum SourceErrorKind {
    /// File could not be opened for reading.
    Open,
    /// Reading a chunk from an open file failed or came up short.
    Read,
    /// Text could not be represented as UTF-8.
    Encoding,
    /// A chunk size of zero was requested.
    InvalidChunkSize,
}

// =#========================================================================#=
// SOURCE ERROR
// =#========================================================================$=
/// Error raised by a byte source.
///
/// Every error is terminal for the source that raised it: constructors never
/// return a half-built source, and a source whose read failed reports
/// end-of-data from then on.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Opening (or querying the size of) a file failed.
    #[error("could not open file [{}]: {reason}", .path.display())]
    Open {
        /// Path (or URL) that failed to open
        path: PathBuf,
        /// Human-readable description of the failure
        reason: String,
    },

    /// A chunk read returned fewer bytes than requested or failed outright.
    #[error("could not read from [{}]: {reason}", .path.display())]
    Read {
        /// Path of the file being read
        path: PathBuf,
        /// Human-readable description of the failure
        reason: String,
    },

    /// Text could not be converted into its UTF-8 byte representation.
    #[error("could not read text as data: {reason}")]
    Encoding {
        /// Human-readable description of the failure
        reason: String,
    },

    /// Chunk size must be at least one byte.
    #[error("chunk size must be positive")]
    InvalidChunkSize,
}

impl SourceError {
    /// Convenience constructor for [SourceError::Open]
    pub fn open<P: AsRef<Path>>(path: P, reason: impl ToString) -> Self {
        SourceError::Open {
            path: path.as_ref().to_path_buf(),
            reason: reason.to_string(),
        }
    }

    /// Convenience constructor for [SourceError::Read]
    pub fn read<P: AsRef<Path>>(path: P, reason: impl ToString) -> Self {
        SourceError::Read {
            path: path.as_ref().to_path_buf(),
            reason: reason.to_string(),
        }
    }

    /// Convenience constructor for [SourceError::Encoding]
    pub fn encoding(reason: impl ToString) -> Self {
        SourceError::Encoding { reason: reason.to_string() }
    }

    /// Get the error kind
    pub fn kind(&self) -> SourceErrorKind {
        match self {
            SourceError::Open { .. } => SourceErrorKind::Open,
            SourceError::Read { .. } => SourceErrorKind::Read,
            SourceError::Encoding { .. } => SourceErrorKind::Encoding,
            SourceError::InvalidChunkSize => SourceErrorKind::InvalidChunkSize,
        }
    }

    /// Get the path the error refers to, if any
    pub fn path(&self) -> Option<&Path> {
        match self {
            SourceError::Open { path, .. } | SourceError::Read { path, .. } => Some(path.as_path()),
            SourceError::Encoding { .. } | SourceError::InvalidChunkSize => None,
        }
    }
}
