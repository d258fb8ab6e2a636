//! Cache error types.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors that can occur in the cache system.
///
/// Only [`CacheError::PathNotFound`] and [`CacheError::Io`] reach callers of
/// the fact cache. The remaining variants describe a cache document that
/// could not be used; they are logged and the run continues without it.
#[derive(Debug, Error)]
pub enum CacheError {
    /// The path does not resolve to an existing file.
    #[error("File not found: {}", .0.display())]
    PathNotFound(PathBuf),

    /// Failed to read or write a file.
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        /// The path that caused the error.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The cache document exists but cannot be decoded.
    #[error("Unreadable cache: {0}")]
    Unreadable(String),

    /// The cache document was written by a different format version.
    #[error("Cache version mismatch: expected {expected}, found {found}")]
    VersionMismatch {
        /// Version of the running tool.
        expected: String,
        /// Version recorded in the document.
        found: String,
    },

    /// The cache directory cannot be created or written to.
    #[error("Cache directory {} is not writable: {source}", path.display())]
    Unwritable {
        /// The directory.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl CacheError {
    /// Creates an I/O error for a path.
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Creates an unreadable cache error.
    pub fn unreadable(message: impl Into<String>) -> Self {
        Self::Unreadable(message.into())
    }

    /// Creates an unwritable directory error.
    pub fn unwritable(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Unwritable {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}
