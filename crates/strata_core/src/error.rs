//! Analyser error types.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors that can occur during analysis.
#[derive(Debug, Error)]
pub enum AnalyserError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Fact extraction failed for a file.
    #[error("Failed to extract {}: {message}", path.display())]
    Extract {
        /// The file being extracted.
        path: PathBuf,
        /// What went wrong.
        message: String,
    },

    /// Cache error.
    #[error("Cache error: {0}")]
    Cache(#[from] strata_cache::CacheError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AnalyserError {
    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an extraction error.
    pub fn extract(path: impl AsRef<Path>, message: impl Into<String>) -> Self {
        Self::Extract {
            path: path.as_ref().to_path_buf(),
            message: message.into(),
        }
    }
}
