//! Source locations of references.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Where in a source file a reference occurs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FileOccurrence {
    /// Path of the file containing the reference.
    pub filepath: PathBuf,
    /// Line number (1-indexed).
    pub line: u32,
}

impl FileOccurrence {
    /// Creates a new occurrence.
    pub fn new(filepath: impl Into<PathBuf>, line: u32) -> Self {
        Self {
            filepath: filepath.into(),
            line,
        }
    }
}
