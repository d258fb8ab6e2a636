//! Canonical file identities.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::CacheError;

/// A normalized, absolute, symlink-resolved file path.
///
/// Two spellings of the same file (relative segments, `..`, symlinks)
/// normalize to the same key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CacheKey(PathBuf);

impl CacheKey {
    /// Normalizes a path into a key.
    ///
    /// Fails with [`CacheError::PathNotFound`] if the path does not resolve
    /// to an existing file.
    pub fn normalize(path: impl AsRef<Path>) -> Result<Self, CacheError> {
        let path = path.as_ref();
        path.canonicalize()
            .map(Self)
            .map_err(|_| CacheError::PathNotFound(path.to_path_buf()))
    }

    /// Wraps a path that is already canonical.
    pub(crate) fn from_canonical(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    /// Returns the canonical path.
    #[inline]
    pub fn as_path(&self) -> &Path {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

impl AsRef<Path> for CacheKey {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}
