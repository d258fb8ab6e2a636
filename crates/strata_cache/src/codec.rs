//! Reading and writing the cache document.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use crate::{CacheDocument, CacheEntry, CacheError};

/// Reads only the version of a document, ignoring its entries.
#[derive(Deserialize)]
struct VersionProbe {
    format_version: String,
}

/// The on-disk location of a cache document.
///
/// Holds no state beyond the path; every call goes to the filesystem.
#[derive(Debug, Clone)]
pub struct CacheFile {
    path: PathBuf,
}

impl CacheFile {
    /// Creates a handle for the given cache file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the cache file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the directory the cache file lives in.
    fn directory(&self) -> PathBuf {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }

    /// Loads the document, or `None` if there is no usable one.
    ///
    /// A missing, unreadable, or undecodable file and a document written by
    /// another format version are all treated as an empty cache.
    pub fn load<F: DeserializeOwned>(
        &self,
        expected_version: &str,
    ) -> Option<CacheDocument<CacheEntry<F>>> {
        match self.read(expected_version) {
            Ok(document) => {
                info!(
                    "Loaded {} cache entries from {}",
                    document.len(),
                    self.path.display()
                );
                Some(document)
            }
            Err(CacheError::Io { source, .. }) if source.kind() == ErrorKind::NotFound => {
                debug!("No cache file found at {}", self.path.display());
                None
            }
            Err(e @ CacheError::VersionMismatch { .. }) => {
                info!("Discarding cache at {}: {}", self.path.display(), e);
                None
            }
            Err(e) => {
                warn!("Ignoring cache at {}: {}", self.path.display(), e);
                None
            }
        }
    }

    fn read<F: DeserializeOwned>(
        &self,
        expected_version: &str,
    ) -> Result<CacheDocument<CacheEntry<F>>, CacheError> {
        let content = fs::read_to_string(&self.path).map_err(|e| CacheError::io(&self.path, e))?;

        // Check the version before decoding entries: facts from another
        // version may not decode at all.
        let probe: VersionProbe =
            serde_json::from_str(&content).map_err(|e| CacheError::unreadable(e.to_string()))?;
        if probe.format_version != expected_version {
            return Err(CacheError::VersionMismatch {
                expected: expected_version.to_string(),
                found: probe.format_version,
            });
        }

        serde_json::from_str(&content).map_err(|e| CacheError::unreadable(e.to_string()))
    }

    /// Writes the document, replacing any existing file atomically.
    ///
    /// The content goes to a temporary file in the destination directory
    /// which is then renamed over the target, so readers never observe a
    /// partial document. Returns [`CacheError::Unwritable`] if the directory
    /// cannot be created or written to.
    pub fn store<E: Serialize>(&self, document: &CacheDocument<E>) -> Result<(), CacheError> {
        let json = serde_json::to_vec(document)
            .map_err(|e| CacheError::Serialization(e.to_string()))?;

        let dir = self.directory();
        fs::create_dir_all(&dir).map_err(|e| CacheError::unwritable(&dir, e))?;

        let mut temp = NamedTempFile::new_in(&dir).map_err(|e| CacheError::unwritable(&dir, e))?;
        temp.write_all(&json).map_err(|e| CacheError::io(temp.path(), e))?;
        temp.persist(&self.path)
            .map_err(|e| CacheError::io(&self.path, e.error))?;

        info!(
            "Saved {} cache entries to {}",
            document.len(),
            self.path.display()
        );

        Ok(())
    }
}
