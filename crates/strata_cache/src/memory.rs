//! In-memory fact cache.

use std::collections::HashMap;
use std::path::Path;

use tracing::debug;

use crate::{CacheEntry, CacheError, CacheKey, FactCache, Fingerprint};

/// A fact cache that lives only as long as the process.
///
/// Applies the same normalization and fingerprint invalidation as
/// [`FileFactCache`](crate::FileFactCache) but never touches disk. Used when
/// persistent caching is disabled, and as the entry map behind the file
/// cache.
#[derive(Debug)]
pub struct MemoryFactCache<F> {
    entries: HashMap<CacheKey, CacheEntry<F>>,
}

impl<F> MemoryFactCache<F> {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Returns the number of cached entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Checks the entry for `key` against the file's current content.
    ///
    /// A mismatching entry is evicted.
    pub(crate) fn validate(&mut self, key: &CacheKey) -> Result<bool, CacheError> {
        let Some(entry) = self.entries.get(key) else {
            return Ok(false);
        };

        if Fingerprint::of_file(key)? != entry.fingerprint {
            debug!("Evicting stale cache entry for {}", key);
            self.entries.remove(key);
            return Ok(false);
        }

        debug!("Cache hit for {}", key);
        Ok(true)
    }

    pub(crate) fn fact(&self, key: &CacheKey) -> Option<&F> {
        self.entries.get(key).map(|entry| &entry.fact)
    }

    pub(crate) fn insert(&mut self, key: CacheKey, entry: CacheEntry<F>) {
        self.entries.insert(key, entry);
    }

    pub(crate) fn extend(&mut self, entries: impl IntoIterator<Item = (CacheKey, CacheEntry<F>)>) {
        self.entries.extend(entries);
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (&CacheKey, &CacheEntry<F>)> {
        self.entries.iter()
    }
}

impl<F> Default for MemoryFactCache<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F> FactCache<F> for MemoryFactCache<F> {
    fn has(&mut self, path: &Path) -> Result<bool, CacheError> {
        let key = CacheKey::normalize(path)?;
        self.validate(&key)
    }

    fn get(&mut self, path: &Path) -> Result<Option<&F>, CacheError> {
        let key = CacheKey::normalize(path)?;
        if !self.validate(&key)? {
            return Ok(None);
        }
        Ok(self.fact(&key))
    }

    fn set(&mut self, path: &Path, fact: F) -> Result<(), CacheError> {
        let key = CacheKey::normalize(path)?;
        let fingerprint = Fingerprint::of_file(&key)?;
        self.insert(key, CacheEntry::new(fingerprint, fact));
        Ok(())
    }

    fn write(&mut self) {}
}
