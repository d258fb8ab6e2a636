//! Cache entry and document types.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{CacheKey, Fingerprint};

/// A cached fact together with the fingerprint of the file it came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry<F> {
    /// Fingerprint of the file when the fact was stored.
    pub fingerprint: Fingerprint,

    /// The cached fact.
    pub fact: F,
}

impl<F> CacheEntry<F> {
    /// Creates a new cache entry.
    pub fn new(fingerprint: Fingerprint, fact: F) -> Self {
        Self { fingerprint, fact }
    }
}

/// The persisted form of the cache.
///
/// `E` is the entry type: owned [`CacheEntry`] values when loading, borrowed
/// ones when writing so that facts need not be cloned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheDocument<E> {
    /// Version of the tool that wrote the document.
    pub format_version: String,

    /// Entries keyed by canonical path, in path order.
    pub entries: BTreeMap<CacheKey, E>,
}

impl<E> CacheDocument<E> {
    /// Creates an empty document.
    pub fn new(format_version: impl Into<String>) -> Self {
        Self {
            format_version: format_version.into(),
            entries: BTreeMap::new(),
        }
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the document has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
