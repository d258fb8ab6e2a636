//! The fact cache interface and its disk-backed implementation.

use std::collections::HashSet;
use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::{
    CacheDocument, CacheEntry, CacheError, CacheFile, CacheKey, Fingerprint, MemoryFactCache,
};

/// Format version written by default: the version of this crate.
pub const DEFAULT_FORMAT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// A per-file cache of extracted facts.
///
/// Callers ask [`has`](FactCache::has) or [`get`](FactCache::get) before
/// extracting a file, and [`set`](FactCache::set) the fact they extracted on
/// a miss. Every path must name an existing file; otherwise the call fails
/// with [`CacheError::PathNotFound`] and the cache is left unchanged.
pub trait FactCache<F> {
    /// Returns true if a fact is cached for `path` and the file has not
    /// changed since. A changed file's entry is evicted.
    fn has(&mut self, path: &Path) -> Result<bool, CacheError>;

    /// Returns the cached fact for `path` if [`has`](FactCache::has) holds.
    fn get(&mut self, path: &Path) -> Result<Option<&F>, CacheError>;

    /// Stores `fact` for `path` under the file's current fingerprint.
    fn set(&mut self, path: &Path, fact: F) -> Result<(), CacheError>;

    /// Persists the cache. Never fails; problems are logged.
    fn write(&mut self);
}

/// Which entries survive a [`write`](FactCache::write).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RetentionPolicy {
    /// Only entries consulted (`get` hit or `set`) during this run.
    #[default]
    TouchedOnly,
    /// Consulted entries plus loaded entries whose file still exists.
    KeepExisting,
}

/// A fact cache persisted to a single document on disk.
///
/// The document is loaded lazily on first use, at most once. Writing keeps
/// only the entries consulted during this run (see [`RetentionPolicy`]), so
/// the document tracks the working set of the latest run.
#[derive(Debug)]
pub struct FileFactCache<F> {
    /// Backing document.
    file: CacheFile,
    /// Version written to, and required of, the document.
    format_version: String,
    /// Which entries are written back.
    retention: RetentionPolicy,
    /// In-memory entries.
    memory: MemoryFactCache<F>,
    /// Keys consulted during this run.
    touched: HashSet<CacheKey>,
    /// Whether the document has been loaded.
    loaded: bool,
}

impl<F> FileFactCache<F>
where
    F: Serialize + DeserializeOwned,
{
    /// Creates a cache backed by the document at `path`.
    ///
    /// Nothing is read until the first operation.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            file: CacheFile::new(path.as_ref()),
            format_version: DEFAULT_FORMAT_VERSION.to_string(),
            retention: RetentionPolicy::default(),
            memory: MemoryFactCache::new(),
            touched: HashSet::new(),
            loaded: false,
        }
    }

    /// Sets the format version the document must carry.
    pub fn with_format_version(mut self, version: impl Into<String>) -> Self {
        self.format_version = version.into();
        self
    }

    /// Sets the retention policy.
    pub fn with_retention(mut self, retention: RetentionPolicy) -> Self {
        self.retention = retention;
        self
    }

    /// Returns the path of the backing document.
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Returns the format version.
    pub fn format_version(&self) -> &str {
        &self.format_version
    }

    /// Returns the number of entries in memory.
    pub fn len(&self) -> usize {
        self.memory.len()
    }

    /// Returns true if no entries are in memory.
    pub fn is_empty(&self) -> bool {
        self.memory.is_empty()
    }

    /// Returns the number of keys consulted during this run.
    pub fn touched_len(&self) -> usize {
        self.touched.len()
    }

    fn load(&mut self) {
        if self.loaded {
            return;
        }
        self.loaded = true;

        if let Some(document) = self.file.load::<F>(&self.format_version) {
            self.memory.extend(document.entries);
        }
    }

    /// Builds the document to persist, borrowing the retained entries.
    fn retained(&self) -> CacheDocument<&CacheEntry<F>> {
        let mut document = CacheDocument::new(self.format_version.as_str());
        document.entries.extend(
            self.memory
                .iter()
                .filter(|(key, _)| self.is_retained(key))
                .map(|(key, entry)| (key.clone(), entry)),
        );
        document
    }

    fn is_retained(&self, key: &CacheKey) -> bool {
        match self.retention {
            RetentionPolicy::TouchedOnly => self.touched.contains(key),
            RetentionPolicy::KeepExisting => {
                self.touched.contains(key) || key.as_path().is_file()
            }
        }
    }
}

impl<F> FactCache<F> for FileFactCache<F>
where
    F: Serialize + DeserializeOwned,
{
    fn has(&mut self, path: &Path) -> Result<bool, CacheError> {
        let key = CacheKey::normalize(path)?;
        self.load();
        self.memory.validate(&key)
    }

    fn get(&mut self, path: &Path) -> Result<Option<&F>, CacheError> {
        let key = CacheKey::normalize(path)?;
        self.load();
        if !self.memory.validate(&key)? {
            return Ok(None);
        }

        self.touched.insert(key.clone());
        Ok(self.memory.fact(&key))
    }

    fn set(&mut self, path: &Path, fact: F) -> Result<(), CacheError> {
        let key = CacheKey::normalize(path)?;
        self.load();
        let fingerprint = Fingerprint::of_file(&key)?;

        self.touched.insert(key.clone());
        self.memory.insert(key, CacheEntry::new(fingerprint, fact));
        Ok(())
    }

    fn write(&mut self) {
        if !self.loaded {
            debug!("Cache was never used; skipping write");
            return;
        }

        let document = self.retained();
        debug!(
            "Writing {} of {} cache entries",
            document.len(),
            self.memory.len()
        );

        match self.file.store(&document) {
            Ok(()) => {}
            Err(e @ CacheError::Unwritable { .. }) => debug!("Skipping cache write: {}", e),
            Err(e) => warn!("Failed to save cache: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde::Deserialize;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::{TempDir, tempdir};

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Fact {
        classes: Vec<String>,
    }

    fn fact(name: &str) -> Fact {
        Fact {
            classes: vec![name.to_string()],
        }
    }

    struct Project {
        dir: TempDir,
    }

    impl Project {
        fn new() -> Self {
            Self {
                dir: tempdir().unwrap(),
            }
        }

        fn file(&self, name: &str, content: &str) -> PathBuf {
            let path = self.dir.path().join(name);
            fs::write(&path, content).unwrap();
            path
        }

        fn cache_path(&self) -> PathBuf {
            self.dir.path().join(".strata.cache")
        }

        /// Opens the cache as a fresh process would.
        fn open(&self) -> FileFactCache<Fact> {
            FileFactCache::new(self.cache_path())
        }

        fn persisted(&self) -> CacheDocument<CacheEntry<Fact>> {
            CacheFile::new(self.cache_path())
                .load(DEFAULT_FORMAT_VERSION)
                .expect("cache document should be readable")
        }
    }

    #[test]
    fn test_set_then_has_and_get() {
        let project = Project::new();
        let a = project.file("a.php", "<?php class A {}");
        let mut cache = project.open();

        cache.set(&a, fact("A")).unwrap();

        assert!(cache.has(&a).unwrap());
        assert_eq!(cache.get(&a).unwrap(), Some(&fact("A")));
    }

    #[test]
    fn test_miss_on_cold_cache() {
        let project = Project::new();
        let a = project.file("a.php", "<?php class A {}");
        let mut cache = project.open();

        assert!(!cache.has(&a).unwrap());
        assert_eq!(cache.get(&a).unwrap(), None);
    }

    #[test]
    fn test_content_change_evicts_once() {
        let project = Project::new();
        let a = project.file("a.php", "<?php class A {}");
        let mut cache = project.open();
        cache.set(&a, fact("A")).unwrap();
        assert_eq!(cache.len(), 1);

        project.file("a.php", "<?php class A extends B {}");

        assert!(!cache.has(&a).unwrap());
        assert_eq!(cache.len(), 0);
        assert_eq!(cache.get(&a).unwrap(), None);

        cache.set(&a, fact("A2")).unwrap();
        assert_eq!(cache.get(&a).unwrap(), Some(&fact("A2")));
    }

    #[test]
    fn test_rewrite_with_same_content_stays_valid() {
        let project = Project::new();
        let a = project.file("a.php", "<?php class A {}");
        let mut cache = project.open();
        cache.set(&a, fact("A")).unwrap();

        project.file("a.php", "<?php class A {}");

        assert!(cache.has(&a).unwrap());
    }

    #[test]
    fn test_different_spellings_share_an_entry() {
        let project = Project::new();
        fs::create_dir(project.dir.path().join("src")).unwrap();
        let a = project.file("a.php", "<?php class A {}");
        let mut cache = project.open();

        cache.set(&a, fact("A")).unwrap();

        let roundabout = project.dir.path().join("src/../a.php");
        assert_eq!(cache.get(&roundabout).unwrap(), Some(&fact("A")));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_has_does_not_touch() {
        let project = Project::new();
        let a = project.file("a.php", "<?php class A {}");
        {
            let mut cache = project.open();
            cache.set(&a, fact("A")).unwrap();
            cache.write();
        }

        let mut cache = project.open();
        assert!(cache.has(&a).unwrap());
        assert_eq!(cache.touched_len(), 0);

        cache.write();
        assert!(project.persisted().is_empty());
    }

    #[test]
    fn test_round_trip_across_processes() {
        let project = Project::new();
        let a = project.file("a.php", "<?php class A {}");
        let b = project.file("b.php", "<?php class B {}");
        {
            let mut cache = project.open();
            cache.set(&a, fact("A")).unwrap();
            cache.set(&b, fact("B")).unwrap();
            cache.write();
        }

        let mut cache = project.open();
        assert_eq!(cache.get(&a).unwrap(), Some(&fact("A")));
        assert_eq!(cache.get(&b).unwrap(), Some(&fact("B")));
    }

    #[test]
    fn test_only_touched_entries_are_written() {
        let project = Project::new();
        let a = project.file("a.php", "<?php class A {}");
        let b = project.file("b.php", "<?php class B {}");
        {
            let mut cache = project.open();
            cache.set(&a, fact("A")).unwrap();
            cache.set(&b, fact("B")).unwrap();
            cache.write();
        }

        {
            let mut cache = project.open();
            assert_eq!(cache.get(&a).unwrap(), Some(&fact("A")));
            assert_eq!(cache.len(), 2);
            cache.write();
        }

        let persisted = project.persisted();
        let keys: Vec<_> = persisted.entries.keys().cloned().collect();
        assert_eq!(keys, vec![CacheKey::normalize(&a).unwrap()]);
    }

    #[test]
    fn test_keep_existing_retains_untouched_entries() {
        let project = Project::new();
        let a = project.file("a.php", "<?php class A {}");
        let b = project.file("b.php", "<?php class B {}");
        let gone = project.file("gone.php", "<?php class Gone {}");
        {
            let mut cache = project.open();
            for (path, name) in [(&a, "A"), (&b, "B"), (&gone, "Gone")] {
                cache.set(path, fact(name)).unwrap();
            }
            cache.write();
        }
        fs::remove_file(&gone).unwrap();

        {
            let mut cache = project.open().with_retention(RetentionPolicy::KeepExisting);
            assert!(cache.get(&a).unwrap().is_some());
            cache.write();
        }

        let persisted = project.persisted();
        let mut expected = vec![
            CacheKey::normalize(&a).unwrap(),
            CacheKey::normalize(&b).unwrap(),
        ];
        expected.sort();
        let keys: Vec<_> = persisted.entries.keys().cloned().collect();
        assert_eq!(keys, expected);
    }

    #[rstest]
    #[case::touched_only(RetentionPolicy::TouchedOnly)]
    #[case::keep_existing(RetentionPolicy::KeepExisting)]
    fn test_evicted_entries_are_never_written(#[case] retention: RetentionPolicy) {
        let project = Project::new();
        let a = project.file("a.php", "<?php class A {}");
        let mut cache = project.open().with_retention(retention);

        cache.set(&a, fact("A")).unwrap();
        project.file("a.php", "<?php class A2 {}");
        assert!(!cache.has(&a).unwrap());
        cache.write();

        assert!(project.persisted().is_empty());
    }

    #[test]
    fn test_version_mismatch_is_a_cold_cache() {
        let project = Project::new();
        let a = project.file("a.php", "<?php class A {}");
        {
            let mut cache = project.open().with_format_version("1.0.0");
            cache.set(&a, fact("A")).unwrap();
            cache.write();
        }

        let mut cache = project.open().with_format_version("2.0.0");
        assert!(!cache.has(&a).unwrap());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_corrupt_document_is_a_cold_cache() {
        let project = Project::new();
        let a = project.file("a.php", "<?php class A {}");
        fs::write(project.cache_path(), "{ truncated").unwrap();

        let mut cache = project.open();
        assert!(!cache.has(&a).unwrap());

        cache.set(&a, fact("A")).unwrap();
        cache.write();
        assert_eq!(project.persisted().len(), 1);
    }

    #[test]
    fn test_loads_at_most_once() {
        let project = Project::new();
        let a = project.file("a.php", "<?php class A {}");
        let mut cache = project.open();
        assert!(!cache.has(&a).unwrap());

        // Another writer fills the document after the first load.
        {
            let mut other = project.open();
            other.set(&a, fact("A")).unwrap();
            other.write();
        }

        assert!(!cache.has(&a).unwrap());
    }

    #[test]
    fn test_write_without_use_is_noop() {
        let project = Project::new();
        let mut cache = project.open();

        cache.write();

        assert!(!project.cache_path().exists());
    }

    #[test]
    fn test_write_to_unwritable_directory() {
        let project = Project::new();
        let a = project.file("a.php", "<?php class A {}");
        let blocker = project.file("blocker", "not a directory");
        let cache_path = blocker.join(".strata.cache");

        let mut cache: FileFactCache<Fact> = FileFactCache::new(&cache_path);
        cache.set(&a, fact("A")).unwrap();
        cache.write();

        assert!(!cache_path.exists());
        assert_eq!(fs::read_to_string(&blocker).unwrap(), "not a directory");
    }

    #[rstest]
    #[case::has("has")]
    #[case::get("get")]
    #[case::set("set")]
    fn test_missing_file_fails_without_changing_state(#[case] operation: &str) {
        let project = Project::new();
        let a = project.file("a.php", "<?php class A {}");
        let missing = project.dir.path().join("missing.php");
        let mut cache = project.open();
        cache.set(&a, fact("A")).unwrap();

        let err = match operation {
            "has" => cache.has(&missing).unwrap_err(),
            "get" => cache.get(&missing).unwrap_err(),
            _ => cache.set(&missing, fact("Missing")).unwrap_err(),
        };

        assert!(matches!(err, CacheError::PathNotFound(p) if p == missing));
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.touched_len(), 1);
        assert!(cache.has(&a).unwrap());
    }

    #[test]
    fn test_edit_before_write_is_not_persisted() {
        let project = Project::new();
        let a = project.file("a.src", "X");
        {
            let mut cache = project.open();
            assert!(!cache.has(&a).unwrap());
            cache.set(&a, fact("X")).unwrap();
            assert!(cache.has(&a).unwrap());

            project.file("a.src", "Y");
            assert!(!cache.has(&a).unwrap());
            cache.write();
        }

        let mut cache = project.open();
        assert!(!cache.has(&a).unwrap());
    }
}
