//! The result of an analysis run.

use std::path::{Path, PathBuf};

use strata_ast::{ClassLikeName, ClassReference, FileReference};

use crate::AnalyserError;

/// Counts of how each file in a run was handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnalysisStats {
    /// Files answered from the fact cache.
    pub cached: usize,
    /// Files the extractor was run on.
    pub extracted: usize,
    /// Files whose extraction failed.
    pub failed: usize,
}

impl AnalysisStats {
    /// Returns the number of files handled.
    pub fn total(&self) -> usize {
        self.cached + self.extracted + self.failed
    }
}

/// Facts for every analysed file, in input order.
#[derive(Debug, Default)]
pub struct AstMap {
    files: Vec<FileReference>,
    failures: Vec<(PathBuf, AnalyserError)>,
    stats: AnalysisStats,
}

impl AstMap {
    pub(crate) fn push_cached(&mut self, file: FileReference) {
        self.stats.cached += 1;
        self.files.push(file);
    }

    pub(crate) fn push_extracted(&mut self, file: FileReference) {
        self.stats.extracted += 1;
        self.files.push(file);
    }

    pub(crate) fn push_failure(&mut self, path: PathBuf, error: AnalyserError) {
        self.stats.failed += 1;
        self.failures.push((path, error));
    }

    /// Returns the facts of every successfully analysed file.
    pub fn files(&self) -> &[FileReference] {
        &self.files
    }

    /// Returns the files that could not be extracted.
    pub fn failures(&self) -> &[(PathBuf, AnalyserError)] {
        &self.failures
    }

    /// Returns the run statistics.
    pub fn stats(&self) -> AnalysisStats {
        self.stats
    }

    /// Returns the facts for one file.
    pub fn file(&self, path: &Path) -> Option<&FileReference> {
        self.files.iter().find(|f| f.filepath() == path)
    }

    /// Iterates over every declared type across all files.
    pub fn class_references(&self) -> impl Iterator<Item = &ClassReference> {
        self.files.iter().flat_map(|f| f.class_references.iter())
    }

    /// Finds the declaration of a type.
    pub fn find_class(&self, name: &ClassLikeName) -> Option<&ClassReference> {
        self.class_references().find(|c| &c.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ast_map() -> AstMap {
        let mut map = AstMap::default();
        map.push_cached(
            FileReference::new("/src/User.php").with_class(ClassReference::new("App\\User")),
        );
        map.push_extracted(
            FileReference::new("/src/Order.php")
                .with_class(ClassReference::new("App\\Order"))
                .with_class(ClassReference::new("App\\OrderLine")),
        );
        map.push_failure(
            PathBuf::from("/src/Broken.php"),
            AnalyserError::extract("/src/Broken.php", "syntax error"),
        );
        map
    }

    #[test]
    fn test_stats() {
        let stats = ast_map().stats();
        assert_eq!(stats.cached, 1);
        assert_eq!(stats.extracted, 1);
        assert_eq!(stats.failed, 1);
        assert_eq!(stats.total(), 3);
    }

    #[test]
    fn test_class_references_span_files() {
        let map = ast_map();
        let names: Vec<_> = map.class_references().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["App\\User", "App\\Order", "App\\OrderLine"]);
    }

    #[test]
    fn test_find_class() {
        let map = ast_map();
        let found = map.find_class(&ClassLikeName::new("\\App\\OrderLine")).unwrap();
        assert_eq!(found.name.as_str(), "App\\OrderLine");
        assert!(map.find_class(&ClassLikeName::new("App\\Missing")).is_none());
    }

    #[test]
    fn test_file_lookup() {
        let map = ast_map();
        assert!(map.file(Path::new("/src/Order.php")).is_some());
        assert!(map.file(Path::new("/src/Broken.php")).is_none());
        assert_eq!(map.failures().len(), 1);
    }
}
