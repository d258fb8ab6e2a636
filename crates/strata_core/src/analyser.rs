//! Incremental analysis driver.

use std::path::PathBuf;

use strata_ast::FileReference;
use strata_cache::{FactCache, FileFactCache, MemoryFactCache};
use tracing::{debug, warn};

use crate::{AnalyserConfig, AnalyserError, AstMap, FactExtractor, FileFinder, ProgressObserver};

/// Drives extraction over a set of files, reusing cached facts.
///
/// Owns the fact cache for the lifetime of the run. An analyser performs a
/// single run: [`Analyser::analyse`] consumes it and writes the cache back
/// exactly once.
pub struct Analyser {
    /// Analyser configuration.
    config: AnalyserConfig,
    /// Fact cache.
    cache: Box<dyn FactCache<FileReference>>,
}

impl Analyser {
    /// Creates an analyser with the cache selected by the configuration.
    pub fn new(config: AnalyserConfig) -> Self {
        let cache: Box<dyn FactCache<FileReference>> = if config.cache {
            Box::new(FileFactCache::<FileReference>::new(config.cache_path()))
        } else {
            debug!("Fact cache disabled");
            Box::new(MemoryFactCache::<FileReference>::new())
        };

        Self::with_cache(config, cache)
    }

    /// Creates an analyser with an explicit cache.
    pub fn with_cache(config: AnalyserConfig, cache: Box<dyn FactCache<FileReference>>) -> Self {
        Self { config, cache }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &AnalyserConfig {
        &self.config
    }

    /// Discovers the source files named by the configuration.
    pub fn discover_files(&self) -> Result<Vec<PathBuf>, AnalyserError> {
        let finder = FileFinder::new(&self.config.exclude, &self.config.file_extensions)?;
        finder.discover_files(&self.config.source_paths())
    }

    /// Analyses the files named by the configuration.
    pub fn analyse_config(
        self,
        extractor: &dyn FactExtractor,
        progress: &dyn ProgressObserver,
    ) -> Result<AstMap, AnalyserError> {
        let files = self.discover_files()?;
        self.analyse(extractor, &files, progress)
    }

    /// Analyses `files`, extracting only those the cache cannot answer for.
    ///
    /// Extraction failures are collected in the returned map and do not stop
    /// the run. A cache error (such as a file that no longer exists) aborts
    /// it. Either way the cache is written before returning.
    pub fn analyse(
        mut self,
        extractor: &dyn FactExtractor,
        files: &[PathBuf],
        progress: &dyn ProgressObserver,
    ) -> Result<AstMap, AnalyserError> {
        progress.on_start(files.len());

        let result = self.analyse_files(extractor, files, progress);
        self.cache.write();

        let ast_map = result?;
        progress.on_finish(&ast_map.stats());
        Ok(ast_map)
    }

    fn analyse_files(
        &mut self,
        extractor: &dyn FactExtractor,
        files: &[PathBuf],
        progress: &dyn ProgressObserver,
    ) -> Result<AstMap, AnalyserError> {
        let mut ast_map = AstMap::default();

        for path in files {
            if let Some(file) = self.cache.get(path)?.cloned() {
                debug!("Using cached facts for {}", path.display());
                ast_map.push_cached(file);
                progress.on_file_analyzed(path, true);
                continue;
            }

            debug!("Extracting facts from {}", path.display());
            match extractor.extract(path) {
                Ok(file) => {
                    self.cache.set(path, file.clone())?;
                    ast_map.push_extracted(file);
                }
                Err(e) => {
                    warn!("Failed to extract {}: {}", path.display(), e);
                    ast_map.push_failure(path.clone(), e);
                }
            }
            progress.on_file_analyzed(path, false);
        }

        Ok(ast_map)
    }
}
