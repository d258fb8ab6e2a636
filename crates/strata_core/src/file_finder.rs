//! Source file discovery.

use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};
use tracing::info;
use walkdir::WalkDir;

use crate::error::AnalyserError;

/// Finds source files under the configured paths.
pub struct FileFinder {
    exclude_globs: Option<GlobSet>,
    extensions: Vec<String>,
}

impl FileFinder {
    pub fn new(exclude: &[String], extensions: &[String]) -> Result<Self, AnalyserError> {
        let exclude_globs = Self::build_globset(exclude)?;

        Ok(Self {
            exclude_globs,
            extensions: extensions.to_vec(),
        })
    }

    fn build_globset(patterns: &[String]) -> Result<Option<GlobSet>, AnalyserError> {
        if patterns.is_empty() {
            return Ok(None);
        }

        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            let glob = Glob::new(pattern)
                .map_err(|e| AnalyserError::config(format!("Invalid glob pattern: {}", e)))?;
            builder.add(glob);
        }

        let globset = builder
            .build()
            .map_err(|e| AnalyserError::config(format!("Failed to build globset: {}", e)))?;

        Ok(Some(globset))
    }

    /// Checks if a file should be skipped by extension or exclude pattern.
    pub fn should_ignore(&self, path: &Path) -> bool {
        if self
            .exclude_globs
            .as_ref()
            .is_some_and(|excludes| excludes.is_match(path))
        {
            return true;
        }

        let has_extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|e| e == ext));

        !has_extension
    }

    /// Collects source files from files and directories.
    ///
    /// Returned paths are canonical, sorted, and unique. A path that does
    /// not exist is a configuration error.
    pub fn discover_files(&self, paths: &[PathBuf]) -> Result<Vec<PathBuf>, AnalyserError> {
        let mut files = Vec::new();

        for path in paths {
            let root = path.canonicalize().map_err(|_| {
                AnalyserError::config(format!("Path does not exist: {}", path.display()))
            })?;

            if root.is_file() {
                if !self.should_ignore(&root) {
                    files.push(root);
                }
                continue;
            }

            for entry in WalkDir::new(&root)
                .follow_links(true)
                .into_iter()
                .filter_map(|e| e.ok())
            {
                let path = entry.path();
                if path.is_file() && !self.should_ignore(path) {
                    files.push(path.to_path_buf());
                }
            }
        }

        files.sort();
        files.dedup();

        info!("Discovered {} files to analyse", files.len());
        Ok(files)
    }
}
