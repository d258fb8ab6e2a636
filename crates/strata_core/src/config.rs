//! Analyser configuration.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::AnalyserError;

/// Configuration for an analysis run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AnalyserConfig {
    /// Files or directories to analyse.
    #[serde(default = "default_paths")]
    pub paths: Vec<String>,

    /// Glob patterns of files to skip.
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Extensions of source files, without the leading dot.
    #[serde(default = "default_file_extensions")]
    pub file_extensions: Vec<String>,

    /// Whether to persist the fact cache between runs.
    #[serde(default = "default_cache")]
    pub cache: bool,

    /// Cache file location.
    #[serde(default = "default_cache_file")]
    pub cache_file: String,

    /// Base directory for resolving relative paths.
    /// This is usually the directory containing the configuration file.
    #[serde(skip)]
    pub base_dir: Option<PathBuf>,
}

fn default_paths() -> Vec<String> {
    vec!["src".to_string()]
}

fn default_file_extensions() -> Vec<String> {
    vec!["php".to_string()]
}

fn default_cache() -> bool {
    true
}

fn default_cache_file() -> String {
    ".strata.cache".to_string()
}

impl AnalyserConfig {
    /// Creates a configuration with all defaults.
    pub fn new() -> Self {
        Self {
            paths: default_paths(),
            exclude: Vec::new(),
            file_extensions: default_file_extensions(),
            cache: default_cache(),
            cache_file: default_cache_file(),
            base_dir: None,
        }
    }

    /// Loads configuration from a file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, AnalyserError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| AnalyserError::config(format!("Failed to read config: {}", e)))?;

        let mut config = Self::from_json(&content)?;

        if let Some(parent) = path.parent() {
            config.base_dir = Some(parent.to_path_buf());
        }

        Ok(config)
    }

    /// Parses configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, AnalyserError> {
        serde_json::from_str(json)
            .map_err(|e| AnalyserError::config(format!("Invalid config: {}", e)))
    }

    /// Resolves a configured path against the base directory.
    pub fn resolve(&self, path: impl AsRef<Path>) -> PathBuf {
        let path = path.as_ref();
        match &self.base_dir {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        }
    }

    /// Returns the resolved cache file path.
    pub fn cache_path(&self) -> PathBuf {
        self.resolve(&self.cache_file)
    }

    /// Returns the resolved paths to analyse.
    pub fn source_paths(&self) -> Vec<PathBuf> {
        self.paths.iter().map(|p| self.resolve(p)).collect()
    }
}

impl Default for AnalyserConfig {
    fn default() -> Self {
        Self::new()
    }
}
