//! # strata_core
//!
//! Incremental fact extraction for Strata.
//!
//! This crate provides:
//! - The `Analyser` that drives one run over a source tree
//! - Configuration loading
//! - File discovery and filtering
//! - The extractor, progress and layer resolver seams implemented by callers
//!
//! Each run consults the fact cache before extracting a file, stores what it
//! extracts, and writes the cache back once at the end.
//!
//! ## Example
//!
//! ```rust,ignore
//! use strata_core::{Analyser, AnalyserConfig, TracingProgress};
//!
//! let config = AnalyserConfig::from_file("strata.json")?;
//! let analyser = Analyser::new(config);
//!
//! let ast_map = analyser.analyse_config(&parser, &TracingProgress::new())?;
//! for class in ast_map.class_references() {
//!     println!("{}", class.name);
//! }
//! ```

mod analyser;
mod ast_map;
mod config;
mod error;
mod extractor;
pub mod file_finder;
mod progress;
mod resolver;

pub use analyser::Analyser;
pub use ast_map::{AnalysisStats, AstMap};
pub use config::AnalyserConfig;
pub use error::AnalyserError;
pub use extractor::FactExtractor;
pub use file_finder::FileFinder;
pub use progress::{NoProgress, ProgressObserver, TracingProgress};
pub use resolver::{ClassLikeLayerResolver, PatternLayerResolver};

pub use strata_ast::{ClassLikeName, ClassReference, FileReference};
