//! Progress reporting for analysis runs.

use std::cell::Cell;
use std::path::Path;

use tracing::{debug, info};

use crate::AnalysisStats;

/// Receives progress notifications during a run.
///
/// All methods default to doing nothing.
pub trait ProgressObserver {
    /// Called once before any file is analysed.
    fn on_start(&self, _expected_files: usize) {}

    /// Called after each file; `cached` is true if extraction was skipped.
    fn on_file_analyzed(&self, _path: &Path, _cached: bool) {}

    /// Called once after the last file.
    fn on_finish(&self, _stats: &AnalysisStats) {}
}

/// Ignores all progress.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressObserver for NoProgress {}

/// Reports progress through `tracing`.
#[derive(Debug, Default)]
pub struct TracingProgress {
    expected: Cell<usize>,
    analysed: Cell<usize>,
}

impl TracingProgress {
    /// Creates a new reporter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of files reported so far.
    pub fn analysed(&self) -> usize {
        self.analysed.get()
    }
}

impl ProgressObserver for TracingProgress {
    fn on_start(&self, expected_files: usize) {
        self.expected.set(expected_files);
        self.analysed.set(0);
        info!("Analysing {} files", expected_files);
    }

    fn on_file_analyzed(&self, path: &Path, cached: bool) {
        let analysed = self.analysed.get() + 1;
        self.analysed.set(analysed);
        debug!(
            "[{}/{}] {}{}",
            analysed,
            self.expected.get(),
            path.display(),
            if cached { " (cached)" } else { "" }
        );
    }

    fn on_finish(&self, stats: &AnalysisStats) {
        info!(
            "Analysed {} files ({} cached, {} extracted, {} failed)",
            stats.total(),
            stats.cached,
            stats.extracted,
            stats.failed
        );
    }
}
