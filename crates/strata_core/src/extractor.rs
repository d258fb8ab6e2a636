//! The seam between the analyser and a source parser.

use std::path::Path;

use strata_ast::FileReference;

use crate::AnalyserError;

/// Extracts structural facts from one source file.
///
/// Implemented by the language parser. The analyser only calls it for files
/// the fact cache cannot answer for.
pub trait FactExtractor {
    /// Extracts the facts of the file at `path`.
    fn extract(&self, path: &Path) -> Result<FileReference, AnalyserError>;
}

impl<T> FactExtractor for T
where
    T: Fn(&Path) -> Result<FileReference, AnalyserError>,
{
    fn extract(&self, path: &Path) -> Result<FileReference, AnalyserError> {
        self(path)
    }
}
