//! The seam between extracted facts and layer assignment.

use regex::Regex;
use strata_ast::ClassLikeName;

use crate::AnalyserError;

/// Assigns type names to architectural layers.
///
/// A name can belong to any number of layers, including none.
pub trait ClassLikeLayerResolver {
    /// Returns the names of the layers `name` belongs to.
    fn layers_for(&self, name: &ClassLikeName) -> Vec<String>;
}

/// Resolves layers by matching type names against regular expressions.
///
/// Layers are reported in the order they were added. A layer added twice
/// is reported once.
#[derive(Debug, Default, Clone)]
pub struct PatternLayerResolver {
    layers: Vec<(String, Regex)>,
}

impl PatternLayerResolver {
    /// Creates a resolver with no layers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a layer whose members match `pattern`.
    pub fn with_layer(
        mut self,
        layer: impl Into<String>,
        pattern: &str,
    ) -> Result<Self, AnalyserError> {
        let layer = layer.into();
        let regex = Regex::new(pattern).map_err(|e| {
            AnalyserError::config(format!("Invalid pattern for layer {}: {}", layer, e))
        })?;
        self.layers.push((layer, regex));
        Ok(self)
    }
}

impl ClassLikeLayerResolver for PatternLayerResolver {
    fn layers_for(&self, name: &ClassLikeName) -> Vec<String> {
        let mut layers: Vec<String> = Vec::new();
        for (layer, pattern) in &self.layers {
            if name.matches(pattern) && !layers.contains(layer) {
                layers.push(layer.clone());
            }
        }
        layers
    }
}
