//! Handler registry

use std::collections::HashMap;
use std::sync::Arc;

use super::{LayerHandler, RasterHandler, RasterTimeseriesHandler};

/// Maps layer type tags to handlers.
#[derive(Clone, Default)]
pub struct HandlerRegistry {
    handlers: HashMap<String, Arc<dyn LayerHandler>>,
}

impl HandlerRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with the built-in `raster-timeseries` and `raster` handlers.
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        registry.register(RasterTimeseriesHandler::TYPE, Arc::new(RasterTimeseriesHandler));
        registry.register(RasterHandler::TYPE, Arc::new(RasterHandler));
        registry
    }

    /// Register `handler` for `layer_type`, returning the handler it replaced.
    pub fn register(
        &mut self,
        layer_type: impl Into<String>,
        handler: Arc<dyn LayerHandler>,
    ) -> Option<Arc<dyn LayerHandler>> {
        self.handlers.insert(layer_type.into(), handler)
    }

    pub fn get(&self, layer_type: &str) -> Option<&Arc<dyn LayerHandler>> {
        self.handlers.get(layer_type)
    }

    pub fn contains(&self, layer_type: &str) -> bool {
        self.handlers.contains_key(layer_type)
    }

    /// Registered type tags, sorted.
    pub fn types(&self) -> Vec<&str> {
        let mut types: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        types.sort_unstable();
        types
    }
}

impl std::fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerRegistry")
            .field("types", &self.types())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_types() {
        let registry = HandlerRegistry::with_builtin();
        assert_eq!(registry.types(), vec!["raster", "raster-timeseries"]);
        assert!(registry.contains("raster-timeseries"));
        assert!(!registry.contains("vector"));
    }

    #[test]
    fn test_register_replaces() {
        let mut registry = HandlerRegistry::with_builtin();
        let previous = registry.register("raster", Arc::new(RasterTimeseriesHandler));
        assert!(previous.is_some());
        assert!(registry.register("vector", Arc::new(RasterHandler)).is_none());
        assert_eq!(registry.types().len(), 3);
    }
}
