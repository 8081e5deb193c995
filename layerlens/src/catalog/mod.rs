//! Layer descriptor catalog.
//!
//! The catalog is an ordered, read-only collection of [`LayerDescriptor`]s
//! loaded once at startup. Tile templates may contain an `{api}` placeholder
//! which is replaced with the configured API base URL at load time; all other
//! placeholders are left for layer handlers.
//!
//! ```
//! use layerlens::catalog::Catalog;
//!
//! let catalog = Catalog::from_json(r#"[
//!     {"id": "co2", "type": "raster-timeseries",
//!      "source": {"type": "raster", "tiles": ["{api}/{z}/{x}/{y}"]}}
//! ]"#, Some("https://api.example")).unwrap();
//!
//! let co2 = catalog.get("co2").unwrap();
//! assert_eq!(co2.source.tiles[0], "https://api.example/{z}/{x}/{y}");
//! ```

mod descriptor;
mod error;

pub use descriptor::{
    CompareSpec, DateDomain, LayerDescriptor, Legend, LegendKind, SourceKind, SourceSpec, Swatch,
    TimeUnit,
};
pub use error::CatalogError;

use std::collections::HashMap;
use std::path::Path;

/// Ordered collection of layer descriptors indexed by id.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    layers: Vec<LayerDescriptor>,
    index: HashMap<String, usize>,
}

impl Catalog {
    /// Build a catalog from descriptors, validating ids and domains.
    pub fn new(layers: Vec<LayerDescriptor>) -> Result<Self, CatalogError> {
        let mut index = HashMap::with_capacity(layers.len());
        for (pos, layer) in layers.iter().enumerate() {
            if layer.id.trim().is_empty() {
                return Err(CatalogError::EmptyId(pos));
            }
            if layer.domain.is_some_and(|d| !d.is_ordered()) {
                return Err(CatalogError::InvertedDomain(layer.id.clone()));
            }
            if index.insert(layer.id.clone(), pos).is_some() {
                return Err(CatalogError::DuplicateId(layer.id.clone()));
            }
        }
        Ok(Self { layers, index })
    }

    /// Parse a JSON array of descriptors.
    ///
    /// When `api_url` is given, `{api}` in every tile template is replaced
    /// with it.
    pub fn from_json(json: &str, api_url: Option<&str>) -> Result<Self, CatalogError> {
        let mut layers: Vec<LayerDescriptor> = serde_json::from_str(json)?;
        if let Some(api) = api_url {
            let api = api.trim_end_matches('/');
            for layer in &mut layers {
                layer.substitute_api(api);
            }
        }
        Self::new(layers)
    }

    /// Load a catalog from a JSON file.
    pub fn load(path: &Path, api_url: Option<&str>) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json, api_url)
    }

    /// Look up a descriptor by id.
    pub fn get(&self, id: &str) -> Option<&LayerDescriptor> {
        self.index.get(id).map(|&pos| &self.layers[pos])
    }

    /// Returns whether the catalog defines `id`.
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Descriptors in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &LayerDescriptor> {
        self.layers.iter()
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Ids of layers flagged as enabled at startup, in catalog order.
    pub fn initially_enabled(&self) -> Vec<String> {
        self.layers
            .iter()
            .filter(|l| l.enabled)
            .map(|l| l.id.clone())
            .collect()
    }

    /// Pairs of ids in `active` that must not be shown together.
    ///
    /// A pair counts when either side lists the other in `exclusiveWith`.
    /// Each pair is reported once, in `active` order.
    pub fn exclusivity_violations(&self, active: &[String]) -> Vec<(String, String)> {
        let mut violations = Vec::new();
        for (i, a) in active.iter().enumerate() {
            for b in &active[i + 1..] {
                let a_excludes = self.get(a).is_some_and(|d| d.is_exclusive_with(b));
                let b_excludes = self.get(b).is_some_and(|d| d.is_exclusive_with(a));
                if a_excludes || b_excludes {
                    violations.push((a.clone(), b.clone()));
                }
            }
        }
        violations
    }

    /// Exclusivity declarations that are not mirrored by the other layer.
    ///
    /// Returns `(declaring, declared)` pairs where both ids are in the
    /// catalog. Ids not in the catalog are ignored since catalogs commonly
    /// reference layers defined elsewhere.
    pub fn asymmetric_exclusions(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        for layer in &self.layers {
            for other in &layer.exclusive_with {
                if let Some(o) = self.get(other) {
                    if !o.is_exclusive_with(&layer.id) {
                        pairs.push((layer.id.clone(), other.clone()));
                    }
                }
            }
        }
        pairs
    }
}
