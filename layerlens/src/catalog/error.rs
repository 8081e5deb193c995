//! Catalog loading errors.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading a layer catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Catalog file could not be read
    #[error("Failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Catalog JSON is malformed or does not match the descriptor shape
    #[error("Invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A descriptor has an empty id
    #[error("Layer at position {0} has an empty id")]
    EmptyId(usize),

    /// Two descriptors share an id
    #[error("Duplicate layer id '{0}'")]
    DuplicateId(String),

    /// A descriptor's domain ends before it starts
    #[error("Layer '{0}' has a domain that ends before it starts")]
    InvertedDomain(String),
}
