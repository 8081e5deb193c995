//! Surface and engine errors

use thiserror::Error;

/// Failure reported by the rendering engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error("failed to create surface in '{container}': {reason}")]
    SurfaceCreation { container: String, reason: String },

    #[error("surface '{surface}' rejected command: {reason}")]
    CommandRejected { surface: String, reason: String },

    #[error("failed to create swipe control: {0}")]
    SwipeCreation(String),

    #[error("unknown surface '{0}'")]
    UnknownSurface(String),
}

/// Failure applying a command to a surface adapter.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SurfaceError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("source '{0}' already exists")]
    DuplicateSource(String),

    #[error("source '{0}' does not exist")]
    MissingSource(String),

    #[error("layer '{0}' already exists")]
    DuplicateLayer(String),

    #[error("layer '{0}' does not exist")]
    MissingLayer(String),

    #[error("source '{source_id}' is still used by layer '{layer}'")]
    SourceInUse { source_id: String, layer: String },

    #[error("load notification for surface '{0}' was dropped")]
    LoadSignalDropped(String),
}
