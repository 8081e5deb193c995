//! Map view errors

use thiserror::Error;

use crate::surface::{EngineError, SurfaceError};

/// Failure of a map view lifecycle call or update cycle.
#[derive(Debug, Error)]
pub enum MapViewError {
    /// The view has no primary surface yet, or was unmounted
    #[error("map view is not mounted")]
    NotMounted,

    #[error("map view is already mounted")]
    AlreadyMounted,

    #[error("engine error: {0}")]
    Engine(#[from] EngineError),

    #[error("surface error: {0}")]
    Surface(#[from] SurfaceError),
}
