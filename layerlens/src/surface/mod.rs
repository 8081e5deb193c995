//! Map surfaces and the rendering engine boundary.
//!
//! The rendering engine is opaque. [`MapEngine`] creates surfaces and swipe
//! controls; [`MapSurface`] is one live canvas. [`MapSurfaceAdapter`] wraps
//! a surface with the bookkeeping the reconciler relies on: what is
//! rendered, whether the first load fired, which controls are attached.
//!
//! ```text
//!  LayerHandler ──► Vec<TargetedCommand> ──► MapSurfaceAdapter ──► dyn MapSurface
//!                                                  │
//!                                            SurfaceState
//! ```

mod adapter;
mod command;
mod error;
pub mod memory;
mod state;
mod types;

pub use adapter::MapSurfaceAdapter;
pub use command::{SurfaceCommand, TargetedCommand};
pub use error::{EngineError, SurfaceError};
pub use state::{RenderedLayer, RenderedSource, SurfaceState};
pub use types::{
    ControlKind, ControlPosition, ControlSpec, Interactions, SurfaceOptions, SurfaceRole,
};

use tokio::sync::oneshot;

use crate::coord::Camera;

/// A freshly created surface and its one-shot load notification.
pub struct EngineSurface {
    pub surface: Box<dyn MapSurface>,
    /// Resolves once, when the surface's style and first tiles are loaded
    pub loaded: oneshot::Receiver<()>,
}

/// Rendering engine capable of creating map surfaces.
pub trait MapEngine: Send + Sync {
    /// Create a surface rendering into `options.container`.
    fn create_surface(&self, options: &SurfaceOptions) -> Result<EngineSurface, EngineError>;

    /// Create a swipe divider comparing two surfaces inside `container`.
    fn create_swipe(
        &self,
        primary: &str,
        secondary: &str,
        container: &str,
    ) -> Result<Box<dyn SwipeControl>, EngineError>;
}

/// One live map canvas.
pub trait MapSurface: Send {
    /// Engine-assigned identifier.
    fn id(&self) -> &str;

    fn add_control(&mut self, control: &ControlSpec) -> Result<(), EngineError>;

    /// Apply a source or layer mutation.
    fn apply(&mut self, command: &SurfaceCommand) -> Result<(), EngineError>;

    fn camera(&self) -> Camera;

    fn set_camera(&mut self, camera: Camera) -> Result<(), EngineError>;

    /// Re-measure the container.
    fn resize(&mut self);

    /// Destroy the surface and release its resources.
    fn remove(&mut self);
}

/// Swipe divider between two surfaces.
pub trait SwipeControl: Send {
    fn remove(&mut self);
}
