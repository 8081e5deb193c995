//! Layer type handlers.
//!
//! Each catalog layer declares a `type`; the [`HandlerRegistry`] maps that
//! tag to a [`LayerHandler`]. Handlers are pure: they read the external
//! state and the rendered state of the surfaces and return the commands that
//! bring the surfaces in line. The reconciler applies the commands, so
//! calling a handler twice with an unchanged context yields no further
//! changes.
//!
//! Built-in handlers:
//!
//! | Type                | Handler                     | `update` |
//! |---------------------|-----------------------------|----------|
//! | `raster-timeseries` | [`RasterTimeseriesHandler`] | yes      |
//! | `raster`            | [`RasterHandler`]           | no       |

mod raster;
mod raster_timeseries;
mod registry;
pub mod template;

pub use raster::RasterHandler;
pub use raster_timeseries::RasterTimeseriesHandler;
pub use registry::HandlerRegistry;

use crate::catalog::LayerDescriptor;
use crate::state::ExternalState;
use crate::surface::{SurfaceRole, SurfaceState, TargetedCommand};

/// What a handler sees when it is invoked.
#[derive(Debug, Clone, Copy)]
pub struct SurfaceContext<'a> {
    /// State of the current cycle
    pub state: &'a ExternalState,
    pub primary: &'a SurfaceState,
    /// Present only while comparing and after the compare surface loaded
    pub secondary: Option<&'a SurfaceState>,
}

impl<'a> SurfaceContext<'a> {
    /// Rendered state of the surface in `role`, if it is available.
    pub fn surface(&self, role: SurfaceRole) -> Option<&'a SurfaceState> {
        match role {
            SurfaceRole::Primary => Some(self.primary),
            SurfaceRole::Secondary => self.secondary,
        }
    }

    /// Every available surface, primary first.
    pub fn surfaces(&self) -> impl Iterator<Item = (SurfaceRole, &'a SurfaceState)> {
        std::iter::once((SurfaceRole::Primary, self.primary))
            .chain(self.secondary.map(|s| (SurfaceRole::Secondary, s)))
    }
}

/// Show/hide/update capabilities of a layer type.
///
/// `prev` is the external state of the previous cycle.
pub trait LayerHandler: Send + Sync {
    /// Commands that make the layer visible.
    fn show(
        &self,
        ctx: &SurfaceContext<'_>,
        layer: &LayerDescriptor,
        prev: &ExternalState,
    ) -> Vec<TargetedCommand>;

    /// Commands that hide the layer on every surface rendering it.
    fn hide(
        &self,
        ctx: &SurfaceContext<'_>,
        layer: &LayerDescriptor,
        prev: &ExternalState,
    ) -> Vec<TargetedCommand>;

    /// Commands that bring a shown layer in line with the current state.
    ///
    /// `None` means the type has no update capability.
    fn update(
        &self,
        _ctx: &SurfaceContext<'_>,
        _layer: &LayerDescriptor,
        _prev: &ExternalState,
    ) -> Option<Vec<TargetedCommand>> {
        None
    }
}
