//! Area-of-interest drawing overlay.
//!
//! The drawing toolkit is opaque: the map view only sets it up, forwards
//! state changes and tears it down. [`AoiOverlay`] is that boundary;
//! [`MemoryAoiOverlay`] records the calls it receives.

mod memory;
mod types;

pub use memory::{AoiCall, MemoryAoiOverlay};
pub use types::{AoiAction, AoiFeature, AoiState, DrawTheme};

use crate::action::ActionDispatcher;

/// Drawing toolkit bound to the primary map surface.
pub trait AoiOverlay: Send {
    /// Bind the toolkit. Called once, after the primary surface is created.
    ///
    /// Toolkit events are forwarded through `dispatcher` as
    /// [`MapAction::Aoi`](crate::action::MapAction::Aoi).
    fn setup(
        &mut self,
        dispatcher: ActionDispatcher,
        initial: Option<Vec<AoiFeature>>,
        theme: &DrawTheme,
    );

    /// Apply an AOI state change.
    fn update(&mut self, prev: Option<&AoiState>, next: Option<&AoiState>);

    /// Release the toolkit.
    fn teardown(&mut self);
}
