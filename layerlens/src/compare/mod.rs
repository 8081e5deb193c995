//! Compare mode: a second map surface behind a swipe divider.
//!
//! The coordinator has two states. Inactive holds nothing. Active holds the
//! secondary surface and the swipe control, plus a ready flag that is set
//! when the secondary fires its first load. Until then, the secondary is not
//! offered to layer handlers.

use std::sync::Arc;

use crate::coord::Camera;
use crate::log::Logger;
use crate::surface::{
    ControlSpec, EngineError, MapEngine, MapSurfaceAdapter, SurfaceError, SurfaceRole,
    SwipeControl,
};
use crate::{log_debug, log_info, log_warn};

/// Default container of the compare surface.
pub const DEFAULT_SECONDARY_CONTAINER: &str = "map-compare";

/// Default container shared by both surfaces and the divider.
pub const DEFAULT_SWIPE_CONTAINER: &str = "container";

/// State change caused by a compare flag flip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareTransition {
    Activated,
    Deactivated,
}

/// Owns the secondary surface and the swipe control.
pub struct CompareCoordinator {
    secondary: Option<MapSurfaceAdapter>,
    control: Option<Box<dyn SwipeControl>>,
    ready: bool,
    secondary_container: String,
    swipe_container: String,
    logger: Arc<dyn Logger>,
}

impl CompareCoordinator {
    pub fn new(logger: Arc<dyn Logger>) -> Self {
        Self {
            secondary: None,
            control: None,
            ready: false,
            secondary_container: DEFAULT_SECONDARY_CONTAINER.to_string(),
            swipe_container: DEFAULT_SWIPE_CONTAINER.to_string(),
            logger,
        }
    }

    /// Use different container ids for the compare surface and the divider.
    pub fn with_containers(
        mut self,
        secondary: impl Into<String>,
        swipe: impl Into<String>,
    ) -> Self {
        self.secondary_container = secondary.into();
        self.swipe_container = swipe.into();
        self
    }

    /// React to the compare flag.
    ///
    /// Creates or destroys the secondary surface when `comparing` differs
    /// from the current state; otherwise does nothing.
    pub fn transition(
        &mut self,
        engine: &dyn MapEngine,
        primary: &mut MapSurfaceAdapter,
        comparing: bool,
    ) -> Result<Option<CompareTransition>, EngineError> {
        match (self.is_active(), comparing) {
            (false, true) => {
                self.activate(engine, primary)?;
                Ok(Some(CompareTransition::Activated))
            }
            (true, false) => {
                self.deactivate();
                Ok(Some(CompareTransition::Deactivated))
            }
            _ => Ok(None),
        }
    }

    fn activate(
        &mut self,
        engine: &dyn MapEngine,
        primary: &mut MapSurfaceAdapter,
    ) -> Result<(), EngineError> {
        primary.resize();

        let camera = primary.camera();
        let options = primary
            .options()
            .for_secondary(camera, self.secondary_container.clone());
        let mut secondary = MapSurfaceAdapter::create(engine, SurfaceRole::Secondary, options)?;

        let attached = secondary
            .add_control(ControlSpec::navigation())
            .and_then(|_| secondary.add_control(ControlSpec::compact_attribution()))
            .and_then(|_| engine.create_swipe(primary.id(), secondary.id(), &self.swipe_container));

        match attached {
            Ok(control) => {
                log_info!(
                    self.logger,
                    "Compare surface {} created at {} z{}",
                    secondary.id(),
                    camera.center,
                    camera.zoom
                );
                self.secondary = Some(secondary);
                self.control = Some(control);
                self.ready = false;
                Ok(())
            }
            Err(e) => {
                log_warn!(self.logger, "Compare activation failed: {}", e);
                secondary.destroy();
                Err(e)
            }
        }
    }

    /// Remove the divider and destroy the secondary surface.
    ///
    /// Returns false when compare mode was not active.
    pub fn deactivate(&mut self) -> bool {
        let was_active = self.is_active();
        if let Some(mut control) = self.control.take() {
            control.remove();
        }
        if let Some(secondary) = self.secondary.take() {
            log_info!(self.logger, "Compare surface {} removed", secondary.id());
            secondary.destroy();
        }
        self.ready = false;
        was_active
    }

    /// Check for the secondary's first load without blocking.
    ///
    /// Returns true exactly once, when the secondary becomes ready.
    pub fn poll_ready(&mut self) -> bool {
        if self.ready {
            return false;
        }
        let Some(secondary) = self.secondary.as_mut() else {
            return false;
        };
        if secondary.poll_loaded() {
            log_debug!(self.logger, "Compare surface {} loaded", secondary.id());
            self.ready = true;
            return true;
        }
        false
    }

    /// Wait for the secondary's first load.
    ///
    /// Returns true when this call made the secondary ready, false when it
    /// already was or compare mode is inactive.
    pub async fn wait_ready(&mut self) -> Result<bool, SurfaceError> {
        if self.ready {
            return Ok(false);
        }
        let Some(secondary) = self.secondary.as_mut() else {
            return Ok(false);
        };
        if secondary.wait_loaded().await? || secondary.is_loaded() {
            log_debug!(self.logger, "Compare surface {} loaded", secondary.id());
            self.ready = true;
            return Ok(true);
        }
        Ok(false)
    }

    /// Move the secondary camera to `camera` when they differ.
    pub fn sync_camera(&mut self, camera: Camera) -> Result<bool, EngineError> {
        let Some(secondary) = self.secondary.as_mut() else {
            return Ok(false);
        };
        if secondary.camera() == camera {
            return Ok(false);
        }
        secondary.set_camera(camera)?;
        Ok(true)
    }

    pub fn is_active(&self) -> bool {
        self.secondary.is_some()
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn has_swipe_control(&self) -> bool {
        self.control.is_some()
    }

    /// The secondary surface, ready or not.
    pub fn secondary(&self) -> Option<&MapSurfaceAdapter> {
        self.secondary.as_ref()
    }

    /// The secondary surface once it has loaded.
    pub fn ready_surface(&self) -> Option<&MapSurfaceAdapter> {
        self.secondary.as_ref().filter(|_| self.ready)
    }

    pub fn ready_surface_mut(&mut self) -> Option<&mut MapSurfaceAdapter> {
        if self.ready {
            self.secondary.as_mut()
        } else {
            None
        }
    }
}

impl std::fmt::Debug for CompareCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompareCoordinator")
            .field("secondary", &self.secondary)
            .field("swipe", &self.control.is_some())
            .field("ready", &self.ready)
            .finish()
    }
}
