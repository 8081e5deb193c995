//! Map surface adapter

use tokio::sync::oneshot::{self, error::TryRecvError};

use super::{
    ControlSpec, EngineError, MapEngine, MapSurface, SurfaceCommand, SurfaceError,
    SurfaceOptions, SurfaceRole, SurfaceState,
};
use crate::coord::Camera;

/// Wraps a live engine surface with rendering bookkeeping.
pub struct MapSurfaceAdapter {
    role: SurfaceRole,
    surface: Box<dyn MapSurface>,
    options: SurfaceOptions,
    state: SurfaceState,
    load: Option<oneshot::Receiver<()>>,
}

impl MapSurfaceAdapter {
    /// Create a surface through `engine`.
    ///
    /// The load notification is held until [`poll_loaded`](Self::poll_loaded)
    /// or [`wait_loaded`](Self::wait_loaded) observes it.
    pub fn create(
        engine: &dyn MapEngine,
        role: SurfaceRole,
        options: SurfaceOptions,
    ) -> Result<Self, EngineError> {
        let created = engine.create_surface(&options)?;
        Ok(Self {
            role,
            surface: created.surface,
            options,
            state: SurfaceState::new(),
            load: Some(created.loaded),
        })
    }

    pub fn id(&self) -> &str {
        self.surface.id()
    }

    pub fn role(&self) -> SurfaceRole {
        self.role
    }

    pub fn options(&self) -> &SurfaceOptions {
        &self.options
    }

    pub fn state(&self) -> &SurfaceState {
        &self.state
    }

    pub fn is_loaded(&self) -> bool {
        self.state.is_loaded()
    }

    /// Attach a control unless the surface options hide it.
    ///
    /// Returns whether the control was attached.
    pub fn add_control(&mut self, control: ControlSpec) -> Result<bool, EngineError> {
        if !self.options.allows(control.kind) {
            return Ok(false);
        }
        self.surface.add_control(&control)?;
        self.state.push_control(control);
        Ok(true)
    }

    /// Validate and apply a command.
    pub fn apply(&mut self, command: &SurfaceCommand) -> Result<(), SurfaceError> {
        self.state.check(command)?;
        self.surface.apply(command)?;
        self.state.commit(command);
        Ok(())
    }

    pub fn camera(&self) -> Camera {
        self.surface.camera()
    }

    /// Move the camera, clamping the zoom into the surface's bounds.
    pub fn set_camera(&mut self, camera: Camera) -> Result<(), EngineError> {
        self.surface
            .set_camera(camera.clamped(&self.options.zoom_bounds))
    }

    pub fn resize(&mut self) {
        self.surface.resize();
    }

    /// Check for the first load without blocking.
    ///
    /// Returns true exactly once, on the poll that observes the load.
    pub fn poll_loaded(&mut self) -> bool {
        let Some(rx) = self.load.as_mut() else {
            return false;
        };
        match rx.try_recv() {
            Ok(()) => {
                self.load = None;
                self.state.mark_loaded();
                true
            }
            Err(TryRecvError::Empty) => false,
            Err(TryRecvError::Closed) => {
                self.load = None;
                false
            }
        }
    }

    /// Wait for the first load.
    ///
    /// Returns true when this call observed the load and false when it had
    /// already been observed. Cancel safe: the notification stays pending
    /// until the await completes.
    pub async fn wait_loaded(&mut self) -> Result<bool, SurfaceError> {
        let Some(rx) = self.load.as_mut() else {
            return Ok(false);
        };
        let fired = rx.await;
        self.load = None;
        fired.map_err(|_| SurfaceError::LoadSignalDropped(self.id().to_string()))?;
        self.state.mark_loaded();
        Ok(true)
    }

    /// Whether a load notification is still outstanding.
    pub fn load_pending(&self) -> bool {
        self.load.is_some()
    }

    /// Destroy the surface. Any pending load notification is dropped.
    pub fn destroy(mut self) {
        self.load = None;
        self.surface.remove();
    }
}

impl std::fmt::Debug for MapSurfaceAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MapSurfaceAdapter")
            .field("id", &self.id())
            .field("role", &self.role)
            .field("state", &self.state)
            .field("load_pending", &self.load_pending())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::SourceKind;
    use crate::config::MapConfig;
    use crate::coord::LngLat;
    use crate::surface::memory::MemoryEngine;
    use crate::surface::ControlKind;

    fn primary(engine: &MemoryEngine) -> MapSurfaceAdapter {
        let options = SurfaceOptions::primary(&MapConfig::default(), "map");
        MapSurfaceAdapter::create(engine, SurfaceRole::Primary, options).unwrap()
    }

    #[test]
    fn test_hidden_controls_are_skipped() {
        let engine = MemoryEngine::new();
        let mut adapter = primary(&engine);

        assert!(adapter.add_control(ControlSpec::navigation()).unwrap());
        let compass = ControlSpec {
            kind: ControlKind::Compass,
            ..ControlSpec::navigation()
        };
        assert!(!adapter.add_control(compass).unwrap());

        assert_eq!(adapter.state().controls().len(), 1);
        assert_eq!(engine.controls(adapter.id()), vec![ControlKind::Navigation]);
    }

    #[test]
    fn test_poll_loaded_fires_once() {
        let engine = MemoryEngine::new();
        let mut adapter = primary(&engine);

        assert!(!adapter.poll_loaded());
        assert!(engine.fire_load(adapter.id()));
        assert!(adapter.poll_loaded());
        assert!(!adapter.poll_loaded());
        assert!(adapter.is_loaded());
    }

    #[tokio::test]
    async fn test_wait_loaded() {
        let engine = MemoryEngine::new();
        let mut adapter = primary(&engine);
        engine.fire_load(adapter.id());

        assert!(adapter.wait_loaded().await.unwrap());
        assert!(!adapter.wait_loaded().await.unwrap());
    }

    #[tokio::test]
    async fn test_cancelled_wait_keeps_load_pending() {
        let engine = MemoryEngine::new();
        let mut adapter = primary(&engine);

        let waited =
            tokio::time::timeout(std::time::Duration::from_millis(5), adapter.wait_loaded()).await;
        assert!(waited.is_err());
        assert!(adapter.load_pending());

        assert!(engine.fire_load(adapter.id()));
        assert!(adapter.poll_loaded());
        assert!(adapter.is_loaded());
    }

    #[test]
    fn test_invalid_command_never_reaches_engine() {
        let engine = MemoryEngine::new();
        let mut adapter = primary(&engine);
        let err = adapter
            .apply(&SurfaceCommand::visibility("co2", true))
            .unwrap_err();

        assert_eq!(err, SurfaceError::MissingLayer("co2".to_string()));
        assert!(engine.commands(adapter.id()).is_empty());
    }

    #[test]
    fn test_engine_rejection_leaves_state_untouched() {
        let engine = MemoryEngine::new();
        let mut adapter = primary(&engine);
        engine.set_reject_commands(true);

        let result = adapter.apply(&SurfaceCommand::AddSource {
            id: "co2".to_string(),
            kind: SourceKind::Raster,
            tiles: vec![],
        });
        assert!(matches!(result, Err(SurfaceError::Engine(_))));
        assert!(!adapter.state().has_source("co2"));
    }

    #[test]
    fn test_set_camera_clamps_zoom() {
        let engine = MemoryEngine::new();
        let mut adapter = primary(&engine);
        adapter
            .set_camera(Camera::new(LngLat::new(1.0, 2.0), 20.0))
            .unwrap();
        assert_eq!(adapter.camera().zoom, 9.0);
    }

    #[test]
    fn test_destroy_removes_surface() {
        let engine = MemoryEngine::new();
        let adapter = primary(&engine);
        let id = adapter.id().to_string();
        adapter.destroy();

        assert!(engine.live_surfaces().is_empty());
        assert!(!engine.fire_load(&id));
    }
}
