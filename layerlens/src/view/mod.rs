//! The map view: owner of the surfaces and driver of reconciliation.
//!
//! ```text
//!               ExternalState
//!                    │ update()
//!                    ▼
//!   ┌──────────────────────────────────┐
//!   │ MapView                          │
//!   │  reconcile(prev, next)           │──► ActionDispatcher (map.loaded, aoi.*)
//!   │   ├─ CompareCoordinator          │
//!   │   ├─ HandlerRegistry             │
//!   │   └─ AoiOverlay                  │
//!   └──────────────────────────────────┘
//!          │                  │
//!    primary surface    secondary surface
//! ```
//!
//! Every update runs exactly one cycle. Surface loads arrive as one-shot
//! notifications; [`MapView::poll_events`] or the `wait_*` methods observe
//! them and run the work that depends on them.

mod error;

pub use error::MapViewError;

use std::sync::Arc;

use crate::action::{ActionDispatcher, MapAction};
use crate::aoi::{AoiOverlay, DrawTheme};
use crate::catalog::Catalog;
use crate::compare::CompareCoordinator;
use crate::config::MapConfig;
use crate::handler::HandlerRegistry;
use crate::log::{Logger, NoOpLogger};
use crate::reconciler::{reconcile, replay_secondary, CycleReport, ReconcileContext};
use crate::state::ExternalState;
use crate::surface::{ControlSpec, MapEngine, MapSurfaceAdapter, SurfaceOptions, SurfaceRole};
use crate::{log_debug, log_info, log_warn};

/// Default container of the primary surface.
pub const DEFAULT_PRIMARY_CONTAINER: &str = "map";

/// What [`MapView::poll_events`] observed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PollOutcome {
    /// The primary surface loaded and `map.loaded` was dispatched
    pub map_loaded: bool,
    /// The compare surface loaded and the layer cycle was replayed onto it
    pub secondary_replay: Option<CycleReport>,
}

/// Map view with a primary surface, optional compare surface and AOI overlay.
pub struct MapView {
    config: MapConfig,
    engine: Arc<dyn MapEngine>,
    catalog: Arc<Catalog>,
    registry: HandlerRegistry,
    logger: Arc<dyn Logger>,
    dispatcher: ActionDispatcher,
    aoi: Option<Box<dyn AoiOverlay>>,
    aoi_active: bool,
    theme: DrawTheme,
    container: String,
    primary: Option<MapSurfaceAdapter>,
    compare: CompareCoordinator,
    state: ExternalState,
}

impl MapView {
    pub fn new(
        config: MapConfig,
        engine: Arc<dyn MapEngine>,
        catalog: Arc<Catalog>,
        dispatcher: ActionDispatcher,
    ) -> Self {
        let logger: Arc<dyn Logger> = Arc::new(NoOpLogger);
        Self {
            config,
            engine,
            catalog,
            registry: HandlerRegistry::with_builtin(),
            compare: CompareCoordinator::new(Arc::clone(&logger)),
            logger,
            dispatcher,
            aoi: None,
            aoi_active: false,
            theme: DrawTheme::default(),
            container: DEFAULT_PRIMARY_CONTAINER.to_string(),
            primary: None,
            state: ExternalState::default(),
        }
    }

    pub fn with_logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.compare = CompareCoordinator::new(Arc::clone(&logger));
        self.logger = logger;
        self
    }

    /// Replace the handler registry (defaults to the built-in handlers).
    pub fn with_registry(mut self, registry: HandlerRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Drawing toolkit to set up when AOI drawing is enabled.
    pub fn with_aoi_overlay(mut self, overlay: Box<dyn AoiOverlay>) -> Self {
        self.aoi = Some(overlay);
        self
    }

    pub fn with_theme(mut self, theme: DrawTheme) -> Self {
        self.theme = theme;
        self
    }

    /// Container ids for the primary surface, the compare surface and the
    /// swipe divider.
    pub fn with_containers(
        mut self,
        primary: impl Into<String>,
        secondary: impl Into<String>,
        swipe: impl Into<String>,
    ) -> Self {
        self.container = primary.into();
        self.compare = CompareCoordinator::new(Arc::clone(&self.logger))
            .with_containers(secondary, swipe);
        self
    }

    /// State rendered by [`mount`](Self::mount).
    pub fn with_initial_state(mut self, state: ExternalState) -> Self {
        self.state = state;
        self
    }

    /// Mount the view.
    ///
    /// Creation is deferred by one scheduler tick so the containers have
    /// their final size. The initial state is then rendered as one cycle
    /// from an empty layer set.
    pub async fn mount(&mut self) -> Result<CycleReport, MapViewError> {
        tokio::task::yield_now().await;
        self.init_map()?;

        let initial = std::mem::take(&mut self.state);
        self.state = ExternalState {
            aoi: initial.aoi.clone(),
            ..ExternalState::default()
        };
        self.update(initial)
    }

    /// Create the primary surface, attach its controls and set up AOI
    /// drawing.
    pub fn init_map(&mut self) -> Result<(), MapViewError> {
        if self.primary.is_some() {
            return Err(MapViewError::AlreadyMounted);
        }

        let options = SurfaceOptions::primary(&self.config, self.container.clone());
        let mut primary =
            MapSurfaceAdapter::create(self.engine.as_ref(), SurfaceRole::Primary, options)?;
        primary.add_control(ControlSpec::navigation())?;
        primary.add_control(ControlSpec::compact_attribution())?;

        log_info!(
            self.logger,
            "Map surface {} created at {} z{}",
            primary.id(),
            primary.camera().center,
            primary.camera().zoom
        );
        self.primary = Some(primary);

        if self.config.aoi_enabled() {
            if let (Some(overlay), Some(aoi)) = (self.aoi.as_mut(), self.state.aoi.as_ref()) {
                let initial = aoi.feature.clone().map(|f| vec![f]);
                overlay.setup(self.dispatcher.clone(), initial, &self.theme);
                self.aoi_active = true;
                log_debug!(self.logger, "AOI drawing set up");
            }
        }
        Ok(())
    }

    /// Run one reconciliation cycle against `next`.
    ///
    /// On failure the previous state is kept, so the next update diffs
    /// against what was last rendered successfully.
    pub fn update(&mut self, next: ExternalState) -> Result<CycleReport, MapViewError> {
        let primary = self.primary.as_mut().ok_or(MapViewError::NotMounted)?;
        let aoi = if self.aoi_active {
            self.aoi.as_deref_mut()
        } else {
            None
        };

        let mut ctx = ReconcileContext {
            catalog: &self.catalog,
            registry: &self.registry,
            logger: self.logger.as_ref(),
            engine: self.engine.as_ref(),
            primary,
            compare: &mut self.compare,
            aoi,
        };

        match reconcile(&self.state, &next, &mut ctx) {
            Ok(report) => {
                self.state = next;
                Ok(report)
            }
            Err(e) => {
                log_warn!(self.logger, "Update cycle aborted: {}", e);
                Err(e.into())
            }
        }
    }

    /// Observe pending load notifications.
    ///
    /// The primary load is dispatched as `map.loaded` once. The compare
    /// surface load triggers one replay of the layer cycle onto it.
    pub fn poll_events(&mut self) -> Result<PollOutcome, MapViewError> {
        let primary = self.primary.as_mut().ok_or(MapViewError::NotMounted)?;
        let mut outcome = PollOutcome::default();

        if primary.poll_loaded() {
            self.dispatch(MapAction::MapLoaded);
            outcome.map_loaded = true;
        }
        if self.compare.poll_ready() {
            outcome.secondary_replay = Some(self.replay()?);
        }
        Ok(outcome)
    }

    /// Wait for the primary surface to load and dispatch `map.loaded`.
    ///
    /// Returns false when the load was already observed.
    pub async fn wait_map_loaded(&mut self) -> Result<bool, MapViewError> {
        let primary = self.primary.as_mut().ok_or(MapViewError::NotMounted)?;
        if primary.wait_loaded().await? {
            self.dispatch(MapAction::MapLoaded);
            return Ok(true);
        }
        Ok(false)
    }

    /// Wait for the compare surface to load, then replay the layer cycle
    /// onto it.
    ///
    /// Returns `None` when compare mode is inactive or the replay already ran.
    pub async fn wait_secondary_ready(&mut self) -> Result<Option<CycleReport>, MapViewError> {
        if self.primary.is_none() {
            return Err(MapViewError::NotMounted);
        }
        if self.compare.wait_ready().await? {
            return Ok(Some(self.replay()?));
        }
        Ok(None)
    }

    /// Tear down the AOI overlay, compare mode and the primary surface.
    pub fn unmount(&mut self) -> Result<(), MapViewError> {
        let primary = self.primary.take().ok_or(MapViewError::NotMounted)?;
        if self.aoi_active {
            if let Some(overlay) = self.aoi.as_mut() {
                overlay.teardown();
            }
            self.aoi_active = false;
        }
        self.compare.deactivate();
        log_info!(self.logger, "Map surface {} removed", primary.id());
        primary.destroy();
        Ok(())
    }

    pub fn is_mounted(&self) -> bool {
        self.primary.is_some()
    }

    pub fn primary(&self) -> Option<&MapSurfaceAdapter> {
        self.primary.as_ref()
    }

    pub fn compare(&self) -> &CompareCoordinator {
        &self.compare
    }

    /// Last successfully reconciled state.
    pub fn state(&self) -> &ExternalState {
        &self.state
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    fn replay(&mut self) -> Result<CycleReport, MapViewError> {
        let primary = self.primary.as_mut().ok_or(MapViewError::NotMounted)?;
        let mut ctx = ReconcileContext {
            catalog: &self.catalog,
            registry: &self.registry,
            logger: self.logger.as_ref(),
            engine: self.engine.as_ref(),
            primary,
            compare: &mut self.compare,
            aoi: None,
        };
        Ok(replay_secondary(&self.state, &mut ctx)?)
    }

    fn dispatch(&self, action: MapAction) {
        let name = action.name();
        if self.dispatcher.send(action).is_err() {
            log_debug!(self.logger, "Dropped '{}': no action receiver", name);
        }
    }
}
