//! Tests for the reconciliation cycle

use super::*;
use crate::aoi::{AoiFeature, AoiState, MemoryAoiOverlay};
use crate::compare::CompareTransition;
use crate::config::MapConfig;
use crate::coord::LngLat;
use crate::handler::RasterTimeseriesHandler;
use crate::log::{LogLevel, MemoryLogger};
use crate::surface::memory::MemoryEngine;
use crate::surface::{SurfaceCommand, SurfaceOptions};
use std::sync::Mutex;

/// Delegates to the time-series handler and records every call.
#[derive(Default)]
struct RecordingHandler {
    calls: Mutex<Vec<(&'static str, String)>>,
}

impl RecordingHandler {
    fn record(&self, op: &'static str, id: &str) {
        self.calls.lock().unwrap().push((op, id.to_string()));
    }

    fn take(&self) -> Vec<(&'static str, String)> {
        std::mem::take(&mut *self.calls.lock().unwrap())
    }
}

impl LayerHandler for RecordingHandler {
    fn show(
        &self,
        ctx: &SurfaceContext<'_>,
        layer: &LayerDescriptor,
        prev: &ExternalState,
    ) -> Vec<TargetedCommand> {
        self.record("show", &layer.id);
        RasterTimeseriesHandler.show(ctx, layer, prev)
    }

    fn hide(
        &self,
        ctx: &SurfaceContext<'_>,
        layer: &LayerDescriptor,
        prev: &ExternalState,
    ) -> Vec<TargetedCommand> {
        self.record("hide", &layer.id);
        RasterTimeseriesHandler.hide(ctx, layer, prev)
    }

    fn update(
        &self,
        ctx: &SurfaceContext<'_>,
        layer: &LayerDescriptor,
        prev: &ExternalState,
    ) -> Option<Vec<TargetedCommand>> {
        self.record("update", &layer.id);
        RasterTimeseriesHandler.update(ctx, layer, prev)
    }
}

/// Always asks for a change on the compare surface.
struct EagerSecondaryHandler;

impl LayerHandler for EagerSecondaryHandler {
    fn show(
        &self,
        _ctx: &SurfaceContext<'_>,
        layer: &LayerDescriptor,
        _prev: &ExternalState,
    ) -> Vec<TargetedCommand> {
        vec![TargetedCommand::secondary(SurfaceCommand::visibility(
            layer.id.clone(),
            true,
        ))]
    }

    fn hide(
        &self,
        _ctx: &SurfaceContext<'_>,
        _layer: &LayerDescriptor,
        _prev: &ExternalState,
    ) -> Vec<TargetedCommand> {
        Vec::new()
    }
}

struct Harness {
    engine: MemoryEngine,
    catalog: Catalog,
    registry: HandlerRegistry,
    recorder: Arc<RecordingHandler>,
    logger: Arc<MemoryLogger>,
    primary: MapSurfaceAdapter,
    compare: CompareCoordinator,
    aoi: MemoryAoiOverlay,
}

impl Harness {
    fn new() -> Self {
        Self::with_catalog(include_str!("../../data/catalog.json"))
    }

    fn with_catalog(json: &str) -> Self {
        let engine = MemoryEngine::new();
        let catalog = Catalog::from_json(json, Some("https://api")).unwrap();
        let recorder = Arc::new(RecordingHandler::default());
        let mut registry = HandlerRegistry::with_builtin();
        registry.register(RasterTimeseriesHandler::TYPE, recorder.clone());

        let logger = Arc::new(MemoryLogger::new());
        let options = SurfaceOptions::primary(&MapConfig::default(), "map");
        let primary = MapSurfaceAdapter::create(&engine, SurfaceRole::Primary, options).unwrap();
        let compare = CompareCoordinator::new(logger.clone());

        Self {
            engine,
            catalog,
            registry,
            recorder,
            logger,
            primary,
            compare,
            aoi: MemoryAoiOverlay::new(),
        }
    }

    fn run(&mut self, prev: &ExternalState, next: &ExternalState) -> CycleReport {
        self.try_run(prev, next).unwrap()
    }

    fn try_run(
        &mut self,
        prev: &ExternalState,
        next: &ExternalState,
    ) -> Result<CycleReport, SurfaceError> {
        let mut aoi = self.aoi.clone();
        let mut ctx = ReconcileContext {
            catalog: &self.catalog,
            registry: &self.registry,
            logger: self.logger.as_ref(),
            engine: &self.engine,
            primary: &mut self.primary,
            compare: &mut self.compare,
            aoi: Some(&mut aoi),
        };
        reconcile(prev, next, &mut ctx)
    }

    fn replay(&mut self, state: &ExternalState) -> CycleReport {
        let mut ctx = ReconcileContext {
            catalog: &self.catalog,
            registry: &self.registry,
            logger: self.logger.as_ref(),
            engine: &self.engine,
            primary: &mut self.primary,
            compare: &mut self.compare,
            aoi: None,
        };
        replay_secondary(state, &mut ctx).unwrap()
    }

    fn load_secondary(&mut self) -> bool {
        let id = self.compare.secondary().unwrap().id().to_string();
        self.engine.fire_load(&id);
        self.compare.poll_ready()
    }
}

fn calls(list: &[(&'static str, &str)]) -> Vec<(&'static str, String)> {
    list.iter().map(|(op, id)| (*op, id.to_string())).collect()
}

#[test]
fn test_show_then_update_for_added_layer() {
    let mut h = Harness::new();
    let empty = ExternalState::new();
    let next = ExternalState::new().with_active(["co2"]);

    let report = h.run(&empty, &next);

    assert_eq!(
        h.recorder.take(),
        calls(&[("show", "co2"), ("update", "co2"), ("update", "co2")])
    );
    assert_eq!(report.shown, vec!["co2"]);
    assert_eq!(report.updates, vec!["co2", "co2"]);
    assert!(h.primary.state().is_visible("co2"));
    assert_eq!(report.commands_applied, 2);
}

#[test]
fn test_unchanged_state_only_updates() {
    let mut h = Harness::new();
    let state = ExternalState::new().with_active(["co2"]);
    h.run(&ExternalState::new(), &state);
    h.recorder.take();
    let before = h.engine.commands(h.primary.id()).len();

    let report = h.run(&state, &state);

    assert_eq!(h.recorder.take(), calls(&[("update", "co2")]));
    assert!(report.transition.is_empty());
    assert_eq!(report.commands_applied, 0);
    assert!(!report.changed_surfaces());
    assert_eq!(h.engine.commands(h.primary.id()).len(), before);
}

#[test]
fn test_swap_exclusive_layers() {
    let mut h = Harness::new();
    let co2 = ExternalState::new().with_active(["co2"]);
    let diff = ExternalState::new().with_active(["co2-diff"]);
    h.run(&ExternalState::new(), &co2);
    h.recorder.take();

    let report = h.run(&co2, &diff);

    assert_eq!(
        h.recorder.take(),
        calls(&[
            ("hide", "co2"),
            ("show", "co2-diff"),
            ("update", "co2-diff"),
            ("update", "co2-diff"),
        ])
    );
    assert_eq!(report.hidden, vec!["co2"]);
    assert_eq!(h.primary.state().visible_layers(), vec!["co2-diff"]);
    assert!(h.primary.state().has_layer("co2"));
}

#[test]
fn test_hides_run_before_adds() {
    let mut h = Harness::new();
    let prev = ExternalState::new().with_active(["co2", "population"]);
    h.run(&ExternalState::new(), &prev);
    h.recorder.take();

    let next = ExternalState::new().with_active(["nightlights-hd"]);
    h.run(&prev, &next);

    let recorded = h.recorder.take();
    // population is a static raster and not recorded; co2 hide comes first
    assert_eq!(recorded[0], ("hide", "co2".to_string()));
    assert_eq!(recorded[1], ("show", "nightlights-hd".to_string()));
    assert_eq!(h.primary.state().visible_layers(), vec!["nightlights-hd"]);
}

#[test]
fn test_date_change_updates_tiles_in_place() {
    let mut h = Harness::new();
    let day1 = ExternalState::new()
        .with_active(["co2"])
        .with_date(chrono::NaiveDate::from_ymd_opt(2020, 2, 1).unwrap());
    let day2 = day1
        .clone()
        .with_date(chrono::NaiveDate::from_ymd_opt(2020, 2, 2).unwrap());
    h.run(&ExternalState::new(), &day1);

    let report = h.run(&day1, &day2);

    assert_eq!(report.commands_applied, 1);
    let tiles = &h.primary.state().source("co2").unwrap().tiles;
    assert!(tiles[0].contains("2020_02_02"));
}

#[test]
fn test_unregistered_type_is_reported_and_skipped() {
    let mut h = Harness::with_catalog(
        r#"[
        {"id": "roads", "type": "vector",
         "source": {"type": "vector", "tiles": ["https://v/{z}/{x}/{y}"]}},
        {"id": "co2", "type": "raster-timeseries", "timeUnit": "day",
         "domain": ["2020-01-01", "2020-01-31"],
         "source": {"type": "raster", "tiles": ["{api}/{date}/{z}/{x}/{y}"]}}
    ]"#,
    );
    let next = ExternalState::new().with_active(["roads", "co2"]);

    let report = h.run(&ExternalState::new(), &next);

    assert_eq!(report.diagnostics.len(), 1);
    assert!(matches!(
        &report.diagnostics[0],
        ConfigurationError::UnregisteredType { id, layer_type, phase: Phase::Show }
            if id == "roads" && layer_type == "vector"
    ));
    assert_eq!(report.shown, vec!["co2"]);
    assert!(h.primary.state().is_visible("co2"));
    assert!(h.logger.contains(LogLevel::Warn, "no handler registered"));

    // hiding it later is reported as well, and does not abort
    let report = h.run(&next, &ExternalState::new());
    assert_eq!(report.hidden, vec!["co2"]);
    assert_eq!(report.diagnostics.len(), 1);
}

#[test]
fn test_unknown_id_reported_once_per_cycle() {
    let mut h = Harness::new();
    let next = ExternalState::new().with_active(["missing", "co2"]);

    let report = h.run(&ExternalState::new(), &next);

    assert_eq!(
        report.diagnostics,
        vec![ConfigurationError::UnknownLayer {
            id: "missing".to_string(),
            phase: Phase::Show,
        }]
    );
    assert!(h.primary.state().is_visible("co2"));
}

#[test]
fn test_exclusivity_violation_renders_all() {
    let mut h = Harness::new();
    let next = ExternalState::new().with_active(["co2", "co2-diff"]);

    let report = h.run(&ExternalState::new(), &next);

    assert!(report
        .diagnostics
        .iter()
        .any(|d| matches!(d, ConfigurationError::ExclusivityViolation { .. })));
    assert_eq!(h.primary.state().visible_layers(), vec!["co2", "co2-diff"]);
}

#[test]
fn test_compare_activation_and_replay() {
    let mut h = Harness::new();
    let single = ExternalState::new().with_active(["co2"]);
    let comparing = single.clone().with_comparing(true);
    h.run(&ExternalState::new(), &single);
    let primary_commands = h.engine.commands(h.primary.id()).len();

    let report = h.run(&single, &comparing);
    assert_eq!(report.compare, Some(CompareTransition::Activated));
    assert_eq!(report.commands_dropped, 0);
    assert!(!h.compare.is_ready());

    assert!(h.load_secondary());
    let replay = h.replay(&comparing);

    assert_eq!(replay.shown, vec!["co2"]);
    let secondary = h.compare.ready_surface().unwrap();
    assert!(secondary.state().is_visible("co2"));
    assert!(secondary.state().source("co2").unwrap().tiles[0].contains("xco2_15day_base"));
    // the primary was not touched by the replay
    assert_eq!(h.engine.commands(h.primary.id()).len(), primary_commands);
    assert_eq!(
        h.primary.state().visible_layers(),
        secondary.state().visible_layers()
    );
}

#[test]
fn test_compare_steady_and_teardown() {
    let mut h = Harness::new();
    let off = ExternalState::new().with_active(["co2"]);
    let on = off.clone().with_comparing(true);
    h.run(&ExternalState::new(), &off);
    h.run(&off, &on);
    let secondary_id = h.compare.secondary().unwrap().id().to_string();

    let report = h.run(&on, &on);
    assert_eq!(report.compare, None);
    assert_eq!(h.compare.secondary().unwrap().id(), secondary_id);
    assert_eq!(h.engine.live_surfaces().len(), 2);

    let report = h.run(&on, &off);
    assert_eq!(report.compare, Some(CompareTransition::Deactivated));
    assert!(!h.compare.is_active());
    assert_eq!(h.engine.active_swipes(), 0);
    assert_eq!(h.engine.live_surfaces(), vec![h.primary.id().to_string()]);
    assert!(h.primary.state().is_visible("co2"));
}

#[test]
fn test_layer_added_while_comparing_reaches_both_surfaces() {
    let mut h = Harness::new();
    let on = ExternalState::new().with_comparing(true);
    h.run(&ExternalState::new(), &on);
    h.load_secondary();
    h.replay(&on);

    let with_co2 = on.clone().with_active(["co2"]);
    h.run(&on, &with_co2);

    let secondary = h.compare.ready_surface().unwrap();
    assert!(secondary.state().is_visible("co2"));
    assert!(h.primary.state().is_visible("co2"));

    h.run(&with_co2, &on);
    let secondary = h.compare.ready_surface().unwrap();
    assert!(!secondary.state().is_visible("co2"));
    assert!(!h.primary.state().is_visible("co2"));
}

#[test]
fn test_secondary_commands_dropped_until_ready() {
    let mut h = Harness::new();
    h.registry
        .register(RasterTimeseriesHandler::TYPE, Arc::new(EagerSecondaryHandler));
    let on = ExternalState::new().with_comparing(true).with_active(["co2"]);

    let report = h.run(&ExternalState::new(), &on);

    assert_eq!(report.commands_dropped, 1);
    assert!(matches!(
        report.diagnostics[0],
        ConfigurationError::SecondaryNotReady { .. }
    ));
}

#[test]
fn test_aoi_update_only_on_change() {
    let mut h = Harness::new();
    let feature = AoiFeature::rectangle(LngLat::new(0.0, 0.0), LngLat::new(1.0, 1.0));
    let empty = ExternalState::new().with_aoi(AoiState::empty());
    let drawn = ExternalState::new().with_aoi(AoiState::with_feature(feature));

    assert!(!h.run(&empty, &empty).aoi_updated);
    assert!(h.run(&empty, &drawn).aoi_updated);
    assert!(!h.run(&drawn, &drawn).aoi_updated);
    assert_eq!(h.aoi.update_count(), 1);
}

#[test]
fn test_engine_failure_aborts_cycle() {
    let mut h = Harness::new();
    h.engine.set_reject_commands(true);
    let next = ExternalState::new().with_active(["co2", "population"]);

    let err = h.try_run(&ExternalState::new(), &next).unwrap_err();

    assert!(matches!(err, SurfaceError::Engine(_)));
    assert!(!h.primary.state().has_layer("co2"));
    assert!(!h.primary.state().has_layer("population"));
}
