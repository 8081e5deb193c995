//! Layer lifecycle reconciliation.
//!
//! One cycle turns `(prev, next)` external states into surface commands:
//!
//! 1. compare mode follows `next.comparing`
//! 2. exclusivity violations among the next active ids are reported
//! 3. `hide` runs for ids leaving the active set, in previous order
//! 4. `show`, then `update`, runs for ids entering it, in next order
//! 5. `update` runs for every active id
//! 6. the AOI overlay gets the AOI state when it changed
//!
//! Handler lookups that fail are logged and recorded, never fatal. A command
//! the engine rejects aborts the cycle.

mod diagnostic;
mod report;
mod transition;

pub use diagnostic::{ConfigurationError, Phase};
pub use report::CycleReport;
pub use transition::{dedup_ordered, Transition};

use std::collections::HashSet;
use std::sync::Arc;

use crate::aoi::AoiOverlay;
use crate::catalog::{Catalog, LayerDescriptor};
use crate::compare::CompareCoordinator;
use crate::handler::{HandlerRegistry, LayerHandler, SurfaceContext};
use crate::log::Logger;
use crate::state::ExternalState;
use crate::surface::{MapEngine, MapSurfaceAdapter, SurfaceError, SurfaceRole, TargetedCommand};
use crate::{log_debug, log_warn};

/// Everything a cycle reads from and writes to.
pub struct ReconcileContext<'a> {
    pub catalog: &'a Catalog,
    pub registry: &'a HandlerRegistry,
    pub logger: &'a dyn Logger,
    pub engine: &'a dyn MapEngine,
    pub primary: &'a mut MapSurfaceAdapter,
    pub compare: &'a mut CompareCoordinator,
    pub aoi: Option<&'a mut (dyn AoiOverlay + 'static)>,
}

/// Run one reconciliation cycle.
pub fn reconcile(
    prev: &ExternalState,
    next: &ExternalState,
    ctx: &mut ReconcileContext<'_>,
) -> Result<CycleReport, SurfaceError> {
    let transition = Transition::compute(&prev.active_layers, &next.active_layers);
    let mut cycle = Cycle::new(CycleReport::new(transition.clone()));

    // 1. compare mode
    cycle.report.compare = ctx
        .compare
        .transition(ctx.engine, ctx.primary, next.comparing)?;
    if ctx.compare.is_active() {
        ctx.compare.sync_camera(ctx.primary.camera())?;
    }

    // 2. exclusivity
    let active = dedup_ordered(&next.active_layers);
    for (first, second) in ctx.catalog.exclusivity_violations(&active) {
        cycle.diagnose(
            ctx.logger,
            ConfigurationError::ExclusivityViolation { first, second },
        );
    }

    // 3. hide
    for id in &transition.to_hide {
        let Some((layer, handler)) = cycle.resolve(ctx, id, Phase::Hide) else {
            continue;
        };
        let commands = handler.hide(&surface_context(ctx, next), layer, prev);
        cycle.apply(ctx, commands, Phase::Hide, None)?;
        cycle.report.hidden.push(id.clone());
    }

    // 4. show, then update
    for id in &transition.to_add {
        let Some((layer, handler)) = cycle.resolve(ctx, id, Phase::Show) else {
            continue;
        };
        let commands = handler.show(&surface_context(ctx, next), layer, prev);
        cycle.apply(ctx, commands, Phase::Show, None)?;
        cycle.report.shown.push(id.clone());

        if let Some(commands) = handler.update(&surface_context(ctx, next), layer, prev) {
            cycle.apply(ctx, commands, Phase::Update, None)?;
            cycle.report.updates.push(id.clone());
        }
    }

    // 5. update every active layer
    for id in &active {
        let Some((layer, handler)) = cycle.resolve(ctx, id, Phase::Update) else {
            continue;
        };
        if let Some(commands) = handler.update(&surface_context(ctx, next), layer, prev) {
            cycle.apply(ctx, commands, Phase::Update, None)?;
            cycle.report.updates.push(id.clone());
        }
    }

    // 6. AOI
    if prev.aoi != next.aoi {
        if let Some(overlay) = ctx.aoi.as_deref_mut() {
            overlay.update(prev.aoi.as_ref(), next.aoi.as_ref());
            cycle.report.aoi_updated = true;
        }
    }

    log_debug!(
        ctx.logger,
        "Cycle done: {} hidden, {} shown, {} updates, {} commands",
        cycle.report.hidden.len(),
        cycle.report.shown.len(),
        cycle.report.updates.len(),
        cycle.report.commands_applied
    );
    Ok(cycle.report)
}

/// Replay the layer cycle onto the compare surface after it loaded.
///
/// Runs `show` then `update` for every active id, applying only the commands
/// aimed at the secondary surface.
pub fn replay_secondary(
    state: &ExternalState,
    ctx: &mut ReconcileContext<'_>,
) -> Result<CycleReport, SurfaceError> {
    let active = dedup_ordered(&state.active_layers);
    let mut cycle = Cycle::new(CycleReport::new(Transition {
        still_active: active.clone(),
        ..Transition::default()
    }));
    let only = Some(SurfaceRole::Secondary);

    for id in &active {
        let Some((layer, handler)) = cycle.resolve(ctx, id, Phase::Replay) else {
            continue;
        };
        let commands = handler.show(&surface_context(ctx, state), layer, state);
        cycle.apply(ctx, commands, Phase::Replay, only)?;
        cycle.report.shown.push(id.clone());

        if let Some(commands) = handler.update(&surface_context(ctx, state), layer, state) {
            cycle.apply(ctx, commands, Phase::Replay, only)?;
            cycle.report.updates.push(id.clone());
        }
    }

    log_debug!(
        ctx.logger,
        "Compare replay done: {} layers, {} commands",
        cycle.report.shown.len(),
        cycle.report.commands_applied
    );
    Ok(cycle.report)
}

/// Snapshot of the surfaces for a handler call.
///
/// The secondary is offered only while comparing and after it loaded.
fn surface_context<'c>(ctx: &'c ReconcileContext<'_>, state: &'c ExternalState) -> SurfaceContext<'c> {
    SurfaceContext {
        state,
        primary: ctx.primary.state(),
        secondary: ctx
            .compare
            .ready_surface()
            .filter(|_| state.comparing)
            .map(MapSurfaceAdapter::state),
    }
}

/// Per-cycle bookkeeping.
struct Cycle {
    report: CycleReport,
    /// Ids already reported as unresolvable this cycle
    reported: HashSet<String>,
}

impl Cycle {
    fn new(report: CycleReport) -> Self {
        Self {
            report,
            reported: HashSet::new(),
        }
    }

    fn diagnose(&mut self, logger: &dyn Logger, diagnostic: ConfigurationError) {
        log_warn!(logger, "{}", diagnostic);
        self.report.diagnostics.push(diagnostic);
    }

    /// Look up the descriptor and handler of `id`.
    ///
    /// Failures are reported once per id per cycle.
    fn resolve<'c>(
        &mut self,
        ctx: &ReconcileContext<'c>,
        id: &str,
        phase: Phase,
    ) -> Option<(&'c LayerDescriptor, Arc<dyn LayerHandler>)> {
        let catalog: &'c Catalog = ctx.catalog;
        let Some(layer) = catalog.get(id) else {
            if self.reported.insert(id.to_string()) {
                self.diagnose(
                    ctx.logger,
                    ConfigurationError::UnknownLayer {
                        id: id.to_string(),
                        phase,
                    },
                );
            }
            return None;
        };
        let Some(handler) = ctx.registry.get(&layer.layer_type) else {
            if self.reported.insert(id.to_string()) {
                self.diagnose(
                    ctx.logger,
                    ConfigurationError::UnregisteredType {
                        id: id.to_string(),
                        layer_type: layer.layer_type.clone(),
                        phase,
                    },
                );
            }
            return None;
        };
        Some((layer, Arc::clone(handler)))
    }

    /// Apply handler commands in order.
    ///
    /// Commands for the compare surface are dropped while it is not ready.
    /// With `only` set, commands for other surfaces are skipped silently.
    fn apply(
        &mut self,
        ctx: &mut ReconcileContext<'_>,
        commands: Vec<TargetedCommand>,
        phase: Phase,
        only: Option<SurfaceRole>,
    ) -> Result<(), SurfaceError> {
        for TargetedCommand { target, command } in commands {
            if only.is_some_and(|role| role != target) {
                continue;
            }
            match target {
                SurfaceRole::Primary => ctx.primary.apply(&command)?,
                SurfaceRole::Secondary => match ctx.compare.ready_surface_mut() {
                    Some(secondary) => secondary.apply(&command)?,
                    None => {
                        self.report.commands_dropped += 1;
                        self.diagnose(
                            ctx.logger,
                            ConfigurationError::SecondaryNotReady { command, phase },
                        );
                        continue;
                    }
                },
            }
            self.report.commands_applied += 1;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests;
