//! Replay command - drives a map view through a scripted state sequence.
//!
//! The script is a JSON array of external states. The first state is rendered
//! by mounting the view, each later one by an update. When the first state
//! has no `activeLayers`, it starts from the catalog's enabled layers.
//!
//! After every step all pending load notifications fire, so compare surfaces
//! become ready and their replay shows up in the same step's output.

use std::fmt::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::Args;
use layerlens::action::{action_channel, ActionReceiver};
use layerlens::aoi::MemoryAoiOverlay;
use layerlens::catalog::Catalog;
use layerlens::config::MapConfig;
use layerlens::log::TracingLogger;
use layerlens::state::ExternalState;
use layerlens::surface::memory::MemoryEngine;
use layerlens::view::{MapView, MapViewError};

use super::common::{load_catalog, load_config};
use crate::error::CliError;

/// Arguments for the replay command.
#[derive(Debug, Args)]
pub struct ReplayArgs {
    /// Layer catalog JSON file
    #[arg(long)]
    pub catalog: PathBuf,

    /// JSON array of states to apply in order
    #[arg(long)]
    pub script: PathBuf,

    /// Configuration file (defaults to ~/.layerlens/config.ini)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Tile API base URL substituted for {api}
    #[arg(long)]
    pub api_url: Option<String>,
}

/// Run the replay command.
pub fn run(args: ReplayArgs) -> Result<(), CliError> {
    let file = load_config(args.config.as_deref())?;
    let config =
        MapConfig::from_settings(&file).map_err(|e| CliError::InvalidConfig(e.to_string()))?;
    let catalog = load_catalog(&args.catalog, args.api_url.as_deref(), &file)?;
    let states = load_script(&args.script)?.into_states(&catalog);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(CliError::Runtime)?;
    let output = runtime.block_on(replay(config, catalog, states))?;
    print!("{}", output);
    Ok(())
}

/// A parsed replay script.
#[derive(Debug)]
struct Script {
    states: Vec<ExternalState>,
    /// Whether the first state names its active layers
    initial_active_given: bool,
}

impl Script {
    /// The states to replay.
    ///
    /// A first state without `activeLayers` starts from the layers the
    /// catalog marks as enabled.
    fn into_states(self, catalog: &Catalog) -> Vec<ExternalState> {
        let mut states = self.states;
        if !self.initial_active_given {
            if let Some(first) = states.first_mut() {
                first.active_layers = catalog.initially_enabled();
            }
        }
        states
    }
}

/// Parse a replay script.
fn load_script(path: &Path) -> Result<Script, CliError> {
    let script_error = |reason: String| CliError::Script {
        path: path.to_path_buf(),
        reason,
    };
    let text = std::fs::read_to_string(path).map_err(|e| script_error(e.to_string()))?;
    let raw: Vec<serde_json::Value> =
        serde_json::from_str(&text).map_err(|e| script_error(e.to_string()))?;
    let Some(first) = raw.first() else {
        return Err(script_error("script has no states".to_string()));
    };
    let initial_active_given = first.get("activeLayers").is_some();

    let states = raw
        .into_iter()
        .enumerate()
        .map(|(i, value)| {
            serde_json::from_value(value)
                .map_err(|e| script_error(format!("state {}: {}", i + 1, e)))
        })
        .collect::<Result<Vec<ExternalState>, CliError>>()?;
    Ok(Script {
        states,
        initial_active_given,
    })
}

/// Replay `states` and render what every step did.
async fn replay(
    config: MapConfig,
    catalog: Catalog,
    states: Vec<ExternalState>,
) -> Result<String, CliError> {
    let engine = MemoryEngine::new();
    let (dispatcher, mut actions) = action_channel();
    let mut states = states.into_iter();
    let initial = states.next().unwrap_or_default();

    let mut view = MapView::new(config, Arc::new(engine.clone()), Arc::new(catalog), dispatcher)
        .with_logger(Arc::new(TracingLogger::new()))
        .with_aoi_overlay(Box::new(MemoryAoiOverlay::new()))
        .with_initial_state(initial);

    let mut out = String::new();
    let step_error = |step: usize| move |error: MapViewError| CliError::Replay { step, error };

    let report = view.mount().await.map_err(step_error(1))?;
    let _ = writeln!(out, "== step 1 (mount) ==\n{}", report);
    settle(&mut view, &engine, &mut actions, &mut out).map_err(step_error(1))?;

    let mut step = 1;
    for state in states {
        step += 1;
        let report = view.update(state).map_err(step_error(step))?;
        let _ = writeln!(out, "== step {} ==\n{}", step, report);
        settle(&mut view, &engine, &mut actions, &mut out).map_err(step_error(step))?;
    }

    view.unmount().map_err(step_error(step))?;
    let _ = writeln!(out, "== unmount ==");
    write_journal(&engine, &mut out);
    Ok(out)
}

/// Fire pending loads, observe them and append the step's effects.
fn settle(
    view: &mut MapView,
    engine: &MemoryEngine,
    actions: &mut ActionReceiver,
    out: &mut String,
) -> Result<(), MapViewError> {
    engine.fire_all_loads();
    let outcome = view.poll_events()?;
    if let Some(replay) = outcome.secondary_replay {
        let _ = writeln!(out, "-- compare replay --\n{}", replay);
    }
    while let Ok(action) = actions.try_recv() {
        let _ = writeln!(out, "action {}", action.name());
    }
    write_journal(engine, out);
    Ok(())
}

fn write_journal(engine: &MemoryEngine, out: &mut String) {
    for entry in engine.drain_journal() {
        let _ = writeln!(out, "  {}", entry);
    }
}
