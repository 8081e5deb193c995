//! In-memory AOI overlay that records the calls it receives.

use std::sync::{Arc, Mutex};

use super::{AoiFeature, AoiOverlay, AoiState, DrawTheme};
use crate::action::{ActionDispatcher, MapAction};
use crate::aoi::AoiAction;

/// One recorded overlay call.
#[derive(Debug, Clone, PartialEq)]
pub enum AoiCall {
    Setup { initial: Option<Vec<AoiFeature>> },
    Update {
        prev: Option<AoiState>,
        next: Option<AoiState>,
    },
    Teardown,
}

/// Overlay double.
///
/// Clones share the call log, so a test can keep one handle while the map
/// view owns another.
#[derive(Debug, Clone, Default)]
pub struct MemoryAoiOverlay {
    calls: Arc<Mutex<Vec<AoiCall>>>,
    dispatcher: Arc<Mutex<Option<ActionDispatcher>>>,
}

impl MemoryAoiOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Calls received so far.
    pub fn calls(&self) -> Vec<AoiCall> {
        self.calls
            .lock()
            .map(|c| c.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }

    pub fn update_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, AoiCall::Update { .. }))
            .count()
    }

    /// Emit a toolkit event through the dispatcher handed to `setup`.
    ///
    /// Returns false when the overlay is not set up or the receiver is gone.
    pub fn emit(&self, action: AoiAction) -> bool {
        let guard = match self.dispatcher.lock() {
            Ok(g) => g,
            Err(poisoned) => poisoned.into_inner(),
        };
        match guard.as_ref() {
            Some(tx) => tx.send(MapAction::Aoi(action)).is_ok(),
            None => false,
        }
    }

    fn record(&self, call: AoiCall) {
        match self.calls.lock() {
            Ok(mut calls) => calls.push(call),
            Err(poisoned) => poisoned.into_inner().push(call),
        }
    }
}

impl AoiOverlay for MemoryAoiOverlay {
    fn setup(
        &mut self,
        dispatcher: ActionDispatcher,
        initial: Option<Vec<AoiFeature>>,
        _theme: &DrawTheme,
    ) {
        match self.dispatcher.lock() {
            Ok(mut d) => *d = Some(dispatcher),
            Err(poisoned) => *poisoned.into_inner() = Some(dispatcher),
        }
        self.record(AoiCall::Setup { initial });
    }

    fn update(&mut self, prev: Option<&AoiState>, next: Option<&AoiState>) {
        self.record(AoiCall::Update {
            prev: prev.cloned(),
            next: next.cloned(),
        });
    }

    fn teardown(&mut self) {
        match self.dispatcher.lock() {
            Ok(mut d) => *d = None,
            Err(poisoned) => *poisoned.into_inner() = None,
        }
        self.record(AoiCall::Teardown);
    }
}
