//! External state supplied to the map view on every update.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::aoi::AoiState;

/// Gamma applied when the state carries none for a layer.
pub const DEFAULT_GAMMA: f64 = 1.0;

/// Everything the map view observes from its state holder.
///
/// `active_layers` is an ordered set: duplicates are ignored by the
/// reconciler, first occurrence wins.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExternalState {
    /// Ids of the layers that should be rendered, in display order
    pub active_layers: Vec<String>,
    /// Whether the compare map is shown
    pub comparing: bool,
    /// AOI drawing state; `None` when AOI drawing is not in use
    pub aoi: Option<AoiState>,
    /// Selected date for time-indexed layers
    pub date: Option<NaiveDate>,
    /// Selected spotlight area
    pub spotlight_id: Option<String>,
    /// Per-layer gamma adjustment
    pub gamma: BTreeMap<String, f64>,
}

impl ExternalState {
    /// Create an empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the active layer ids.
    pub fn with_active<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.active_layers = ids.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_comparing(mut self, comparing: bool) -> Self {
        self.comparing = comparing;
        self
    }

    pub fn with_aoi(mut self, aoi: AoiState) -> Self {
        self.aoi = Some(aoi);
        self
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn with_spotlight(mut self, id: impl Into<String>) -> Self {
        self.spotlight_id = Some(id.into());
        self
    }

    pub fn with_gamma(mut self, layer_id: impl Into<String>, gamma: f64) -> Self {
        self.gamma.insert(layer_id.into(), gamma);
        self
    }

    /// Gamma for a layer, falling back to [`DEFAULT_GAMMA`].
    pub fn gamma_for(&self, layer_id: &str) -> f64 {
        self.gamma.get(layer_id).copied().unwrap_or(DEFAULT_GAMMA)
    }

    /// Whether `id` is in the active set.
    pub fn is_active(&self, id: &str) -> bool {
        self.active_layers.iter().any(|a| a == id)
    }
}
