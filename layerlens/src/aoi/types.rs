//! AOI data types

use serde::{Deserialize, Serialize};

use crate::coord::LngLat;

/// A drawn polygon.
///
/// The ring is stored open; the first position is not repeated at the end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AoiFeature {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub ring: Vec<LngLat>,
}

impl AoiFeature {
    pub fn new(ring: Vec<LngLat>) -> Self {
        Self { id: None, ring }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Axis-aligned rectangle from two opposite corners.
    pub fn rectangle(a: LngLat, b: LngLat) -> Self {
        Self::new(vec![
            LngLat::new(a.lng, a.lat),
            LngLat::new(b.lng, a.lat),
            LngLat::new(b.lng, b.lat),
            LngLat::new(a.lng, b.lat),
        ])
    }

    /// A ring needs at least three distinct positions to enclose an area.
    pub fn is_closed_area(&self) -> bool {
        self.ring.len() >= 3
    }
}

/// AOI state held by the external state holder.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AoiState {
    #[serde(default)]
    pub feature: Option<AoiFeature>,
}

impl AoiState {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_feature(feature: AoiFeature) -> Self {
        Self {
            feature: Some(feature),
        }
    }
}

/// Event emitted by the drawing toolkit.
#[derive(Debug, Clone, PartialEq)]
pub enum AoiAction {
    /// A polygon was completed
    Drawn(AoiFeature),
    /// An existing polygon was edited
    Updated(AoiFeature),
    /// The polygon was selected or deselected
    Selected(bool),
    /// The polygon was removed
    Cleared,
}

impl AoiAction {
    pub fn name(&self) -> &'static str {
        match self {
            AoiAction::Drawn(_) => "aoi.draw-finish",
            AoiAction::Updated(_) => "aoi.update",
            AoiAction::Selected(_) => "aoi.selection",
            AoiAction::Cleared => "aoi.clear",
        }
    }
}

/// Colors the toolkit draws with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawTheme {
    pub fill: String,
    pub stroke: String,
    pub vertex: String,
}

impl Default for DrawTheme {
    fn default() -> Self {
        Self {
            fill: "#2276AC".to_string(),
            stroke: "#2276AC".to_string(),
            vertex: "#FFFFFF".to_string(),
        }
    }
}
