//! Tile URL template resolution.
//!
//! Handlers fill `{date}`, `{spotlightId}` and `{gamma}` from the external
//! state. `{z}`, `{x}` and `{y}` belong to the rendering engine and are left
//! untouched, as is `{spotlightId}` when no spotlight is selected.

use chrono::NaiveDate;

use crate::catalog::{LayerDescriptor, SourceKind, SourceSpec};
use crate::state::ExternalState;

const DATE: &str = "{date}";
const SPOTLIGHT: &str = "{spotlightId}";
const GAMMA: &str = "{gamma}";

/// Which source of a layer to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileVariant {
    /// The layer's own source at the selected date
    Primary,
    /// The compare source at the baseline date
    Compare,
}

/// Date a layer renders for the given state.
///
/// Falls back to the end of the domain when no date is selected, clamps into
/// the domain and truncates to the layer's time unit. Layers without a time
/// unit have no date.
pub fn layer_date(layer: &LayerDescriptor, state: &ExternalState) -> Option<NaiveDate> {
    let unit = layer.time_unit?;
    let date = match (layer.domain, state.date) {
        (Some(domain), Some(date)) => domain.clamp(date),
        (Some(domain), None) => domain.end,
        (None, date) => date?,
    };
    Some(unit.truncate(date))
}

/// Resolve the tile URLs of `layer` for `variant`.
///
/// Returns `None` for [`TileVariant::Compare`] when the layer has no enabled
/// compare mode.
pub fn resolve_source(
    layer: &LayerDescriptor,
    state: &ExternalState,
    variant: TileVariant,
) -> Option<ResolvedSource> {
    let (spec, date): (&SourceSpec, Option<NaiveDate>) = match variant {
        TileVariant::Primary => (&layer.source, layer_date(layer, state)),
        TileVariant::Compare => {
            let compare = layer.enabled_compare()?;
            let spec = layer.compare_source()?;
            let date = layer_date(layer, state).map(|d| compare.baseline_date(d));
            (spec, date)
        }
    };

    let date = match (layer.time_unit, date) {
        (Some(unit), Some(date)) => Some(unit.format_date(date)),
        _ => None,
    };
    let gamma = state.gamma_for(&layer.id).to_string();
    let tiles = spec
        .tiles
        .iter()
        .map(|t| fill(t, date.as_deref(), state.spotlight_id.as_deref(), &gamma))
        .collect();

    Some(ResolvedSource {
        kind: spec.kind,
        tiles,
    })
}

/// A source with every resolvable placeholder filled.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedSource {
    pub kind: SourceKind,
    pub tiles: Vec<String>,
}

fn fill(template: &str, date: Option<&str>, spotlight: Option<&str>, gamma: &str) -> String {
    let mut url = template.replace(GAMMA, gamma);
    if let Some(date) = date {
        url = url.replace(DATE, date);
    }
    if let Some(spotlight) = spotlight {
        url = url.replace(SPOTLIGHT, spotlight);
    }
    url
}
