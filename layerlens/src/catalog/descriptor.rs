//! Layer descriptor types as they appear in the catalog JSON.

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};

/// Granularity of a time-indexed layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    /// One raster per day
    Day,
    /// One raster per month
    Month,
}

impl TimeUnit {
    /// Format `date` the way raster file names encode it.
    ///
    /// Daily rasters use `YYYY_MM_DD`, monthly rasters use `YYYYMM`.
    pub fn format_date(&self, date: NaiveDate) -> String {
        match self {
            TimeUnit::Day => date.format("%Y_%m_%d").to_string(),
            TimeUnit::Month => date.format("%Y%m").to_string(),
        }
    }

    /// Truncate `date` to the start of its unit.
    pub fn truncate(&self, date: NaiveDate) -> NaiveDate {
        match self {
            TimeUnit::Day => date,
            TimeUnit::Month => date.with_day(1).unwrap_or(date),
        }
    }
}

/// Inclusive date range a layer has data for.
///
/// Serialized as `["2020-01-01", "2020-05-17"]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "[NaiveDate; 2]", into = "[NaiveDate; 2]")]
pub struct DateDomain {
    /// First date with data
    pub start: NaiveDate,
    /// Last date with data
    pub end: NaiveDate,
}

impl DateDomain {
    /// Returns whether `date` lies inside the domain.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Clamp `date` into the domain.
    pub fn clamp(&self, date: NaiveDate) -> NaiveDate {
        date.clamp(self.start, self.end)
    }

    pub(crate) fn is_ordered(&self) -> bool {
        self.start <= self.end
    }
}

impl From<[NaiveDate; 2]> for DateDomain {
    fn from(pair: [NaiveDate; 2]) -> Self {
        Self {
            start: pair[0],
            end: pair[1],
        }
    }
}

impl From<DateDomain> for [NaiveDate; 2] {
    fn from(d: DateDomain) -> Self {
        [d.start, d.end]
    }
}

/// Kind of map source a layer reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Raster tiles
    Raster,
    /// Vector tiles
    Vector,
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceKind::Raster => write!(f, "raster"),
            SourceKind::Vector => write!(f, "vector"),
        }
    }
}

/// Tile source definition with URL templates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceSpec {
    /// Source kind
    #[serde(rename = "type")]
    pub kind: SourceKind,
    /// Tile URL templates, with `{z}`, `{x}`, `{y}`, `{date}`, ... placeholders
    pub tiles: Vec<String>,
}

/// Compare-mode variant of a layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompareSpec {
    /// Whether compare mode is offered for this layer
    pub enabled: bool,
    /// Help text shown next to the compare toggle
    #[serde(default)]
    pub help: Option<String>,
    /// How many years back the comparison baseline is
    #[serde(default)]
    pub year_diff: u32,
    /// Alternate source rendered on the comparison surface
    #[serde(default)]
    pub source: Option<SourceSpec>,
}

impl CompareSpec {
    /// The date the comparison surface shows for `date`.
    pub fn baseline_date(&self, date: NaiveDate) -> NaiveDate {
        self.year_diff
            .checked_mul(12)
            .and_then(|months| date.checked_sub_months(Months::new(months)))
            .unwrap_or(date)
    }
}

/// Legend presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LegendKind {
    /// Fixed color gradient
    Gradient,
    /// Gradient whose gamma can be adjusted by the user
    GradientAdjustable,
}

/// Legend shown for an active layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Legend {
    #[serde(rename = "type")]
    pub kind: LegendKind,
    pub min: String,
    pub max: String,
    pub stops: Vec<String>,
}

/// Color chip used in the layer list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Swatch {
    pub color: String,
    pub name: String,
}

/// Immutable definition of one toggleable layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerDescriptor {
    /// Unique layer id
    pub id: String,
    /// Display name
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Type tag selecting the handler
    #[serde(rename = "type")]
    pub layer_type: String,
    #[serde(default)]
    pub time_unit: Option<TimeUnit>,
    #[serde(default)]
    pub domain: Option<DateDomain>,
    pub source: SourceSpec,
    /// Layers that may not be active together with this one
    #[serde(default)]
    pub exclusive_with: Vec<String>,
    /// Whether the layer is active when the app starts
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub compare: Option<CompareSpec>,
    #[serde(default)]
    pub legend: Option<Legend>,
    #[serde(default)]
    pub swatch: Option<Swatch>,
    #[serde(default)]
    pub info: Option<String>,
}

impl LayerDescriptor {
    /// Returns whether this layer declares `other` as mutually exclusive.
    pub fn is_exclusive_with(&self, other: &str) -> bool {
        self.exclusive_with.iter().any(|id| id == other)
    }

    /// The compare variant, if compare mode is enabled for this layer.
    pub fn enabled_compare(&self) -> Option<&CompareSpec> {
        self.compare.as_ref().filter(|c| c.enabled)
    }

    /// Source to render on the comparison surface.
    ///
    /// Falls back to the primary source when the compare block has none.
    pub fn compare_source(&self) -> Option<&SourceSpec> {
        self.enabled_compare()
            .map(|c| c.source.as_ref().unwrap_or(&self.source))
    }

    pub(crate) fn substitute_api(&mut self, api_url: &str) {
        let replace = |tiles: &mut Vec<String>| {
            for t in tiles.iter_mut() {
                *t = t.replace("{api}", api_url);
            }
        };
        replace(&mut self.source.tiles);
        if let Some(source) = self.compare.as_mut().and_then(|c| c.source.as_mut()) {
            replace(&mut source.tiles);
        }
    }
}
