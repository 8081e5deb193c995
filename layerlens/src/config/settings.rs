//! Settings structs for all configuration sections.
//!
//! Each struct represents one `[section]` of the INI config file.
//! These are pure data types with no parsing or serialization logic.

use std::path::PathBuf;

/// Complete application configuration loaded from config.ini.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigFile {
    /// Map surface settings
    pub map: MapSettings,
    /// Tile API settings
    pub api: ApiSettings,
    /// AOI drawing settings
    pub aoi: AoiSettings,
    /// Logging settings
    pub logging: LoggingSettings,
}

/// Map surface configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct MapSettings {
    /// Initial center longitude
    pub center_lng: f64,
    /// Initial center latitude
    pub center_lat: f64,
    /// Initial zoom level
    pub zoom: f64,
    /// Minimum zoom level
    pub min_zoom: f64,
    /// Maximum zoom level
    pub max_zoom: f64,
    /// Base map style URL
    pub style_url: String,
    /// Access token handed to the map engine
    pub access_token: Option<String>,
}

/// Tile API configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiSettings {
    /// Base URL substituted for `{api}` in catalog tile templates
    pub url: Option<String>,
}

/// AOI drawing configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct AoiSettings {
    /// Whether the drawing overlay is set up on the primary map
    pub enabled: bool,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct LoggingSettings {
    /// Directory log files are written to
    pub directory: PathBuf,
    /// Log file name
    pub file: String,
}
