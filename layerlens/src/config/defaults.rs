//! Default values and constants for all configuration settings.
//!
//! Zoom defaults match what the map falls back to when a deployment leaves
//! them unset: start at zoom 5, never below 4 or above 9.

use std::path::PathBuf;

use super::settings::*;

// =============================================================================
// [map]
// =============================================================================

/// Initial map center longitude.
pub const DEFAULT_CENTER_LNG: f64 = -98.5795;
/// Initial map center latitude.
pub const DEFAULT_CENTER_LAT: f64 = 39.8283;
/// Initial zoom level.
pub const DEFAULT_ZOOM: f64 = 5.0;
/// Lowest zoom a surface may reach.
pub const DEFAULT_MIN_ZOOM: f64 = 4.0;
/// Highest zoom a surface may reach.
pub const DEFAULT_MAX_ZOOM: f64 = 9.0;
/// Base map style.
pub const DEFAULT_STYLE_URL: &str = "mapbox://styles/mapbox/light-v10";

// =============================================================================
// [aoi]
// =============================================================================

/// AOI drawing is available unless turned off.
pub const DEFAULT_AOI_ENABLED: bool = true;

// =============================================================================
// [logging]
// =============================================================================

pub const DEFAULT_LOG_DIRECTORY: &str = "logs";
pub const DEFAULT_LOG_FILE: &str = "layerlens.log";

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            map: MapSettings {
                center_lng: DEFAULT_CENTER_LNG,
                center_lat: DEFAULT_CENTER_LAT,
                zoom: DEFAULT_ZOOM,
                min_zoom: DEFAULT_MIN_ZOOM,
                max_zoom: DEFAULT_MAX_ZOOM,
                style_url: DEFAULT_STYLE_URL.to_string(),
                access_token: None,
            },
            api: ApiSettings { url: None },
            aoi: AoiSettings {
                enabled: DEFAULT_AOI_ENABLED,
            },
            logging: LoggingSettings {
                directory: PathBuf::from(DEFAULT_LOG_DIRECTORY),
                file: DEFAULT_LOG_FILE.to_string(),
            },
        }
    }
}
