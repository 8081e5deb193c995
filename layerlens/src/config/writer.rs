//! INI serialization logic for converting `ConfigFile` → INI string.
//!
//! This module contains the `to_config_string()` function that produces
//! the commented INI representation written to `config.ini`.

use std::path::Path;

use super::settings::ConfigFile;

/// Convert a `ConfigFile` to a commented INI string for saving.
pub(super) fn to_config_string(config: &ConfigFile) -> String {
    let access_token = config.map.access_token.as_deref().unwrap_or("");
    let api_url = config.api.url.as_deref().unwrap_or("");
    let aoi_enabled = if config.aoi.enabled { "true" } else { "false" };

    format!(
        r#"[map]
; Initial camera center (degrees)
center_lng = {}
center_lat = {}
; Initial zoom level (default: 5)
zoom = {}
; Zoom bounds shared by the primary and the compare map (default: 4 - 9)
min_zoom = {}
max_zoom = {}
; Base map style handed to the rendering engine
style_url = {}
; Access token handed to the rendering engine (empty = none)
access_token = {}

[api]
; Base URL substituted for {{api}} in catalog tile templates
; Example: url = https://api.example.org/v1
url = {}

[aoi]
; Set up the area-of-interest drawing overlay on the primary map
enabled = {}

[logging]
; Directory log files are written to
directory = {}
; Log file name
file = {}
"#,
        config.map.center_lng,
        config.map.center_lat,
        config.map.zoom,
        config.map.min_zoom,
        config.map.max_zoom,
        config.map.style_url,
        access_token,
        api_url,
        aoi_enabled,
        path_to_string(&config.logging.directory),
        config.logging.file,
    )
}

/// Render a path, collapsing the home directory to `~`.
fn path_to_string(path: &Path) -> String {
    if let Some(home) = dirs::home_dir() {
        if let Ok(stripped) = path.strip_prefix(&home) {
            return format!("~/{}", stripped.display());
        }
    }
    path.display().to_string()
}
