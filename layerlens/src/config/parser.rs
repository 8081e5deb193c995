//! INI parsing logic for converting `Ini` → `ConfigFile`.
//!
//! This is the single place where INI key names are mapped to struct fields.

use ini::Ini;
use std::path::PathBuf;

use super::file::ConfigFileError;
use super::settings::ConfigFile;
use crate::coord::{MAX_LAT, MAX_LON, MAX_ZOOM, MIN_LAT, MIN_LON, MIN_ZOOM};

/// Parse an `Ini` object into a `ConfigFile`.
///
/// Starts from `ConfigFile::default()` and overlays any values found in the INI.
pub(super) fn parse_ini(ini: &Ini) -> Result<ConfigFile, ConfigFileError> {
    let mut config = ConfigFile::default();

    // [map] section
    if let Some(section) = ini.section(Some("map")) {
        if let Some(v) = section.get("center_lng") {
            config.map.center_lng = parse_ranged("map", "center_lng", v, MIN_LON, MAX_LON)?;
        }
        if let Some(v) = section.get("center_lat") {
            config.map.center_lat = parse_ranged("map", "center_lat", v, MIN_LAT, MAX_LAT)?;
        }
        if let Some(v) = section.get("zoom") {
            config.map.zoom = parse_ranged("map", "zoom", v, MIN_ZOOM, MAX_ZOOM)?;
        }
        if let Some(v) = section.get("min_zoom") {
            config.map.min_zoom = parse_ranged("map", "min_zoom", v, MIN_ZOOM, MAX_ZOOM)?;
        }
        if let Some(v) = section.get("max_zoom") {
            config.map.max_zoom = parse_ranged("map", "max_zoom", v, MIN_ZOOM, MAX_ZOOM)?;
        }
        if let Some(v) = section.get("style_url") {
            let v = v.trim();
            if !v.is_empty() {
                config.map.style_url = v.to_string();
            }
        }
        if let Some(v) = section.get("access_token") {
            let v = v.trim();
            if !v.is_empty() {
                config.map.access_token = Some(v.to_string());
            }
        }
    }

    if config.map.min_zoom > config.map.max_zoom {
        return Err(ConfigFileError::InvalidValue {
            section: "map".to_string(),
            key: "min_zoom".to_string(),
            value: config.map.min_zoom.to_string(),
            reason: format!("must not exceed max_zoom ({})", config.map.max_zoom),
        });
    }

    // [api] section
    if let Some(section) = ini.section(Some("api")) {
        if let Some(v) = section.get("url") {
            let v = v.trim();
            if !v.is_empty() {
                if !v.starts_with("http://") && !v.starts_with("https://") {
                    return Err(ConfigFileError::InvalidValue {
                        section: "api".to_string(),
                        key: "url".to_string(),
                        value: v.to_string(),
                        reason: "must start with http:// or https://".to_string(),
                    });
                }
                config.api.url = Some(v.trim_end_matches('/').to_string());
            }
        }
    }

    // [aoi] section
    if let Some(section) = ini.section(Some("aoi")) {
        if let Some(v) = section.get("enabled") {
            config.aoi.enabled = parse_bool("aoi", "enabled", v)?;
        }
    }

    // [logging] section
    if let Some(section) = ini.section(Some("logging")) {
        if let Some(v) = section.get("directory") {
            let v = v.trim();
            if !v.is_empty() {
                config.logging.directory = expand_tilde(v);
            }
        }
        if let Some(v) = section.get("file") {
            let v = v.trim();
            if !v.is_empty() {
                config.logging.file = v.to_string();
            }
        }
    }

    Ok(config)
}

fn parse_ranged(
    section: &str,
    key: &str,
    value: &str,
    min: f64,
    max: f64,
) -> Result<f64, ConfigFileError> {
    let invalid = |reason: String| ConfigFileError::InvalidValue {
        section: section.to_string(),
        key: key.to_string(),
        value: value.to_string(),
        reason,
    };
    let parsed: f64 = value
        .trim()
        .parse()
        .map_err(|_| invalid("expected a number".to_string()))?;
    if !(min..=max).contains(&parsed) {
        return Err(invalid(format!("must be between {} and {}", min, max)));
    }
    Ok(parsed)
}

fn parse_bool(section: &str, key: &str, value: &str) -> Result<bool, ConfigFileError> {
    match value.trim().to_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => Err(ConfigFileError::InvalidValue {
            section: section.to_string(),
            key: key.to_string(),
            value: value.to_string(),
            reason: "expected true or false".to_string(),
        }),
    }
}

/// Expand a leading `~` to the home directory.
fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Result<ConfigFile, ConfigFileError> {
        ConfigFile::from_ini_str(text)
    }

    #[test]
    fn test_empty_ini_yields_defaults() {
        assert_eq!(parse("").unwrap(), ConfigFile::default());
    }

    #[test]
    fn test_map_section_overrides() {
        let config = parse(
            "[map]\ncenter_lng = 9.99\ncenter_lat = 53.63\nzoom = 6\nmin_zoom = 3\nmax_zoom = 12\naccess_token = pk.abc\n",
        )
        .unwrap();
        assert_eq!(config.map.center_lng, 9.99);
        assert_eq!(config.map.center_lat, 53.63);
        assert_eq!(config.map.zoom, 6.0);
        assert_eq!(config.map.min_zoom, 3.0);
        assert_eq!(config.map.max_zoom, 12.0);
        assert_eq!(config.map.access_token.as_deref(), Some("pk.abc"));
    }

    #[test]
    fn test_empty_token_is_none() {
        let config = parse("[map]\naccess_token = \n").unwrap();
        assert!(config.map.access_token.is_none());
    }

    #[test]
    fn test_latitude_out_of_range_rejected() {
        let err = parse("[map]\ncenter_lat = 91\n").unwrap_err();
        match err {
            ConfigFileError::InvalidValue { section, key, .. } => {
                assert_eq!(section, "map");
                assert_eq!(key, "center_lat");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_non_numeric_zoom_rejected() {
        let err = parse("[map]\nzoom = far\n").unwrap_err();
        assert!(err.to_string().contains("expected a number"));
    }

    #[test]
    fn test_inverted_zoom_bounds_rejected() {
        let err = parse("[map]\nmin_zoom = 10\nmax_zoom = 5\n").unwrap_err();
        assert!(err.to_string().contains("max_zoom"));
    }

    #[test]
    fn test_api_url_trailing_slash_trimmed() {
        let config = parse("[api]\nurl = https://tiles.example/\n").unwrap();
        assert_eq!(config.api.url.as_deref(), Some("https://tiles.example"));
    }

    #[test]
    fn test_api_url_requires_scheme() {
        assert!(parse("[api]\nurl = tiles.example\n").is_err());
    }

    #[test]
    fn test_aoi_enabled_parsing() {
        assert!(!parse("[aoi]\nenabled = off\n").unwrap().aoi.enabled);
        assert!(parse("[aoi]\nenabled = YES\n").unwrap().aoi.enabled);
        assert!(parse("[aoi]\nenabled = maybe\n").is_err());
    }

    #[test]
    fn test_logging_section() {
        let config = parse("[logging]\ndirectory = /var/log/layerlens\nfile = run.log\n").unwrap();
        assert_eq!(config.logging.directory, PathBuf::from("/var/log/layerlens"));
        assert_eq!(config.logging.file, "run.log");
    }
}
