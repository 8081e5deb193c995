//! Configuration for layerlens.
//!
//! - [`ConfigFile`]: the user's `~/.layerlens/config.ini`, loaded with
//!   defaults for anything missing
//! - [`MapConfig`]: the validated map surface settings a view is built from
//!
//! # Example
//!
//! ```
//! use layerlens::config::{ConfigFile, MapConfig};
//!
//! let file = ConfigFile::from_ini_str("[map]\nzoom = 6\n").unwrap();
//! let map = MapConfig::from_settings(&file).unwrap();
//! assert_eq!(map.camera().zoom, 6.0);
//! ```

mod defaults;
mod file;
mod map;
mod parser;
mod settings;
mod writer;

pub use file::{
    config_directory, config_file_path, AoiSettings, ApiSettings, ConfigFile, ConfigFileError,
    LoggingSettings, MapSettings, DEFAULT_AOI_ENABLED, DEFAULT_CENTER_LAT, DEFAULT_CENTER_LNG,
    DEFAULT_LOG_DIRECTORY, DEFAULT_LOG_FILE, DEFAULT_MAX_ZOOM, DEFAULT_MIN_ZOOM,
    DEFAULT_STYLE_URL, DEFAULT_ZOOM,
};
pub use map::MapConfig;
