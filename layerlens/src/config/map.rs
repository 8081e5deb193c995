//! Map surface configuration.

use crate::coord::{Camera, CoordError, LngLat, ZoomBounds};

use super::defaults::{
    DEFAULT_AOI_ENABLED, DEFAULT_CENTER_LAT, DEFAULT_CENTER_LNG, DEFAULT_STYLE_URL, DEFAULT_ZOOM,
};
use super::settings::ConfigFile;

/// Configuration for the primary map surface.
///
/// Groups the camera, zoom bounds, style and access token used when a map
/// view creates its surfaces. The compare surface reuses the same bounds,
/// style and token so the two maps stay interchangeable.
///
/// # Example
///
/// ```
/// use layerlens::config::MapConfig;
/// use layerlens::coord::LngLat;
///
/// let config = MapConfig::new()
///     .with_center(LngLat::new(9.99, 53.55))
///     .with_zoom(6.0)
///     .with_access_token("pk.example");
///
/// assert_eq!(config.camera().zoom, 6.0);
/// assert_eq!(config.access_token(), Some("pk.example"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct MapConfig {
    center: LngLat,
    zoom: f64,
    zoom_bounds: ZoomBounds,
    style_url: String,
    access_token: Option<String>,
    aoi_enabled: bool,
}

impl MapConfig {
    /// Create a map configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a map configuration from the loaded config file.
    ///
    /// Coordinates are validated; the zoom is clamped into the bounds.
    pub fn from_settings(file: &ConfigFile) -> Result<Self, CoordError> {
        let center = LngLat::validated(file.map.center_lng, file.map.center_lat)?;
        let zoom_bounds = ZoomBounds::new(file.map.min_zoom, file.map.max_zoom)?;
        let mut config = Self::new()
            .with_center(center)
            .with_zoom_bounds(zoom_bounds)
            .with_zoom(file.map.zoom)
            .with_style_url(file.map.style_url.clone())
            .with_aoi_enabled(file.aoi.enabled);
        config.access_token = file.map.access_token.clone();
        Ok(config)
    }

    /// Set the initial center.
    pub fn with_center(mut self, center: LngLat) -> Self {
        self.center = center;
        self
    }

    /// Set the initial zoom. Clamped into the zoom bounds.
    pub fn with_zoom(mut self, zoom: f64) -> Self {
        self.zoom = self.zoom_bounds.clamp(zoom);
        self
    }

    /// Set the zoom bounds. The current zoom is re-clamped.
    pub fn with_zoom_bounds(mut self, bounds: ZoomBounds) -> Self {
        self.zoom_bounds = bounds;
        self.zoom = bounds.clamp(self.zoom);
        self
    }

    /// Set the base map style URL.
    pub fn with_style_url(mut self, url: impl Into<String>) -> Self {
        self.style_url = url.into();
        self
    }

    /// Set the access token handed to the rendering engine.
    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    /// Enable or disable the AOI drawing overlay.
    pub fn with_aoi_enabled(mut self, enabled: bool) -> Self {
        self.aoi_enabled = enabled;
        self
    }

    /// Initial camera.
    pub fn camera(&self) -> Camera {
        Camera::new(self.center, self.zoom)
    }

    pub fn zoom_bounds(&self) -> ZoomBounds {
        self.zoom_bounds
    }

    pub fn style_url(&self) -> &str {
        &self.style_url
    }

    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    pub fn aoi_enabled(&self) -> bool {
        self.aoi_enabled
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            center: LngLat::new(DEFAULT_CENTER_LNG, DEFAULT_CENTER_LAT),
            zoom: DEFAULT_ZOOM,
            zoom_bounds: ZoomBounds::DEFAULT,
            style_url: DEFAULT_STYLE_URL.to_string(),
            access_token: None,
            aoi_enabled: DEFAULT_AOI_ENABLED,
        }
    }
}
