//! Coordinate and camera type definitions

use serde::{Deserialize, Serialize};
use std::fmt;

/// Web Mercator valid latitude range
pub const MIN_LAT: f64 = -85.05112878;
pub const MAX_LAT: f64 = 85.05112878;

/// Valid longitude range
pub const MIN_LON: f64 = -180.0;
pub const MAX_LON: f64 = 180.0;

/// Zoom range accepted by map surfaces
pub const MIN_ZOOM: f64 = 0.0;
pub const MAX_ZOOM: f64 = 22.0;

/// A geographic position, longitude first.
///
/// Serializes as a `[lng, lat]` pair, which is how map engines and GeoJSON
/// both order positions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct LngLat {
    /// Longitude in degrees (-180.0 to 180.0)
    pub lng: f64,
    /// Latitude in degrees
    pub lat: f64,
}

impl LngLat {
    /// Creates a position without validation.
    #[inline]
    pub const fn new(lng: f64, lat: f64) -> Self {
        Self { lng, lat }
    }

    /// Creates a position, rejecting values outside the Web Mercator range.
    pub fn validated(lng: f64, lat: f64) -> Result<Self, CoordError> {
        if !(MIN_LAT..=MAX_LAT).contains(&lat) {
            return Err(CoordError::InvalidLatitude(lat));
        }
        if !(MIN_LON..=MAX_LON).contains(&lng) {
            return Err(CoordError::InvalidLongitude(lng));
        }
        Ok(Self { lng, lat })
    }
}

impl From<[f64; 2]> for LngLat {
    fn from(pair: [f64; 2]) -> Self {
        Self::new(pair[0], pair[1])
    }
}

impl From<LngLat> for [f64; 2] {
    fn from(p: LngLat) -> Self {
        [p.lng, p.lat]
    }
}

impl fmt::Display for LngLat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.4}, {:.4})", self.lng, self.lat)
    }
}

/// Inclusive zoom limits for a map surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomBounds {
    min: f64,
    max: f64,
}

impl ZoomBounds {
    /// Bounds used when none are configured: zoom 4 to 9.
    pub const DEFAULT: Self = Self { min: 4.0, max: 9.0 };

    /// Creates zoom bounds, validating that `min <= max` and both are in range.
    pub fn new(min: f64, max: f64) -> Result<Self, CoordError> {
        if !(MIN_ZOOM..=MAX_ZOOM).contains(&min) {
            return Err(CoordError::InvalidZoom(min));
        }
        if !(MIN_ZOOM..=MAX_ZOOM).contains(&max) {
            return Err(CoordError::InvalidZoom(max));
        }
        if min > max {
            return Err(CoordError::InvertedZoomBounds { min, max });
        }
        Ok(Self { min, max })
    }

    /// Minimum zoom level.
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Maximum zoom level.
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Returns whether `zoom` lies within the bounds.
    pub fn contains(&self, zoom: f64) -> bool {
        (self.min..=self.max).contains(&zoom)
    }

    /// Clamps `zoom` into the bounds.
    pub fn clamp(&self, zoom: f64) -> f64 {
        zoom.clamp(self.min, self.max)
    }
}

/// Camera position of a map surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// Map center
    pub center: LngLat,
    /// Zoom level
    pub zoom: f64,
}

impl Camera {
    /// Creates a camera at `center` and `zoom`.
    pub const fn new(center: LngLat, zoom: f64) -> Self {
        Self { center, zoom }
    }

    /// Returns a copy with the zoom clamped into `bounds`.
    pub fn clamped(self, bounds: &ZoomBounds) -> Self {
        Self {
            center: self.center,
            zoom: bounds.clamp(self.zoom),
        }
    }
}

/// Errors produced when validating coordinates or camera settings.
#[derive(Debug, Clone, PartialEq)]
pub enum CoordError {
    /// Latitude is outside valid range (-85.05112878 to 85.05112878)
    InvalidLatitude(f64),
    /// Longitude is outside valid range (-180.0 to 180.0)
    InvalidLongitude(f64),
    /// Zoom level is outside valid range (0 to 22)
    InvalidZoom(f64),
    /// Minimum zoom is above the maximum zoom
    InvertedZoomBounds { min: f64, max: f64 },
}

impl fmt::Display for CoordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoordError::InvalidLatitude(lat) => {
                write!(
                    f,
                    "Invalid latitude: {} (must be between {} and {})",
                    lat, MIN_LAT, MAX_LAT
                )
            }
            CoordError::InvalidLongitude(lng) => {
                write!(
                    f,
                    "Invalid longitude: {} (must be between {} and {})",
                    lng, MIN_LON, MAX_LON
                )
            }
            CoordError::InvalidZoom(zoom) => {
                write!(
                    f,
                    "Invalid zoom level: {} (must be between {} and {})",
                    zoom, MIN_ZOOM, MAX_ZOOM
                )
            }
            CoordError::InvertedZoomBounds { min, max } => {
                write!(f, "Minimum zoom {} is greater than maximum zoom {}", min, max)
            }
        }
    }
}

impl std::error::Error for CoordError {}
