//! Geographic positions, zoom bounds and camera state shared by map surfaces.
//!
//! Projection is the rendering engine's business; this module only carries
//! and validates the values surfaces are created with.

mod types;

pub use types::{
    Camera, CoordError, LngLat, ZoomBounds, MAX_LAT, MAX_LON, MAX_ZOOM, MIN_LAT, MIN_LON,
    MIN_ZOOM,
};

#[cfg(test)]
mod tests;
