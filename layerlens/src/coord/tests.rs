//! Tests for coordinate and camera validation

use super::*;

#[test]
fn test_validated_accepts_mercator_range() {
    let p = LngLat::validated(-74.0060, 40.7128).unwrap();
    assert_eq!(p.lng, -74.0060);
    assert_eq!(p.lat, 40.7128);
}

#[test]
fn test_validated_rejects_polar_latitude() {
    let result = LngLat::validated(0.0, 90.0);
    assert!(matches!(result, Err(CoordError::InvalidLatitude(_))));
}

#[test]
fn test_validated_rejects_longitude_out_of_range() {
    let result = LngLat::validated(181.0, 0.0);
    assert!(matches!(result, Err(CoordError::InvalidLongitude(_))));
}

#[test]
fn test_lnglat_serializes_as_pair() {
    let p = LngLat::new(9.99, 53.63);
    let json = serde_json::to_string(&p).unwrap();
    assert_eq!(json, "[9.99,53.63]");

    let back: LngLat = serde_json::from_str("[1.36,43.62]").unwrap();
    assert_eq!(back, LngLat::new(1.36, 43.62));
}

#[test]
fn test_zoom_bounds_clamp() {
    let bounds = ZoomBounds::new(4.0, 9.0).unwrap();
    assert_eq!(bounds.clamp(2.0), 4.0);
    assert_eq!(bounds.clamp(12.0), 9.0);
    assert_eq!(bounds.clamp(6.5), 6.5);
    assert!(bounds.contains(9.0));
    assert!(!bounds.contains(9.1));
}

#[test]
fn test_zoom_bounds_rejects_inverted() {
    let result = ZoomBounds::new(9.0, 4.0);
    assert_eq!(
        result.unwrap_err(),
        CoordError::InvertedZoomBounds { min: 9.0, max: 4.0 }
    );
}

#[test]
fn test_zoom_bounds_rejects_out_of_range() {
    assert!(matches!(
        ZoomBounds::new(-1.0, 4.0),
        Err(CoordError::InvalidZoom(_))
    ));
    assert!(matches!(
        ZoomBounds::new(0.0, 30.0),
        Err(CoordError::InvalidZoom(_))
    ));
}

#[test]
fn test_camera_clamped_keeps_center() {
    let bounds = ZoomBounds::new(4.0, 9.0).unwrap();
    let camera = Camera::new(LngLat::new(-98.5, 39.8), 2.0).clamped(&bounds);
    assert_eq!(camera.center, LngLat::new(-98.5, 39.8));
    assert_eq!(camera.zoom, 4.0);
}

#[test]
fn test_coord_error_display() {
    let msg = CoordError::InvalidLatitude(91.0).to_string();
    assert!(msg.contains("91"));
    assert!(msg.contains("latitude"));
}
