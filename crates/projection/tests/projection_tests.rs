//! Tests for the Web Mercator converter and bbox calculator.

use approx::assert_abs_diff_eq;
use projection::mercator::MAX_LATITUDE;
use projection::{bbox_to_geographic, compute_bbox, to_geographic, to_projected};
use sentinel_common::crs::WEB_MERCATOR_EXTENT;
use sentinel_common::GeographicPoint;

fn sample_points() -> Vec<GeographicPoint> {
    let mut points = Vec::new();
    let mut lon = -180.0;
    while lon <= 180.0 {
        let mut lat = -89.0;
        while lat <= 89.0 {
            points.push(GeographicPoint::new(lon, lat));
            lat += 7.25;
        }
        lon += 22.5;
    }
    points
}

/// Inclusive corners and poles of the valid lon/lat range.
fn boundary_points() -> Vec<GeographicPoint> {
    let mut points = Vec::new();
    for lon in [-180.0, 0.0, 180.0] {
        for lat in [-90.0, -MAX_LATITUDE, 0.0, MAX_LATITUDE, 90.0] {
            points.push(GeographicPoint::try_new(lon, lat).unwrap());
        }
    }
    points
}

// ============================================================================
// Round trip
// ============================================================================

#[test]
fn test_round_trip_within_tolerance() {
    for p in sample_points() {
        let back = to_geographic(to_projected(p).unwrap()).unwrap();
        assert_abs_diff_eq!(back.longitude, p.longitude, epsilon = 1e-6);
        assert_abs_diff_eq!(back.latitude, p.latitude, epsilon = 1e-6);
    }
}

#[test]
fn test_round_trip_near_max_latitude() {
    for lat in [MAX_LATITUDE, -MAX_LATITUDE, 85.0, -85.0] {
        let p = GeographicPoint::new(-73.98, lat);
        let back = to_geographic(to_projected(p).unwrap()).unwrap();
        assert_abs_diff_eq!(back.latitude, lat, epsilon = 1e-6);
    }
}

#[test]
fn test_round_trip_at_range_boundaries() {
    for p in boundary_points() {
        let projected = to_projected(p).unwrap();
        assert!(projected.x.is_finite() && projected.y.is_finite(), "{:?}", p);

        let back = to_geographic(projected).unwrap();
        assert_abs_diff_eq!(back.longitude, p.longitude, epsilon = 1e-6);
        let expected_lat = p.latitude.clamp(-MAX_LATITUDE, MAX_LATITUDE);
        assert_abs_diff_eq!(back.latitude, expected_lat, epsilon = 1e-6);
    }
}

#[test]
fn test_poles_project_onto_square_edge() {
    let south = to_projected(GeographicPoint::new(0.0, -90.0)).unwrap();
    let north = to_projected(GeographicPoint::new(0.0, 90.0)).unwrap();
    assert_abs_diff_eq!(south.y, -WEB_MERCATOR_EXTENT, epsilon = 1e-3);
    assert_abs_diff_eq!(north.y, WEB_MERCATOR_EXTENT, epsilon = 1e-3);
}

#[test]
fn test_projection_is_monotonic_in_latitude() {
    let mut last = f64::NEG_INFINITY;
    for tenth in -850..=850 {
        let y = to_projected(GeographicPoint::new(0.0, tenth as f64 / 10.0))
            .unwrap()
            .y;
        assert!(y > last);
        last = y;
    }
}

// ============================================================================
// Bounding boxes
// ============================================================================

#[test]
fn test_bbox_centered_on_projected_point() {
    for p in sample_points() {
        let bbox = compute_bbox(p, 1280, 720, 60.0).unwrap();
        let projected = to_projected(p).unwrap();
        assert!(bbox.min_x < bbox.max_x);
        assert!(bbox.min_y < bbox.max_y);
        assert_abs_diff_eq!(bbox.center().x, projected.x, epsilon = 1e-6);
        assert_abs_diff_eq!(bbox.center().y, projected.y, epsilon = 1e-6);
    }
}

#[test]
fn test_bbox_ordered_at_range_boundaries() {
    for p in boundary_points() {
        for (w, h, reso) in [(1280, 720, 60.0), (10, 10, 2000.0)] {
            let bbox = compute_bbox(p, w, h, reso).unwrap();
            let parts = [bbox.min_x, bbox.min_y, bbox.max_x, bbox.max_y];
            assert!(parts.iter().all(|v| v.is_finite()), "{:?} -> {:?}", p, bbox);
            assert!(bbox.min_x < bbox.max_x);
            assert!(bbox.min_y < bbox.max_y);
            assert_abs_diff_eq!(bbox.width(), w as f64 * reso, epsilon = 1e-6);
            assert_abs_diff_eq!(bbox.height(), h as f64 * reso, epsilon = 1e-6);
        }
    }
}

#[test]
fn test_bbox_linear_in_resolution() {
    let center = GeographicPoint::new(2.3, 48.8);
    let single = compute_bbox(center, 1280, 720, 60.0).unwrap();
    let double = compute_bbox(center, 1280, 720, 120.0).unwrap();

    assert_abs_diff_eq!(double.width(), 2.0 * single.width(), epsilon = 1e-6);
    assert_abs_diff_eq!(double.height(), 2.0 * single.height(), epsilon = 1e-6);
    assert_abs_diff_eq!(double.center().x, single.center().x, epsilon = 1e-6);
    assert_abs_diff_eq!(double.center().y, single.center().y, epsilon = 1e-6);
}

#[test]
fn test_bbox_at_origin_symmetric() {
    let bbox = compute_bbox(GeographicPoint::new(0.0, 0.0), 1280, 720, 60.0).unwrap();
    assert_abs_diff_eq!(bbox.width(), 76800.0, epsilon = 1e-6);
    assert_abs_diff_eq!(bbox.height(), 43200.0, epsilon = 1e-6);
    assert_abs_diff_eq!(bbox.min_x, -bbox.max_x, epsilon = 1e-6);
    assert_abs_diff_eq!(bbox.min_y, -bbox.max_y, epsilon = 1e-6);
}

#[test]
fn test_feature_footprint() {
    let bbox = compute_bbox(GeographicPoint::new(15.0, -30.0), 10, 10, 2000.0).unwrap();
    assert_abs_diff_eq!(bbox.width(), 20000.0, epsilon = 1e-6);
    assert_abs_diff_eq!(bbox.height(), 20000.0, epsilon = 1e-6);
}

#[test]
fn test_bbox_to_geographic_contains_center() {
    let center = GeographicPoint::new(2.3, 48.8);
    let bbox = compute_bbox(center, 1280, 720, 2000.0).unwrap();
    let geo = bbox_to_geographic(&bbox).unwrap();

    assert!(geo.min_x < center.longitude && center.longitude < geo.max_x);
    assert!(geo.min_y < center.latitude && center.latitude < geo.max_y);
    // Longitude is linear in x, so the geographic box stays centered in lon.
    assert_abs_diff_eq!(geo.center().x, center.longitude, epsilon = 1e-9);
    // 1280 px * 2 km = 2560 km of projected width.
    assert_abs_diff_eq!(geo.width(), (2_560_000.0_f64 / 6378137.0).to_degrees(), epsilon = 1e-6);
}

#[test]
fn test_bbox_to_geographic_across_antimeridian() {
    let center = GeographicPoint::new(179.9, 0.0);
    let bbox = compute_bbox(center, 1280, 720, 2000.0).unwrap();
    let geo = bbox_to_geographic(&bbox).unwrap();

    assert!(geo.min_x < geo.max_x);
    assert!(geo.max_x > 180.0);
    assert_abs_diff_eq!(geo.center().x, center.longitude, epsilon = 1e-9);
}

#[test]
fn test_bbox_to_geographic_at_south_pole() {
    let bbox = compute_bbox(GeographicPoint::new(0.0, -90.0), 1280, 720, 2000.0).unwrap();
    let geo = bbox_to_geographic(&bbox).unwrap();
    assert!(geo.min_y < geo.max_y);
    assert!(geo.min_y >= -90.0);
}
