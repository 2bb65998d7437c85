//! Spherical Web Mercator projection (EPSG:3857).
//!
//! Maps WGS84 longitude/latitude onto a sphere of the WGS84 semi-major axis
//! and projects it with the normal Mercator formulas:
//! - x = R * lon
//! - y = R * ln(tan(pi/4 + lat/2))
//!
//! Latitudes beyond `MAX_LATITUDE` are clamped to it before projecting, so the
//! poles land on the edge of the square map instead of at infinity.

use std::f64::consts::PI;

use sentinel_common::crs::WEB_MERCATOR_EXTENT;
use sentinel_common::{GeographicPoint, ProjectedPoint, SentinelError, SentinelResult};

/// Sphere radius used by EPSG:3857 (WGS84 semi-major axis), in meters.
pub const EARTH_RADIUS: f64 = 6378137.0;

/// Latitude at which the projected map becomes square.
pub const MAX_LATITUDE: f64 = 85.05112877980659;

/// Web Mercator projection between EPSG:4326 and EPSG:3857.
#[derive(Debug, Clone, Copy)]
pub struct WebMercator {
    /// Sphere radius (meters)
    pub radius: f64,
}

impl Default for WebMercator {
    fn default() -> Self {
        Self {
            radius: EARTH_RADIUS,
        }
    }
}

impl WebMercator {
    /// Project a geographic point to EPSG:3857 meters.
    pub fn forward(&self, point: GeographicPoint) -> SentinelResult<ProjectedPoint> {
        point.validate()?;

        let lon = point.longitude.to_radians();
        let lat = point.latitude.clamp(-MAX_LATITUDE, MAX_LATITUDE).to_radians();

        let x = self.radius * lon;
        let y = self.radius * (PI / 4.0 + lat / 2.0).tan().ln();

        Ok(ProjectedPoint::new(x, y))
    }

    /// Unproject EPSG:3857 meters back to geographic degrees.
    pub fn inverse(&self, point: ProjectedPoint) -> SentinelResult<GeographicPoint> {
        if !point.x.is_finite() || !point.y.is_finite() {
            return Err(SentinelError::InvalidCoordinate(format!(
                "non-finite projected coordinate ({}, {})",
                point.x, point.y
            )));
        }

        let max_x = PI * self.radius;
        // Allow for rounding at the antimeridian.
        if point.x.abs() > max_x * (1.0 + 1e-12) {
            return Err(SentinelError::InvalidCoordinate(format!(
                "easting {} outside [-{}, {}]",
                point.x, max_x, max_x
            )));
        }

        let unwrapped = self.inverse_unwrapped(point)?;
        Ok(GeographicPoint::new(
            unwrapped.longitude.clamp(-180.0, 180.0),
            unwrapped.latitude,
        ))
    }

    /// Unproject without folding eastings past the antimeridian.
    ///
    /// Longitudes keep running past +/-180 (e.g. -191.5), which keeps box
    /// corners ordered when a footprint straddles the date line.
    pub fn inverse_unwrapped(&self, point: ProjectedPoint) -> SentinelResult<GeographicPoint> {
        if !point.x.is_finite() || !point.y.is_finite() {
            return Err(SentinelError::InvalidCoordinate(format!(
                "non-finite projected coordinate ({}, {})",
                point.x, point.y
            )));
        }

        let lon = (point.x / self.radius).to_degrees();
        let lat = (2.0 * (point.y / self.radius).exp().atan() - PI / 2.0).to_degrees();

        Ok(GeographicPoint::new(lon, lat))
    }
}

/// Project a geographic point with the standard EPSG:3857 sphere.
pub fn to_projected(point: GeographicPoint) -> SentinelResult<ProjectedPoint> {
    WebMercator::default().forward(point)
}

/// Unproject an EPSG:3857 point with the standard sphere.
pub fn to_geographic(point: ProjectedPoint) -> SentinelResult<GeographicPoint> {
    WebMercator::default().inverse(point)
}
