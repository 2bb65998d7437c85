//! Geographic and projected point types.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{SentinelError, SentinelResult};

/// A WGS84 position in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeographicPoint {
    pub longitude: f64,
    pub latitude: f64,
}

impl GeographicPoint {
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
        }
    }

    /// Create a point, rejecting coordinates outside the valid lon/lat ranges.
    pub fn try_new(longitude: f64, latitude: f64) -> SentinelResult<Self> {
        let point = Self::new(longitude, latitude);
        point.validate()?;
        Ok(point)
    }

    /// Check that longitude is within [-180, 180] and latitude within [-90, 90].
    ///
    /// NaN fails both range checks.
    pub fn validate(&self) -> SentinelResult<()> {
        if !(-180.0..=180.0).contains(&self.longitude) {
            return Err(SentinelError::InvalidCoordinate(format!(
                "longitude {} outside [-180, 180]",
                self.longitude
            )));
        }
        if !(-90.0..=90.0).contains(&self.latitude) {
            return Err(SentinelError::InvalidCoordinate(format!(
                "latitude {} outside [-90, 90]",
                self.latitude
            )));
        }
        Ok(())
    }
}

impl fmt::Display for GeographicPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "lon = {:.1}, lat = {:.1}", self.longitude, self.latitude)
    }
}

/// A position in EPSG:3857 meters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectedPoint {
    pub x: f64,
    pub y: f64,
}

impl ProjectedPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}
