//! Reference systems used by the imagery requests.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Half the equatorial circumference of the Web Mercator sphere, in meters.
pub const WEB_MERCATOR_EXTENT: f64 = 20037508.342789244;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CrsCode {
    /// WGS84 longitude/latitude in degrees
    Epsg4326,
    /// Spherical Web Mercator in meters
    Epsg3857,
}

impl CrsCode {
    /// Value of the `srs` request parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            CrsCode::Epsg4326 => "EPSG:4326",
            CrsCode::Epsg3857 => "EPSG:3857",
        }
    }
}

impl fmt::Display for CrsCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
