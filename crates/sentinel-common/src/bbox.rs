//! Rectangular request extents.

use serde::{Deserialize, Serialize};

use crate::point::ProjectedPoint;

/// An axis-aligned extent, in degrees for EPSG:4326 and meters for EPSG:3857.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Parse a `minx,miny,maxx,maxy` bbox parameter, ignoring whitespace around numbers.
    pub fn from_wms_string(s: &str) -> Result<Self, BboxParseError> {
        let values = s
            .split(',')
            .map(|part| {
                let part = part.trim();
                part.parse::<f64>()
                    .map_err(|_| BboxParseError::InvalidNumber(part.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        match values[..] {
            [min_x, min_y, max_x, max_y] => Ok(Self::new(min_x, min_y, max_x, max_y)),
            _ => Err(BboxParseError::InvalidFormat(s.to_string())),
        }
    }

    /// Render as the comma-separated `bbox` parameter value.
    pub fn to_wms_string(&self) -> String {
        format!("{},{},{},{}", self.min_x, self.min_y, self.max_x, self.max_y)
    }

    /// Extent along x, in coordinate units.
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Center of the box.
    pub fn center(&self) -> ProjectedPoint {
        ProjectedPoint::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }
}

#[derive(Debug, thiserror::Error)]
pub enum BboxParseError {
    #[error("Expected four comma-separated numbers, got '{0}'")]
    InvalidFormat(String),

    #[error("Not a number in bbox: '{0}'")]
    InvalidNumber(String),
}
