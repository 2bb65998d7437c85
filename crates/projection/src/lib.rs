//! Coordinate reference system transformations.
//!
//! Implements the spherical Web Mercator projection from scratch without
//! external dependencies, plus the pixel-footprint bounding box arithmetic
//! used to size image requests.

pub mod bbox;
pub mod mercator;

pub use bbox::{bbox_to_geographic, compute_bbox};
pub use mercator::{to_geographic, to_projected, WebMercator};
