//! Common types shared across the sentinel imagery crates.

pub mod bbox;
pub mod config;
pub mod crs;
pub mod error;
pub mod grid;
pub mod point;
pub mod source;

pub use bbox::BoundingBox;
pub use config::ServiceCredentials;
pub use crs::CrsCode;
pub use error::{SentinelError, SentinelResult};
pub use grid::Grid;
pub use point::{GeographicPoint, ProjectedPoint};
pub use source::SatelliteSource;
