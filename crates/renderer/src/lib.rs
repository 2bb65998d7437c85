//! Image rendering for gas-concentration grids.
//!
//! Implements:
//! - Jet color ramp and "nice" filled-contour levels
//! - Horizontal color bar below the map, with tick values and a caption
//! - PNG encoding (indexed or RGBA) with tEXt metadata

pub mod canvas;
pub mod colorbar;
pub mod contour;
pub mod gradient;
pub mod map;
pub mod png;
pub mod text;

pub use map::{ComposedMap, FilledContourRenderer, MapLayout, MapRenderer, RenderConfig};
