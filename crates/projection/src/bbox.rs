//! Pixel-footprint bounding boxes.
//!
//! An image request covers `width_px * resolution` by `height_px * resolution`
//! meters of ground, centered on the projected query point.

use sentinel_common::{BoundingBox, GeographicPoint, ProjectedPoint, SentinelError, SentinelResult};
use tracing::trace;

use crate::mercator::{to_projected, WebMercator};

/// Compute the EPSG:3857 box covering `width_px` x `height_px` pixels of
/// `resolution_m_per_px` meters each, centered on `center`.
pub fn compute_bbox(
    center: GeographicPoint,
    width_px: u32,
    height_px: u32,
    resolution_m_per_px: f64,
) -> SentinelResult<BoundingBox> {
    if width_px == 0 || height_px == 0 {
        return Err(SentinelError::InvalidDimension(format!(
            "pixel footprint must be positive, got {}x{}",
            width_px, height_px
        )));
    }
    if !(resolution_m_per_px.is_finite() && resolution_m_per_px > 0.0) {
        return Err(SentinelError::InvalidDimension(format!(
            "resolution must be a positive number of meters per pixel, got {}",
            resolution_m_per_px
        )));
    }

    let ProjectedPoint { x, y } = to_projected(center)?;
    let half_width = width_px as f64 * resolution_m_per_px / 2.0;
    let half_height = height_px as f64 * resolution_m_per_px / 2.0;

    let bbox = BoundingBox::new(x - half_width, y - half_height, x + half_width, y + half_height);
    trace!(?center, width_px, height_px, resolution_m_per_px, ?bbox, "Computed bbox");
    Ok(bbox)
}

/// Convert a projected box to lon/lat degrees by unprojecting its corners.
///
/// Boxes that cross the antimeridian keep unwrapped longitudes, so
/// `min_x < max_x` holds but either side may lie beyond +/-180.
pub fn bbox_to_geographic(bbox: &BoundingBox) -> SentinelResult<BoundingBox> {
    let mercator = WebMercator::default();
    let lower_left = mercator.inverse_unwrapped(ProjectedPoint::new(bbox.min_x, bbox.min_y))?;
    let upper_right = mercator.inverse_unwrapped(ProjectedPoint::new(bbox.max_x, bbox.max_y))?;

    Ok(BoundingBox::new(
        lower_left.longitude,
        lower_left.latitude,
        upper_right.longitude,
        upper_right.latitude,
    ))
}
