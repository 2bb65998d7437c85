//! Filled-contour level selection.
//!
//! Values are binned between consecutive "nice" levels (multiples of 1, 2,
//! 2.5 or 5 times a power of ten), the same way plotting libraries choose
//! contourf boundaries.

use crate::gradient::{jet_color, Color};

/// Generate contour levels covering [min_value, max_value] in steps of `interval`.
///
/// The first level is the largest multiple of `interval` not above
/// `min_value`, the last the smallest multiple not below `max_value`.
pub fn generate_contour_levels(min_value: f32, max_value: f32, interval: f32) -> Vec<f32> {
    if !(interval > 0.0) || max_value < min_value {
        return vec![];
    }

    let start = (min_value / interval).floor();
    let end = (max_value / interval).ceil().max(start + 1.0);

    let count = (end - start) as usize;
    (0..=count)
        .map(|i| (start + i as f32) * interval)
        .collect()
}

/// Smallest nice step giving at most `max_bins` bins across `span`.
pub fn nice_interval(span: f32, max_bins: usize) -> f32 {
    let raw = span / max_bins.max(1) as f32;
    if !(raw > 0.0) || !raw.is_finite() {
        return 1.0;
    }

    let magnitude = 10f32.powf(raw.log10().floor());
    [1.0, 2.0, 2.5, 5.0, 10.0]
        .iter()
        .map(|m| m * magnitude)
        .find(|step| *step >= raw * (1.0 - 1e-6))
        .unwrap_or(10.0 * magnitude)
}

/// Nice filled-contour levels for data in [min_value, max_value].
///
/// A constant field gets a single bin around its value.
pub fn auto_levels(min_value: f32, max_value: f32, max_bins: usize) -> Vec<f32> {
    let (lo, hi) = if max_value > min_value {
        (min_value, max_value)
    } else {
        let pad = if min_value == 0.0 { 1.0 } else { min_value.abs() * 0.5 };
        (min_value - pad, max_value + pad)
    };
    generate_contour_levels(lo, hi, nice_interval(hi - lo, max_bins))
}

/// Index of the bin `value` falls into, or None outside the levels.
///
/// Bin `i` spans [levels[i], levels[i + 1]); the top level is inclusive.
pub fn bin_index(value: f32, levels: &[f32]) -> Option<usize> {
    if levels.len() < 2 || value.is_nan() {
        return None;
    }
    let last = levels.len() - 1;
    if value < levels[0] || value > levels[last] {
        return None;
    }
    let idx = levels.partition_point(|level| *level <= value);
    Some(idx.saturating_sub(1).min(last - 1))
}

/// Fill color of each bin, sampled evenly along the jet ramp.
pub fn bin_colors(levels: &[f32]) -> Vec<Color> {
    let bins = levels.len().saturating_sub(1);
    (0..bins)
        .map(|i| {
            let t = if bins > 1 { i as f32 / (bins - 1) as f32 } else { 0.5 };
            jet_color(t)
        })
        .collect()
}
