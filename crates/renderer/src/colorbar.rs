//! Horizontal color bar drawn beneath the map.

use crate::canvas::Canvas;
use crate::gradient::Color;
use crate::text::TextPainter;

/// Length of the tick marks under each level boundary, in pixels.
pub const TICK_LENGTH: usize = 4;

/// Draw one equal-width cell per bin color in the rectangle at (x, y).
///
/// Returns the x position of the tick drawn at each level boundary
/// (`colors.len() + 1` ticks).
pub fn draw_colorbar(
    canvas: &mut Canvas,
    x: usize,
    y: usize,
    width: usize,
    height: usize,
    colors: &[Color],
) -> Vec<usize> {
    if colors.is_empty() || width == 0 || height == 0 {
        return Vec::new();
    }

    let bins = colors.len();
    let edge = |i: usize| x + i * width / bins;

    for (i, color) in colors.iter().enumerate() {
        let start = edge(i);
        canvas.fill_rect(start, y, edge(i + 1) - start, height, *color);
    }
    canvas.frame_rect(x, y, width, height, Color::BLACK);

    let ticks: Vec<usize> = (0..=bins).map(|i| edge(i).min(x + width - 1)).collect();
    for &tick in &ticks {
        for dy in 0..TICK_LENGTH {
            canvas.set_pixel(tick, y + height + 1 + dy, Color::BLACK);
        }
    }
    ticks
}

/// Fewest decimals that print every multiple of `step` exactly.
pub fn level_decimals(step: f32) -> usize {
    if !(step > 0.0) || !step.is_finite() {
        return 0;
    }
    (0..6)
        .find(|&d| {
            let shifted = step as f64 * 10f64.powi(d as i32);
            (shifted - shifted.round()).abs() < 1e-3
        })
        .unwrap_or(6)
}

/// Write each level value centered under its tick.
///
/// Labels that would collide with the previous one are skipped; the first
/// and last levels are always written.
pub fn label_ticks(
    canvas: &mut Canvas,
    painter: &TextPainter,
    ticks: &[usize],
    levels: &[f32],
    y: usize,
    size: f32,
) {
    let step = match levels {
        [first, second, ..] => second - first,
        _ => 0.0,
    };
    let decimals = level_decimals(step);
    let labels: Vec<String> = levels
        .iter()
        .map(|level| format!("{:.*}", decimals, level))
        .collect();

    let gap = painter.text_width(" ", size).max(4);
    let widest = labels
        .iter()
        .map(|l| painter.text_width(l, size))
        .max()
        .unwrap_or(0);
    let spacing = match ticks {
        [first, second, ..] => (second - first).max(1),
        _ => 1,
    };
    let stride = ((widest + gap + spacing - 1) / spacing).max(1);

    let count = ticks.len().min(labels.len());
    if count == 0 {
        return;
    }
    let last = count - 1;
    let mut shown: Vec<usize> = (0..=last).step_by(stride).collect();
    if shown.last() != Some(&last) {
        if shown.len() > 1 {
            shown.pop();
        }
        shown.push(last);
    }

    for i in shown {
        painter.draw_centered(canvas, ticks[i], y, size, Color::BLACK, &labels[i]);
    }
}
