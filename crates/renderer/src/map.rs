//! Filled-contour map rendering.

use rayon::prelude::*;
use tracing::debug;

use sentinel_common::{BoundingBox, Grid, SentinelError, SentinelResult};

use crate::canvas::Canvas;
use crate::colorbar::{draw_colorbar, label_ticks, TICK_LENGTH};
use crate::contour::{auto_levels, bin_colors, bin_index};
use crate::gradient::{resample_nearest, Color};
use crate::png::create_png_auto;
use crate::text::{line_height, TextPainter};

/// Turns a decoded grid into an encoded image.
pub trait MapRenderer: Send + Sync {
    /// Render `grid` covering `extent` (lon/lat degrees) with a caption.
    fn render(&self, grid: &Grid, extent: &BoundingBox, label: &str) -> SentinelResult<Vec<u8>>;
}

/// Layout and scaling of rendered maps.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Width of the map area in pixels; height follows the grid aspect ratio
    pub map_width: usize,
    /// Cap on the map area height for very tall grids
    pub max_map_height: usize,
    pub colorbar_height: usize,
    pub tick_font_size: f32,
    pub caption_font_size: f32,
    /// Blank border around the map and between map and color bar
    pub margin: usize,
    /// Upper bound on the number of filled-contour bins
    pub max_bins: usize,
    /// Factor applied to samples before contouring (mol/m^2 to mol/cm^2 display units)
    pub scale: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            map_width: 960,
            max_map_height: 1440,
            colorbar_height: 24,
            tick_font_size: 11.0,
            caption_font_size: 14.0,
            margin: 16,
            max_bins: 10,
            scale: 1.0e4,
        }
    }
}

/// Pixel positions of the parts of a rendered map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapLayout {
    pub margin: usize,
    pub map_width: usize,
    pub map_height: usize,
    pub bar_top: usize,
    pub tick_label_top: usize,
    pub caption_top: usize,
    pub width: usize,
    pub height: usize,
}

impl RenderConfig {
    /// Place the map, color bar, tick labels and caption for a grid of the
    /// given dimensions.
    pub fn layout(&self, grid_width: usize, grid_height: usize) -> MapLayout {
        let map_width = self.map_width;
        let map_height =
            (map_width * grid_height / grid_width.max(1)).clamp(1, self.max_map_height.max(1));

        let margin = self.margin;
        let bar_top = margin + map_height + margin;
        let tick_label_top = bar_top + self.colorbar_height + 1 + TICK_LENGTH + 2;
        let caption_top = tick_label_top + line_height(self.tick_font_size) + margin / 2;
        let height = caption_top + line_height(self.caption_font_size) + margin;

        MapLayout {
            margin,
            map_width,
            map_height,
            bar_top,
            tick_label_top,
            caption_top,
            width: map_width + 2 * margin,
            height,
        }
    }
}

/// A drawn map before encoding.
#[derive(Debug, Clone)]
pub struct ComposedMap {
    pub canvas: Canvas,
    pub layout: MapLayout,
    /// Filled-contour level boundaries in display units
    pub levels: Vec<f32>,
}

/// Renders a masked, jet-colored filled-contour map with a color bar, as PNG.
///
/// Zero, negative and non-finite samples are masked and left transparent.
/// Tick values and the caption are drawn under the color bar and repeated
/// in `tEXt` chunks.
#[derive(Debug, Clone, Default)]
pub struct FilledContourRenderer {
    config: RenderConfig,
}

fn is_valid_sample(v: f32) -> bool {
    v.is_finite() && v > 0.0
}

impl FilledContourRenderer {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }
}

impl FilledContourRenderer {
    /// Draw the map, color bar, tick values and `label` onto a canvas.
    pub fn compose(&self, grid: &Grid, label: &str) -> SentinelResult<ComposedMap> {
        let cfg = &self.config;
        if cfg.map_width == 0 {
            return Err(SentinelError::Render("map width must be positive".to_string()));
        }

        let scaled = grid.scaled(cfg.scale);
        let (lo, hi) = scaled
            .value_range(is_valid_sample)
            .ok_or_else(|| SentinelError::Render("grid has no valid samples to contour".to_string()))?;
        let levels = auto_levels(lo, hi, cfg.max_bins);
        let colors = bin_colors(&levels);

        let layout = cfg.layout(grid.width, grid.height);
        let MapLayout {
            margin,
            map_width,
            map_height,
            ..
        } = layout;
        let samples = resample_nearest(&scaled.values, grid.width, grid.height, map_width, map_height);

        let mut map_pixels = vec![0u8; map_width * map_height * 4];
        map_pixels
            .par_chunks_mut(map_width * 4)
            .zip(samples.par_chunks(map_width))
            .for_each(|(out, row)| {
                for (px, value) in out.chunks_exact_mut(4).zip(row) {
                    let color = if is_valid_sample(*value) {
                        bin_index(*value, &levels)
                            .map(|i| colors[i])
                            .unwrap_or_else(Color::transparent)
                    } else {
                        Color::transparent()
                    };
                    px.copy_from_slice(&color.to_rgba());
                }
            });

        let painter = TextPainter::new()?;
        let mut canvas = Canvas::new(layout.width, layout.height, Color::WHITE);
        canvas.blit(margin, margin, map_width, map_height, &map_pixels);
        canvas.frame_rect(margin, margin, map_width, map_height, Color::BLACK);

        let ticks = draw_colorbar(
            &mut canvas,
            margin,
            layout.bar_top,
            map_width,
            cfg.colorbar_height,
            &colors,
        );
        label_ticks(
            &mut canvas,
            &painter,
            &ticks,
            &levels,
            layout.tick_label_top,
            cfg.tick_font_size,
        );
        painter.draw_centered(
            &mut canvas,
            margin + map_width / 2,
            layout.caption_top,
            cfg.caption_font_size,
            Color::BLACK,
            label,
        );

        debug!(
            width = layout.width,
            height = layout.height,
            bins = colors.len(),
            min = lo,
            max = hi,
            "Rendered filled-contour map"
        );

        Ok(ComposedMap {
            canvas,
            layout,
            levels,
        })
    }
}

impl MapRenderer for FilledContourRenderer {
    fn render(&self, grid: &Grid, extent: &BoundingBox, label: &str) -> SentinelResult<Vec<u8>> {
        let map = self.compose(grid, label)?;

        let extent_text = format!(
            "{},{},{},{}",
            extent.min_x, extent.min_y, extent.max_x, extent.max_y
        );
        let levels_text = map
            .levels
            .iter()
            .map(|l| l.to_string())
            .collect::<Vec<_>>()
            .join(",");

        create_png_auto(
            &map.canvas.pixels,
            map.layout.width,
            map.layout.height,
            &[
                ("Title", label),
                ("Extent", extent_text.as_str()),
                ("Levels", levels_text.as_str()),
            ],
        )
        .map_err(SentinelError::Render)
    }
}
