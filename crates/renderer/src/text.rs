//! Text drawing with an embedded TrueType font.

use image::Rgba;
use imageproc::drawing::{draw_text_mut, Canvas as DrawTarget};
use rusttype::{point, Font, Scale};

use sentinel_common::{SentinelError, SentinelResult};

use crate::canvas::Canvas;
use crate::gradient::Color;

/// Embedded font data - DejaVu Sans Mono
const FONT_DATA: &[u8] = include_bytes!("../assets/DejaVuSansMono.ttf");

/// Antialiased edges are snapped to multiples of this step so captions add
/// only a handful of colors to the palette.
const SHADE_STEP: u16 = 51;

/// Draws strings onto a `Canvas`.
pub struct TextPainter {
    font: Font<'static>,
}

impl TextPainter {
    pub fn new() -> SentinelResult<Self> {
        Font::try_from_bytes(FONT_DATA)
            .map(|font| Self { font })
            .ok_or_else(|| SentinelError::Render("failed to load embedded font".to_string()))
    }

    /// Rendered width of `text` in pixels.
    pub fn text_width(&self, text: &str, size: f32) -> usize {
        self.font
            .layout(text, Scale::uniform(size), point(0.0, 0.0))
            .filter_map(|glyph| glyph.pixel_bounding_box())
            .map(|bb| bb.max.x)
            .max()
            .map_or(0, |x| x.max(0) as usize)
    }

    /// Draw `text` with its top-left corner at (x, y).
    pub fn draw(&self, canvas: &mut Canvas, x: i32, y: i32, size: f32, color: Color, text: &str) {
        draw_text_mut(
            &mut ShadeSnapped(canvas),
            Rgba(color.to_rgba()),
            x,
            y,
            Scale::uniform(size),
            &self.font,
            text,
        );
    }

    /// Draw `text` centered on `center_x`, shifted inward if it would run off
    /// either side of the canvas.
    pub fn draw_centered(
        &self,
        canvas: &mut Canvas,
        center_x: usize,
        y: usize,
        size: f32,
        color: Color,
        text: &str,
    ) {
        let width = self.text_width(text, size);
        let x = center_x
            .saturating_sub(width / 2)
            .min(canvas.width.saturating_sub(width));
        self.draw(canvas, x as i32, y as i32, size, color, text);
    }
}

/// Pixel height reserved for one line of text at `size`.
pub fn line_height(size: f32) -> usize {
    (size * 1.25).ceil() as usize
}

struct ShadeSnapped<'a>(&'a mut Canvas);

impl DrawTarget for ShadeSnapped<'_> {
    type Pixel = Rgba<u8>;

    fn dimensions(&self) -> (u32, u32) {
        (self.0.width as u32, self.0.height as u32)
    }

    fn get_pixel(&self, x: u32, y: u32) -> Rgba<u8> {
        self.0
            .pixel(x as usize, y as usize)
            .map_or(Rgba([0, 0, 0, 0]), |c| Rgba(c.to_rgba()))
    }

    fn draw_pixel(&mut self, x: u32, y: u32, color: Rgba<u8>) {
        let [r, g, b, a] = color.0.map(snap_shade);
        self.0.set_pixel(x as usize, y as usize, Color::new(r, g, b, a));
    }
}

fn snap_shade(channel: u8) -> u8 {
    let snapped = (channel as u16 + SHADE_STEP / 2) / SHADE_STEP * SHADE_STEP;
    snapped.min(255) as u8
}
