//! Minimal RGBA drawing surface.

use crate::gradient::Color;

/// Row-major RGBA8 pixel buffer.
#[derive(Debug, Clone)]
pub struct Canvas {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<u8>,
}

impl Canvas {
    /// New canvas filled with `background`.
    pub fn new(width: usize, height: usize, background: Color) -> Self {
        let pixels = background.to_rgba().repeat(width * height);
        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn set_pixel(&mut self, x: usize, y: usize, color: Color) {
        if x >= self.width || y >= self.height {
            return;
        }
        let idx = (y * self.width + x) * 4;
        self.pixels[idx..idx + 4].copy_from_slice(&color.to_rgba());
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y * self.width + x) * 4;
        let p = &self.pixels[idx..idx + 4];
        Some(Color::new(p[0], p[1], p[2], p[3]))
    }

    /// Fill the rectangle [x, x + w) x [y, y + h), clipped to the canvas.
    pub fn fill_rect(&mut self, x: usize, y: usize, w: usize, h: usize, color: Color) {
        let x_end = (x + w).min(self.width);
        let y_end = (y + h).min(self.height);
        let rgba = color.to_rgba();
        for row in y.min(self.height)..y_end {
            let start = (row * self.width + x.min(self.width)) * 4;
            let end = (row * self.width + x_end) * 4;
            for px in self.pixels[start..end].chunks_exact_mut(4) {
                px.copy_from_slice(&rgba);
            }
        }
    }

    /// Copy a `w` x `h` RGBA block to (x, y). The block must fit on the canvas.
    pub fn blit(&mut self, x: usize, y: usize, w: usize, h: usize, rgba: &[u8]) {
        debug_assert!(x + w <= self.width && y + h <= self.height);
        for (row, src) in rgba.chunks_exact(w * 4).take(h).enumerate() {
            let start = ((y + row) * self.width + x) * 4;
            self.pixels[start..start + w * 4].copy_from_slice(src);
        }
    }

    /// One-pixel outline just outside the rectangle [x, x + w) x [y, y + h).
    pub fn frame_rect(&mut self, x: usize, y: usize, w: usize, h: usize, color: Color) {
        let left = x.saturating_sub(1);
        let top = y.saturating_sub(1);
        let right = x + w;
        let bottom = y + h;
        for px in left..=right {
            self.set_pixel(px, top, color);
            self.set_pixel(px, bottom, color);
        }
        for py in top..=bottom {
            self.set_pixel(left, py, color);
            self.set_pixel(right, py, color);
        }
    }
}
