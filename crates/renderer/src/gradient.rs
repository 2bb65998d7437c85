//! Color ramps and grid resampling.

/// 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::new(255, 255, 255, 255);
    pub const BLACK: Color = Color::new(0, 0, 0, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn transparent() -> Self {
        Color::new(0, 0, 0, 0)
    }

    pub fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// Jet color ramp: dark blue at 0, through cyan, yellow, to dark red at 1.
pub fn jet_color(t: f32) -> Color {
    let t = t.clamp(0.0, 1.0);
    let channel = |offset: f32| {
        let v = (1.5 - (4.0 * t - offset).abs()).clamp(0.0, 1.0);
        (v * 255.0).round() as u8
    };
    Color::new(channel(3.0), channel(2.0), channel(1.0), 255)
}

/// Resample grid data to a different size, nearest neighbour.
///
/// Nearest neighbour keeps masked samples (zero/negative/NaN) from bleeding
/// into valid ones, which bilinear interpolation would do.
pub fn resample_nearest(
    data: &[f32],
    src_width: usize,
    src_height: usize,
    dst_width: usize,
    dst_height: usize,
) -> Vec<f32> {
    if (src_width, src_height) == (dst_width, dst_height) {
        return data.to_vec();
    }

    let x_ratio = src_width as f32 / dst_width as f32;
    let y_ratio = src_height as f32 / dst_height as f32;

    let mut output = Vec::with_capacity(dst_width * dst_height);
    for y in 0..dst_height {
        let src_y = (((y as f32 + 0.5) * y_ratio) as usize).min(src_height - 1);
        for x in 0..dst_width {
            let src_x = (((x as f32 + 0.5) * x_ratio) as usize).min(src_width - 1);
            output.push(data.get(src_y * src_width + src_x).copied().unwrap_or(f32::NAN));
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jet_endpoints() {
        assert_eq!(jet_color(0.0), Color::new(0, 0, 128, 255));
        assert_eq!(jet_color(0.5), Color::new(128, 255, 128, 255));
        assert_eq!(jet_color(1.0), Color::new(128, 0, 0, 255));
        assert_eq!(jet_color(-3.0), jet_color(0.0));
    }

    #[test]
    fn test_resample_nearest_upscale() {
        let data = [1.0, 2.0, 3.0, 4.0];
        let out = resample_nearest(&data, 2, 2, 4, 4);
        assert_eq!(out.len(), 16);
        assert_eq!(&out[0..4], &[1.0, 1.0, 2.0, 2.0]);
        assert_eq!(&out[12..16], &[3.0, 3.0, 4.0, 4.0]);
    }

    #[test]
    fn test_resample_identity() {
        let data = [1.0, 2.0];
        assert_eq!(resample_nearest(&data, 2, 1, 2, 1), vec![1.0, 2.0]);
    }
}
