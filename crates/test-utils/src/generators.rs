//! Test data generators for synthetic gas-concentration rasters.

use std::io::Cursor;

use tiff::encoder::{colortype, TiffEncoder};

/// Creates a column-density grid in mol/m^2, similar to an S5P NO2 product.
///
/// Values rise from ~1e-5 at the left edge to ~2e-4 at the right. The top row
/// is zero (no-data) and the bottom-left cell is negative (retrieval noise),
/// both of which renderers are expected to mask.
pub fn create_concentration_grid(width: usize, height: usize) -> Vec<f32> {
    (0..height)
        .flat_map(|row| (0..width).map(move |col| (row, col)))
        .map(|(row, col)| match (row, col) {
            (0, _) => 0.0,
            (r, 0) if r == height - 1 => -1.0e-5,
            _ => 1.0e-5 + 1.9e-4 * col as f32 / width as f32,
        })
        .collect()
}

/// Encode a single-band 32-bit float TIFF.
pub fn encode_f32_tiff(width: u32, height: u32, values: &[f32]) -> Vec<u8> {
    let mut buffer = Cursor::new(Vec::new());
    {
        let mut encoder = TiffEncoder::new(&mut buffer).expect("create tiff encoder");
        encoder
            .write_image::<colortype::Gray32Float>(width, height, values)
            .expect("write f32 tiff");
    }
    buffer.into_inner()
}

/// Encode a single-band 16-bit integer TIFF.
pub fn encode_u16_tiff(width: u32, height: u32, values: &[u16]) -> Vec<u8> {
    let mut buffer = Cursor::new(Vec::new());
    {
        let mut encoder = TiffEncoder::new(&mut buffer).expect("create tiff encoder");
        encoder
            .write_image::<colortype::Gray16>(width, height, values)
            .expect("write u16 tiff");
    }
    buffer.into_inner()
}

/// Encode an 8-bit RGB TIFF (three samples per pixel).
pub fn encode_rgb_tiff(width: u32, height: u32, values: &[u8]) -> Vec<u8> {
    let mut buffer = Cursor::new(Vec::new());
    {
        let mut encoder = TiffEncoder::new(&mut buffer).expect("create tiff encoder");
        encoder
            .write_image::<colortype::RGB8>(width, height, values)
            .expect("write rgb tiff");
    }
    buffer.into_inner()
}
