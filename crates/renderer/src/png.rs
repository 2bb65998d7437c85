//! PNG encoding for RGBA image data.
//!
//! Filled-contour maps rarely use more than a few dozen colors, so output
//! is palette-indexed whenever it fits and falls back to 8-bit RGBA.
//! Both forms can carry `tEXt` keyword/value metadata.

use std::collections::HashMap;
use std::io::Write;

use flate2::write::ZlibEncoder;
use flate2::Compression;

const PALETTE_LIMIT: usize = 256;

const SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n'];

const COLOR_TYPE_INDEXED: u8 = 3;
const COLOR_TYPE_RGBA: u8 = 6;

/// Encode RGBA pixels, choosing indexed output when the image has at most
/// 256 distinct colors and RGBA otherwise.
pub fn create_png_auto(
    pixels: &[u8],
    width: usize,
    height: usize,
    text: &[(&str, &str)],
) -> Result<Vec<u8>, String> {
    check_buffer(pixels, width, height)?;

    match extract_palette(pixels) {
        Some((palette, indices)) => create_png_indexed(width, height, &palette, &indices, text),
        None => create_png(pixels, width, height, text),
    }
}

/// Distinct colors in first-seen order plus one palette index per pixel.
fn extract_palette(pixels: &[u8]) -> Option<(Vec<[u8; 4]>, Vec<u8>)> {
    let mut lookup: HashMap<[u8; 4], u8> = HashMap::new();
    let mut palette = Vec::new();
    let mut indices = Vec::with_capacity(pixels.len() / 4);

    for px in pixels.chunks_exact(4) {
        let rgba = [px[0], px[1], px[2], px[3]];
        let index = match lookup.get(&rgba) {
            Some(index) => *index,
            None if palette.len() == PALETTE_LIMIT => return None,
            None => {
                let index = palette.len() as u8;
                palette.push(rgba);
                lookup.insert(rgba, index);
                index
            }
        };
        indices.push(index);
    }

    Some((palette, indices))
}

fn check_buffer(pixels: &[u8], width: usize, height: usize) -> Result<(), String> {
    if width == 0 || height == 0 {
        return Err(format!("cannot encode an empty {}x{} image", width, height));
    }
    let expected = width * height * 4;
    if pixels.len() != expected {
        return Err(format!(
            "pixel buffer holds {} bytes, expected {} for {}x{} RGBA",
            pixels.len(),
            expected,
            width,
            height
        ));
    }
    Ok(())
}

/// Chunk-by-chunk PNG assembly.
struct PngStream {
    bytes: Vec<u8>,
}

impl PngStream {
    fn start(width: usize, height: usize, color_type: u8) -> Self {
        let mut stream = Self {
            bytes: SIGNATURE.to_vec(),
        };
        let mut header = Vec::with_capacity(13);
        header.extend_from_slice(&(width as u32).to_be_bytes());
        header.extend_from_slice(&(height as u32).to_be_bytes());
        // 8-bit samples, deflate, adaptive filtering, no interlace
        header.extend_from_slice(&[8, color_type, 0, 0, 0]);
        stream.chunk(b"IHDR", &header);
        stream
    }

    fn chunk(&mut self, kind: &[u8; 4], data: &[u8]) {
        let mut crc = crc32fast::Hasher::new();
        crc.update(kind);
        crc.update(data);

        self.bytes.extend_from_slice(&(data.len() as u32).to_be_bytes());
        self.bytes.extend_from_slice(kind);
        self.bytes.extend_from_slice(data);
        self.bytes.extend_from_slice(&crc.finalize().to_be_bytes());
    }

    /// One `tEXt` chunk per pair; values are stored as Latin-1.
    fn text(&mut self, entries: &[(&str, &str)]) -> Result<(), String> {
        for (keyword, value) in entries {
            if keyword.is_empty() || keyword.len() > 79 || !keyword.is_ascii() {
                return Err(format!("invalid tEXt keyword '{}'", keyword));
            }
            let mut data = keyword.as_bytes().to_vec();
            data.push(0);
            data.extend(value.chars().map(|c| u8::try_from(c).unwrap_or(b'?')));
            self.chunk(b"tEXt", &data);
        }
        Ok(())
    }

    fn image_data(&mut self, rows: &[u8], row_len: usize) -> Result<(), String> {
        let compressed = deflate_scanlines(rows, row_len)
            .map_err(|e| format!("IDAT compression failed: {}", e))?;
        self.chunk(b"IDAT", &compressed);
        Ok(())
    }

    fn finish(mut self) -> Vec<u8> {
        self.chunk(b"IEND", &[]);
        self.bytes
    }
}

/// Encode a palette image (color type 3).
pub fn create_png_indexed(
    width: usize,
    height: usize,
    palette: &[[u8; 4]],
    indices: &[u8],
    text: &[(&str, &str)],
) -> Result<Vec<u8>, String> {
    if palette.is_empty() || palette.len() > PALETTE_LIMIT {
        return Err(format!("palette must hold 1..=256 colors, got {}", palette.len()));
    }
    if width == 0 || indices.len() != width * height {
        return Err(format!(
            "{} palette indices do not fill a {}x{} image",
            indices.len(),
            width,
            height
        ));
    }

    let mut png = PngStream::start(width, height, COLOR_TYPE_INDEXED);

    let rgb: Vec<u8> = palette.iter().flat_map(|c| [c[0], c[1], c[2]]).collect();
    png.chunk(b"PLTE", &rgb);
    if palette.iter().any(|c| c[3] != u8::MAX) {
        let alpha: Vec<u8> = palette.iter().map(|c| c[3]).collect();
        png.chunk(b"tRNS", &alpha);
    }

    png.text(text)?;
    png.image_data(indices, width)?;
    Ok(png.finish())
}

/// Encode a truecolor-with-alpha image (color type 6).
pub fn create_png(
    pixels: &[u8],
    width: usize,
    height: usize,
    text: &[(&str, &str)],
) -> Result<Vec<u8>, String> {
    check_buffer(pixels, width, height)?;

    let mut png = PngStream::start(width, height, COLOR_TYPE_RGBA);
    png.text(text)?;
    png.image_data(pixels, width * 4)?;
    Ok(png.finish())
}

/// Prefix every scanline with filter byte 0 and zlib-compress the result.
fn deflate_scanlines(rows: &[u8], row_len: usize) -> std::io::Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::fast());
    for row in rows.chunks_exact(row_len) {
        encoder.write_all(&[0])?;
        encoder.write_all(row)?;
    }
    encoder.finish()
}
