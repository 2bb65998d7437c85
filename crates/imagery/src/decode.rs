//! Raster payload decoding.

use std::io::Cursor;

use tiff::decoder::{Decoder, DecodingResult};
use tracing::debug;

use sentinel_common::{Grid, SentinelError, SentinelResult};

/// Decodes the first band of an image payload into a grid.
pub trait RasterDecoder: Send + Sync {
    fn decode_single_band(&self, bytes: &[u8]) -> SentinelResult<Grid>;
}

/// GeoTIFF/TIFF decoder for gas-concentration rasters.
///
/// Every sample type is widened to `f32`. For interleaved multi-sample
/// pixels only the first sample is kept.
#[derive(Debug, Clone, Copy, Default)]
pub struct TiffDecoder;

fn decode_error(err: tiff::TiffError) -> SentinelError {
    SentinelError::Decode(err.to_string())
}

fn widen<T: Copy>(values: &[T], f: impl Fn(T) -> f32) -> Vec<f32> {
    values.iter().map(|v| f(*v)).collect()
}

impl RasterDecoder for TiffDecoder {
    fn decode_single_band(&self, bytes: &[u8]) -> SentinelResult<Grid> {
        let mut decoder = Decoder::new(Cursor::new(bytes)).map_err(decode_error)?;
        let (width, height) = decoder.dimensions().map_err(decode_error)?;
        let image = decoder.read_image().map_err(decode_error)?;

        let samples = match image {
            DecodingResult::U8(v) => widen(&v, f32::from),
            DecodingResult::U16(v) => widen(&v, f32::from),
            DecodingResult::U32(v) => widen(&v, |x| x as f32),
            DecodingResult::U64(v) => widen(&v, |x| x as f32),
            DecodingResult::I8(v) => widen(&v, f32::from),
            DecodingResult::I16(v) => widen(&v, f32::from),
            DecodingResult::I32(v) => widen(&v, |x| x as f32),
            DecodingResult::I64(v) => widen(&v, |x| x as f32),
            DecodingResult::F32(v) => v,
            DecodingResult::F64(v) => widen(&v, |x| x as f32),
            #[allow(unreachable_patterns)]
            _ => {
                return Err(SentinelError::Decode(
                    "unsupported TIFF sample format".to_string(),
                ))
            }
        };

        let (width, height) = (width as usize, height as usize);
        let pixels = width * height;
        if pixels == 0 || samples.len() < pixels || samples.len() % pixels != 0 {
            return Err(SentinelError::Decode(format!(
                "{} samples do not fill a {}x{} raster",
                samples.len(),
                width,
                height
            )));
        }

        let per_pixel = samples.len() / pixels;
        let values = if per_pixel == 1 {
            samples
        } else {
            samples.into_iter().step_by(per_pixel).collect()
        };

        debug!(width, height, samples_per_pixel = per_pixel, "Decoded TIFF raster");
        Grid::new(width, height, values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_garbage_is_decode_error() {
        let result = TiffDecoder.decode_single_band(b"definitely not a tiff");
        assert!(matches!(result, Err(SentinelError::Decode(_))));
    }

    #[test]
    fn test_empty_payload() {
        assert!(matches!(
            TiffDecoder.decode_single_band(&[]),
            Err(SentinelError::Decode(_))
        ));
    }
}
