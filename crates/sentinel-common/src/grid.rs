//! Decoded single-band rasters.

use serde::{Deserialize, Serialize};

use crate::error::{SentinelError, SentinelResult};

/// A row-major 2-D grid of samples. Row 0 is the northern edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    pub width: usize,
    pub height: usize,
    pub values: Vec<f32>,
}

impl Grid {
    /// Create a grid, checking that `values` holds exactly `width * height` samples.
    pub fn new(width: usize, height: usize, values: Vec<f32>) -> SentinelResult<Self> {
        if width == 0 || height == 0 {
            return Err(SentinelError::InvalidDimension(format!(
                "grid must be non-empty, got {}x{}",
                width, height
            )));
        }
        if values.len() != width * height {
            return Err(SentinelError::InvalidDimension(format!(
                "grid {}x{} needs {} samples, got {}",
                width,
                height,
                width * height,
                values.len()
            )));
        }
        Ok(Self {
            width,
            height,
            values,
        })
    }

    /// Sample at column `col`, row `row`.
    pub fn get(&self, col: usize, row: usize) -> Option<f32> {
        if col >= self.width || row >= self.height {
            return None;
        }
        self.values.get(row * self.width + col).copied()
    }

    /// Multiply every sample by `factor`.
    pub fn scaled(&self, factor: f32) -> Grid {
        Grid {
            width: self.width,
            height: self.height,
            values: self.values.iter().map(|v| v * factor).collect(),
        }
    }

    /// Min and max over the samples accepted by `keep`, or None if none are.
    pub fn value_range<F>(&self, keep: F) -> Option<(f32, f32)>
    where
        F: Fn(f32) -> bool,
    {
        self.values
            .iter()
            .copied()
            .filter(|v| keep(*v))
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }
}
