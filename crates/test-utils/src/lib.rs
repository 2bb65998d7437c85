//! Shared test utilities for the sentinel-wms workspace.
//!
//! This crate provides common testing infrastructure including:
//! - Fixture credentials and query locations
//! - Canned WFS GetFeature responses
//! - Synthetic gas-concentration grids and TIFF payloads
//!
//! # Usage
//!
//! Add to your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { path = "../test-utils" }
//! ```

pub mod fixtures;
pub mod generators;

// Re-export commonly used items at the crate root
pub use fixtures::*;
pub use generators::*;
