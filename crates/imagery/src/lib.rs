//! Imagery retrieval for the sentinel services.
//!
//! This crate performs the network side of a request:
//! - [`Fetcher`]: a single timed HTTP GET, no retries
//! - [`RasterDecoder`]: turns a raster payload into a [`Grid`](sentinel_common::Grid)
//! - [`SentinelClient`]: ties request building, fetching, decoding and rendering together

pub mod client;
pub mod decode;
pub mod fetch;

pub use client::SentinelClient;
pub use decode::{RasterDecoder, TiffDecoder};
pub use fetch::{FetchConfig, Fetcher, HttpFetcher};
