//! OGC WMS/WFS request construction for the Sentinel imagery services.
//!
//! Supports:
//! - WMS 1.1.1 GetMap requests for visual and gas-concentration layers
//! - WFS GetFeature queries used to find the latest acquisition
//! - EO Browser deep links for sharing a location

pub mod getfeature;
pub mod getmap;
pub mod request;
pub mod routing;
pub mod viewer;

pub use getfeature::{parse_feature_response, ImageAcquisition};
pub use request::{ImageRequest, RequestBuilder};
pub use routing::{ImageFormat, ServiceHost, ServiceKind, SourceProfile};
pub use viewer::build_viewer_url;
