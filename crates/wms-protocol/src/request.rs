//! Assembled OGC requests and the builder that produces them.

use sentinel_common::{BoundingBox, SatelliteSource, SentinelError, SentinelResult, ServiceCredentials};
use url::Url;

use crate::routing::ServiceKind;

/// A fully assembled request: base URL plus ordered query parameters.
///
/// Parameters keep their insertion order so generated URLs are reproducible.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageRequest {
    pub source: SatelliteSource,
    pub kind: ServiceKind,
    /// Service endpoint without query string
    pub url: String,
    /// Projected extent carried in the `bbox` parameter
    pub bbox: BoundingBox,
    pub params: Vec<(&'static str, String)>,
}

impl ImageRequest {
    pub(crate) fn new(
        source: SatelliteSource,
        kind: ServiceKind,
        url: String,
        bbox: BoundingBox,
    ) -> Self {
        Self {
            source,
            kind,
            url,
            bbox,
            params: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, name: &'static str, value: impl Into<String>) {
        self.params.push((name, value.into()));
    }

    /// Value of a query parameter, if present.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Full request URL with form-encoded query string.
    pub fn to_url(&self) -> SentinelResult<Url> {
        Url::parse_with_params(&self.url, self.params.iter().map(|(k, v)| (*k, v.as_str())))
            .map_err(|e| SentinelError::Config(format!("invalid service URL '{}': {}", self.url, e)))
    }
}

/// Builds GetMap and GetFeature requests from an injected credential table.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    credentials: ServiceCredentials,
}

impl RequestBuilder {
    pub fn new(credentials: ServiceCredentials) -> Self {
        Self { credentials }
    }

    pub fn credentials(&self) -> &ServiceCredentials {
        &self.credentials
    }
}
