//! HTTP retrieval of service responses.

use std::time::Duration;

use bytes::Bytes;
use reqwest::blocking::Client;
use tracing::{error, info};
use url::Url;

use sentinel_common::{SentinelError, SentinelResult};

/// Timeouts applied to service requests.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Whole-request timeout
    pub timeout: Duration,
    pub connect_timeout: Duration,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(20),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

/// Performs a single GET and returns the response body.
///
/// Implementations must not retry: failures go straight back to the caller.
pub trait Fetcher: Send + Sync {
    fn fetch(&self, url: &Url, timeout: Duration) -> SentinelResult<Bytes>;
}

/// Blocking [`Fetcher`] backed by reqwest.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(config: &FetchConfig) -> SentinelResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .tcp_nodelay(true)
            .build()
            .map_err(|e| SentinelError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, url: &Url, timeout: Duration) -> SentinelResult<Bytes> {
        let response = self
            .client
            .get(url.clone())
            .timeout(timeout)
            .send()
            .map_err(|e| transport_error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            error!(url = %url, status = %status, "Service returned an error status");
            return Err(SentinelError::ServiceError {
                url: url.to_string(),
                message: format!("HTTP {}", status),
            });
        }

        let body = response.bytes().map_err(|e| transport_error(url, e))?;
        info!(url = %url, bytes = body.len(), "Fetched service response");
        Ok(body)
    }
}

fn transport_error(url: &Url, err: reqwest::Error) -> SentinelError {
    if err.is_timeout() {
        error!(url = %url, "Request timed out");
        SentinelError::ServiceTimeout {
            url: url.to_string(),
        }
    } else {
        error!(url = %url, error = %err, "Request failed");
        SentinelError::ServiceError {
            url: url.to_string(),
            message: err.to_string(),
        }
    }
}
