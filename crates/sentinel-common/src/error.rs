//! Error types for sentinel imagery requests.

use thiserror::Error;

/// Result type alias using SentinelError.
pub type SentinelResult<T> = Result<T, SentinelError>;

/// Primary error type for request building, fetching and rendering.
#[derive(Debug, Error)]
pub enum SentinelError {
    // === Local precondition errors ===
    #[error("Invalid coordinate: {0}")]
    InvalidCoordinate(String),

    #[error("Invalid dimension: {0}")]
    InvalidDimension(String),

    #[error("Unknown satellite source: {0}")]
    UnknownSource(String),

    #[error("A gas identifier is required for {0} requests")]
    MissingGas(String),

    #[error("No service credential configured for '{0}'")]
    MissingCredential(String),

    #[error("Configuration error: {0}")]
    Config(String),

    // === Transport errors ===
    #[error("Request timed out: {url}")]
    ServiceTimeout { url: String },

    #[error("Service error for {url}: {message}")]
    ServiceError { url: String, message: String },

    // === Response errors ===
    #[error("Malformed response from {url}: {message}")]
    MalformedResponse { url: String, message: String },

    #[error("Failed to decode raster: {0}")]
    Decode(String),

    #[error("Rendering failed: {0}")]
    Render(String),
}

impl SentinelError {
    /// True for failures detected locally, before any network call.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            SentinelError::InvalidCoordinate(_)
                | SentinelError::InvalidDimension(_)
                | SentinelError::UnknownSource(_)
                | SentinelError::MissingGas(_)
                | SentinelError::MissingCredential(_)
                | SentinelError::Config(_)
        )
    }

    /// The request URL attached to this error, if any.
    pub fn url(&self) -> Option<&str> {
        match self {
            SentinelError::ServiceTimeout { url }
            | SentinelError::ServiceError { url, .. }
            | SentinelError::MalformedResponse { url, .. } => Some(url),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for SentinelError {
    fn from(err: serde_json::Error) -> Self {
        SentinelError::Config(format!("JSON error: {}", err))
    }
}
