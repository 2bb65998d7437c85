//! Service credential loading.
//!
//! Credentials come from a JSON document with a `wms_token` object mapping
//! per-mission keys (`sentinel1`, `sentinel2`, ...) to the instance identifier
//! embedded in the service URL path. The table is loaded once and never
//! mutated; callers pass it to the request builders explicitly.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, info};

use crate::error::{SentinelError, SentinelResult};
use crate::source::SatelliteSource;

/// Immutable credential table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ServiceCredentials {
    wms_token: HashMap<String, String>,
}

impl ServiceCredentials {
    /// Load credentials from a JSON config file.
    pub fn load(path: &Path) -> SentinelResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            SentinelError::Config(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;

        let credentials = Self::from_json_str(&content).map_err(|e| {
            SentinelError::Config(format!("Failed to parse config file {}: {}", path.display(), e))
        })?;

        info!(
            path = %path.display(),
            sources = credentials.wms_token.len(),
            "Loaded service credentials"
        );
        Ok(credentials)
    }

    /// Parse credentials from a JSON string.
    pub fn from_json_str(json: &str) -> SentinelResult<Self> {
        let credentials: ServiceCredentials = serde_json::from_str(json)?;
        debug!(keys = ?credentials.wms_token.keys().collect::<Vec<_>>(), "Parsed wms_token table");
        Ok(credentials)
    }

    /// Build a credential table directly from (key, identifier) pairs.
    pub fn from_tokens<I, K, V>(tokens: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            wms_token: tokens
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Look up the service identifier for a source.
    pub fn token_for(&self, source: SatelliteSource) -> SentinelResult<&str> {
        let key = source.credential_key();
        self.wms_token
            .get(key)
            .map(String::as_str)
            .ok_or_else(|| SentinelError::MissingCredential(key.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let json = r#"{
            "wms_token": {
                "sentinel1": "id-s1",
                "sentinel2": "id-s2"
            },
            "telegram_token": "ignored"
        }"#;

        let creds = ServiceCredentials::from_json_str(json).unwrap();
        assert_eq!(creds.token_for(SatelliteSource::S1).unwrap(), "id-s1");
        assert_eq!(creds.token_for(SatelliteSource::S2).unwrap(), "id-s2");
        assert!(matches!(
            creds.token_for(SatelliteSource::S5P),
            Err(SentinelError::MissingCredential(key)) if key == "sentinel5p"
        ));
    }

    #[test]
    fn test_missing_wms_token_is_config_error() {
        let result = ServiceCredentials::from_json_str(r#"{"other": {}}"#);
        assert!(matches!(result, Err(SentinelError::Config(_))));
    }

    #[test]
    fn test_malformed_json_is_config_error() {
        let result = ServiceCredentials::from_json_str("{ not json");
        assert!(matches!(result, Err(SentinelError::Config(_))));
    }
}
