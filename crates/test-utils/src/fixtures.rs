//! Common test fixtures for sentinel-wms tests.

use sentinel_common::{GeographicPoint, ServiceCredentials};

/// Config document with an identifier for every source.
pub const CREDENTIALS_JSON: &str = r#"{
    "wms_token": {
        "sentinel1": "11111111-aaaa-bbbb-cccc-000000000001",
        "sentinel2": "22222222-aaaa-bbbb-cccc-000000000002",
        "sentinel3": "33333333-aaaa-bbbb-cccc-000000000003",
        "sentinel5p": "55555555-aaaa-bbbb-cccc-000000000005"
    }
}"#;

/// Instance identifiers matching `CREDENTIALS_JSON`.
pub mod ids {
    pub const S1: &str = "11111111-aaaa-bbbb-cccc-000000000001";
    pub const S2: &str = "22222222-aaaa-bbbb-cccc-000000000002";
    pub const S3: &str = "33333333-aaaa-bbbb-cccc-000000000003";
    pub const S5P: &str = "55555555-aaaa-bbbb-cccc-000000000005";
}

/// Parsed `CREDENTIALS_JSON`.
pub fn credentials() -> ServiceCredentials {
    ServiceCredentials::from_json_str(CREDENTIALS_JSON).expect("fixture credentials parse")
}

/// Common query locations.
pub mod points {
    use super::GeographicPoint;

    pub const ORIGIN: GeographicPoint = GeographicPoint {
        longitude: 0.0,
        latitude: 0.0,
    };

    pub const PARIS: GeographicPoint = GeographicPoint {
        longitude: 2.3,
        latitude: 48.8,
    };

    pub const SOUTHERN: GeographicPoint = GeographicPoint {
        longitude: -58.4,
        latitude: -34.6,
    };
}

/// A GetFeature JSON body whose first feature has the given date and time.
pub fn feature_response(date: &str, time: &str) -> String {
    serde_json::json!({
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "geometry": null,
                "properties": {
                    "id": "S2A_MSIL1C_TEST",
                    "date": date,
                    "time": time,
                    "cloudCoverPercentage": 1.5
                }
            },
            {
                "type": "Feature",
                "geometry": null,
                "properties": {
                    "id": "S2B_MSIL1C_OLDER",
                    "date": "2000-01-01",
                    "time": "00:00:00"
                }
            }
        ]
    })
    .to_string()
}

/// A GetFeature JSON body with no features.
pub const EMPTY_FEATURE_RESPONSE: &str = r#"{"type":"FeatureCollection","features":[]}"#;
