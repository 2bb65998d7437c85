//! WFS GetFeature queries and response parsing.
//!
//! A GetFeature probe over a small footprint around the query point returns
//! the tiles covering it; the first feature carries the acquisition date and
//! time of the most recent image.

use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;
use tracing::debug;

use projection::compute_bbox;
use sentinel_common::{
    CrsCode, GeographicPoint, SatelliteSource, SentinelError, SentinelResult,
};

use crate::request::{ImageRequest, RequestBuilder};
use crate::routing::{ServiceKind, SourceProfile, FEATURE_FOOTPRINT};

/// Maximum number of features requested per query.
pub const MAX_FEATURES: u32 = 100;

impl RequestBuilder {
    /// Build a GetFeature request probing the area around `center`.
    pub fn build_feature_request(
        &self,
        source: SatelliteSource,
        center: GeographicPoint,
        gas: Option<&str>,
    ) -> SentinelResult<ImageRequest> {
        let profile = SourceProfile::for_source(source);
        let typename = profile.typename(source, gas)?;
        let (width, height) = FEATURE_FOOTPRINT;
        let bbox = compute_bbox(center, width, height, profile.resolution_m_per_px)?;
        let instance_id = self.credentials().token_for(source)?;

        let mut request = ImageRequest::new(
            source,
            ServiceKind::Wfs,
            profile.host.base_url(ServiceKind::Wfs, instance_id),
            bbox,
        );
        request.push("service", "WFS");
        request.push("request", "GetFeature");
        request.push("outputformat", "application/json");
        request.push("srs", CrsCode::Epsg3857.to_string());
        request.push("maxfeatures", MAX_FEATURES.to_string());
        request.push("bbox", bbox.to_wms_string());
        request.push("typenames", typename);
        if let Some(maxcc) = profile.max_cloud_cover {
            request.push("maxcc", maxcc.to_string());
        }

        debug!(
            source = %source,
            lon = center.longitude,
            lat = center.latitude,
            url = %request.url,
            "Built GetFeature request"
        );
        Ok(request)
    }
}

/// Acquisition timestamp of the most recent image at a location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageAcquisition {
    pub date: NaiveDate,
    pub time: NaiveTime,
}

impl ImageAcquisition {
    /// Date as `YYYY-MM-DD`.
    pub fn date_string(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    /// Time of day with separators removed (`HHMMSS`).
    pub fn timeshort(&self) -> String {
        self.time.format("%H%M%S").to_string()
    }
}

#[derive(Debug, Deserialize)]
struct FeatureCollection {
    #[serde(default)]
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    properties: FeatureProperties,
}

#[derive(Debug, Deserialize)]
struct FeatureProperties {
    date: Option<String>,
    time: Option<String>,
}

/// Extract the acquisition timestamp from a GetFeature JSON body.
///
/// `url` is only used to give failures a diagnosable context.
pub fn parse_feature_response(body: &str, url: &str) -> SentinelResult<ImageAcquisition> {
    let malformed = |message: String| SentinelError::MalformedResponse {
        url: url.to_string(),
        message,
    };

    let collection: FeatureCollection =
        serde_json::from_str(body).map_err(|e| malformed(format!("invalid JSON: {}", e)))?;

    let first = collection
        .features
        .into_iter()
        .next()
        .ok_or_else(|| malformed("response contains no features".to_string()))?;

    let date = first
        .properties
        .date
        .ok_or_else(|| malformed("feature is missing properties.date".to_string()))?;
    let time = first
        .properties
        .time
        .ok_or_else(|| malformed("feature is missing properties.time".to_string()))?;

    let date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .map_err(|e| malformed(format!("invalid date '{}': {}", date, e)))?;
    let time = NaiveTime::parse_from_str(time.trim(), "%H:%M:%S%.f")
        .map_err(|e| malformed(format!("invalid time '{}': {}", time, e)))?;

    Ok(ImageAcquisition { date, time })
}
