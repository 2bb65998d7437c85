//! WMS 1.1.1 GetMap request construction.

use projection::compute_bbox;
use sentinel_common::{CrsCode, GeographicPoint, SatelliteSource, SentinelResult};
use tracing::debug;

use crate::request::{ImageRequest, RequestBuilder};
use crate::routing::{ServiceKind, SourceProfile, MAP_FOOTPRINT};

impl RequestBuilder {
    /// Build a GetMap request for `source` centered on `center`.
    ///
    /// `time` becomes a closed `time/time` range on sources filtered by time
    /// and is dropped for the gas source. `gas` selects the S5P channel and is
    /// ignored elsewhere.
    pub fn build_map_request(
        &self,
        source: SatelliteSource,
        center: GeographicPoint,
        time: Option<&str>,
        gas: Option<&str>,
    ) -> SentinelResult<ImageRequest> {
        let profile = SourceProfile::for_source(source);
        let layer = profile.layer_name(source, gas)?;
        let (width, height) = MAP_FOOTPRINT;
        let bbox = compute_bbox(center, width, height, profile.resolution_m_per_px)?;
        let instance_id = self.credentials().token_for(source)?;

        let mut request = ImageRequest::new(
            source,
            ServiceKind::Wms,
            profile.host.base_url(ServiceKind::Wms, instance_id),
            bbox,
        );
        request.push("service", "WMS");
        request.push("request", "GetMap");
        request.push("layers", layer);
        request.push("styles", "");
        request.push("format", profile.format.mime());
        request.push("version", "1.1.1");
        request.push("showlogo", "false");
        request.push("height", height.to_string());
        request.push("width", width.to_string());
        request.push("srs", CrsCode::Epsg3857.to_string());
        if profile.time_filtered {
            if let Some(time) = time {
                request.push("time", format!("{}/{}", time, time));
            }
        }
        request.push("bbox", bbox.to_wms_string());
        if let Some(maxcc) = profile.max_cloud_cover {
            request.push("maxcc", maxcc.to_string());
        }

        debug!(
            source = %source,
            lon = center.longitude,
            lat = center.latitude,
            url = %request.url,
            "Built GetMap request"
        );
        Ok(request)
    }
}
