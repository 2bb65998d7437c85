//! Per-source routing table.
//!
//! Every satellite source maps to a fixed `SourceProfile` describing where its
//! requests go and which OGC parameters it needs. Adding a source is a new
//! table entry; nothing else branches on the source.

use sentinel_common::{SatelliteSource, SentinelError, SentinelResult};

/// Pixel footprint of a GetMap request (width, height).
pub const MAP_FOOTPRINT: (u32, u32) = (1280, 720);

/// Pixel footprint of a GetFeature probe (width, height).
pub const FEATURE_FOOTPRINT: (u32, u32) = (10, 10);

/// The two OGC services exposed per instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceKind {
    Wms,
    Wfs,
}

/// Hosting endpoints serving the Sentinel instances.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceHost {
    /// services.sentinel-hub.com (OGC API, S1/S2)
    SentinelHub,
    /// services.eocloud.sentinel-hub.com (v1 API, S3/S5P)
    EoCloud,
}

impl ServiceHost {
    /// Base URL of `kind` for the instance identified by `instance_id`.
    pub fn base_url(&self, kind: ServiceKind, instance_id: &str) -> String {
        let service = match kind {
            ServiceKind::Wms => "wms",
            ServiceKind::Wfs => "wfs",
        };
        match self {
            ServiceHost::SentinelHub => {
                format!("http://services.sentinel-hub.com/ogc/{}/{}", service, instance_id)
            }
            ServiceHost::EoCloud => format!(
                "http://services.eocloud.sentinel-hub.com/v1/{}/{}",
                service, instance_id
            ),
        }
    }
}

/// Raster formats requested from GetMap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Jpeg,
    Tiff,
}

impl ImageFormat {
    pub fn mime(&self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::Tiff => "image/tiff",
        }
    }
}

/// Static request configuration for one source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SourceProfile {
    pub host: ServiceHost,
    /// WMS layer name, or the prefix the gas id is appended to
    pub layer: &'static str,
    /// WFS type name, or the prefix the gas id is appended to
    pub typename: &'static str,
    /// Ground resolution in meters per pixel
    pub resolution_m_per_px: f64,
    pub format: ImageFormat,
    /// Maximum cloud cover percentage, if the source supports filtering on it
    pub max_cloud_cover: Option<u32>,
    /// Whether GetMap requests carry a TIME range
    pub time_filtered: bool,
    /// Whether layer and type names are selected by a gas identifier
    pub gas_channel: bool,
}

const S1_PROFILE: SourceProfile = SourceProfile {
    host: ServiceHost::SentinelHub,
    layer: "S1-VV-ORTHORECTIFIED",
    typename: "DSS3",
    resolution_m_per_px: 60.0,
    format: ImageFormat::Jpeg,
    max_cloud_cover: None,
    time_filtered: true,
    gas_channel: false,
};

const S2_PROFILE: SourceProfile = SourceProfile {
    host: ServiceHost::SentinelHub,
    layer: "S2-TRUE-COLOR",
    typename: "S2.TILE",
    resolution_m_per_px: 60.0,
    format: ImageFormat::Jpeg,
    max_cloud_cover: Some(5),
    time_filtered: true,
    gas_channel: false,
};

const S3_PROFILE: SourceProfile = SourceProfile {
    host: ServiceHost::EoCloud,
    layer: "S3_TRUE_COLOR",
    typename: "S3.TILE",
    resolution_m_per_px: 500.0,
    format: ImageFormat::Jpeg,
    max_cloud_cover: None,
    time_filtered: true,
    gas_channel: false,
};

const S5P_PROFILE: SourceProfile = SourceProfile {
    host: ServiceHost::EoCloud,
    layer: "S5P_",
    typename: "S5P_",
    resolution_m_per_px: 2000.0,
    format: ImageFormat::Tiff,
    max_cloud_cover: None,
    time_filtered: false,
    gas_channel: true,
};

impl SourceProfile {
    /// Look up the profile of a source.
    pub fn for_source(source: SatelliteSource) -> &'static SourceProfile {
        match source {
            SatelliteSource::S1 => &S1_PROFILE,
            SatelliteSource::S2 => &S2_PROFILE,
            SatelliteSource::S3 => &S3_PROFILE,
            SatelliteSource::S5P => &S5P_PROFILE,
        }
    }

    /// Resolve the WMS layer name, appending the gas id for gas sources.
    pub fn layer_name(&self, source: SatelliteSource, gas: Option<&str>) -> SentinelResult<String> {
        self.with_gas(self.layer, source, gas)
    }

    /// Resolve the WFS type name, appending the gas id for gas sources.
    pub fn typename(&self, source: SatelliteSource, gas: Option<&str>) -> SentinelResult<String> {
        self.with_gas(self.typename, source, gas)
    }

    fn with_gas(
        &self,
        name: &'static str,
        source: SatelliteSource,
        gas: Option<&str>,
    ) -> SentinelResult<String> {
        if !self.gas_channel {
            return Ok(name.to_string());
        }
        match gas.map(str::trim) {
            Some(gas) if !gas.is_empty() => Ok(format!("{}{}", name, gas)),
            _ => Err(SentinelError::MissingGas(source.to_string())),
        }
    }
}
