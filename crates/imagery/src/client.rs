//! End-to-end request pipeline.

use bytes::Bytes;
use tracing::{error, info, instrument};
use url::Url;

use projection::bbox_to_geographic;
use renderer::{FilledContourRenderer, MapRenderer};
use sentinel_common::{GeographicPoint, SatelliteSource, SentinelResult, ServiceCredentials};
use wms_protocol::{build_viewer_url, parse_feature_response, ImageAcquisition, RequestBuilder};

use crate::decode::{RasterDecoder, TiffDecoder};
use crate::fetch::{FetchConfig, Fetcher, HttpFetcher};

/// Builds, fetches, decodes and renders imagery for one credential table.
///
/// The fetcher, decoder and renderer are injected so the pipeline can run
/// against in-memory stand-ins.
pub struct SentinelClient {
    builder: RequestBuilder,
    fetcher: Box<dyn Fetcher>,
    decoder: Box<dyn RasterDecoder>,
    renderer: Box<dyn MapRenderer>,
    config: FetchConfig,
}

impl SentinelClient {
    /// Client using blocking HTTP, TIFF decoding and the filled-contour renderer.
    pub fn new(credentials: ServiceCredentials, config: FetchConfig) -> SentinelResult<Self> {
        let fetcher = HttpFetcher::new(&config)?;
        Ok(Self::with_components(
            credentials,
            config,
            Box::new(fetcher),
            Box::new(TiffDecoder),
            Box::new(FilledContourRenderer::default()),
        ))
    }

    pub fn with_components(
        credentials: ServiceCredentials,
        config: FetchConfig,
        fetcher: Box<dyn Fetcher>,
        decoder: Box<dyn RasterDecoder>,
        renderer: Box<dyn MapRenderer>,
    ) -> Self {
        Self {
            builder: RequestBuilder::new(credentials),
            fetcher,
            decoder,
            renderer,
            config,
        }
    }

    pub fn request_builder(&self) -> &RequestBuilder {
        &self.builder
    }

    /// Full GetMap URL for `source` centered on `center`.
    pub fn map_image_url(
        &self,
        source: SatelliteSource,
        center: GeographicPoint,
        time: Option<&str>,
        gas: Option<&str>,
    ) -> SentinelResult<Url> {
        self.builder
            .build_map_request(source, center, time, gas)?
            .to_url()
    }

    /// Full GetFeature URL probing the area around `center`.
    pub fn feature_url(
        &self,
        source: SatelliteSource,
        center: GeographicPoint,
        gas: Option<&str>,
    ) -> SentinelResult<Url> {
        self.builder.build_feature_request(source, center, gas)?.to_url()
    }

    /// Acquisition date and time of the most recent image covering `center`.
    #[instrument(skip(self, source), fields(source = %source))]
    pub fn image_date(
        &self,
        source: SatelliteSource,
        center: GeographicPoint,
        gas: Option<&str>,
    ) -> SentinelResult<ImageAcquisition> {
        let url = self.feature_url(source, center, gas)?;
        let body = self.fetcher.fetch(&url, self.config.timeout)?;
        let text = String::from_utf8_lossy(&body);

        let acquisition = parse_feature_response(&text, url.as_str()).map_err(|e| {
            error!(url = %url, error = %e, "Unusable feature response");
            e
        })?;
        info!(
            date = %acquisition.date_string(),
            time = %acquisition.timeshort(),
            "Found latest acquisition"
        );
        Ok(acquisition)
    }

    /// Raw GetMap response bytes.
    pub fn fetch_map_image(
        &self,
        source: SatelliteSource,
        center: GeographicPoint,
        time: Option<&str>,
        gas: Option<&str>,
    ) -> SentinelResult<Bytes> {
        let url = self.map_image_url(source, center, time, gas)?;
        self.fetcher.fetch(&url, self.config.timeout)
    }

    /// Latest concentration map of `gas` around `center`, rendered as PNG.
    #[instrument(skip(self))]
    pub fn current_gas_image(&self, center: GeographicPoint, gas: &str) -> SentinelResult<Vec<u8>> {
        let request = self
            .builder
            .build_map_request(SatelliteSource::S5P, center, None, Some(gas))?;
        let url = request.to_url()?;
        let payload = self.fetcher.fetch(&url, self.config.timeout)?;

        let grid = self.decoder.decode_single_band(&payload).map_err(|e| {
            error!(url = %url, error = %e, "Could not decode gas raster");
            e
        })?;
        let extent = bbox_to_geographic(&request.bbox)?;
        let label = format!("{} in mol / cm^2 at {}", gas, center);

        self.renderer.render(&grid, &extent, &label)
    }

    /// Shareable viewer URL; needs no credentials or network access.
    pub fn viewer_url(
        &self,
        source: SatelliteSource,
        center: GeographicPoint,
        date: &str,
        no2: bool,
    ) -> String {
        build_viewer_url(source, center, date, no2)
    }
}
