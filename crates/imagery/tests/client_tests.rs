//! Pipeline tests for SentinelClient, run against in-memory collaborators.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use bytes::Bytes;
use url::Url;

use imagery::{FetchConfig, Fetcher, RasterDecoder, SentinelClient, TiffDecoder};
use renderer::{FilledContourRenderer, MapRenderer};
use sentinel_common::{
    BoundingBox, GeographicPoint, Grid, SatelliteSource, SentinelError, SentinelResult,
};
use test_utils::fixtures::{credentials, feature_response, points, EMPTY_FEATURE_RESPONSE};
use test_utils::generators::{create_concentration_grid, encode_f32_tiff, encode_rgb_tiff, encode_u16_tiff};

// ============================================================================
// Stubs
// ============================================================================

#[derive(Clone)]
enum Reply {
    Body(Vec<u8>),
    Timeout,
    Status(u16),
}

/// Fetcher that answers every request with a canned reply and records URLs.
struct StubFetcher {
    reply: Reply,
    seen: Arc<Mutex<Vec<Url>>>,
}

impl StubFetcher {
    fn new(reply: Reply) -> (Self, Arc<Mutex<Vec<Url>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        (
            Self {
                reply,
                seen: seen.clone(),
            },
            seen,
        )
    }
}

impl Fetcher for StubFetcher {
    fn fetch(&self, url: &Url, _timeout: Duration) -> SentinelResult<Bytes> {
        self.seen.lock().unwrap().push(url.clone());
        match &self.reply {
            Reply::Body(body) => Ok(Bytes::from(body.clone())),
            Reply::Timeout => Err(SentinelError::ServiceTimeout {
                url: url.to_string(),
            }),
            Reply::Status(code) => Err(SentinelError::ServiceError {
                url: url.to_string(),
                message: format!("HTTP {}", code),
            }),
        }
    }
}

type Rendered = Arc<Mutex<Option<(usize, usize, BoundingBox, String)>>>;

/// Renderer that records its inputs instead of drawing.
struct CapturingRenderer {
    seen: Rendered,
}

impl MapRenderer for CapturingRenderer {
    fn render(&self, grid: &Grid, extent: &BoundingBox, label: &str) -> SentinelResult<Vec<u8>> {
        *self.seen.lock().unwrap() = Some((grid.width, grid.height, *extent, label.to_string()));
        Ok(b"rendered".to_vec())
    }
}

fn client(reply: Reply) -> (SentinelClient, Arc<Mutex<Vec<Url>>>) {
    let (fetcher, seen) = StubFetcher::new(reply);
    let client = SentinelClient::with_components(
        credentials(),
        FetchConfig::default(),
        Box::new(fetcher),
        Box::new(TiffDecoder),
        Box::new(FilledContourRenderer::default()),
    );
    (client, seen)
}

fn query(url: &Url, name: &str) -> Option<String> {
    url.query_pairs()
        .find(|(k, _)| k == name)
        .map(|(_, v)| v.into_owned())
}

// ============================================================================
// Feature queries
// ============================================================================

#[test]
fn test_image_date_from_first_feature() {
    let body = feature_response("2023-01-01", "10:15:30");
    let (client, seen) = client(Reply::Body(body.into_bytes()));

    let acq = client
        .image_date(SatelliteSource::S2, points::PARIS, None)
        .unwrap();
    assert_eq!(acq.date_string(), "2023-01-01");
    assert_eq!(acq.timeshort(), "101530");

    let urls = seen.lock().unwrap();
    assert_eq!(urls.len(), 1);
    assert_eq!(urls[0].path(), format!("/ogc/wfs/{}", test_utils::ids::S2));
    assert_eq!(query(&urls[0], "typenames").as_deref(), Some("S2.TILE"));
    assert_eq!(query(&urls[0], "maxcc").as_deref(), Some("5"));
}

#[test]
fn test_image_date_gas_typename() {
    let body = feature_response("2023-02-02", "12:00:00");
    let (client, seen) = client(Reply::Body(body.into_bytes()));

    client
        .image_date(SatelliteSource::S5P, points::ORIGIN, Some("CO"))
        .unwrap();
    let urls = seen.lock().unwrap();
    assert_eq!(query(&urls[0], "typenames").as_deref(), Some("S5P_CO"));
}

#[test]
fn test_empty_features_is_malformed_with_url() {
    let (client, seen) = client(Reply::Body(EMPTY_FEATURE_RESPONSE.as_bytes().to_vec()));

    let err = client
        .image_date(SatelliteSource::S1, points::SOUTHERN, None)
        .unwrap_err();
    let fetched = seen.lock().unwrap()[0].to_string();
    assert!(matches!(err, SentinelError::MalformedResponse { .. }));
    assert_eq!(err.url(), Some(fetched.as_str()));
}

#[test]
fn test_timeout_propagates_unchanged() {
    let (client, seen) = client(Reply::Timeout);

    let err = client
        .image_date(SatelliteSource::S3, points::PARIS, None)
        .unwrap_err();
    assert!(matches!(err, SentinelError::ServiceTimeout { .. }));
    assert_eq!(seen.lock().unwrap().len(), 1, "no retry expected");
}

#[test]
fn test_precondition_failure_skips_network() {
    let (client, seen) = client(Reply::Body(Vec::new()));

    let err = client
        .image_date(SatelliteSource::S5P, points::PARIS, None)
        .unwrap_err();
    assert!(matches!(err, SentinelError::MissingGas(_)));
    assert!(seen.lock().unwrap().is_empty());
}

// ============================================================================
// Map images
// ============================================================================

#[test]
fn test_fetch_map_image_returns_body() {
    let (client, seen) = client(Reply::Body(b"\xff\xd8jpeg".to_vec()));

    let bytes = client
        .fetch_map_image(SatelliteSource::S2, points::PARIS, Some("2023-01-01"), None)
        .unwrap();
    assert_eq!(&bytes[..], b"\xff\xd8jpeg");

    let url = seen.lock().unwrap()[0].clone();
    assert_eq!(query(&url, "layers").as_deref(), Some("S2-TRUE-COLOR"));
    assert_eq!(query(&url, "time").as_deref(), Some("2023-01-01/2023-01-01"));
    assert_eq!(query(&url, "srs").as_deref(), Some("EPSG:3857"));
}

#[test]
fn test_service_error_status() {
    let (client, _) = client(Reply::Status(503));
    let err = client
        .fetch_map_image(SatelliteSource::S1, points::ORIGIN, None, None)
        .unwrap_err();
    assert!(matches!(err, SentinelError::ServiceError { ref message, .. } if message.contains("503")));
    assert!(!err.is_precondition());
}

#[test]
fn test_map_url_matches_fetched_url() {
    let (client, seen) = client(Reply::Body(Vec::new()));
    let url = client
        .map_image_url(SatelliteSource::S3, points::SOUTHERN, Some("2022-05-05"), None)
        .unwrap();
    client
        .fetch_map_image(SatelliteSource::S3, points::SOUTHERN, Some("2022-05-05"), None)
        .unwrap();
    assert_eq!(seen.lock().unwrap()[0], url);
}

// ============================================================================
// Gas images
// ============================================================================

#[test]
fn test_current_gas_image_pipeline() {
    let (width, height) = (64u32, 36u32);
    let values = create_concentration_grid(width as usize, height as usize);
    let (fetcher, seen) = StubFetcher::new(Reply::Body(encode_f32_tiff(width, height, &values)));
    let rendered: Rendered = Arc::new(Mutex::new(None));

    let client = SentinelClient::with_components(
        credentials(),
        FetchConfig::default(),
        Box::new(fetcher),
        Box::new(TiffDecoder),
        Box::new(CapturingRenderer {
            seen: rendered.clone(),
        }),
    );

    let png = client.current_gas_image(points::PARIS, "NO2").unwrap();
    assert_eq!(png, b"rendered");

    let url = seen.lock().unwrap()[0].clone();
    assert_eq!(query(&url, "layers").as_deref(), Some("S5P_NO2"));
    assert_eq!(query(&url, "format").as_deref(), Some("image/tiff"));
    assert_eq!(query(&url, "time"), None);

    let (w, h, extent, label) = rendered.lock().unwrap().clone().unwrap();
    assert_eq!((w, h), (64, 36));
    assert_eq!(label, "NO2 in mol / cm^2 at lon = 2.3, lat = 48.8");

    // 1280 px at 2000 m/px, unprojected back to degrees
    let expected_width = (2_560_000.0_f64 / 6378137.0).to_degrees();
    assert!((extent.max_x - extent.min_x - expected_width).abs() < 1e-9);
    assert!(((extent.min_x + extent.max_x) / 2.0 - 2.3).abs() < 1e-9);
    assert!(extent.min_y < 48.8 && 48.8 < extent.max_y);
}

#[test]
fn test_current_gas_image_near_antimeridian() {
    let values = create_concentration_grid(16, 9);
    let (fetcher, _) = StubFetcher::new(Reply::Body(encode_f32_tiff(16, 9, &values)));
    let rendered: Rendered = Arc::new(Mutex::new(None));
    let client = SentinelClient::with_components(
        credentials(),
        FetchConfig::default(),
        Box::new(fetcher),
        Box::new(TiffDecoder),
        Box::new(CapturingRenderer {
            seen: rendered.clone(),
        }),
    );

    let center = GeographicPoint::try_new(-175.0, -20.0).unwrap();
    client.current_gas_image(center, "CO").unwrap();

    let (_, _, extent, label) = rendered.lock().unwrap().clone().unwrap();
    assert_eq!(label, "CO in mol / cm^2 at lon = -175.0, lat = -20.0");
    assert!(extent.min_x < -180.0);
    assert!(extent.min_x < extent.max_x);
    assert!(((extent.min_x + extent.max_x) / 2.0 + 175.0).abs() < 1e-9);
}

#[test]
fn test_current_gas_image_renders_png() {
    let values = create_concentration_grid(32, 18);
    let (client, _) = client(Reply::Body(encode_f32_tiff(32, 18, &values)));

    let png = client.current_gas_image(points::ORIGIN, "NO2").unwrap();
    assert_eq!(&png[..8], &[137, 80, 78, 71, 13, 10, 26, 10]);
}

#[test]
fn test_current_gas_image_bad_payload() {
    let (client, _) = client(Reply::Body(b"<ServiceExceptionReport/>".to_vec()));
    let err = client.current_gas_image(points::PARIS, "NO2").unwrap_err();
    assert!(matches!(err, SentinelError::Decode(_)));
}

// ============================================================================
// TIFF decoding
// ============================================================================

#[test]
fn test_decode_f32_band() {
    let values: Vec<f32> = (0..12).map(|i| i as f32 * 0.5 - 1.0).collect();
    let grid = TiffDecoder
        .decode_single_band(&encode_f32_tiff(4, 3, &values))
        .unwrap();
    assert_eq!((grid.width, grid.height), (4, 3));
    assert_eq!(grid.values, values);
    assert_eq!(grid.get(3, 2), Some(4.5));
}

#[test]
fn test_decode_u16_widens() {
    let values: Vec<u16> = vec![0, 1, 65535, 300];
    let grid = TiffDecoder
        .decode_single_band(&encode_u16_tiff(2, 2, &values))
        .unwrap();
    assert_eq!(grid.values, vec![0.0, 1.0, 65535.0, 300.0]);
}

#[test]
fn test_decode_rgb_keeps_first_sample() {
    let values: Vec<u8> = vec![
        10, 20, 30, //
        40, 50, 60, //
        70, 80, 90, //
    ];
    let grid = TiffDecoder
        .decode_single_band(&encode_rgb_tiff(3, 1, &values))
        .unwrap();
    assert_eq!(grid.values, vec![10.0, 40.0, 70.0]);
}
