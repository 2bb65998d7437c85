//! EO Browser deep links.

use sentinel_common::{GeographicPoint, SatelliteSource};

const EO_BROWSER_URL: &str = "http://apps.sentinel-hub.com/eo-browser/";

/// Zoom level of shared links.
pub const VIEWER_ZOOM: u32 = 9;

/// (datasource label, preset) shown by the viewer for a source.
///
/// For S5P, `no2` picks the nitrogen-dioxide channel over carbon monoxide.
pub fn viewer_labels(source: SatelliteSource, no2: bool) -> (&'static str, &'static str) {
    match source {
        SatelliteSource::S1 => ("Sentinel-1 GRD IW", "1_VV_ORTHORECTIFIED"),
        SatelliteSource::S2 => ("Sentinel-2 L1C", "1_TRUE_COLOR"),
        SatelliteSource::S3 => ("Sentinel-3 OLCI", "1_TRUE_COLOR"),
        SatelliteSource::S5P if no2 => ("Sentinel-5P NO2", "NO2_VISUALIZED"),
        SatelliteSource::S5P => ("Sentinel-5P CO", "CO_VISUALIZED"),
    }
}

/// Build a shareable EO Browser URL for `center` on `date`.
pub fn build_viewer_url(
    source: SatelliteSource,
    center: GeographicPoint,
    date: &str,
    no2: bool,
) -> String {
    let (instrument, preset) = viewer_labels(source, no2);
    let lat = center.latitude.to_string();
    let lng = center.longitude.to_string();
    let zoom = VIEWER_ZOOM.to_string();

    let query = [
        ("lat", lat.as_str()),
        ("lng", lng.as_str()),
        ("zoom", zoom.as_str()),
        ("time", date),
        ("preset", preset),
        ("datasource", instrument),
    ]
    .iter()
    .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
    .collect::<Vec<_>>()
    .join("&");

    format!("{}?{}", EO_BROWSER_URL, query)
}
