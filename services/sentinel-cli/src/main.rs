//! Sentinel imagery command-line tool.
//!
//! Builds WMS/WFS request URLs, looks up the latest acquisition at a location,
//! downloads map images and renders gas-concentration maps.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use imagery::{FetchConfig, SentinelClient};
use projection::{bbox_to_geographic, compute_bbox};
use sentinel_common::{GeographicPoint, SatelliteSource, ServiceCredentials};
use wms_protocol::routing::{FEATURE_FOOTPRINT, MAP_FOOTPRINT};
use wms_protocol::SourceProfile;

#[derive(Parser, Debug)]
#[command(name = "sentinel")]
#[command(about = "Sentinel satellite imagery requests from the command line")]
struct Cli {
    /// Credential file with a `wms_token` table
    #[arg(long, env = "SENTINEL_CONFIG", default_value = "configFips.cfg")]
    config: PathBuf,

    /// Timeout for each service request, in seconds
    #[arg(long, env = "SENTINEL_TIMEOUT_SECS", default_value = "20")]
    timeout_secs: u64,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

/// Query location; negative values are accepted as-is.
#[derive(Args, Debug)]
struct Location {
    /// Longitude in degrees
    #[arg(long, allow_hyphen_values = true)]
    lon: f64,

    /// Latitude in degrees
    #[arg(long, allow_hyphen_values = true)]
    lat: f64,
}

impl Location {
    fn point(&self) -> Result<GeographicPoint> {
        Ok(GeographicPoint::try_new(self.lon, self.lat)?)
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the GetMap URL for a source and location
    MapUrl {
        /// S1, S2, S3 or S5P
        #[arg(long)]
        source: String,
        #[command(flatten)]
        location: Location,
        /// Acquisition date used as a closed time range
        #[arg(long)]
        time: Option<String>,
        /// Gas channel, required for S5P (e.g. NO2, CO)
        #[arg(long)]
        gas: Option<String>,
    },

    /// Print the GetFeature URL probing a location
    FeatureUrl {
        #[arg(long)]
        source: String,
        #[command(flatten)]
        location: Location,
        #[arg(long)]
        gas: Option<String>,
    },

    /// Print a shareable EO Browser link
    ViewerUrl {
        #[arg(long)]
        source: String,
        #[command(flatten)]
        location: Location,
        #[arg(long)]
        date: String,
        /// Use the NO2 preset instead of carbon monoxide (S5P only)
        #[arg(long)]
        no2: bool,
    },

    /// Look up the date and time of the latest image at a location
    ImageDate {
        #[arg(long)]
        source: String,
        #[command(flatten)]
        location: Location,
        #[arg(long)]
        gas: Option<String>,
    },

    /// Download a map image to a file
    Fetch {
        #[arg(long)]
        source: String,
        #[command(flatten)]
        location: Location,
        #[arg(long)]
        time: Option<String>,
        #[arg(long)]
        gas: Option<String>,
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Render the latest gas-concentration map around a location as PNG
    GasImage {
        #[command(flatten)]
        location: Location,
        #[arg(long, default_value = "NO2")]
        gas: String,
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Print the projected and geographic request extent
    Bbox {
        #[arg(long)]
        source: String,
        #[command(flatten)]
        location: Location,
        /// Use the feature-query footprint instead of the map footprint
        #[arg(long)]
        feature: bool,
    },
}

fn parse_source(source: &str) -> Result<SatelliteSource> {
    Ok(source.parse::<SatelliteSource>()?)
}

fn init_logging(log_level: &str, json: bool) -> Result<()> {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_writer(std::io::stderr);

    if json {
        tracing::subscriber::set_global_default(builder.json().finish())?;
    } else {
        tracing::subscriber::set_global_default(builder.finish())?;
    }
    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    let credentials = ServiceCredentials::load(&cli.config)
        .with_context(|| format!("Failed to load credentials from {}", cli.config.display()))?;
    let config = FetchConfig {
        timeout: Duration::from_secs(cli.timeout_secs),
        ..FetchConfig::default()
    };
    let client = SentinelClient::new(credentials, config).context("Failed to create client")?;

    match cli.command {
        Command::MapUrl {
            source,
            location,
            time,
            gas,
        } => {
            let url = client.map_image_url(
                parse_source(&source)?,
                location.point()?,
                time.as_deref(),
                gas.as_deref(),
            )?;
            println!("{}", url);
        }
        Command::FeatureUrl {
            source,
            location,
            gas,
        } => {
            let url = client.feature_url(parse_source(&source)?, location.point()?, gas.as_deref())?;
            println!("{}", url);
        }
        Command::ViewerUrl {
            source,
            location,
            date,
            no2,
        } => {
            let url = client.viewer_url(parse_source(&source)?, location.point()?, &date, no2);
            println!("{}", url);
        }
        Command::ImageDate {
            source,
            location,
            gas,
        } => {
            let acquisition =
                client.image_date(parse_source(&source)?, location.point()?, gas.as_deref())?;
            println!("{} {}", acquisition.date_string(), acquisition.timeshort());
        }
        Command::Fetch {
            source,
            location,
            time,
            gas,
            output,
        } => {
            let bytes = client.fetch_map_image(
                parse_source(&source)?,
                location.point()?,
                time.as_deref(),
                gas.as_deref(),
            )?;
            fs::write(&output, &bytes)
                .with_context(|| format!("Failed to write {}", output.display()))?;
            info!(path = %output.display(), bytes = bytes.len(), "Saved map image");
        }
        Command::GasImage {
            location,
            gas,
            output,
        } => {
            let png = client.current_gas_image(location.point()?, &gas)?;
            fs::write(&output, &png)
                .with_context(|| format!("Failed to write {}", output.display()))?;
            info!(path = %output.display(), bytes = png.len(), "Saved gas map");
        }
        Command::Bbox {
            source,
            location,
            feature,
        } => {
            let profile = SourceProfile::for_source(parse_source(&source)?);
            let (width, height) = if feature { FEATURE_FOOTPRINT } else { MAP_FOOTPRINT };
            let bbox = compute_bbox(location.point()?, width, height, profile.resolution_m_per_px)?;
            let geographic = bbox_to_geographic(&bbox)?;
            println!("EPSG:3857 {}", bbox.to_wms_string());
            println!("EPSG:4326 {}", geographic.to_wms_string());
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    // Load environment from .env file if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_logging(&cli.log_level, cli.json_logs)?;

    info!(config = %cli.config.display(), "Starting sentinel");
    run(cli)
}
