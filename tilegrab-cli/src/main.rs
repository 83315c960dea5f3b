//! tilegrab CLI - download the map tiles covering a circular region.
//!
//! Takes a center point and radius, computes the covering tile grid across
//! the requested zoom range, skips tiles already present in the output
//! directory, and downloads the rest in paced concurrent batches.

mod error;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::{CommandFactory, Parser};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use tilegrab::store::TileStore;
use tilegrab::{cache, coord};
use tilegrab::{Downloader, Provider, ReqwestFetcher, SchedulerConfig};

use crate::error::CliError;

/// Bulk-download the map tiles covering a circular geographic region.
#[derive(Debug, Parser)]
#[command(name = "tilegrab", version, about, allow_negative_numbers = true)]
struct Cli {
    /// Latitude of the region center in decimal degrees
    lat: f64,

    /// Longitude of the region center in decimal degrees
    lon: f64,

    /// Region radius in kilometers
    #[arg(value_name = "RADIUS_KM")]
    radius_km: f64,

    /// Imagery provider: OpenStreetMaps, Google, Bing, Yahoo or Nokia;
    /// unrecognized names fall back to OpenStreetMaps
    #[arg(long, default_value = "OpenStreetMaps")]
    provider: String,

    /// Minimum zoom level
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u8).range(1..=23))]
    min_zoom: u8,

    /// Maximum zoom level
    #[arg(long, default_value_t = 17, value_parser = clap::value_parser!(u8).range(1..=23))]
    max_zoom: u8,

    /// Directory for tiles, absolute or relative to the working directory
    #[arg(long, default_value = "tiles")]
    dir: PathBuf,

    /// Maximum number of concurrent downloads in a batch
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u64).range(1..))]
    batch: u64,

    /// Seconds to pause between batches
    #[arg(long, default_value_t = 1.0)]
    pause: f64,
}

/// Validates cross-argument constraints clap cannot express on its own.
fn validate(cli: &Cli) -> Result<(), String> {
    if cli.min_zoom > cli.max_zoom {
        return Err(format!(
            "--min-zoom ({}) cannot be greater than --max-zoom ({})",
            cli.min_zoom, cli.max_zoom
        ));
    }
    if !(cli.pause >= 0.0) {
        return Err(format!("--pause must be non-negative, given {}", cli.pause));
    }
    Ok(())
}

async fn run(cli: Cli) -> Result<(), CliError> {
    println!("Latitude:  {}°", cli.lat);
    println!("Longitude: {}°", cli.lon);
    println!("Radius:    {} km", cli.radius_km);

    let tiles = coord::tiles_for_region(
        cli.lat,
        cli.lon,
        cli.radius_km * 1000.0,
        cli.min_zoom,
        cli.max_zoom,
    );
    info!(
        tiles = tiles.len(),
        min_zoom = cli.min_zoom,
        max_zoom = cli.max_zoom,
        "tile grid computed"
    );

    let store = TileStore::create(&cli.dir)?;

    let tiles = match cache::scan(store.root()) {
        Ok(index) => {
            info!(cached = index.len(), "cache scanned");
            index.filter(tiles)
        }
        Err(e) => {
            warn!(error = %e, "error reading cached tiles, assuming none");
            tiles
        }
    };

    let provider = Provider::from_name(&cli.provider);
    let config = SchedulerConfig::new(cli.batch as usize, Duration::from_secs_f64(cli.pause));
    let downloader = Downloader::with_config(Arc::new(ReqwestFetcher::new()?), config);

    let total = tiles.len();
    info!(provider = provider.name(), total, "starting download");

    let mut results = downloader.download(tiles, provider);
    let mut saved = 0usize;
    let mut failed = 0usize;
    while let Some(result) = results.recv().await {
        match result.image {
            Ok(image) => match store.save(&result.tile, &image) {
                Ok(path) => {
                    saved += 1;
                    debug!(path = %path.display(), "tile saved");
                }
                Err(e) => {
                    failed += 1;
                    warn!(error = %e, "failed to save tile");
                }
            },
            // Fetch failures were already logged by the scheduler.
            Err(_) => failed += 1,
        }
    }

    println!("Done! {} saved, {} failed, {} scheduled.", saved, failed, total);
    Ok(())
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    if let Err(message) = validate(&cli) {
        Cli::command()
            .error(clap::error::ErrorKind::ValueValidation, message)
            .exit();
    }

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
