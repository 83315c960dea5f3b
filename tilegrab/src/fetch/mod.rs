//! Concurrency-bounded batch download scheduling.
//!
//! [`Downloader`] turns a tile list into a stream of fetched-or-failed
//! results. Tiles are issued in submission order, at most
//! [`SchedulerConfig::batch_size`] in flight at once; each wave is drained
//! completely before the next is launched, with a configurable pause in
//! between. Results are delivered in completion order over a channel that
//! closes once every submitted tile is accounted for.
//!
//! Per-tile failures are part of the stream, not errors of the run: a
//! failed fetch counts toward wave completion exactly like a successful one.
//! The scheduler attempts no retries and imposes no timeout of its own.

mod http;

pub use http::{BoxFuture, FetchError, ReqwestFetcher, TileFetcher, TileImage};

use std::sync::Arc;
use std::time::Duration;

use futures::stream::{FuturesUnordered, StreamExt};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::coord::Tile;
use crate::provider::Provider;

/// Default number of concurrent fetches per wave.
const DEFAULT_BATCH_SIZE: usize = 10;

/// Default pause between waves.
const DEFAULT_PAUSE: Duration = Duration::from_secs(1);

/// Per-run scheduler settings.
///
/// Carried by value into the downloader; nothing is global and nothing
/// mutates while a run is active.
#[derive(Debug, Clone, Copy)]
pub struct SchedulerConfig {
    /// Maximum concurrent fetches in one wave. At least 1.
    pub batch_size: usize,
    /// Sleep inserted between consecutive waves.
    pub pause_between_batches: Duration,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            pause_between_batches: DEFAULT_PAUSE,
        }
    }
}

impl SchedulerConfig {
    /// Creates a config, clamping `batch_size` up to 1.
    pub fn new(batch_size: usize, pause_between_batches: Duration) -> Self {
        Self {
            batch_size: batch_size.max(1),
            pause_between_batches,
        }
    }
}

/// The outcome of one tile fetch.
///
/// Exactly one of body or error is present. Ownership of the body bytes
/// passes to the consumer with this value.
#[derive(Debug)]
pub struct FetchResult {
    pub tile: Tile,
    pub image: Result<TileImage, FetchError>,
}

impl FetchResult {
    pub fn is_success(&self) -> bool {
        self.image.is_ok()
    }
}

/// Batch downloader: fetches tile lists through a provider in bounded,
/// paced waves.
pub struct Downloader<F> {
    fetcher: Arc<F>,
    config: SchedulerConfig,
}

impl<F: TileFetcher + 'static> Downloader<F> {
    /// Creates a downloader with the default scheduler settings.
    pub fn new(fetcher: Arc<F>) -> Self {
        Self {
            fetcher,
            config: SchedulerConfig::default(),
        }
    }

    /// Creates a downloader with explicit scheduler settings.
    pub fn with_config(fetcher: Arc<F>, config: SchedulerConfig) -> Self {
        Self {
            fetcher,
            config: SchedulerConfig::new(config.batch_size, config.pause_between_batches),
        }
    }

    /// Fetches `tiles` through `provider`, streaming results as they finish.
    ///
    /// The returned channel yields exactly one [`FetchResult`] per input
    /// tile, in completion order, then closes. Waves of up to
    /// `batch_size` tiles run concurrently; a wave is fully drained before
    /// the next is launched, and the configured pause separates consecutive
    /// waves. No pause follows the final wave.
    pub fn download(&self, tiles: Vec<Tile>, provider: Provider) -> mpsc::Receiver<FetchResult> {
        let (tx, rx) = mpsc::channel(tiles.len().max(1));
        let fetcher = Arc::clone(&self.fetcher);
        let config = self.config;

        tokio::spawn(async move {
            let total = tiles.len();
            let mut done = 0usize;
            let mut queue = tiles.into_iter().enumerate();

            loop {
                let wave: Vec<(usize, Tile)> = queue.by_ref().take(config.batch_size).collect();
                if wave.is_empty() {
                    break;
                }

                let mut in_flight: FuturesUnordered<_> = wave
                    .into_iter()
                    .map(|(seq, tile)| {
                        let url = provider.tile_url(&tile, seq);
                        let fetcher = Arc::clone(&fetcher);
                        async move {
                            debug!(url = %url, "fetching tile");
                            let image = fetcher.fetch(&url).await;
                            FetchResult { tile, image }
                        }
                    })
                    .collect();

                while let Some(result) = in_flight.next().await {
                    done += 1;
                    if let Err(ref e) = result.image {
                        warn!(
                            x = result.tile.x,
                            y = result.tile.y,
                            zoom = result.tile.zoom,
                            error = %e,
                            "tile fetch failed"
                        );
                    }
                    if tx.send(result).await.is_err() {
                        // Consumer dropped the stream; nothing left to report to.
                        return;
                    }
                }

                if done < total {
                    info!(done, total, "batch processed");
                    tokio::time::sleep(config.pause_between_batches).await;
                }
            }
        });

        rx
    }
}
