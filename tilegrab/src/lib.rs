//! tilegrab - bulk map tile downloading for circular geographic regions.
//!
//! Given a center point and a radius, tilegrab computes the Web Mercator
//! tiles covering the region across a zoom range ([`coord`]), drops tiles
//! already present on disk ([`cache`]), fetches the rest from a configurable
//! imagery provider in paced concurrent batches ([`fetch`], [`provider`]),
//! and persists results to a flat tile store ([`store`]).

pub mod cache;
pub mod coord;
pub mod fetch;
pub mod provider;
pub mod store;

pub use coord::{Point, Tile};
pub use fetch::{Downloader, FetchResult, ReqwestFetcher, SchedulerConfig};
pub use provider::Provider;
