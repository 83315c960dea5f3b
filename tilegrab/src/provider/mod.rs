//! Tile URL construction for the supported imagery providers.
//!
//! Each provider is a variant of [`Provider`], and URL construction is a pure
//! function of the tile and its position in the submission sequence. Nothing
//! here carries mutable state, so a single provider value can be shared
//! freely across concurrent fetch tasks.
//!
//! URL formats, including the embedded static credentials of the satellite
//! providers, are part of the compatibility contract with the real tile
//! services and must reproduce exactly.

mod bing;
mod google;
mod nokia;
mod osm;
mod yahoo;

use crate::coord::Tile;

/// The set of supported tile imagery providers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Provider {
    /// OpenStreetMap raster tiles, rotated across the three public mirrors.
    #[default]
    OpenStreetMaps,
    /// Google satellite imagery via the legacy `kh` endpoint.
    Google,
    /// Bing (Virtual Earth) quadkey-addressed satellite tiles.
    Bing,
    /// Ovi satellite imagery published under Yahoo branding.
    Yahoo,
    /// Ovi satellite imagery published under Nokia branding.
    Nokia,
}

impl Provider {
    /// Looks a provider up by name, case-insensitively.
    ///
    /// Unrecognized names fall back to [`Provider::OpenStreetMaps`].
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "google" => Provider::Google,
            "bing" => Provider::Bing,
            "yahoo" => Provider::Yahoo,
            "nokia" => Provider::Nokia,
            _ => Provider::OpenStreetMaps,
        }
    }

    /// Human-readable provider name for banners and logs.
    pub fn name(&self) -> &'static str {
        match self {
            Provider::OpenStreetMaps => "OpenStreetMaps",
            Provider::Google => "Google",
            Provider::Bing => "Bing",
            Provider::Yahoo => "Yahoo",
            Provider::Nokia => "Nokia",
        }
    }

    /// Builds the fetch URL for `tile`.
    ///
    /// `seq` is the tile's position in the overall submission sequence and
    /// drives mirror rotation for the providers that load-balance across
    /// hosts. Construction cannot fail: indices outside the tile grid produce
    /// syntactically valid but meaningless URLs, since range enforcement is
    /// the projection engine's job.
    pub fn tile_url(&self, tile: &Tile, seq: usize) -> String {
        match self {
            Provider::OpenStreetMaps => osm::tile_url(tile, seq),
            Provider::Google => google::tile_url(tile, seq),
            Provider::Bing => bing::tile_url(tile),
            Provider::Yahoo => yahoo::tile_url(tile),
            Provider::Nokia => nokia::tile_url(tile),
        }
    }
}
