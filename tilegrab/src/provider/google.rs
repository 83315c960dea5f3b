//! Google satellite imagery strategy (legacy `kh` endpoint).
//!
//! The `s` query parameter carries a prefix of `"Galileo"` that Google's own
//! map clients grow by one character per request. Here both the host index
//! and the token are derived from the sequence position alone, so concurrent
//! callers need no shared rotation state.

use crate::coord::Tile;

/// Token prefixes are cut from this value, cyclically by its length.
const GALILEO: &str = "Galileo";

/// Builds a Google satellite tile URL for the `khm0`/`khm1` host pair.
pub(super) fn tile_url(tile: &Tile, seq: usize) -> String {
    let host = seq % 2;
    let token = &GALILEO[..host % GALILEO.len() + 1];

    format!(
        "http://khm{}.google.com/kh/v=125&x={}&y={}&z={}&s={}",
        host, tile.x, tile.y, tile.zoom, token
    )
}
