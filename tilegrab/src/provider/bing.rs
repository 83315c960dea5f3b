//! Bing (Virtual Earth) quadkey strategy.
//!
//! Bing addresses tiles by a quadkey: one base-4 digit per zoom level, the
//! level's y bit in the high position and its x bit in the low position,
//! most significant level first.

use crate::coord::Tile;

/// Encodes a tile position as a quadkey, zero-padded to `zoom` digits.
fn quadkey(tile: &Tile) -> String {
    if tile.zoom == 0 {
        return "0".to_string();
    }

    (1..=tile.zoom)
        .rev()
        .map(|level| {
            let mask = 1i32 << (level - 1);
            let mut digit = b'0';
            if tile.y & mask != 0 {
                digit += 2;
            }
            if tile.x & mask != 0 {
                digit += 1;
            }
            digit as char
        })
        .collect()
}

/// Builds a Virtual Earth satellite tile URL.
pub(super) fn tile_url(tile: &Tile) -> String {
    format!(
        "http://ecn.t3.tiles.virtualearth.net/tiles/a{}.jpeg?g=915&mkt=en-us&n=z",
        quadkey(tile)
    )
}
