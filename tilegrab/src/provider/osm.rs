//! OpenStreetMap tile server strategy.

use crate::coord::Tile;

/// The three public OSM mirror subdomains.
const MIRRORS: [&str; 3] = ["a", "b", "c"];

/// Builds an OSM tile URL, rotating across mirrors by sequence position.
pub(super) fn tile_url(tile: &Tile, seq: usize) -> String {
    format!(
        "http://{}.tile.openstreetmap.org/{}/{}/{}.png",
        MIRRORS[seq % MIRRORS.len()],
        tile.zoom,
        tile.x,
        tile.y
    )
}
