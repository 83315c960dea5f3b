//! Nokia-branded Ovi satellite imagery strategy.

use crate::coord::Tile;

/// Builds a Nokia satellite tile URL.
pub(super) fn tile_url(tile: &Tile) -> String {
    format!(
        "http://4.maptile.lbs.ovi.com/maptiler/v2/maptile/4176ef2b30/satellite.day/{}/{}/{}/256/png8?token=fee2f2a877fd4a429f17207a57658582&appId=nokiaMaps",
        tile.zoom, tile.x, tile.y
    )
}
