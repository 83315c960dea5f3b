//! Yahoo-branded Ovi satellite imagery strategy.
//!
//! The token and app id are the fixed public credentials baked into the
//! service's own clients; they are part of the URL contract.

use crate::coord::Tile;

/// Builds a Yahoo satellite tile URL.
pub(super) fn tile_url(tile: &Tile) -> String {
    format!(
        "http://4.maptile.lbs.ovi.com/maptiler/v2/maptile/279af375be/satellite.day/{}/{}/{}/256/jpg?lg=ENG&token=TrLJuXVK62IQk0vuXFzaig%3D%3D&requestid=yahoo.prod&app_id=eAdkWGYRoc4RfxVo0Z4B",
        tile.zoom, tile.x, tile.y
    )
}
