//! Core coordinate types.

/// Pixels along one edge of a map tile.
pub const TILE_SIZE: i64 = 256;

/// Spherical earth radius in meters used by the direct geodesic formula.
pub const EARTH_RADIUS_M: f64 = 6_378_100.0;

/// A single 256×256 raster tile in the Web Mercator quad-tree grid.
///
/// The projection wraps `x` into `[0, 2^zoom)` when a longitude crosses the
/// antimeridian. `y` is carried through unwrapped, so points projected close
/// to the poles can produce y indices outside the grid (including negative
/// ones).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tile {
    pub x: i32,
    pub y: i32,
    pub zoom: u8,
}

/// A geographic position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub lat: f64,
    pub lon: f64,
}
