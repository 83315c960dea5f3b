//! Geodesic translation and Web Mercator tile projection.
//!
//! Converts a circular geographic query (center point plus radius in meters)
//! into the set of tile coordinates covering it across a zoom range. All
//! trigonometry is done in radians internally; the public API speaks decimal
//! degrees.

mod types;

pub use types::{Point, Tile, EARTH_RADIUS_M, TILE_SIZE};

use std::f64::consts::PI;

#[inline]
fn to_rad(deg: f64) -> f64 {
    deg * PI / 180.0
}

#[inline]
fn to_deg(rad: f64) -> f64 {
    rad * 180.0 / PI
}

/// Converts a longitude in radians to a global x pixel coordinate.
#[inline]
fn lon_to_x_pixels(lon: f64, zoom: u8) -> i64 {
    let n = 2.0_f64.powi(zoom as i32);
    let pix_x = lon * TILE_SIZE as f64 * n / (2.0 * PI) + n * (TILE_SIZE as f64 / 2.0);
    pix_x.floor() as i64
}

/// Converts a latitude in radians to a global y pixel coordinate, using the
/// inverse-hyperbolic-tangent form of the Mercator projection.
#[inline]
fn lat_to_y_pixels(lat: f64, zoom: u8) -> i64 {
    let n = 2.0_f64.powi(zoom as i32);
    let lat_m = lat.sin().atanh();
    let pix_y = -(lat_m * TILE_SIZE as f64 * n) / (2.0 * PI) + n * (TILE_SIZE as f64 / 2.0);
    pix_y.floor() as i64
}

/// Projects a geographic point to the tile containing it.
///
/// The x pixel coordinate is wrapped once by the full map width when the
/// longitude falls past the antimeridian, and the tile x index is corrected
/// into `[0, 2^zoom)`. The y index is not wrapped: points close to the poles
/// project outside the grid and are returned as-is.
pub fn gps_to_tile(p: Point, zoom: u8) -> Tile {
    let mut pix_x = lon_to_x_pixels(to_rad(p.lon), zoom);
    let pix_y = lat_to_y_pixels(to_rad(p.lat), zoom);

    let max_tile = 1i64 << zoom;
    let max_pix = max_tile * TILE_SIZE;

    if pix_x < 0 {
        pix_x += max_pix;
    } else if pix_x > max_pix {
        pix_x -= max_pix;
    }

    let mut tile_x = pix_x.div_euclid(TILE_SIZE);
    let tile_y = pix_y.div_euclid(TILE_SIZE);
    if tile_x >= max_tile {
        tile_x -= max_tile;
    }

    Tile {
        x: tile_x as i32,
        y: tile_y as i32,
        zoom,
    }
}

/// Computes the destination reached by travelling `distance` meters from
/// `(lat, lon)` along the initial bearing `bearing` (degrees clockwise from
/// north), on a spherical earth of radius [`EARTH_RADIUS_M`].
///
/// The resulting longitude is normalized into `[-180, 180)` so destinations
/// across the antimeridian stay in range.
pub fn translate(lat: f64, lon: f64, distance: f64, bearing: f64) -> Point {
    let (lat, lon, bearing) = (to_rad(lat), to_rad(lon), to_rad(bearing));
    let d = distance / EARTH_RADIUS_M;

    let lat2 = (lat.sin() * d.cos() + lat.cos() * d.sin() * bearing.cos()).asin();
    let lon2 = lon
        + (bearing.sin() * d.sin() * lat.cos()).atan2(d.cos() - lat.sin() * lat2.sin());
    let lon2 = ((lon2 + 3.0 * PI) % (2.0 * PI)) - PI;

    Point {
        lat: to_deg(lat2),
        lon: to_deg(lon2),
    }
}

/// Enumerates every tile covering a circular region across a zoom range.
///
/// The region is bounded by translating the center `radius` meters along the
/// four cardinal bearings; for each zoom level in `[min_zoom, max_zoom]` the
/// inclusive rectangular grid between the west/east x indices and the
/// north/south y indices is emitted. Results are concatenated across zoom
/// levels and are not deduplicated. A region whose west edge wraps past the
/// antimeridian produces an empty x range at that zoom.
pub fn tiles_for_region(
    lat: f64,
    lon: f64,
    radius: f64,
    min_zoom: u8,
    max_zoom: u8,
) -> Vec<Tile> {
    let north = translate(lat, lon, radius, 0.0);
    let east = translate(lat, lon, radius, 90.0);
    let south = translate(lat, lon, radius, 180.0);
    let west = translate(lat, lon, radius, 270.0);

    let mut tiles = Vec::new();
    for zoom in min_zoom..=max_zoom {
        let top = gps_to_tile(north, zoom);
        let bottom = gps_to_tile(south, zoom);
        let left = gps_to_tile(west, zoom);
        let right = gps_to_tile(east, zoom);

        for x in left.x..=right.x {
            for y in top.y..=bottom.y {
                tiles.push(Tile { x, y, zoom });
            }
        }
    }

    tiles
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_rad() {
        let cases = [
            (0.0, 0.0),
            (90.0, PI / 2.0),
            (111.0, 1.93731547),
            (-111.0, -1.93731547),
        ];
        for (deg, rad) in cases {
            assert!(
                (to_rad(deg) - rad).abs() < 0.0001,
                "to_rad({}) = {}, expected {}",
                deg,
                to_rad(deg),
                rad
            );
        }
    }

    #[test]
    fn test_to_deg() {
        let cases = [
            (0.0, 0.0),
            (PI / 2.0, 90.0),
            (1.93731547, 111.0),
            (-1.93731547, -111.0),
        ];
        for (rad, deg) in cases {
            assert!(
                (to_deg(rad) - deg).abs() < 0.0001,
                "to_deg({}) = {}, expected {}",
                rad,
                to_deg(rad),
                deg
            );
        }
    }

    #[test]
    fn test_lon_to_x_pixels_reference_point() {
        // Provo, Utah; the pixel must land inside the expected tile.
        for (zoom, tile_x) in [(17u8, 24883i64), (18, 49767)] {
            let pix = lon_to_x_pixels(to_rad(-111.654995), zoom);
            assert!(
                pix >= tile_x * TILE_SIZE && pix - tile_x * TILE_SIZE < TILE_SIZE,
                "zoom {}: pixel {} outside tile {}",
                zoom,
                pix,
                tile_x
            );
        }
    }

    #[test]
    fn test_lat_to_y_pixels_reference_point() {
        for (zoom, tile_y) in [(17u8, 49475i64), (18, 98950)] {
            let pix = lat_to_y_pixels(to_rad(40.306107), zoom);
            assert!(
                pix >= tile_y * TILE_SIZE && pix - tile_y * TILE_SIZE < TILE_SIZE,
                "zoom {}: pixel {} outside tile {}",
                zoom,
                pix,
                tile_y
            );
        }
    }

    #[test]
    fn test_gps_to_tile_reference_point() {
        let p = Point {
            lat: 40.306107,
            lon: -111.654995,
        };

        let tile = gps_to_tile(p, 17);
        assert_eq!((tile.x, tile.y, tile.zoom), (24883, 49475, 17));

        let tile = gps_to_tile(p, 18);
        assert_eq!((tile.x, tile.y, tile.zoom), (49767, 98950, 18));
    }

    #[test]
    fn test_gps_to_tile_wraps_antimeridian_x() {
        // The antimeridian itself is one full map width east of -180 and
        // wraps back to column 0.
        let tile = gps_to_tile(Point { lat: 0.0, lon: 180.0 }, 3);
        assert_eq!(tile.x, 0);

        let tile = gps_to_tile(Point { lat: 0.0, lon: -180.0 }, 3);
        assert_eq!(tile.x, 0);

        // A longitude past +180 lands where its wrapped equivalent would.
        let tile = gps_to_tile(Point { lat: 0.0, lon: 190.0 }, 3);
        let wrapped = gps_to_tile(Point { lat: 0.0, lon: -170.0 }, 3);
        assert_eq!(tile.x, wrapped.x);
    }

    #[test]
    fn test_gps_to_tile_does_not_wrap_polar_y() {
        // Beyond the Mercator latitude limit the y index runs off the grid;
        // it is reported as-is rather than clamped.
        let tile = gps_to_tile(Point { lat: 89.9, lon: 0.0 }, 2);
        assert!(tile.y < 0, "expected out-of-range y, got {}", tile.y);

        let tile = gps_to_tile(Point { lat: -89.9, lon: 0.0 }, 2);
        assert!(tile.y >= 4, "expected out-of-range y, got {}", tile.y);
    }

    #[test]
    fn test_translate_reference_points() {
        let cases = [
            (40.306107, -111.654995, 15000.0, 37.0, 40.413889, -111.548333),
            (35.696111, 51.423056, 1300.0, -17.0, 35.707222, 51.418889),
        ];
        for (lat, lon, dist, bearing, exp_lat, exp_lon) in cases {
            let p = translate(lat, lon, dist, bearing);
            assert!(
                (p.lat - exp_lat).abs() <= 0.001 && (p.lon - exp_lon).abs() <= 0.001,
                "translate({}, {}, {}, {}) = ({}, {}), expected ({}, {})",
                lat,
                lon,
                dist,
                bearing,
                p.lat,
                p.lon,
                exp_lat,
                exp_lon
            );
        }
    }

    #[test]
    fn test_translate_normalizes_longitude_across_antimeridian() {
        // 50 km due east of a point just west of the antimeridian.
        let p = translate(0.0, 179.9999, 50_000.0, 90.0);
        assert!(
            (-180.0..180.0).contains(&p.lon),
            "longitude {} not normalized",
            p.lon
        );
        assert!(p.lon < 0.0, "expected a wrapped longitude, got {}", p.lon);
    }

    #[test]
    fn test_tiles_for_region_degenerate_radius() {
        // A region a millimeter across collapses to the center tile at each
        // zoom level.
        let mut tiles = tiles_for_region(40.306107, -111.654995, 0.001, 17, 18);
        tiles.sort_by_key(|t| t.zoom);

        assert_eq!(
            tiles,
            vec![
                Tile { x: 24883, y: 49475, zoom: 17 },
                Tile { x: 49767, y: 98950, zoom: 18 },
            ]
        );
    }

    #[test]
    fn test_tiles_for_region_is_rectangular() {
        let (lat, lon, radius) = (40.306107, -111.654995, 15_000.0);
        let tiles = tiles_for_region(lat, lon, radius, 13, 13);

        let left = gps_to_tile(translate(lat, lon, radius, 270.0), 13);
        let right = gps_to_tile(translate(lat, lon, radius, 90.0), 13);
        let top = gps_to_tile(translate(lat, lon, radius, 0.0), 13);
        let bottom = gps_to_tile(translate(lat, lon, radius, 180.0), 13);

        let width = (right.x - left.x + 1) as usize;
        let height = (bottom.y - top.y + 1) as usize;
        assert!(width > 1 && height > 1, "15 km should span several tiles");
        assert_eq!(tiles.len(), width * height);

        for tile in &tiles {
            assert_eq!(tile.zoom, 13);
            assert!(tile.x >= left.x && tile.x <= right.x);
            assert!(tile.y >= top.y && tile.y <= bottom.y);
        }
    }

    #[test]
    fn test_tiles_for_region_concatenates_zoom_levels() {
        let tiles = tiles_for_region(51.5074, -0.1278, 2_000.0, 5, 7);

        for zoom in 5..=7 {
            assert!(
                tiles.iter().any(|t| t.zoom == zoom),
                "zoom {} missing from result",
                zoom
            );
        }

        // Per-zoom slices are themselves contiguous runs of the output.
        let per_zoom: usize = (5..=7)
            .map(|z| tiles.iter().filter(|t| t.zoom == z).count())
            .sum();
        assert_eq!(per_zoom, tiles.len());
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_projected_x_in_bounds(
                lat in -85.05..85.05_f64,
                lon in -180.0..180.0_f64,
                zoom in 1u8..=18
            ) {
                let tile = gps_to_tile(Point { lat, lon }, zoom);
                let max_tile = 1i32 << zoom;
                prop_assert!(
                    tile.x >= 0 && tile.x < max_tile,
                    "x {} out of [0, {}) at zoom {}",
                    tile.x, max_tile, zoom
                );
            }

            #[test]
            fn test_projected_y_in_bounds_within_mercator_limits(
                lat in -85.05..85.05_f64,
                lon in -180.0..180.0_f64,
                zoom in 1u8..=18
            ) {
                let tile = gps_to_tile(Point { lat, lon }, zoom);
                let max_tile = 1i32 << zoom;
                prop_assert!(
                    tile.y >= 0 && tile.y < max_tile,
                    "y {} out of [0, {}) at zoom {}",
                    tile.y, max_tile, zoom
                );
            }

            #[test]
            fn test_translate_stays_in_range(
                lat in -80.0..80.0_f64,
                lon in -180.0..180.0_f64,
                distance in 0.0..2_000_000.0_f64,
                bearing in -360.0..360.0_f64
            ) {
                let p = translate(lat, lon, distance, bearing);
                prop_assert!((-90.0..=90.0).contains(&p.lat));
                prop_assert!((-180.0..180.0).contains(&p.lon));
            }

            #[test]
            fn test_region_tiles_have_wrapped_x(
                lat in -60.0..60.0_f64,
                lon in -180.0..180.0_f64,
                radius in 1.0..20_000.0_f64,
                zoom in 1u8..=10
            ) {
                let tiles = tiles_for_region(lat, lon, radius, zoom, zoom);
                let max_tile = 1i32 << zoom;
                for tile in tiles {
                    prop_assert!(
                        tile.x >= 0 && tile.x < max_tile,
                        "x {} out of [0, {}) at zoom {}",
                        tile.x, max_tile, zoom
                    );
                }
            }
        }
    }
}
