//! On-disk tile cache scanning and dedup filtering.
//!
//! Before a download run is scheduled, the tile store on disk is scanned
//! once into an in-memory [`CacheIndex`] and candidate tiles already present
//! are filtered out. Two layouts are recognized in the same pass:
//!
//! - flat: `{zoom}-{x}-{y}.png` files directly under the root
//! - nested: `{zoom}/{x}/{y}.png` directory trees
//!
//! Entries fitting neither shape are skipped with a diagnostic and never
//! abort the scan. Only an unreadable root fails, as
//! [`CacheError::Unavailable`]; callers treat that as an empty cache and
//! proceed.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, warn};

use crate::coord::Tile;

/// Scan failure for the cache root itself.
///
/// Individual malformed entries are skipped, never reported here.
#[derive(Debug, Error)]
pub enum CacheError {
    /// The cache root could not be opened or read.
    #[error("cache directory unavailable: {path}")]
    Unavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Membership index over the tiles already on disk.
///
/// Built once per run by [`scan`] and read-only afterwards.
#[derive(Debug, Default)]
pub struct CacheIndex {
    tiles: HashMap<u8, HashMap<i32, HashSet<i32>>>,
    len: usize,
}

impl CacheIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a tile as present. Inserting the same tile twice is a no-op.
    pub fn insert(&mut self, tile: Tile) {
        let inserted = self
            .tiles
            .entry(tile.zoom)
            .or_default()
            .entry(tile.x)
            .or_default()
            .insert(tile.y);
        if inserted {
            self.len += 1;
        }
    }

    /// Whether `tile` is present in the index.
    pub fn contains(&self, tile: &Tile) -> bool {
        self.tiles
            .get(&tile.zoom)
            .and_then(|xs| xs.get(&tile.x))
            .is_some_and(|ys| ys.contains(&tile.y))
    }

    /// Number of distinct tiles indexed.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the tiles not present in the index, preserving input order.
    pub fn filter(&self, tiles: Vec<Tile>) -> Vec<Tile> {
        tiles.into_iter().filter(|t| !self.contains(t)).collect()
    }
}

/// Scans a tile store into a [`CacheIndex`].
///
/// Flat `{zoom}-{x}-{y}{ext}` files and nested `{zoom}/{x}/{y}{ext}` trees
/// may coexist under the same root. Malformed entries are logged and
/// skipped.
pub fn scan(root: &Path) -> Result<CacheIndex, CacheError> {
    let entries = fs::read_dir(root).map_err(|source| CacheError::Unavailable {
        path: root.to_path_buf(),
        source,
    })?;

    let mut index = CacheIndex::new();
    for entry in entries.filter_map(|e| e.ok()) {
        let path = entry.path();
        let name = entry.file_name();
        let name = name.to_string_lossy();

        if path.is_dir() {
            match name.parse::<u8>() {
                Ok(zoom) => scan_zoom_dir(&path, zoom, &mut index),
                Err(_) => warn!(entry = %name, "non-numeric zoom directory in cache, skipping"),
            }
        } else if let Some(tile) = parse_flat_name(&name) {
            index.insert(tile);
        } else {
            warn!(entry = %name, "unrecognized tile file name in cache, skipping");
        }
    }

    debug!(tiles = index.len(), root = %root.display(), "cache scan complete");
    Ok(index)
}

/// Parses a flat `{zoom}-{x}-{y}{ext}` file name into a tile.
fn parse_flat_name(name: &str) -> Option<Tile> {
    let stem = match name.rsplit_once('.') {
        Some((stem, _ext)) => stem,
        None => name,
    };

    let mut parts = stem.split('-');
    let zoom = parts.next()?.parse().ok()?;
    let x = parts.next()?.parse().ok()?;
    let y = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }

    Some(Tile { x, y, zoom })
}

/// Scans the x-directory level under one nested zoom directory.
fn scan_zoom_dir(dir: &Path, zoom: u8, index: &mut CacheIndex) {
    let entries = match fs::read_dir(dir) {
        Ok(e) => e,
        Err(e) => {
            warn!(path = %dir.display(), error = %e, "failed to read zoom directory");
            return;
        }
    };

    for entry in entries.filter_map(|e| e.ok()) {
        let path = entry.path();
        let name = entry.file_name();
        let name = name.to_string_lossy();

        if !path.is_dir() {
            warn!(entry = %name, zoom, "expected an x directory, found a file, skipping");
            continue;
        }
        match name.parse::<i32>() {
            Ok(x) => scan_x_dir(&path, zoom, x, index),
            Err(_) => warn!(entry = %name, zoom, "non-numeric x directory in cache, skipping"),
        }
    }
}

/// Scans the y-file level under one nested x directory.
fn scan_x_dir(dir: &Path, zoom: u8, x: i32, index: &mut CacheIndex) {
    let entries = match fs::read_dir(dir) {
        Ok(e) => e,
        Err(e) => {
            warn!(path = %dir.display(), error = %e, "failed to read x directory");
            return;
        }
    };

    for entry in entries.filter_map(|e| e.ok()) {
        let name = entry.file_name();
        let name = name.to_string_lossy();

        let stem = match name.rsplit_once('.') {
            Some((stem, _ext)) => stem,
            None => name.as_ref(),
        };
        match stem.parse::<i32>() {
            Ok(y) => index.insert(Tile { x, y, zoom }),
            Err(_) => warn!(entry = %name, zoom, x, "unparseable y tile name, skipping"),
        }
    }
}
