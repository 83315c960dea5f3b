//! Writing fetched tiles to the flat on-disk layout.
//!
//! Tiles are stored directly under the output directory as
//! `{zoom}-{x}-{y}{ext}`, with the extension derived from the content type
//! the server declared. This is the layout the cache scanner's flat pass
//! recognizes, so a store doubles as the dedup source for later runs.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::warn;

use crate::coord::Tile;
use crate::fetch::TileImage;

/// Failures while persisting tiles.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The output directory could not be created.
    #[error("failed to create output directory {path}")]
    Init {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A fetched tile could not be written.
    #[error("failed to write tile to {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Maps a declared content type to the on-disk file extension.
///
/// Returns `None` for anything but PNG and JPEG; such tiles are stored
/// without an extension.
pub fn extension_for(content_type: &str) -> Option<&'static str> {
    match content_type {
        "image/png" => Some(".png"),
        "image/jpeg" => Some(".jpg"),
        _ => None,
    }
}

/// Flat-layout file name for a tile: `{zoom}-{x}-{y}{ext}`.
pub fn tile_file_name(tile: &Tile, ext: &str) -> String {
    format!("{}-{}-{}{}", tile.zoom, tile.x, tile.y, ext)
}

/// Flat-layout tile writer rooted at the output directory.
pub struct TileStore {
    root: PathBuf,
}

impl TileStore {
    /// Opens the store, creating the root directory if needed.
    pub fn create(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|source| StoreError::Init {
            path: root.clone(),
            source,
        })?;

        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Writes a fetched tile, deriving the extension from its content type.
    ///
    /// An unrecognized content type is logged and the extension omitted.
    pub fn save(&self, tile: &Tile, image: &TileImage) -> Result<PathBuf, StoreError> {
        let ext = match extension_for(&image.content_type) {
            Some(ext) => ext,
            None => {
                warn!(
                    content_type = %image.content_type,
                    "unrecognized image format, storing without extension"
                );
                ""
            }
        };

        let path = self.root.join(tile_file_name(tile, ext));
        fs::write(&path, &image.bytes).map_err(|source| StoreError::Write {
            path: path.clone(),
            source,
        })?;

        Ok(path)
    }
}
