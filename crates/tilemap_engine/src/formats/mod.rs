//! Map persistence.
//!
//! Loading sniffs the content: anything that does not start with `map:` is
//! handed to the image decoder. Saving sniffs the file name: a `.png` suffix
//! writes an image, every other name writes the text format.
//!
//! ```no_run
//! use std::path::Path;
//! use tilemap_engine::TileGrid;
//!
//! let mut grid = TileGrid::load(Path::new("level.map")).unwrap();
//! grid.set_tile(0, (1, 1), 3);
//! grid.save(Path::new("level.png")).unwrap();
//! ```

use std::path::Path;

use crate::{Result, TileGrid, TileMapError};

pub(crate) mod io;

pub use io::image::{decode_image, encode_image, MAX_IMAGE_LAYERS};
pub use io::text::{parse_map, write_map, MAP_KEYWORD};

/// Persistence formats of a map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MapFormat {
    /// The `map:` text format
    Text,
    /// PNG image, one color channel per layer
    Png,
}

impl MapFormat {
    /// Get a human-readable name for this format.
    pub fn name(&self) -> &'static str {
        match self {
            MapFormat::Text => "Text Map",
            MapFormat::Png => "PNG Image",
        }
    }

    /// Format used when saving to `path`.
    ///
    /// Only an exact, case sensitive `.png` suffix after at least one other
    /// byte selects the image format.
    pub fn from_path(path: &Path) -> MapFormat {
        let name = path.as_os_str().as_encoded_bytes();
        if name.len() > 4 && name.ends_with(b".png") {
            MapFormat::Png
        } else {
            MapFormat::Text
        }
    }

    /// Format of already loaded file content.
    pub fn detect(data: &[u8]) -> MapFormat {
        let start = data.iter().position(|b| !io::text::is_whitespace(*b)).unwrap_or(data.len());
        if data[start..].starts_with(MAP_KEYWORD.as_bytes()) {
            MapFormat::Text
        } else {
            MapFormat::Png
        }
    }
}

impl std::fmt::Display for MapFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl TileGrid {
    /// Decodes a map from file content, see [`MapFormat::detect`].
    pub fn from_bytes(data: &[u8]) -> Result<TileGrid> {
        match MapFormat::detect(data) {
            MapFormat::Text => parse_map(data),
            MapFormat::Png => decode_image(data),
        }
    }

    /// Loads a map and remembers `path` as its source.
    pub fn load(path: &Path) -> Result<TileGrid> {
        let data = std::fs::read(path).map_err(|err| TileMapError::io_unavailable(path, err))?;
        let mut grid = TileGrid::from_bytes(&data)?;
        grid.set_source_path(path);
        log::debug!(
            "loaded {}x{} map with {} layers from {}",
            grid.width(),
            grid.height(),
            grid.layer_count(),
            path.display()
        );
        Ok(grid)
    }

    /// Saves the map in the format selected by [`MapFormat::from_path`].
    pub fn save(&mut self, path: &Path) -> Result<()> {
        let format = MapFormat::from_path(path);
        match format {
            MapFormat::Png => encode_image(self, path)?,
            MapFormat::Text => std::fs::write(path, write_map(self)).map_err(|err| TileMapError::io_unavailable(path, err))?,
        }
        self.set_source_path(path);
        log::debug!("saved map as {format} to {}", path.display());
        Ok(())
    }
}
