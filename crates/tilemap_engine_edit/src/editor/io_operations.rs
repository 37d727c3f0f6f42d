use std::path::{Path, PathBuf};

use crate::{Result, TileGrid, TileMapError};

use super::EditState;

impl EditState {
    fn resolve_path(&self, path: Option<&Path>) -> Result<PathBuf> {
        path.or_else(|| self.grid.source_path()).map(Path::to_path_buf).ok_or(TileMapError::NoSourcePath)
    }

    /// Replaces the grid with the map stored at `path`, or reloads the
    /// file the grid came from.
    ///
    /// The session is left untouched when loading fails.
    pub fn load(&mut self, path: Option<&Path>) -> Result<()> {
        let path = self.resolve_path(path)?;
        let grid = TileGrid::load(&path)?;
        log::info!("loaded {} ({}, {} layers)", path.display(), grid.size(), grid.layer_count());
        self.set_grid(grid);
        Ok(())
    }

    /// Writes the grid to `path`, or back to the file it came from.
    pub fn save(&mut self, path: Option<&Path>) -> Result<()> {
        let path = self.resolve_path(path)?;
        self.grid.save(&path)?;
        log::info!("saved {}", path.display());
        Ok(())
    }
}
