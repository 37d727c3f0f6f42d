#![allow(clippy::missing_errors_doc)]
mod io_operations;
mod layer_operations;
mod pattern_operations;
mod region_operations;

use crate::{Position, Result, Size, TileGrid, TileId, TileMapError};

/// An editing session on a single tile map.
///
/// Besides the grid it tracks the layer edits go to, the tile and brush
/// used for painting, the copy anchor and the pattern cursor.
#[derive(Debug, Clone)]
pub struct EditState {
    grid: TileGrid,
    current_layer: usize,
    held_tile: TileId,
    brush: Size,
    copy_anchor: Option<Position>,
    cursor: Position,
}

impl EditState {
    pub fn new(size: impl Into<Size>, layer_count: usize) -> Result<Self> {
        Ok(Self::from_grid(TileGrid::new(size, layer_count)?))
    }

    pub fn from_grid(grid: TileGrid) -> Self {
        Self {
            grid,
            current_layer: 0,
            held_tile: 0,
            brush: Size::new(1, 1),
            copy_anchor: None,
            cursor: Position::default(),
        }
    }

    pub fn get_grid(&self) -> &TileGrid {
        &self.grid
    }

    /// Replaces the grid, the current layer is clamped to the new layer count.
    pub fn set_grid(&mut self, grid: TileGrid) {
        self.grid = grid;
        self.clamp_current_layer();
    }

    pub fn get_current_layer(&self) -> usize {
        self.current_layer
    }

    pub fn get_held_tile(&self) -> TileId {
        self.held_tile
    }

    pub fn set_held_tile(&mut self, tile: TileId) {
        self.held_tile = tile;
    }

    pub fn get_brush(&self) -> Size {
        self.brush
    }

    /// Sets the rectangle painted by a single paint operation.
    pub fn set_brush(&mut self, size: impl Into<Size>) -> Result<()> {
        let size = size.into();
        if size.is_empty() {
            return Err(TileMapError::invalid_size(size.width, size.height));
        }
        self.brush = size;
        Ok(())
    }

    pub fn get_cursor(&self) -> Position {
        self.cursor
    }

    pub fn set_cursor(&mut self, pos: impl Into<Position>) {
        self.cursor = pos.into();
    }

    pub fn get_copy_anchor(&self) -> Option<Position> {
        self.copy_anchor
    }

    /// All layers with their tile at `pos`, used for inspecting a cell.
    pub fn tiles_at(&self, pos: impl Into<Position>) -> Vec<(usize, TileId)> {
        self.grid.tiles_at(pos)
    }

    fn clamp_current_layer(&mut self) {
        self.current_layer = self.current_layer.min(self.grid.layer_count().saturating_sub(1));
    }
}
