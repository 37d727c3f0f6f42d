//! Tests for map persistence
//!
//! These tests verify that:
//! 1. Text maps load into the expected grid
//! 2. Every malformed input fails with its own error
//! 3. Saved maps load back unchanged

mod text_format_tests;

use tilemap_engine::{TileGrid, TileId};

/// Grid whose cells count up from 1, wrapping at 256.
pub fn numbered_grid(width: i32, height: i32, layers: usize) -> TileGrid {
    let mut grid = TileGrid::new((width, height), layers).unwrap();
    let mut next = 1u32;
    for k in 0..layers {
        for y in 0..height {
            for x in 0..width {
                grid.set_tile(k, (x, y), (next % 256) as TileId);
                next += 1;
            }
        }
    }
    grid
}

pub fn rows(grid: &TileGrid, layer: usize) -> Vec<Vec<TileId>> {
    grid.layer(layer).unwrap().chunks(grid.width() as usize).map(<[TileId]>::to_vec).collect()
}
