mod editor;
pub use editor::*;

pub mod pattern;

// Re-export the types sessions work with
pub use tilemap_engine::{MapFormat, PatternErrorKind, Position, Rectangle, Result, Size, TileGrid, TileId, TileMapError};
