use std::path::{Path, PathBuf};

use crate::{Position, Rectangle, Result, Size, TileMapError};

/// Identifier stored in every cell. `0` is the empty tile.
pub type TileId = u8;

/// A stack of equally sized layers of tile identifiers.
///
/// Layers are flat row-major buffers, cell `(x, y)` lives at `y * width + x`.
/// A grid always has at least one layer and positive dimensions.
#[derive(Debug, Clone)]
pub struct TileGrid {
    size: Size,
    layers: Vec<Vec<TileId>>,
    source_path: Option<PathBuf>,
}

impl PartialEq for TileGrid {
    fn eq(&self, other: &TileGrid) -> bool {
        self.size == other.size && self.layers == other.layers
    }
}

impl Eq for TileGrid {}

impl std::fmt::Display for TileGrid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (k, layer) in self.layers.iter().enumerate() {
            writeln!(f, "layer {k}:")?;
            for row in layer.chunks(self.size.width as usize) {
                for tile in row {
                    write!(f, "{tile:4}")?;
                }
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

/// Number of cells of a `size` layer, `None` for empty or overflowing sizes.
pub(crate) fn cell_count(size: Size) -> Option<usize> {
    if size.is_empty() {
        return None;
    }
    (size.width as usize).checked_mul(size.height as usize)
}

impl TileGrid {
    /// Creates a zero-filled grid.
    pub fn new(size: impl Into<Size>, layer_count: usize) -> Result<Self> {
        let size = size.into();
        let Some(cells) = cell_count(size) else {
            return Err(TileMapError::invalid_size(size.width, size.height));
        };
        if layer_count == 0 {
            return Err(TileMapError::invalid_size(size.width, size.height));
        }
        Ok(Self {
            size,
            layers: vec![vec![0; cells]; layer_count],
            source_path: None,
        })
    }

    /// Builds a grid from already decoded layer buffers.
    pub(crate) fn from_layers(size: Size, layers: Vec<Vec<TileId>>) -> Self {
        debug_assert!(!layers.is_empty());
        debug_assert!(layers.iter().all(|layer| Some(layer.len()) == cell_count(size)));
        Self {
            size,
            layers,
            source_path: None,
        }
    }

    pub fn width(&self) -> i32 {
        self.size.width
    }

    pub fn height(&self) -> i32 {
        self.size.height
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    pub fn rectangle(&self) -> Rectangle {
        Rectangle::from_min_size((0, 0), self.size)
    }

    /// Buffer offset of `pos`, `None` outside of the grid.
    pub fn index(&self, pos: impl Into<Position>) -> Option<usize> {
        let pos = pos.into();
        if !self.rectangle().is_inside(pos) {
            return None;
        }
        Some(pos.y as usize * self.size.width as usize + pos.x as usize)
    }

    /// Tile at `pos` on `layer`. Anything outside of the grid reads as `0`.
    pub fn tile(&self, layer: usize, pos: impl Into<Position>) -> TileId {
        let Some(idx) = self.index(pos) else {
            return 0;
        };
        self.layers.get(layer).map_or(0, |buffer| buffer[idx])
    }

    /// Writes a tile. Writes outside of the grid are dropped, the grid never grows.
    pub fn set_tile(&mut self, layer: usize, pos: impl Into<Position>, tile: TileId) {
        let Some(idx) = self.index(pos) else {
            return;
        };
        if let Some(buffer) = self.layers.get_mut(layer) {
            buffer[idx] = tile;
        }
    }

    pub fn layer(&self, layer: usize) -> Option<&[TileId]> {
        self.layers.get(layer).map(Vec::as_slice)
    }

    pub fn layer_mut(&mut self, layer: usize) -> Option<&mut [TileId]> {
        self.layers.get_mut(layer).map(Vec::as_mut_slice)
    }

    /// All non-empty tiles stacked at `pos` as `(layer, tile)` pairs.
    pub fn tiles_at(&self, pos: impl Into<Position>) -> Vec<(usize, TileId)> {
        let Some(idx) = self.index(pos) else {
            return Vec::new();
        };
        self.layers
            .iter()
            .enumerate()
            .filter_map(|(k, buffer)| (buffer[idx] != 0).then_some((k, buffer[idx])))
            .collect()
    }

    /// Fills `area` (clipped to the grid) on `layer` with `tile`.
    pub fn fill_rect(&mut self, layer: usize, area: Rectangle, tile: TileId) {
        let area = area.intersect(&self.rectangle());
        if area.is_empty() {
            return;
        }
        let width = self.size.width as usize;
        let Some(buffer) = self.layers.get_mut(layer) else {
            return;
        };
        for y in area.y_range() {
            let row = y as usize * width;
            buffer[row + area.left() as usize..row + area.right() as usize].fill(tile);
        }
    }

    /// Inserts a zero-filled layer at `index` (clamped to the layer count).
    pub fn insert_layer(&mut self, index: usize) {
        let index = index.min(self.layers.len());
        let cells = self.layers[0].len();
        self.layers.insert(index, vec![0; cells]);
    }

    /// Removes the given layers, returning the indices that did not exist.
    ///
    /// Removing every layer leaves a single zero-filled layer behind.
    pub fn remove_layers(&mut self, indices: &[usize]) -> Vec<usize> {
        let layer_count = self.layers.len();
        let cells = self.layers[0].len();
        let mut invalid = Vec::new();
        let mut remove = vec![false; layer_count];
        for &idx in indices {
            if idx < layer_count {
                remove[idx] = true;
            } else if !invalid.contains(&idx) {
                invalid.push(idx);
            }
        }

        let mut remove = remove.into_iter();
        self.layers.retain(|_| !remove.next().unwrap_or(false));
        if self.layers.is_empty() {
            self.layers.push(vec![0; cells]);
        }
        invalid
    }

    /// Exchanges two layer buffers.
    pub fn swap_layers(&mut self, a: usize, b: usize) -> Result<()> {
        let layer_count = self.layers.len();
        for layer in [a, b] {
            if layer >= layer_count {
                return Err(TileMapError::InvalidLayerIndex { layer, layer_count });
            }
        }
        self.layers.swap(a, b);
        Ok(())
    }

    /// Reallocates every layer to `size`, keeping the overlapping top left part.
    pub fn resize(&mut self, size: impl Into<Size>) -> Result<()> {
        let size = size.into();
        let Some(cells) = cell_count(size) else {
            return Err(TileMapError::invalid_size(size.width, size.height));
        };
        let keep_width = self.size.width.min(size.width) as usize;
        let keep_height = self.size.height.min(size.height) as usize;
        let old_width = self.size.width as usize;
        let new_width = size.width as usize;

        let layers = self
            .layers
            .iter()
            .map(|old| {
                let mut new = vec![0; cells];
                for y in 0..keep_height {
                    new[y * new_width..y * new_width + keep_width].copy_from_slice(&old[y * old_width..y * old_width + keep_width]);
                }
                new
            })
            .collect();

        log::debug!("resize map from {} to {}", self.size, size);
        self.layers = layers;
        self.size = size;
        Ok(())
    }

    pub fn source_path(&self) -> Option<&Path> {
        self.source_path.as_deref()
    }

    pub(crate) fn set_source_path(&mut self, path: &Path) {
        if self.source_path.as_deref() == Some(path) {
            return;
        }
        self.source_path = Some(path.to_path_buf());
    }
}
