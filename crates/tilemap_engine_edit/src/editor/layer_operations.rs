use crate::{Result, Size, TileMapError};

use super::EditState;

impl EditState {
    /// Inserts a zero-filled layer at the current layer index.
    ///
    /// The current layer index is unchanged, so it now refers to the new layer.
    pub fn new_layer(&mut self) {
        self.grid.insert_layer(self.current_layer);
        log::debug!("new layer at {}, {} layers", self.current_layer, self.grid.layer_count());
    }

    /// Removes the given layers, or the current layer if `layers` is empty.
    ///
    /// Valid indices are removed even if some are out of range, those are
    /// reported afterwards. Removing the last layer leaves an empty one behind.
    pub fn delete_layers(&mut self, layers: &[usize]) -> Result<()> {
        let current = [self.current_layer];
        let targets = if layers.is_empty() { &current[..] } else { layers };
        let layer_count = self.grid.layer_count();

        let invalid = self.grid.remove_layers(targets);
        self.clamp_current_layer();
        if invalid.is_empty() {
            Ok(())
        } else {
            Err(TileMapError::InvalidLayerIndices { layers: invalid, layer_count })
        }
    }

    pub fn swap_layers(&mut self, a: usize, b: usize) -> Result<()> {
        self.grid.swap_layers(a, b)
    }

    /// Makes `layer` the target of paint and paste.
    pub fn select_layer(&mut self, layer: usize) -> Result<()> {
        let layer_count = self.grid.layer_count();
        if layer >= layer_count {
            return Err(TileMapError::InvalidLayerIndex { layer, layer_count });
        }
        self.current_layer = layer;
        Ok(())
    }

    /// Resizes every layer, keeping the top left part.
    pub fn resize(&mut self, size: impl Into<Size>) -> Result<()> {
        self.grid.resize(size)
    }

    pub(crate) fn previous_layer(&mut self) {
        self.current_layer = self.current_layer.checked_sub(1).unwrap_or(self.grid.layer_count() - 1);
    }

    pub(crate) fn next_layer(&mut self) {
        self.current_layer = (self.current_layer + 1) % self.grid.layer_count();
    }
}
