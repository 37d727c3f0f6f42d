use std::ops::Range;

use crate::{Position, Rectangle, Result, TileId, TileMapError};

use super::EditState;

/// Offsets along one axis at which both `src + offset` and `dst + offset`
/// lie inside `0..len`, limited to `0..extent`.
fn clip_axis(extent: i32, len: i32, src: i32, dst: i32) -> Range<i64> {
    let (extent, len, src, dst) = (i64::from(extent), i64::from(len), i64::from(src), i64::from(dst));
    let start = 0.max(-src).max(-dst);
    let end = extent.min(len - src).min(len - dst);
    start..end.max(start)
}

impl EditState {
    /// Fills the brush rectangle with its top left corner at `pos` on the
    /// current layer. Parts outside the grid are dropped.
    pub fn paint(&mut self, tile: TileId, pos: impl Into<Position>) {
        let area = Rectangle::new(pos.into(), self.brush);
        self.grid.fill_rect(self.current_layer, area, tile);
    }

    /// Remembers `pos` as the top left corner of the next paste source.
    pub fn copy(&mut self, pos: impl Into<Position>) {
        let pos = pos.into();
        log::debug!("copy anchor set to {pos}");
        self.copy_anchor = Some(pos);
    }

    /// Copies the brush sized block at the copy anchor to `dest` on the
    /// current layer.
    ///
    /// Source and destination may overlap, the result is as if the source
    /// had been read completely before writing. Cells whose source or
    /// destination falls outside the grid are skipped.
    pub fn paste(&mut self, dest: impl Into<Position>) -> Result<()> {
        let Some(src) = self.copy_anchor else {
            return Err(TileMapError::NoCopyAnchor);
        };
        let dest = dest.into();
        let width = self.grid.width();
        let xs = clip_axis(self.brush.width, width, src.x, dest.x);
        let ys = clip_axis(self.brush.height, self.grid.height(), src.y, dest.y);
        if xs.is_empty() || ys.is_empty() {
            return Ok(());
        }

        let Some(layer) = self.grid.layer_mut(self.current_layer) else {
            return Ok(());
        };
        let width = i64::from(width);
        let run = (xs.end - xs.start) as usize;
        let rows = ys.end - ys.start;
        // moving down has to start at the bottom so rows are read before being overwritten
        let bottom_up = dest.y > src.y;
        for i in 0..rows {
            let dy = if bottom_up { ys.end - 1 - i } else { ys.start + i };
            let from = (i64::from(src.y) + dy) * width + i64::from(src.x) + xs.start;
            let to = (i64::from(dest.y) + dy) * width + i64::from(dest.x) + xs.start;
            layer.copy_within(from as usize..from as usize + run, to as usize);
        }
        Ok(())
    }
}
