use crate::{
    pattern::{Direction, PatternOp, PatternWord, TokenError},
    Result, TileMapError,
};

use super::EditState;

impl EditState {
    /// Runs a pattern program word by word.
    ///
    /// Execution stops at the first invalid token. Everything before it,
    /// including earlier instructions of the same word, stays applied.
    pub fn run_pattern<S: AsRef<str>>(&mut self, words: &[S]) -> Result<()> {
        for (word_index, word) in words.iter().enumerate() {
            let word = word.as_ref();
            log::trace!("pattern word {word_index}: '{word}'");
            self.run_pattern_word(word).map_err(|err| TileMapError::PatternSyntax {
                word_index,
                word: word.to_string(),
                position: err.position,
                kind: err.kind,
            })?;
        }
        Ok(())
    }

    fn run_pattern_word(&mut self, text: &str) -> std::result::Result<(), TokenError> {
        let word = PatternWord::parse(text)?;
        for _ in 0..word.repeat() {
            for op in word.ops() {
                let (_, op) = op?;
                self.apply_pattern_op(op);
            }
        }
        Ok(())
    }

    /// Executes a single instruction against the session.
    pub fn apply_pattern_op(&mut self, op: PatternOp) {
        match op {
            PatternOp::SetCursorX(x) => self.cursor.x = x,
            PatternOp::SetCursorY(y) => self.cursor.y = y,
            PatternOp::SetBrushHeight(height) => self.brush.height = height.max(1),
            PatternOp::SetBrushWidth(width) => self.brush.width = width.max(1),
            PatternOp::Hold(tile) => self.held_tile = tile,
            PatternOp::Move(direction) => self.move_cursor(direction),
            PatternOp::PaintThenMove(direction) => {
                self.paint(self.held_tile, self.cursor);
                self.move_cursor(direction);
            }
            PatternOp::PreviousLayer => self.previous_layer(),
            PatternOp::NextLayer => self.next_layer(),
            PatternOp::Paint => self.paint(self.held_tile, self.cursor),
        }
    }

    fn move_cursor(&mut self, direction: Direction) {
        self.cursor = self.cursor.saturating_add(direction.offset());
    }
}
