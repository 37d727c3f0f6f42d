//! Pattern programs: compact painting instructions.
//!
//! A program is a list of words. Every word starts with an optional repeat
//! count followed by a body of single letter instructions:
//!
//! | token | meaning |
//! |-------|---------|
//! | `x<n>` `y<n>` | move the cursor to column / row `n` |
//! | `n<n>` `m<n>` | set the brush height / width |
//! | `h<n>` | hold tile `n` |
//! | `w` `a` `s` `d` | move the cursor up, left, down, right |
//! | `i` `j` `k` `l` | paint, then move up, left, down, right |
//! | `b` `f` | previous / next layer, wrapping around |
//! | `p` | paint at the cursor |
//!
//! `3sl` moves down and then paints and moves right, three times. A repeat
//! count of 0 skips the word without looking at its body, so `0z` is accepted.
//! The body is lexed lazily so instructions before an error have already run
//! when the error is reported.

use crate::{PatternErrorKind, Position, TileId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Left,
    Down,
    Right,
}

impl Direction {
    /// Cursor offset of a single step.
    pub fn offset(self) -> Position {
        match self {
            Direction::Up => Position::new(0, -1),
            Direction::Left => Position::new(-1, 0),
            Direction::Down => Position::new(0, 1),
            Direction::Right => Position::new(1, 0),
        }
    }
}

/// A single pattern instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternOp {
    SetCursorX(i32),
    SetCursorY(i32),
    SetBrushHeight(i32),
    SetBrushWidth(i32),
    Hold(TileId),
    Move(Direction),
    PaintThenMove(Direction),
    PreviousLayer,
    NextLayer,
    Paint,
}

/// Where in a word lexing failed and why.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenError {
    /// Byte offset into the word.
    pub position: usize,
    pub kind: PatternErrorKind,
}

impl TokenError {
    fn new(position: usize, kind: PatternErrorKind) -> Self {
        Self { position, kind }
    }
}

/// Reads the digits starting at `start`. Returns the value (`None` when it
/// overflows `u64`) and the offset after the last digit.
fn read_number(text: &str, start: usize) -> (Option<u64>, usize) {
    let digits = text.as_bytes()[start..].iter().take_while(|b| b.is_ascii_digit()).count();
    let end = start + digits;
    let value = text.as_bytes()[start..end]
        .iter()
        .try_fold(0u64, |acc, b| acc.checked_mul(10)?.checked_add(u64::from(b - b'0')));
    (value, end)
}

/// A word split into its repeat count and body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatternWord<'a> {
    text: &'a str,
    repeat: usize,
    body_start: usize,
}

impl<'a> PatternWord<'a> {
    /// Splits off the leading repeat count. Without digits the body runs once.
    pub fn parse(text: &'a str) -> Result<Self, TokenError> {
        let (value, body_start) = read_number(text, 0);
        let repeat = if body_start == 0 {
            1
        } else {
            value
                .and_then(|v| usize::try_from(v).ok())
                .ok_or(TokenError::new(0, PatternErrorKind::RepeatOverflow))?
        };
        Ok(Self { text, repeat, body_start })
    }

    pub fn repeat(&self) -> usize {
        self.repeat
    }

    pub fn body(&self) -> &'a str {
        &self.text[self.body_start..]
    }

    /// Lexes the body, positions are relative to the whole word.
    pub fn ops(&self) -> PatternLexer<'a> {
        PatternLexer {
            text: self.text,
            pos: self.body_start,
        }
    }
}

/// Iterator over the instructions of a word body, yielding each with the
/// offset of its letter. Stops after the first error.
#[derive(Debug, Clone)]
pub struct PatternLexer<'a> {
    text: &'a str,
    pos: usize,
}

impl PatternLexer<'_> {
    fn parameter(&mut self, letter: char, position: usize) -> Result<PatternOp, TokenError> {
        let (value, end) = read_number(self.text, self.pos);
        if end == self.pos {
            return Err(TokenError::new(position, PatternErrorKind::MissingNumber(letter)));
        }
        self.pos = end;

        let out_of_range = TokenError::new(position, PatternErrorKind::ValueOutOfRange(letter));
        let value = value.ok_or(out_of_range)?;
        let coordinate = || i32::try_from(value).map_err(|_| out_of_range);
        match letter {
            'x' => coordinate().map(PatternOp::SetCursorX),
            'y' => coordinate().map(PatternOp::SetCursorY),
            'n' | 'm' if value == 0 => Err(TokenError::new(position, PatternErrorKind::ZeroBrush(letter))),
            'n' => coordinate().map(PatternOp::SetBrushHeight),
            'm' => coordinate().map(PatternOp::SetBrushWidth),
            _ => TileId::try_from(value).map(PatternOp::Hold).map_err(|_| out_of_range),
        }
    }
}

impl Iterator for PatternLexer<'_> {
    type Item = Result<(usize, PatternOp), TokenError>;

    fn next(&mut self) -> Option<Self::Item> {
        let position = self.pos;
        let ch = self.text[position..].chars().next()?;
        self.pos += ch.len_utf8();

        let op = match ch {
            'x' | 'y' | 'n' | 'm' | 'h' => self.parameter(ch, position),
            'w' => Ok(PatternOp::Move(Direction::Up)),
            'a' => Ok(PatternOp::Move(Direction::Left)),
            's' => Ok(PatternOp::Move(Direction::Down)),
            'd' => Ok(PatternOp::Move(Direction::Right)),
            'i' => Ok(PatternOp::PaintThenMove(Direction::Up)),
            'j' => Ok(PatternOp::PaintThenMove(Direction::Left)),
            'k' => Ok(PatternOp::PaintThenMove(Direction::Down)),
            'l' => Ok(PatternOp::PaintThenMove(Direction::Right)),
            'b' => Ok(PatternOp::PreviousLayer),
            'f' => Ok(PatternOp::NextLayer),
            'p' => Ok(PatternOp::Paint),
            other => Err(TokenError::new(position, PatternErrorKind::UnknownToken(other))),
        };
        if op.is_err() {
            self.pos = self.text.len();
        }
        Some(op.map(|op| (position, op)))
    }
}
