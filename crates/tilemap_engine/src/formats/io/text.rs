//! Text map format (`map:` header followed by comma terminated tile rows).

use std::fmt::Write;

use crate::{grid::cell_count, CellError, HeaderError, HeaderField, Result, Size, TileGrid, TileId, TileMapError};

pub const MAP_KEYWORD: &str = "map:";

/// How many bytes of unexpected trailing content end up in the error.
const TRAILING_SNIPPET_LEN: usize = 10;

pub(crate) fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r')
}

/// Byte scanner with a single byte of lookahead.
struct Scanner<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Scanner<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn peek(&self) -> Option<u8> {
        self.data.get(self.pos).copied()
    }

    fn is_eof(&self) -> bool {
        self.pos >= self.data.len()
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(is_whitespace) {
            self.pos += 1;
        }
    }

    /// Consumes `token` if the input continues with it.
    fn expect(&mut self, token: &str) -> bool {
        if self.data[self.pos..].starts_with(token.as_bytes()) {
            self.pos += token.len();
            true
        } else {
            false
        }
    }

    /// Reads a run of ASCII digits. Values beyond `u64` saturate, the digits
    /// are consumed either way.
    fn uint(&mut self) -> Option<u64> {
        if !self.peek().is_some_and(|b| b.is_ascii_digit()) {
            return None;
        }
        let mut value: u64 = 0;
        while let Some(b) = self.peek().filter(u8::is_ascii_digit) {
            value = value.saturating_mul(10).saturating_add(u64::from(b - b'0'));
            self.pos += 1;
        }
        Some(value)
    }

    fn snippet(&self) -> String {
        let end = (self.pos + TRAILING_SNIPPET_LEN).min(self.data.len());
        String::from_utf8_lossy(&self.data[self.pos..end]).into_owned()
    }
}

fn header_value(scanner: &mut Scanner, field: HeaderField, max: u64) -> Result<u64> {
    scanner.skip_whitespace();
    if !scanner.expect(field.keyword()) {
        return Err(HeaderError::MissingKeyword(field).into());
    }
    scanner.skip_whitespace();
    match scanner.uint() {
        None => Err(HeaderError::MissingValue(field).into()),
        Some(value) if value == 0 || value > max => Err(HeaderError::InvalidValue { field, value }.into()),
        Some(value) => Ok(value),
    }
}

/// Parses the text format.
///
/// The grid is only built once the whole input has been validated.
pub fn parse_map(data: &[u8]) -> Result<TileGrid> {
    let mut scanner = Scanner::new(data);
    scanner.skip_whitespace();
    if !scanner.expect(MAP_KEYWORD) {
        return Err(HeaderError::MissingMapKeyword.into());
    }

    let width = header_value(&mut scanner, HeaderField::Width, i32::MAX as u64)?;
    let height = header_value(&mut scanner, HeaderField::Height, i32::MAX as u64)?;
    let layer_count = header_value(&mut scanner, HeaderField::Layers, u32::MAX as u64)? as usize;

    let size = Size::new(width as i32, height as i32);
    let Some(cells) = cell_count(size) else {
        return Err(HeaderError::InvalidValue {
            field: HeaderField::Height,
            value: height,
        }
        .into());
    };

    // every tile takes at least two bytes, so the input bounds any sane allocation
    let capacity = cells.min(data.len() / 2 + 1);
    let mut layers = Vec::with_capacity(layer_count.min(capacity));
    for layer in 0..layer_count {
        let mut tiles: Vec<TileId> = Vec::with_capacity(capacity);
        for i in 0..cells {
            let x = (i % width as usize) as i32;
            let y = (i / width as usize) as i32;

            scanner.skip_whitespace();
            let Some(value) = scanner.uint() else {
                return Err(TileMapError::MalformedCell {
                    x,
                    y,
                    layer,
                    kind: CellError::MissingTile,
                });
            };
            let Ok(tile) = TileId::try_from(value) else {
                return Err(TileMapError::ValueOverflow { x, y, layer, value });
            };
            tiles.push(tile);

            scanner.skip_whitespace();
            if !scanner.expect(",") {
                return Err(TileMapError::MalformedCell {
                    x,
                    y,
                    layer,
                    kind: CellError::MissingSeparator,
                });
            }
        }
        layers.push(tiles);
    }

    scanner.skip_whitespace();
    if !scanner.is_eof() {
        return Err(TileMapError::TrailingContent { snippet: scanner.snippet() });
    }

    Ok(TileGrid::from_layers(size, layers))
}

/// Serializes a grid in the text format, every tile padded to three columns.
pub fn write_map(grid: &TileGrid) -> String {
    let width = grid.width() as usize;
    let mut result = String::new();
    let _ = write!(
        result,
        "{MAP_KEYWORD}\nwidth: {}\nheight: {}\nlayers: {}\n\n",
        grid.width(),
        grid.height(),
        grid.layer_count()
    );

    for k in 0..grid.layer_count() {
        let Some(layer) = grid.layer(k) else {
            continue;
        };
        for row in layer.chunks(width) {
            result.push_str("   ");
            for tile in row {
                let _ = write!(result, " {tile:3},");
            }
            result.push('\n');
        }
        result.push_str("\n\n");
    }
    result
}
