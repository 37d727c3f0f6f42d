//! Console commands: one command per line, arguments separated by whitespace.

use std::{
    io::{BufRead, Write},
    path::Path,
    str::FromStr,
};

use anyhow::Context;
use thiserror::Error;
use tilemap_engine_edit::{EditState, TileMapError};

use crate::options::Options;

const HELP: &str = "\
hold <tile>              hold a tile
holds <symbol>           hold the tile shown as <symbol>
place <x> <y>            paint the held tile with the pencil at (x, y)
pencil <w> <h>           set the pencil size used by place, copy and paste
copy <x> <y>             remember (x, y) as the copy source, cp is equivalent
paste <x> <y>            paste the pencil sized block from the copy source
check <x> <y>            list the tiles of every layer at (x, y)
new <w> <h>              resize the map
newlayer                 insert an empty layer at the current layer
dellayer [layers...]     delete the given layers or the current one
swaplayers <a> <b>       swap two layers
layer <layer>            select the layer to edit
pattern <words...>       run a pattern program
save [path]              save the map, to its own file without a path
load [path]              load a map, reload without a path
show [layer]             print a layer using the palette
info                     show the editor state
help                     show this message
exit                     leave the designer, quit, q and e are equivalent";

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("unknown command '{0}', try 'help'")]
    Unknown(String),

    #[error("{command} expects {expected} arguments, got {got}")]
    ArgumentCount { command: String, expected: &'static str, got: usize },

    #[error("{command} argument {index} expects {expected}, got '{value}'")]
    InvalidArgument {
        command: String,
        index: usize,
        expected: &'static str,
        value: String,
    },

    #[error("no tile has symbol '{0}'")]
    UnknownSymbol(char),

    #[error(transparent)]
    Map(#[from] TileMapError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// What the caller should do after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

struct Arguments<'a> {
    words: Vec<&'a str>,
}

impl<'a> Arguments<'a> {
    fn command(&self) -> &'a str {
        self.words[0]
    }

    fn len(&self) -> usize {
        self.words.len() - 1
    }

    fn rest(&self) -> &[&'a str] {
        &self.words[1..]
    }

    fn expect(&self, count: usize, expected: &'static str) -> Result<(), CommandError> {
        if self.len() == count {
            Ok(())
        } else {
            Err(CommandError::ArgumentCount {
                command: self.command().to_string(),
                expected,
                got: self.len(),
            })
        }
    }

    fn expect_at_most(&self, count: usize, expected: &'static str) -> Result<(), CommandError> {
        if self.len() <= count {
            Ok(())
        } else {
            self.expect(count, expected)
        }
    }

    /// Parses argument `index` (1 based).
    fn get<T: FromStr>(&self, index: usize, expected: &'static str) -> Result<T, CommandError> {
        let value = self.words[index];
        value.parse().map_err(|_| CommandError::InvalidArgument {
            command: self.command().to_string(),
            index,
            expected,
            value: value.to_string(),
        })
    }

    fn position(&self) -> Result<(i32, i32), CommandError> {
        self.expect(2, "2")?;
        Ok((self.get(1, "an integer")?, self.get(2, "an integer")?))
    }

    fn optional_path(&self) -> Result<Option<&'a Path>, CommandError> {
        self.expect_at_most(1, "0 or 1")?;
        Ok(self.words.get(1).map(|word| Path::new(*word)))
    }
}

/// Runs a single command line. Blank lines and `#` comments do nothing.
pub fn execute(state: &mut EditState, options: &Options, line: &str, out: &mut impl Write) -> Result<Flow, CommandError> {
    let line = line.split('#').next().unwrap_or_default();
    let words: Vec<&str> = line.split_whitespace().collect();
    if words.is_empty() {
        return Ok(Flow::Continue);
    }
    let args = Arguments { words };

    match args.command() {
        "hold" => {
            args.expect(1, "1")?;
            state.set_held_tile(args.get(1, "a tile between 0 and 255")?);
        }
        "holds" => {
            args.expect(1, "1")?;
            let mut chars = args.words[1].chars();
            let (Some(symbol), None) = (chars.next(), chars.next()) else {
                return Err(CommandError::InvalidArgument {
                    command: args.command().to_string(),
                    index: 1,
                    expected: "a single character",
                    value: args.words[1].to_string(),
                });
            };
            let tile = options.tile_for_symbol(symbol).ok_or(CommandError::UnknownSymbol(symbol))?;
            state.set_held_tile(tile);
        }
        "place" => {
            let pos = args.position()?;
            state.paint(state.get_held_tile(), pos);
        }
        "pencil" => {
            args.expect(2, "2")?;
            state.set_brush((args.get::<i32>(1, "a positive integer")?, args.get::<i32>(2, "a positive integer")?))?;
        }
        "copy" | "cp" => state.copy(args.position()?),
        "paste" => state.paste(args.position()?)?,
        "check" => {
            let (x, y) = args.position()?;
            check(state, (x, y), out)?;
        }
        "new" => {
            args.expect(2, "2")?;
            state.resize((args.get::<i32>(1, "a positive integer")?, args.get::<i32>(2, "a positive integer")?))?;
        }
        "newlayer" => {
            args.expect(0, "0")?;
            state.new_layer();
        }
        "dellayer" => {
            let layers = (1..=args.len()).map(|i| args.get(i, "a layer index")).collect::<Result<Vec<usize>, _>>()?;
            state.delete_layers(&layers)?;
        }
        "swaplayers" => {
            args.expect(2, "2")?;
            state.swap_layers(args.get(1, "a layer index")?, args.get(2, "a layer index")?)?;
        }
        "layer" => {
            args.expect(1, "1")?;
            state.select_layer(args.get(1, "a layer index")?)?;
        }
        "pattern" => state.run_pattern(args.rest())?,
        "save" => {
            state.save(args.optional_path()?)?;
            if let Some(path) = state.get_grid().source_path() {
                writeln!(out, "saved {}", path.display())?;
            }
        }
        "load" => {
            state.load(args.optional_path()?)?;
            if let Some(path) = state.get_grid().source_path() {
                writeln!(out, "loaded {}", path.display())?;
            }
        }
        "show" => {
            args.expect_at_most(1, "0 or 1")?;
            let layer = if args.len() == 1 {
                args.get(1, "a layer index")?
            } else {
                state.get_current_layer()
            };
            show(state, options, layer, out)?;
        }
        "info" => {
            args.expect(0, "0")?;
            info(state, out)?;
        }
        "help" => writeln!(out, "{HELP}")?,
        "exit" | "quit" | "q" | "e" => return Ok(Flow::Quit),
        other => return Err(CommandError::Unknown(other.to_string())),
    }
    Ok(Flow::Continue)
}

fn check(state: &EditState, pos: (i32, i32), out: &mut impl Write) -> Result<(), CommandError> {
    let (x, y) = pos;
    if !state.get_grid().rectangle().is_inside(pos) {
        writeln!(out, "({x}, {y}) is outside the map")?;
        return Ok(());
    }
    let tiles = state.tiles_at(pos);
    if tiles.is_empty() {
        writeln!(out, "({x}, {y}) is empty on every layer")?;
    }
    for (layer, tile) in tiles {
        writeln!(out, "({x}, {y}) layer {layer}: tile {tile}")?;
    }
    Ok(())
}

fn show(state: &EditState, options: &Options, layer: usize, out: &mut impl Write) -> Result<(), CommandError> {
    let grid = state.get_grid();
    let Some(tiles) = grid.layer(layer) else {
        return Err(TileMapError::InvalidLayerIndex {
            layer,
            layer_count: grid.layer_count(),
        }
        .into());
    };
    for row in tiles.chunks(grid.width() as usize) {
        let line: String = row.iter().map(|&tile| options.symbol(tile)).collect();
        writeln!(out, "|{line}|")?;
    }
    Ok(())
}

fn info(state: &EditState, out: &mut impl Write) -> Result<(), CommandError> {
    let grid = state.get_grid();
    let path = grid.source_path().map_or_else(|| "<unsaved>".to_string(), |path| path.display().to_string());
    writeln!(out, "map: {path}    size = {}", grid.size())?;
    writeln!(out, "layer: {} / {}", state.get_current_layer(), grid.layer_count() - 1)?;
    writeln!(out, "pencil = {}    held tile = {}", state.get_brush(), state.get_held_tile())?;
    match state.get_copy_anchor() {
        Some(anchor) => writeln!(out, "copy = {anchor}")?,
        None => writeln!(out, "copy = none")?,
    }
    writeln!(out, "cursor = {}", state.get_cursor())?;
    Ok(())
}

/// Runs every line of a script, stopping at the first failing command.
pub fn run_script(state: &mut EditState, options: &Options, script: &str, out: &mut impl Write) -> anyhow::Result<Flow> {
    for (number, line) in script.lines().enumerate() {
        let flow = execute(state, options, line, out).with_context(|| format!("line {}: '{}'", number + 1, line.trim()))?;
        if flow == Flow::Quit {
            return Ok(Flow::Quit);
        }
    }
    Ok(Flow::Continue)
}

/// Reads commands until end of input or `exit`. Failing commands are
/// logged and do not end the session.
pub fn run_interactive(state: &mut EditState, options: &Options, input: impl BufRead, out: &mut impl Write) -> anyhow::Result<()> {
    write!(out, "> ")?;
    out.flush()?;
    for line in input.lines() {
        let line = line.context("reading command")?;
        match execute(state, options, &line, out) {
            Ok(Flow::Quit) => return Ok(()),
            Ok(Flow::Continue) => {}
            Err(err) => {
                log::error!("{err}");
                writeln!(out, "error: {err}")?;
            }
        }
        write!(out, "> ")?;
        out.flush()?;
    }
    writeln!(out)?;
    Ok(())
}
