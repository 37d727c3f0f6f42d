use std::{fs, io, path::PathBuf};

use anyhow::Context;
use clap::Parser;
use flexi_logger::{Cleanup, Criterion, Duplicate, FileSpec, Logger, LoggerHandle, Naming};
use tilemap_engine_edit::{EditState, Size, TileGrid};

use crate::{
    commands::Flow,
    options::{Options, APP_NAME},
};

mod commands;
mod options;

#[derive(Parser)]
#[command(version, about = "Edit layered tile maps from the command line.")]
pub struct Cli {
    #[arg(help = "Map to edit, created with the default size if it does not exist")]
    map: Option<PathBuf>,

    #[arg(help = "Width of a newly created map", short = 'W', long)]
    width: Option<i32>,

    #[arg(help = "Height of a newly created map", short = 'H', long)]
    height: Option<i32>,

    #[arg(help = "Layer count of a newly created map", short, long)]
    layers: Option<usize>,

    #[arg(help = "Command to run instead of reading from stdin, may be repeated", short = 'c', long = "command", value_name = "COMMAND")]
    commands: Vec<String>,

    #[arg(help = "File with one command per line to run after --command", long, value_name = "FILE")]
    script: Option<PathBuf>,

    #[arg(help = "Don't save the map after running commands or a script", long, default_value_t = false)]
    no_save: bool,

    #[arg(help = "Log debug output", short, long, default_value_t = false)]
    verbose: bool,
}

impl Cli {
    fn is_batch(&self) -> bool {
        !self.commands.is_empty() || self.script.is_some()
    }
}

fn start_logger(verbose: bool) -> Option<LoggerHandle> {
    let Some(log_dir) = Options::get_config_dir() else {
        eprintln!("Failed to create log file");
        return None;
    };
    let spec = if verbose { "debug" } else { "info" };
    let duplicate = if verbose { Duplicate::Debug } else { Duplicate::Warn };
    let logger = Logger::try_with_env_or_str(spec)
        .and_then(|logger| {
            logger
                .log_to_file(FileSpec::default().directory(&log_dir).basename(APP_NAME).suffix("log").suppress_timestamp())
                .rotate(Criterion::Size(64 * 1024), Naming::Numbers, Cleanup::KeepLogFiles(3))
                .duplicate_to_stderr(duplicate)
                .start()
        });
    match logger {
        Ok(handle) => Some(handle),
        Err(err) => {
            eprintln!("Failed to start logger: {err}");
            None
        }
    }
}

/// Loads the map named on the command line, creating it when the file does not exist yet.
fn open_map(cli: &Cli, options: &Options) -> anyhow::Result<EditState> {
    let size = Size::new(cli.width.unwrap_or(options.default_width), cli.height.unwrap_or(options.default_height));
    let layers = cli.layers.unwrap_or(options.default_layers);

    let Some(path) = &cli.map else {
        return Ok(EditState::new(size, layers)?);
    };
    if path.exists() {
        let grid = TileGrid::load(path).with_context(|| format!("loading {}", path.display()))?;
        log::info!("editing {} ({}, {} layers)", path.display(), grid.size(), grid.layer_count());
        return Ok(EditState::from_grid(grid));
    }

    let mut state = EditState::new(size, layers)?;
    state.save(Some(path.as_path())).with_context(|| format!("creating {}", path.display()))?;
    log::info!("created {} ({size}, {layers} layers)", path.display());
    Ok(state)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _logger = start_logger(cli.verbose);

    let options = Options::load_options();
    let mut state = open_map(&cli, &options)?;
    let mut out = io::stdout().lock();

    if !cli.is_batch() {
        return commands::run_interactive(&mut state, &options, io::stdin().lock(), &mut out);
    }

    let mut flow = Flow::Continue;
    for (number, command) in cli.commands.iter().enumerate() {
        flow = commands::execute(&mut state, &options, command, &mut out).with_context(|| format!("command {}: '{command}'", number + 1))?;
        if flow == Flow::Quit {
            break;
        }
    }
    if flow == Flow::Continue {
        if let Some(script) = &cli.script {
            let text = fs::read_to_string(script).with_context(|| format!("reading script {}", script.display()))?;
            commands::run_script(&mut state, &options, &text, &mut out)?;
        }
    }

    if !cli.no_save && state.get_grid().source_path().is_some() {
        state.save(None)?;
    }
    Ok(())
}
