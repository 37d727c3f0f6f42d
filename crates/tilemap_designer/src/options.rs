use std::{fs, path::PathBuf};

use serde::{Deserialize, Serialize};
use tilemap_engine_edit::TileId;

pub const APP_NAME: &str = "tilemap_designer";
const OPTIONS_FILE: &str = "options.toml";

/// User settings read from `options.toml` in the configuration directory.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Options {
    /// Size of maps created from scratch.
    pub default_width: i32,
    pub default_height: i32,
    pub default_layers: usize,

    /// Symbol used for each tile when printing a layer, indexed by tile id.
    pub palette: String,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            default_width: 10,
            default_height: 10,
            default_layers: 1,
            palette: " 123456789abcdefghijklmnopqrstuvwxyz".to_string(),
        }
    }
}

impl Options {
    pub fn load_options() -> Self {
        let Some(config_dir) = Self::get_config_dir() else {
            return Self::default();
        };
        let options_file = config_dir.join(OPTIONS_FILE);
        if !options_file.exists() {
            return Self::default();
        }
        match fs::read_to_string(&options_file) {
            Ok(txt) => Self::from_toml(&txt),
            Err(err) => {
                log::error!("Error reading options file: {}", err);
                Self::default()
            }
        }
    }

    /// Parses the options, falling back to the defaults if the text is invalid.
    pub fn from_toml(txt: &str) -> Self {
        match toml::from_str(txt) {
            Ok(result) => result,
            Err(err) => {
                log::warn!("Ignoring invalid options file: {}", err);
                Self::default()
            }
        }
    }

    /// Returns the configuration directory path, creating it if needed.
    pub fn get_config_dir() -> Option<PathBuf> {
        let proj_dirs = directories::ProjectDirs::from("com", "GitHub", APP_NAME)?;
        let dir = proj_dirs.config_dir().to_path_buf();
        if !dir.exists() {
            if let Err(err) = fs::create_dir_all(&dir) {
                log::error!("Can't create configuration directory {:?}: {}", dir, err);
                return None;
            }
        }
        Some(dir)
    }

    /// The palette symbol for `tile`, `?` for tiles beyond the palette.
    pub fn symbol(&self, tile: TileId) -> char {
        self.palette.chars().nth(usize::from(tile)).unwrap_or('?')
    }

    pub fn tile_for_symbol(&self, symbol: char) -> Option<TileId> {
        self.palette.chars().position(|ch| ch == symbol).and_then(|idx| TileId::try_from(idx).ok())
    }
}
