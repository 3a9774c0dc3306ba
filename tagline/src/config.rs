use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use dirs::config_dir;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::palette::{Palette, PaletteError, StyleEntry};

pub const PALETTE_PATH_ENV: &str = "TAGLINE_PALETTE_PATH";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config directory unavailable")]
    MissingConfigDir,
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serde(#[from] serde_json::Error),
    #[error(transparent)]
    Palette(#[from] PaletteError),
}

/// On-disk palette override.
#[derive(Debug, Serialize, Deserialize)]
pub struct PaletteFile {
    pub entries: Vec<StyleEntry>,
}

pub fn palette_path() -> Result<PathBuf, ConfigError> {
    if let Ok(custom) = env::var(PALETTE_PATH_ENV) {
        return Ok(PathBuf::from(custom));
    }
    let base = config_dir().ok_or(ConfigError::MissingConfigDir)?;
    Ok(base.join("tagline").join("palette.json"))
}

pub fn load_palette() -> Result<Palette, ConfigError> {
    let path = palette_path()?;
    load_palette_from_path(path)
}

/// Reads a palette override. A missing file yields the built-in palette; an
/// empty or invalid entry list is an error.
pub fn load_palette_from_path<P: AsRef<Path>>(path: P) -> Result<Palette, ConfigError> {
    let path = path.as_ref();
    match fs::read_to_string(path) {
        Ok(contents) => {
            let file: PaletteFile = serde_json::from_str(&contents)?;
            let palette = Palette::new(file.entries)?;
            debug!(path = %path.display(), entries = palette.len(), "loaded palette override");
            Ok(palette)
        }
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "no palette override, using built-in palette");
            Ok(Palette::default())
        }
        Err(err) => Err(err.into()),
    }
}

pub fn save_palette_to_path<P: AsRef<Path>>(
    palette: &Palette,
    path: P,
) -> Result<(), ConfigError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let file = PaletteFile {
        entries: palette.entries().to_vec(),
    };

    let data = serde_json::to_vec_pretty(&file)?;
    fs::write(path, data)?;
    Ok(())
}
