use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use pmo_core::extensions::Extensions;
use serde::Deserialize;

pub const DEFAULT_CONFIG_FILE: &str = "pmo.json";

/// JSON configuration file, same shape as the directories/extensions/settings
/// sections the engine options are built from. Every field is optional;
/// command-line flags override.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub directories: Directories,
    pub extensions: ExtensionSets,
    pub settings: Settings,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Directories {
    pub source_dir: Option<PathBuf>,
    pub target_dir: Option<PathBuf>,
    pub fix_dir: Option<PathBuf>,
    pub root_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ExtensionSets {
    pub image: Vec<String>,
    pub video: Vec<String>,
}

impl ExtensionSets {
    /// Configured sets, or the built-in defaults when the file names none.
    pub fn to_extensions(&self) -> Extensions {
        if self.image.is_empty() && self.video.is_empty() {
            Extensions::default_media()
        } else {
            Extensions::new(self.image.iter().cloned(), self.video.iter().cloned())
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub dry_run: bool,
    pub size_threshold_mb: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            dry_run: true,
            size_threshold_mb: 0.5,
        }
    }
}

/// Load the configuration. An explicitly given path must exist; the default
/// `pmo.json` is optional and falls back to built-in defaults.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => read_config(path),
        None => {
            let default = Path::new(DEFAULT_CONFIG_FILE);
            if default.exists() {
                read_config(default)
            } else {
                Ok(Config::default())
            }
        }
    }
}

fn read_config(path: &Path) -> Result<Config> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("cannot read config file: {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("malformed config file: {}", path.display()))
}
