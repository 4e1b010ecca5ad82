use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::frequency::SortOrder;
use crate::stopwords::LoadOptions;

/// Global configuration loaded from `~/.config/tagx/config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagxConfig {
    /// Trim whitespace around stop-word lines and skip blank ones.
    #[serde(default = "default_true")]
    pub trim_stop_words: bool,
    /// Listing order for printed and saved tables: "alphabetical" or "frequency".
    #[serde(default)]
    pub output_order: SortOrder,
    /// Stop-word list used when none is given on the command line.
    #[serde(default)]
    pub default_stop_words: Option<PathBuf>,
    /// Log a warning for stop words containing characters other than a-z.
    #[serde(default = "default_true")]
    pub warn_unmatchable_stop_words: bool,
}

fn default_true() -> bool {
    true
}

impl Default for TagxConfig {
    fn default() -> Self {
        Self {
            trim_stop_words: true,
            output_order: SortOrder::Alphabetical,
            default_stop_words: None,
            warn_unmatchable_stop_words: true,
        }
    }
}

impl TagxConfig {
    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            trim: self.trim_stop_words,
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("tagx")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<TagxConfig> {
    load_or_init_at(&config_path()?)
}

pub fn load_or_init_at(path: &Path) -> Result<TagxConfig> {
    if !path.exists() {
        let default_cfg = TagxConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml).with_context(|| format!("write config {}", path.display()))?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data =
        fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    let cfg: TagxConfig =
        toml::from_str(&data).with_context(|| format!("parse config {}", path.display()))?;
    Ok(cfg)
}
