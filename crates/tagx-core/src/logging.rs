//! Tracing setup for the `tagx` binary.
//!
//! Events go to an append-only log file in the XDG state directory. When that
//! file cannot be opened the binary logs warnings to stderr instead.

use anyhow::{Context, Result};
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// `RUST_LOG` overrides both defaults.
fn filter_or(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

/// `~/.local/state/tagx/tagx.log`, creating the directory.
pub fn log_path() -> Result<PathBuf> {
    let dirs = xdg::BaseDirectories::with_prefix("tagx")?;
    dirs.place_state_file("tagx.log")
        .context("create log directory")
}

fn open_log(path: &Path) -> Result<File> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)
            .with_context(|| format!("create log directory {}", dir.display()))?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open log {}", path.display()))
}

/// Log to [`log_path`] at debug level for tagx crates.
/// Errors leave no subscriber installed, so the caller may fall back to stderr.
pub fn init_logging() -> Result<()> {
    let path = log_path()?;
    let file = open_log(&path)?;
    tracing_subscriber::fmt()
        .with_env_filter(filter_or("info,tagx_core=debug,tagx=debug"))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("install log subscriber: {e}"))?;
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        path = %path.display(),
        "logging started"
    );
    Ok(())
}

/// Warnings and errors only, on stderr.
pub fn init_logging_stderr() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter_or("warn"))
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .try_init();
}
