//! `tagx stop-words <path>` – load a stop-word list and report on it.

use anyhow::Result;
use std::io::{self, Write};
use std::path::Path;
use tagx_core::config::TagxConfig;
use tagx_core::load_stop_words_path;

use super::report_unmatchable;

pub fn run_stop_words(cfg: &TagxConfig, path: &Path) -> Result<()> {
    report_to(cfg, path, &mut io::stdout().lock())
}

/// Unmatchable entries are listed unless `warn_unmatchable_stop_words` is off.
fn report_to<W: Write>(cfg: &TagxConfig, path: &Path, out: &mut W) -> Result<()> {
    let stop_words = load_stop_words_path(path, cfg.load_options())?;
    writeln!(out, "{} stop words in {}", stop_words.len(), path.display())?;
    if cfg.warn_unmatchable_stop_words {
        report_unmatchable(out, &stop_words, path)?;
    }
    Ok(())
}
