//! `tagx extract <text>` – one-shot extraction.

use anyhow::{Context, Result};
use std::io::{self, Write};
use std::path::Path;
use tagx_core::config::TagxConfig;
use tagx_core::{
    extract_tags_path, load_stop_words_path, save_tags, write_tags, SortOrder, StopWordSet,
};

use super::report_unmatchable;

pub fn run_extract(
    cfg: &TagxConfig,
    text: &Path,
    stop_words: Option<&Path>,
    output: Option<&Path>,
    order: SortOrder,
) -> Result<()> {
    extract_to(
        cfg,
        text,
        stop_words,
        output,
        order,
        &mut io::stdout().lock(),
        &mut io::stderr().lock(),
    )
}

/// Listing (or save confirmation) goes to `out`, warnings to `err`.
pub(crate) fn extract_to<W: Write, E: Write>(
    cfg: &TagxConfig,
    text: &Path,
    stop_words: Option<&Path>,
    output: Option<&Path>,
    order: SortOrder,
    out: &mut W,
    err: &mut E,
) -> Result<()> {
    let stop_path = stop_words.or(cfg.default_stop_words.as_deref());
    let stop_words = match stop_path {
        Some(path) => {
            let set = load_stop_words_path(path, cfg.load_options())?;
            if cfg.warn_unmatchable_stop_words {
                report_unmatchable(err, &set, path)?;
            }
            set
        }
        None => {
            tracing::info!("no stop-word list given; counting every word");
            StopWordSet::new()
        }
    };

    let tags = extract_tags_path(text, &stop_words)?;
    tracing::info!(
        text = %text.display(),
        distinct = tags.len(),
        total = tags.total(),
        "extract"
    );

    match output {
        Some(path) => {
            save_tags(path, &tags, order)?;
            writeln!(out, "Saved {} tags to {}", tags.len(), path.display())
                .context("write to stdout")?;
        }
        None => write_tags(out, &tags, order)?,
    }
    Ok(())
}
