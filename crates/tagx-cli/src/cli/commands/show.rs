//! `tagx show <path>` – print a saved tag listing.

use anyhow::Result;
use std::io;
use std::path::Path;
use tagx_core::{read_tags_path, write_tags, SortOrder};

pub fn run_show(path: &Path, order: SortOrder) -> Result<()> {
    let tags = read_tags_path(path)?;
    write_tags(io::stdout().lock(), &tags, order)?;
    Ok(())
}
