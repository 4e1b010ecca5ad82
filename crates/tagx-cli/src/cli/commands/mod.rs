//! CLI command handlers. Each command is in its own file.

mod completions;
mod extract;
mod shell;
mod show;
mod stop_words;

pub use completions::{run_completions, run_man};
pub use extract::run_extract;
pub use shell::run_shell;
pub use show::run_show;
pub use stop_words::run_stop_words;

use std::io::{self, Write};
use std::path::Path;
use tagx_core::StopWordSet;

/// Tell the user about stop words that can never match a tag.
/// Entries are lowercased but not stripped of punctuation, unlike tags.
pub(crate) fn report_unmatchable<W: Write>(
    out: &mut W,
    stop_words: &StopWordSet,
    path: &Path,
) -> io::Result<()> {
    let bad = stop_words.unmatchable();
    if bad.is_empty() {
        return Ok(());
    }
    tracing::warn!(
        path = %path.display(),
        count = bad.len(),
        "stop words with characters outside a-z never match"
    );
    writeln!(
        out,
        "warning: {} stop word(s) in {} contain characters other than a-z and will never match: {}",
        bad.len(),
        path.display(),
        bad.iter()
            .map(|w| format!("{w:?}"))
            .collect::<Vec<_>>()
            .join(", ")
    )
}
