//! Tag extraction: tokenize, normalize, drop stop words, count.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::{Result, TagError};
use crate::frequency::TagFrequency;
use crate::stopwords::StopWordSet;
use crate::text::for_each_line;

/// Separators between word candidates: space, tab, LF, VT, FF, CR.
fn is_separator(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\u{0b}' | '\u{0c}' | '\r')
}

/// Whitespace-delimited candidates of one line. Runs of separators and
/// leading/trailing separators produce no empty candidates.
pub fn candidates(line: &str) -> impl Iterator<Item = &str> {
    line.split(is_separator).filter(|w| !w.is_empty())
}

/// Lowercase `word`, then keep only `a`-`z`. Digits, punctuation and
/// non-ASCII letters are removed, not replaced.
pub fn normalize(word: &str) -> String {
    word.to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase())
        .collect()
}

/// Count the tags of every line in `reader`.
pub fn extract_tags<R: BufRead>(reader: R, stop_words: &StopWordSet) -> Result<TagFrequency> {
    let mut tags = TagFrequency::new();
    for_each_line(reader, "text", |line| {
        for word in candidates(line) {
            let tag = normalize(word);
            if tag.is_empty() || stop_words.contains(&tag) {
                continue;
            }
            tags.increment(&tag);
        }
        Ok(())
    })?;
    Ok(tags)
}

/// Open `path` and extract its tags. The file is closed before returning.
pub fn extract_tags_path(path: &Path, stop_words: &StopWordSet) -> Result<TagFrequency> {
    let file = File::open(path).map_err(|e| TagError::read(path.display().to_string(), e))?;
    let tags = extract_tags(BufReader::new(file), stop_words).map_err(|e| e.at_path(path))?;
    tracing::debug!(
        path = %path.display(),
        distinct = tags.len(),
        total = tags.total(),
        "extracted tags"
    );
    Ok(tags)
}
