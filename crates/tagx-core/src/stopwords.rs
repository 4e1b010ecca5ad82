//! Stop-word list loading.
//!
//! A list is plain text, one word per line. Every line is lowercased and
//! stored as-is; it is not punctuation-normalized the way tags are, so an
//! entry like `don't` can never match the tag `dont`. [`StopWordSet::unmatchable`]
//! reports such entries so the caller can warn about them.

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::{Result, TagError};
use crate::text::for_each_line;

/// How list lines are turned into entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadOptions {
    /// Trim surrounding whitespace and skip lines that end up blank.
    /// When false, every line is inserted exactly as read (lowercased).
    pub trim: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self { trim: true }
    }
}

/// Lowercase words excluded from tag counting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StopWordSet {
    words: HashSet<String>,
}

impl StopWordSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Entries that contain anything besides `a`-`z` and therefore never match a tag.
    /// Sorted for stable reporting.
    pub fn unmatchable(&self) -> Vec<&str> {
        let mut out: Vec<&str> = self
            .words
            .iter()
            .map(String::as_str)
            .filter(|w| w.is_empty() || !w.bytes().all(|b| b.is_ascii_lowercase()))
            .collect();
        out.sort_unstable();
        out
    }
}

impl<S: AsRef<str>> FromIterator<S> for StopWordSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            words: iter.into_iter().map(|w| w.as_ref().to_lowercase()).collect(),
        }
    }
}

/// Load a stop-word list with default options (trimmed).
pub fn load_stop_words<R: BufRead>(reader: R) -> Result<StopWordSet> {
    load_stop_words_with(reader, LoadOptions::default())
}

pub fn load_stop_words_with<R: BufRead>(reader: R, opts: LoadOptions) -> Result<StopWordSet> {
    let mut words = HashSet::new();
    for_each_line(reader, "stop words", |line| {
        let word = if opts.trim { line.trim() } else { line };
        if !(opts.trim && word.is_empty()) {
            words.insert(word.to_lowercase());
        }
        Ok(())
    })?;
    Ok(StopWordSet { words })
}

/// Open `path` and load it as a stop-word list. The file is closed before returning.
pub fn load_stop_words_path(path: &Path, opts: LoadOptions) -> Result<StopWordSet> {
    let file = File::open(path).map_err(|e| TagError::read(path.display().to_string(), e))?;
    let set = load_stop_words_with(BufReader::new(file), opts).map_err(|e| e.at_path(path))?;
    tracing::debug!(path = %path.display(), count = set.len(), "loaded stop words");
    Ok(set)
}
