//! Tag frequency table.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Order in which a table is listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// By tag, `a` to `z`.
    #[default]
    Alphabetical,
    /// By count, highest first; equal counts by tag.
    Frequency,
}

/// Mapping from tag to occurrence count. Iterates by tag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagFrequency {
    counts: BTreeMap<String, u64>,
}

impl TagFrequency {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one more occurrence of `tag`.
    pub fn increment(&mut self, tag: &str) {
        match self.counts.get_mut(tag) {
            Some(n) => *n += 1,
            None => {
                self.counts.insert(tag.to_owned(), 1);
            }
        }
    }

    pub fn get(&self, tag: &str) -> Option<u64> {
        self.counts.get(tag).copied()
    }

    /// Number of distinct tags.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> + '_ {
        self.counts.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Entries listed in `order`.
    pub fn entries(&self, order: SortOrder) -> Vec<(&str, u64)> {
        let mut out: Vec<(&str, u64)> = self.iter().collect();
        if order == SortOrder::Frequency {
            // Stable sort keeps the alphabetical order among equal counts.
            out.sort_by(|a, b| b.1.cmp(&a.1));
        }
        out
    }

    pub(crate) fn insert(&mut self, tag: String, count: u64) {
        self.counts.insert(tag, count);
    }
}

impl<S: Into<String>> FromIterator<(S, u64)> for TagFrequency {
    fn from_iter<I: IntoIterator<Item = (S, u64)>>(iter: I) -> Self {
        Self {
            counts: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}
