//! Tag frequency extraction.
//!
//! Three operations make up the core: [`load_stop_words`], [`extract_tags`]
//! and [`write_tags`] (plus path-based variants). [`session::Session`] wraps
//! them with the ordering rules a shell needs.

pub mod config;
pub mod error;
pub mod extract;
pub mod frequency;
pub mod logging;
pub mod session;
pub mod stopwords;
pub mod tagfile;

mod text;

pub use error::{IoAction, TagError};
pub use extract::{extract_tags, extract_tags_path};
pub use frequency::{SortOrder, TagFrequency};
pub use stopwords::{load_stop_words, load_stop_words_path, LoadOptions, StopWordSet};
pub use tagfile::{read_tags, read_tags_path, save_tags, write_tags};
