//! Session state for shells driving the tag operations.
//!
//! A shell owns one [`Session`] and forwards user actions to it. Each action
//! checks its precondition first; when it does not hold, the action returns
//! [`SessionError::Guidance`] with a message for the user instead of touching
//! the core. Failed actions leave the session exactly as it was.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::TagError;
use crate::extract::extract_tags_path;
use crate::frequency::{SortOrder, TagFrequency};
use crate::stopwords::{load_stop_words_path, LoadOptions, StopWordSet};
use crate::tagfile::save_tags;

/// Last transition taken by the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Idle,
    SourceSelected,
    StopWordsLoaded,
    TagsExtracted,
    Saved,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SessionState::Idle => "idle",
            SessionState::SourceSelected => "source selected",
            SessionState::StopWordsLoaded => "stop words loaded",
            SessionState::TagsExtracted => "tags extracted",
            SessionState::Saved => "saved",
        };
        f.write_str(s)
    }
}

/// Action attempted before its inputs were ready.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Guidance {
    NeedSourceAndStopWords,
    NeedTags,
}

impl fmt::Display for Guidance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Guidance::NeedSourceAndStopWords => {
                write!(f, "Please select a text file and load a stop words file.")
            }
            Guidance::NeedTags => write!(f, "No tags to save. Please extract tags first."),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("{0}")]
    Guidance(Guidance),
    #[error(transparent)]
    Io(#[from] TagError),
}

#[derive(Debug, Default)]
pub struct Session {
    source: Option<PathBuf>,
    stop_words: Option<StopWordSet>,
    tags: Option<TagFrequency>,
    state: SessionState,
    load_options: LoadOptions,
}

impl Session {
    pub fn new(load_options: LoadOptions) -> Self {
        Self {
            load_options,
            ..Self::default()
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn stop_words(&self) -> Option<&StopWordSet> {
        self.stop_words.as_ref()
    }

    pub fn tags(&self) -> Option<&TagFrequency> {
        self.tags.as_ref()
    }

    /// Choose the text to extract from. Stop words and tags already held are kept.
    /// The file is not opened until extraction.
    pub fn select_source(&mut self, path: impl Into<PathBuf>) {
        let path = path.into();
        tracing::info!(path = %path.display(), "text source selected");
        self.source = Some(path);
        self.state = SessionState::SourceSelected;
    }

    /// Load a stop-word list, replacing the current one.
    pub fn load_stop_words(&mut self, path: &Path) -> Result<&StopWordSet, SessionError> {
        let set = load_stop_words_path(path, self.load_options)?;
        tracing::info!(path = %path.display(), count = set.len(), "stop words loaded");
        self.state = SessionState::StopWordsLoaded;
        Ok(&*self.stop_words.insert(set))
    }

    /// Extract tags from the selected source, replacing any previous table.
    pub fn extract(&mut self) -> Result<&TagFrequency, SessionError> {
        let (Some(source), Some(stop_words)) = (&self.source, &self.stop_words) else {
            return Err(SessionError::Guidance(Guidance::NeedSourceAndStopWords));
        };
        let tags = extract_tags_path(source, stop_words)?;
        tracing::info!(
            path = %source.display(),
            distinct = tags.len(),
            "tags extracted"
        );
        self.state = SessionState::TagsExtracted;
        Ok(&*self.tags.insert(tags))
    }

    /// Save the current table to `path`. The table is kept, so saving again is allowed.
    pub fn save(&mut self, path: &Path, order: SortOrder) -> Result<(), SessionError> {
        let Some(tags) = &self.tags else {
            return Err(SessionError::Guidance(Guidance::NeedTags));
        };
        save_tags(path, tags, order)?;
        tracing::info!(path = %path.display(), "tags saved");
        self.state = SessionState::Saved;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    struct Fixture {
        dir: tempfile::TempDir,
    }

    impl Fixture {
        fn new() -> Self {
            let dir = tempfile::tempdir().unwrap();
            fs::write(dir.path().join("text.txt"), "The quick Fox.\nthe FOX jumps!\n").unwrap();
            fs::write(dir.path().join("stop.txt"), "the\n").unwrap();
            Self { dir }
        }

        fn path(&self, name: &str) -> PathBuf {
            self.dir.path().join(name)
        }
    }

    fn is_guidance(err: &SessionError, expected: Guidance) -> bool {
        matches!(err, SessionError::Guidance(g) if *g == expected)
    }

    #[test]
    fn full_session_walks_all_states() {
        let fx = Fixture::new();
        let mut session = Session::default();
        assert_eq!(session.state(), SessionState::Idle);

        session.select_source(fx.path("text.txt"));
        assert_eq!(session.state(), SessionState::SourceSelected);

        session.load_stop_words(&fx.path("stop.txt")).unwrap();
        assert_eq!(session.state(), SessionState::StopWordsLoaded);

        let tags = session.extract().unwrap();
        assert_eq!(tags.get("fox"), Some(2));
        assert_eq!(session.state(), SessionState::TagsExtracted);

        session.save(&fx.path("out.txt"), SortOrder::Alphabetical).unwrap();
        assert_eq!(session.state(), SessionState::Saved);
        assert_eq!(
            fs::read_to_string(fx.path("out.txt")).unwrap(),
            "fox: 2\njumps: 1\nquick: 1\n"
        );
    }

    #[test]
    fn extract_needs_source_and_stop_words() {
        let fx = Fixture::new();
        let mut session = Session::default();
        let err = session.extract().unwrap_err();
        assert!(is_guidance(&err, Guidance::NeedSourceAndStopWords));

        session.select_source(fx.path("text.txt"));
        let err = session.extract().unwrap_err();
        assert!(is_guidance(&err, Guidance::NeedSourceAndStopWords));
        assert_eq!(session.state(), SessionState::SourceSelected);
    }

    #[test]
    fn stop_words_first_then_source() {
        let fx = Fixture::new();
        let mut session = Session::default();
        session.load_stop_words(&fx.path("stop.txt")).unwrap();
        let err = session.extract().unwrap_err();
        assert!(is_guidance(&err, Guidance::NeedSourceAndStopWords));
        session.select_source(fx.path("text.txt"));
        assert!(session.extract().is_ok());
    }

    #[test]
    fn save_needs_tags() {
        let fx = Fixture::new();
        let mut session = Session::default();
        let err = session
            .save(&fx.path("out.txt"), SortOrder::Alphabetical)
            .unwrap_err();
        assert!(is_guidance(&err, Guidance::NeedTags));
        assert_eq!(err.to_string(), "No tags to save. Please extract tags first.");
        assert!(!fx.path("out.txt").exists());
    }

    #[test]
    fn failed_save_keeps_tags() {
        let fx = Fixture::new();
        let mut session = Session::default();
        session.select_source(fx.path("text.txt"));
        session.load_stop_words(&fx.path("stop.txt")).unwrap();
        session.extract().unwrap();

        let bad = fx.path("missing-dir").join("out.txt");
        let err = session.save(&bad, SortOrder::Alphabetical).unwrap_err();
        assert!(matches!(err, SessionError::Io(_)));
        assert_eq!(session.state(), SessionState::TagsExtracted);
        assert_eq!(session.tags().and_then(|t| t.get("fox")), Some(2));
    }

    #[test]
    fn failed_stop_word_load_keeps_previous_set() {
        let fx = Fixture::new();
        let mut session = Session::default();
        session.load_stop_words(&fx.path("stop.txt")).unwrap();
        let err = session.load_stop_words(&fx.path("nope.txt")).unwrap_err();
        assert!(matches!(err, SessionError::Io(_)));
        assert!(session.stop_words().unwrap().contains("the"));
        assert_eq!(session.state(), SessionState::StopWordsLoaded);
    }

    #[test]
    fn failed_extract_keeps_previous_tags() {
        let fx = Fixture::new();
        let mut session = Session::default();
        session.select_source(fx.path("text.txt"));
        session.load_stop_words(&fx.path("stop.txt")).unwrap();
        session.extract().unwrap();

        session.select_source(fx.path("gone.txt"));
        assert!(matches!(session.extract(), Err(SessionError::Io(_))));
        assert_eq!(session.tags().and_then(|t| t.get("quick")), Some(1));
        assert_eq!(session.state(), SessionState::SourceSelected);
    }

    #[test]
    fn new_source_retains_stop_words_and_tags() {
        let fx = Fixture::new();
        fs::write(fx.path("other.txt"), "lazy dog").unwrap();
        let mut session = Session::default();
        session.select_source(fx.path("text.txt"));
        session.load_stop_words(&fx.path("stop.txt")).unwrap();
        session.extract().unwrap();

        session.select_source(fx.path("other.txt"));
        assert!(session.stop_words().is_some());
        assert!(session.tags().is_some());
        let tags = session.extract().unwrap();
        assert_eq!(tags.get("dog"), Some(1));
        assert_eq!(tags.get("fox"), None);
    }
}
