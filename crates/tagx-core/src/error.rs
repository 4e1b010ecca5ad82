//! Error type shared by the tag operations.
//!
//! Reading a source and writing a destination are the only ways the core can
//! fail, so there is a single I/O kind. Empty input is not an error.

use std::fmt;
use std::io;
use std::path::Path;

/// Which side of the operation failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IoAction {
    Read,
    Write,
}

impl fmt::Display for IoAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IoAction::Read => write!(f, "read"),
            IoAction::Write => write!(f, "write"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TagError {
    /// Source unreadable or destination unwritable.
    #[error("failed to {action} {target}")]
    Io {
        action: IoAction,
        /// Path (or a short label for in-memory streams) the action was applied to.
        target: String,
        #[source]
        source: io::Error,
    },
}

impl TagError {
    pub(crate) fn read(target: impl Into<String>, source: io::Error) -> Self {
        TagError::Io {
            action: IoAction::Read,
            target: target.into(),
            source,
        }
    }

    pub(crate) fn write(target: impl Into<String>, source: io::Error) -> Self {
        TagError::Io {
            action: IoAction::Write,
            target: target.into(),
            source,
        }
    }

    /// Re-label an error produced by a stream-level call with the path it came from.
    pub(crate) fn at_path(self, path: &Path) -> Self {
        match self {
            TagError::Io { action, source, .. } => TagError::Io {
                action,
                target: path.display().to_string(),
                source,
            },
        }
    }

    pub fn action(&self) -> IoAction {
        match self {
            TagError::Io { action, .. } => *action,
        }
    }

    /// Kind of the underlying `io::Error`.
    pub fn kind(&self) -> io::ErrorKind {
        match self {
            TagError::Io { source, .. } => source.kind(),
        }
    }
}

pub type Result<T, E = TagError> = std::result::Result<T, E>;
