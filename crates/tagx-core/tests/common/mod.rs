//! On-disk fixtures for integration tests.

use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Temp directory holding the files of one test.
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    /// Write `lines` joined with `\n` (with a trailing newline when non-empty).
    pub fn lines(&self, name: &str, lines: &[&str]) -> PathBuf {
        let mut body = lines.join("\n");
        if !lines.is_empty() {
            body.push('\n');
        }
        self.raw(name, body.as_bytes())
    }

    pub fn raw(&self, name: &str, bytes: &[u8]) -> PathBuf {
        let path = self.path(name);
        fs::write(&path, bytes).unwrap();
        path
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }
}
