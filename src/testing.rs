//! Testing utilities for mtm
//!
//! This module provides helper types and functions for writing tests,
//! including a `TestDb` wrapper for temporary database management and a
//! scripted `TagPrompt`.
//!
//! Only available when compiled with `cfg(test)`.

use std::collections::VecDeque;
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::TempDir;

use crate::db::Database;
use crate::prompt::{PromptError, TagPrompt};

/// Wrapper for a temporary test database that cleans up on drop
///
/// The database lives in its own temporary directory, so parallel tests never
/// share state.
pub struct TestDb {
    // Field order matters: the database must be dropped before its directory.
    db: Database,
    dir: TempDir,
}

impl TestDb {
    /// Create a new empty test database
    ///
    /// # Panics
    /// Panics if the temporary directory or database cannot be created.
    #[must_use]
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let db = Database::open(dir.path().join("index")).expect("Failed to open test database");
        Self { db, dir }
    }

    /// Get a reference to the underlying database
    #[must_use]
    pub const fn db(&self) -> &Database {
        &self.db
    }

    /// Get the directory holding the test database
    #[must_use]
    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}

/// Create a test file with default content
///
/// # Errors
/// Returns an `io::Error` if the file cannot be created or written.
pub fn create_test_file(path: impl AsRef<Path>) -> std::io::Result<()> {
    create_test_file_with_content(path, b"test content")
}

/// Create a test file with custom content
///
/// # Errors
/// Returns an `io::Error` if the file cannot be created or written.
pub fn create_test_file_with_content(path: impl AsRef<Path>, content: &[u8]) -> std::io::Result<()> {
    let mut file = fs::File::create(path)?;
    file.write_all(content)?;
    Ok(())
}

/// Temporary folder pre-populated with empty-ish files
///
/// # Panics
/// Panics if the directory or any file cannot be created.
#[must_use]
pub fn folder_with(names: &[&str]) -> TempDir {
    let dir = TempDir::new().expect("Failed to create temp dir");
    for name in names {
        create_test_file(dir.path().join(name)).expect("Failed to create fixture file");
    }
    dir
}

/// `TagPrompt` that replays canned answers and records what it was asked
#[derive(Debug, Default)]
pub struct ScriptedPrompt {
    answers: VecDeque<String>,
    pub asked: Vec<String>,
}

impl ScriptedPrompt {
    #[must_use]
    pub fn new(answers: &[&str]) -> Self {
        Self {
            answers: answers.iter().map(|a| (*a).to_string()).collect(),
            asked: Vec::new(),
        }
    }
}

impl TagPrompt for ScriptedPrompt {
    fn ask(&mut self, subject: &str) -> Result<String, PromptError> {
        self.asked.push(subject.to_string());
        self.answers.pop_front().ok_or(PromptError::Unavailable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_db_basic() {
        let test_db = TestDb::new();
        assert_eq!(test_db.db().count_file_tags(), 0);
        assert!(test_db.path().exists());
    }

    #[test]
    fn test_db_cleanup() {
        let path = {
            let test_db = TestDb::new();
            test_db.path().to_path_buf()
        };
        assert!(!path.exists());
    }

    #[test]
    fn test_create_test_file_with_custom_content() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("custom.txt");
        create_test_file_with_content(&path, b"custom test data").unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"custom test data");
    }

    #[test]
    fn test_folder_with() {
        let dir = folder_with(&["a.txt", "b.txt"]);
        assert!(dir.path().join("a.txt").exists());
        assert!(dir.path().join("b.txt").exists());
    }

    #[test]
    fn test_scripted_prompt() {
        let mut prompt = ScriptedPrompt::new(&["one"]);
        assert_eq!(prompt.ask("a").unwrap(), "one");
        assert!(prompt.ask("b").is_err());
        assert_eq!(prompt.asked, vec!["a", "b"]);
    }
}
