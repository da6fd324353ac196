use std::path::{Path, PathBuf};

use super::error::ScanError;

/// One immediate child of a scanned directory
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ScanEntry {
    /// Absolute path of the entry
    pub path: PathBuf,
    /// File name as displayed and as stored in the index
    pub name: String,
    /// True for anything that is not a regular file
    pub is_dir: bool,
}

/// Lists the immediate children of a directory
pub trait EntryScanner {
    /// List non-hidden children of `dir`, optionally keeping only names that
    /// contain a case variant of `search_word`.
    ///
    /// Every call re-reads the directory.
    ///
    /// # Errors
    /// Returns `ScanError` if the directory cannot be read.
    fn list_entries(&self, dir: &Path, search_word: Option<&str>) -> Result<Vec<ScanEntry>, ScanError>;
}

/// Copies or moves batches of paths into a destination directory
pub trait FileMover {
    /// Copy each source into `destination`, returning the new paths.
    /// Existing entries in `destination` are never overwritten.
    ///
    /// # Errors
    /// Returns `ScanError::PartialBatch` when a file fails after earlier ones succeeded.
    fn copy_files(&self, sources: &[PathBuf], destination: &Path) -> Result<Vec<PathBuf>, ScanError>;

    /// Move each source into `destination`, returning the new paths.
    /// Existing entries in `destination` are never overwritten.
    ///
    /// # Errors
    /// Returns `ScanError::PartialBatch` when a file fails after earlier ones succeeded.
    fn move_files(&self, sources: &[PathBuf], destination: &Path) -> Result<Vec<PathBuf>, ScanError>;
}
