use log::{info, warn};
use std::path::{Path, PathBuf};

use crate::MtmError;
use crate::db::{Database, FileRef};
use crate::discovery::FileMover;

type Result<T> = std::result::Result<T, MtmError>;

/// Files carrying `tag` whose name does not contain `word` (case-sensitive).
///
/// # Errors
/// Returns `DbError` if the lookup fails.
pub fn check_tag_files_contain_word(db: &Database, tag: &str, word: &str) -> Result<Vec<FileRef>> {
    let violations: Vec<FileRef> = db
        .list_files_for_tag(tag, None)?
        .into_iter()
        .filter(|file| !file.filename.contains(word))
        .collect();
    info!("{} file(s) tagged '{tag}' lack '{word}'", violations.len());
    Ok(violations)
}

/// Copy every file carrying `tag` into `destination`.
///
/// # Errors
/// Returns `DbError` if the lookup fails and `ScanError` if a copy fails.
pub fn copy_tag_files(db: &Database, mover: &dyn FileMover, tag: &str, destination: &Path) -> Result<Vec<PathBuf>> {
    let sources = tagged_paths(db, tag)?;
    Ok(mover.copy_files(&sources, destination)?)
}

/// Move every file carrying `tag` into `destination`.
///
/// The index is not updated: associations keep the old folder, so moved
/// files show up as tagged where they used to be.
///
/// # Errors
/// Returns `DbError` if the lookup fails and `ScanError` if a move fails.
pub fn move_tag_files(db: &Database, mover: &dyn FileMover, tag: &str, destination: &Path) -> Result<Vec<PathBuf>> {
    let sources = tagged_paths(db, tag)?;
    let moved = mover.move_files(&sources, destination)?;
    if !moved.is_empty() {
        warn!(
            "{} file(s) moved to {}; their tags still point at the old location",
            moved.len(),
            destination.display()
        );
    }
    Ok(moved)
}

fn tagged_paths(db: &Database, tag: &str) -> Result<Vec<PathBuf>> {
    Ok(db
        .list_files_for_tag(tag, None)?
        .iter()
        .map(FileRef::path)
        .collect())
}
