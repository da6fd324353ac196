use log::info;
use std::path::Path;

use super::summary::BulkSummary;
use crate::MtmError;
use crate::db::types::folder_key;
use crate::db::{Database, FileTag};
use crate::discovery::EntryScanner;
use crate::ident::normalize;

type Result<T> = std::result::Result<T, MtmError>;

/// Tag every non-hidden entry of `folder` (subdirectories included).
///
/// All rows are written in one transaction.
///
/// # Errors
/// Returns `ScanError` if the folder cannot be listed and `DbError` if the
/// insert fails; in both cases nothing is written.
pub fn tag_all_files_in_folder(
    db: &Database,
    scanner: &dyn EntryScanner,
    tag: &str,
    folder: &Path,
) -> Result<BulkSummary> {
    tag_scanned(db, scanner, tag, folder, None)
}

/// Tag the entries of `folder` whose name contains `word` in any of its case
/// variants (as given, upper, lower, title).
///
/// # Errors
/// Returns `ScanError` if the folder cannot be listed and `DbError` if the
/// insert fails; in both cases nothing is written.
pub fn tag_all_files_containing_word(
    db: &Database,
    scanner: &dyn EntryScanner,
    tag: &str,
    folder: &Path,
    word: &str,
) -> Result<BulkSummary> {
    tag_scanned(db, scanner, tag, folder, Some(word))
}

fn tag_scanned(
    db: &Database,
    scanner: &dyn EntryScanner,
    tag: &str,
    folder: &Path,
    word: Option<&str>,
) -> Result<BulkSummary> {
    let folder_key = folder_key(folder)?;
    let tag_id = normalize(tag);

    let rows: Vec<FileTag> = scanner
        .list_entries(folder, word)?
        .into_iter()
        .map(|entry| FileTag::new(folder_key.clone(), entry.name, tag_id.clone()))
        .collect();

    let written = db.insert_file_tags(&rows)?;
    info!("tagged {written} entries of {folder_key} with '{tag_id}'");
    Ok(BulkSummary::tagged(written))
}
