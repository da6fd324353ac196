//! Folder reconciliation: what is on disk but not in the index

use log::debug;
use std::path::Path;

use crate::MtmError;
use crate::db::Database;
use crate::discovery::EntryScanner;

type Result<T> = std::result::Result<T, MtmError>;

/// Names of the entries in `folder` that have no association recorded
/// directly under that folder, in listing order.
///
/// Hidden entries are never reported. An entry counts as tagged if any row
/// names it, including rows whose tag has since been deleted.
///
/// # Errors
/// Returns `ScanError` if the folder cannot be listed and `DbError` if the
/// index cannot be read.
pub fn untagged_files(db: &Database, scanner: &dyn EntryScanner, folder: &Path) -> Result<Vec<String>> {
    let tagged = db.tagged_names_in_folder(folder)?;
    let untagged: Vec<String> = scanner
        .list_entries(folder, None)?
        .into_iter()
        .filter(|entry| !tagged.contains(&entry.name))
        .map(|entry| entry.name)
        .collect();
    debug!("{} untagged entries in {}", untagged.len(), folder.display());
    Ok(untagged)
}
