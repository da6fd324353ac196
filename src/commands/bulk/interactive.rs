use log::info;
use std::path::Path;

use super::folder::tag_all_files_in_folder;
use super::summary::BulkSummary;
use crate::MtmError;
use crate::db::types::folder_key;
use crate::db::{Database, FileTag};
use crate::discovery::EntryScanner;
use crate::ident::normalize;
use crate::prompt::{PromptReply, TagPrompt};

type Result<T> = std::result::Result<T, MtmError>;

/// Ask for a tag for every entry of `folder`, then store all answers at once.
///
/// `SKIP` (or a blank answer) leaves the entry untagged, `END` stops asking
/// and leaves the remaining entries untagged. Nothing is written until the
/// loop is over, so a prompt failure discards every answer of this run.
///
/// # Errors
/// Returns `ScanError` if the folder cannot be listed, `PromptError` if an
/// answer cannot be read, and `DbError` if the final insert fails.
pub fn interactive_tag_folder(
    db: &Database,
    scanner: &dyn EntryScanner,
    prompt: &mut dyn TagPrompt,
    folder: &Path,
) -> Result<BulkSummary> {
    let folder_key = folder_key(folder)?;
    let entries = scanner.list_entries(folder, None)?;

    let mut summary = BulkSummary::new();
    let mut rows = Vec::new();
    for (index, entry) in entries.iter().enumerate() {
        match PromptReply::parse(&prompt.ask(&entry.name)?) {
            PromptReply::Tag(label) => {
                rows.push(FileTag::new(folder_key.clone(), entry.name.clone(), normalize(&label)));
            }
            PromptReply::Skip => summary.add_skip(),
            PromptReply::End => {
                summary.remaining = entries.len() - index;
                break;
            }
        }
    }

    summary.tagged = db.insert_file_tags(&rows)?;
    info!(
        "interactive tagging of {folder_key}: {} tagged, {} skipped, {} not reached",
        summary.tagged, summary.skipped, summary.remaining
    );
    Ok(summary)
}

/// Ask for one tag and apply it to the file at `path`.
///
/// Returns `None` when the answer was `SKIP`, `END` or blank.
///
/// # Errors
/// Returns `PromptError` if no answer can be read and `DbError` if the path is
/// invalid or the insert fails.
pub fn prompt_tag_file(db: &Database, prompt: &mut dyn TagPrompt, path: &Path) -> Result<Option<FileTag>> {
    match PromptReply::parse(&prompt.ask(&path.display().to_string())?) {
        PromptReply::Tag(label) => Ok(Some(db.assign_tag_to_file(path, &label)?)),
        PromptReply::Skip | PromptReply::End => Ok(None),
    }
}

/// Ask for one tag and apply it to every entry of `folder`.
///
/// # Errors
/// Returns `PromptError` if no answer can be read, `ScanError` if the folder
/// cannot be listed and `DbError` if the insert fails.
pub fn prompt_tag_folder(
    db: &Database,
    scanner: &dyn EntryScanner,
    prompt: &mut dyn TagPrompt,
    folder: &Path,
) -> Result<BulkSummary> {
    match PromptReply::parse(&prompt.ask(&folder.display().to_string())?) {
        PromptReply::Tag(label) => tag_all_files_in_folder(db, scanner, &label, folder),
        PromptReply::Skip | PromptReply::End => Ok(BulkSummary::new()),
    }
}
