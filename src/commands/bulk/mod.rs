//! Bulk tagging and tag-driven file operations
//!
//! - `folder`: tag every entry of a folder, optionally filtered by a word
//! - `interactive`: ask for a tag per entry, or one tag for a file/folder
//! - `summary`: counts reported by a bulk run
//! - `transfer`: copy/move/audit the files carrying a tag
//!
//! Every multi-row insert is a single store transaction, so a failed batch
//! leaves no rows behind.

mod folder;
mod interactive;
mod summary;
mod transfer;

pub use folder::{tag_all_files_containing_word, tag_all_files_in_folder};
pub use interactive::{interactive_tag_folder, prompt_tag_file, prompt_tag_folder};
pub use summary::BulkSummary;
pub use transfer::{check_tag_files_contain_word, copy_tag_files, move_tag_files};

#[cfg(test)]
mod tests;
