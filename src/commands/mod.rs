//! Command implementations
//!
//! Every operation a front-end can request is one [`Command`] variant with an
//! explicit payload. [`execute`] validates the payload, runs it against the
//! store handle and collaborators held by a [`Session`], and returns a
//! structured [`Outcome`]. Nothing here prints; rendering is the caller's job.

pub mod bulk;
pub mod untagged;

use log::debug;
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::MtmError;
use crate::db::{Collection, Database, FileRef, LinkedFolder, Tag};
use crate::discovery::{EntryScanner, FileMover};
use crate::prompt::TagPrompt;

pub use bulk::BulkSummary;
pub use untagged::untagged_files;

type Result<T> = std::result::Result<T, MtmError>;

/// A single logical request against the tag index
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    CreateCollection { name: String },
    DeleteCollection { name: String },
    ListCollections,
    ListCollectionTags { collection: String },

    CreateTag { name: String, collection: Option<String> },
    DeleteTag { name: String },
    ListTags,
    AssignTagToCollection { tag: String, collection: String },
    RemoveTagFromCollection { tag: String },

    AssignTagToFile { file: PathBuf, tag: String },
    /// Ask the prompt for the tag to apply to one file
    PromptTagFile { file: PathBuf },
    RemoveTagFromFile { file: PathBuf, tag: String },
    ListFileTags { file: PathBuf },
    ListTagFiles { tag: String, folder: Option<PathBuf> },
    /// Intersection search; with `by_id` the tags are raw stored ids
    SearchFiles { tags: Vec<String>, by_id: bool },

    ListTaggedFolders,
    ListUntaggedFiles { folder: PathBuf },
    TagFolder { folder: PathBuf, tag: String, word: Option<String> },
    /// Ask the prompt for one tag to apply to the whole folder
    PromptTagFolder { folder: PathBuf },
    /// Ask the prompt for a tag per folder entry
    TagFolderEach { folder: PathBuf },
    LinkFolder { folder: PathBuf, collection: String, default_tag: Option<String> },
    ListLinkedFolders,

    CopyTagFiles { tag: String, destination: PathBuf },
    MoveTagFiles { tag: String, destination: PathBuf },
    CheckTagFilesContainWord { tag: String, word: String },
}

impl Command {
    /// Reject payloads that cannot name anything
    ///
    /// # Errors
    /// Returns `MtmError::InvalidInput` describing the first bad field.
    pub fn validate(&self) -> Result<()> {
        match self {
            Self::CreateCollection { name } | Self::DeleteCollection { name } => require_text("collection name", name),
            Self::ListCollectionTags { collection } => require_text("collection name", collection),
            Self::CreateTag { name, .. } | Self::DeleteTag { name } => require_text("tag name", name),
            Self::AssignTagToCollection { tag, collection } => {
                require_text("tag name", tag)?;
                require_text("collection name", collection)
            }
            Self::RemoveTagFromCollection { tag } => require_text("tag name", tag),
            Self::AssignTagToFile { file, tag } | Self::RemoveTagFromFile { file, tag } => {
                require_path("file", file)?;
                require_text("tag name", tag)
            }
            Self::PromptTagFile { file } | Self::ListFileTags { file } => require_path("file", file),
            Self::ListTagFiles { tag, folder } => {
                require_text("tag name", tag)?;
                folder.as_deref().map_or(Ok(()), |f| require_path("folder", f))
            }
            Self::SearchFiles { tags, .. } => {
                if tags.is_empty() {
                    return Err(MtmError::InvalidInput("At least one tag is required".into()));
                }
                tags.iter().try_for_each(|t| require_text("tag name", t))
            }
            Self::ListUntaggedFiles { folder } | Self::PromptTagFolder { folder } | Self::TagFolderEach { folder } => {
                require_path("folder", folder)
            }
            Self::TagFolder { folder, tag, word } => {
                require_path("folder", folder)?;
                require_text("tag name", tag)?;
                word.as_deref().map_or(Ok(()), |w| require_text("search word", w))
            }
            Self::LinkFolder { folder, collection, .. } => {
                require_path("folder", folder)?;
                require_text("collection name", collection)
            }
            Self::CopyTagFiles { tag, destination } | Self::MoveTagFiles { tag, destination } => {
                require_text("tag name", tag)?;
                require_path("destination", destination)
            }
            Self::CheckTagFilesContainWord { tag, word } => {
                require_text("tag name", tag)?;
                require_text("word", word)
            }
            Self::ListCollections
            | Self::ListTags
            | Self::ListTaggedFolders
            | Self::ListLinkedFolders => Ok(()),
        }
    }

    /// Whether the command writes to the index
    #[must_use]
    pub const fn is_mutating(&self) -> bool {
        matches!(
            self,
            Self::CreateCollection { .. }
                | Self::DeleteCollection { .. }
                | Self::CreateTag { .. }
                | Self::DeleteTag { .. }
                | Self::AssignTagToCollection { .. }
                | Self::RemoveTagFromCollection { .. }
                | Self::AssignTagToFile { .. }
                | Self::PromptTagFile { .. }
                | Self::RemoveTagFromFile { .. }
                | Self::TagFolder { .. }
                | Self::PromptTagFolder { .. }
                | Self::TagFolderEach { .. }
                | Self::LinkFolder { .. }
        )
    }
}

fn require_text(what: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(MtmError::InvalidInput(format!("Empty {what}")));
    }
    Ok(())
}

fn require_path(what: &str, value: &Path) -> Result<()> {
    if value.as_os_str().is_empty() {
        return Err(MtmError::InvalidInput(format!("Empty {what} path")));
    }
    Ok(())
}

/// Structured result of a command
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum Outcome {
    /// Side-effect only; carries a human-readable status line
    Message(String),
    Collections(Vec<Collection>),
    Tags(Vec<Tag>),
    TagIds(Vec<String>),
    Files(Vec<FileRef>),
    Folders(Vec<String>),
    FileNames(Vec<String>),
    LinkedFolders(Vec<LinkedFolder>),
    /// Destination paths of copied or moved files
    Transferred(Vec<PathBuf>),
    Tagged(BulkSummary),
}

/// The store handle and collaborators a command runs against
pub struct Session<'a> {
    pub db: &'a Database,
    pub scanner: &'a dyn EntryScanner,
    pub mover: &'a dyn FileMover,
    pub prompt: &'a mut dyn TagPrompt,
}

/// Validate and run one command
///
/// Mutating commands are flushed to disk before returning.
///
/// # Errors
/// Returns `MtmError::InvalidInput` for a bad payload, `DbError` for store
/// failures (including `DuplicateKey`), `ScanError` for filesystem failures
/// and `PromptError` when interactive input fails.
pub fn execute(session: &mut Session<'_>, command: Command) -> Result<Outcome> {
    command.validate()?;
    debug!("executing {command:?}");
    let mutating = command.is_mutating();
    let outcome = run(session, command)?;
    if mutating {
        session.db.flush()?;
    }
    Ok(outcome)
}

fn run(session: &mut Session<'_>, command: Command) -> Result<Outcome> {
    let db = session.db;
    let outcome = match command {
        Command::CreateCollection { name } => {
            db.create_collection(&name)?;
            Outcome::Message(format!("New collection {name} created"))
        }
        Command::DeleteCollection { name } => {
            let removed = db.delete_collection(&name)?;
            Outcome::Message(format!("Collection {name} deleted ({removed} removed)"))
        }
        Command::ListCollections => Outcome::Collections(db.list_collections()?),
        Command::ListCollectionTags { collection } => Outcome::Tags(db.list_tags_for_collection(&collection)?),

        Command::CreateTag { name, collection } => {
            db.create_tag(&name, collection.as_deref())?;
            Outcome::Message(format!("New tag {name} created"))
        }
        Command::DeleteTag { name } => {
            db.delete_tag(&name)?;
            Outcome::Message(format!("Tag {name} deleted"))
        }
        Command::ListTags => Outcome::Tags(db.list_all_tags()?),
        Command::AssignTagToCollection { tag, collection } => {
            let updated = db.assign_tag_to_collection(&tag, &collection)?;
            Outcome::Message(if updated {
                format!("Tag {tag} moved to collection {collection}")
            } else {
                format!("No tag {tag}")
            })
        }
        Command::RemoveTagFromCollection { tag } => {
            let updated = db.remove_tag_from_collection(&tag)?;
            Outcome::Message(if updated {
                format!("Tag {tag} is now uncategorized")
            } else {
                format!("No tag {tag}")
            })
        }

        Command::AssignTagToFile { file, tag } => {
            let row = db.assign_tag_to_file(&file, &tag)?;
            Outcome::Message(format!("File {} tagged {}", row.file_ref(), row.tag_id))
        }
        Command::PromptTagFile { file } => match bulk::prompt_tag_file(db, session.prompt, &file)? {
            Some(row) => Outcome::Message(format!("File {} tagged {}", row.file_ref(), row.tag_id)),
            None => Outcome::Message(format!("File {} skipped", file.display())),
        },
        Command::RemoveTagFromFile { file, tag } => {
            let removed = db.remove_tag_from_file(&file, &tag)?;
            Outcome::Message(format!("Removed {removed} tag row(s) from {}", file.display()))
        }
        Command::ListFileTags { file } => Outcome::TagIds(db.list_tags_for_file(&file)?),
        Command::ListTagFiles { tag, folder } => Outcome::Files(db.list_files_for_tag(&tag, folder.as_deref())?),
        Command::SearchFiles { tags, by_id } => Outcome::Files(db.list_files_for_tags(&tags, by_id)?),

        Command::ListTaggedFolders => Outcome::Folders(db.list_folders_with_tagged_content()?),
        Command::ListUntaggedFiles { folder } => Outcome::FileNames(untagged_files(db, session.scanner, &folder)?),
        Command::TagFolder { folder, tag, word } => Outcome::Tagged(match word {
            Some(word) => bulk::tag_all_files_containing_word(db, session.scanner, &tag, &folder, &word)?,
            None => bulk::tag_all_files_in_folder(db, session.scanner, &tag, &folder)?,
        }),
        Command::PromptTagFolder { folder } => {
            Outcome::Tagged(bulk::prompt_tag_folder(db, session.scanner, session.prompt, &folder)?)
        }
        Command::TagFolderEach { folder } => {
            Outcome::Tagged(bulk::interactive_tag_folder(db, session.scanner, session.prompt, &folder)?)
        }
        Command::LinkFolder {
            folder,
            collection,
            default_tag,
        } => {
            let row = db.link_folder(&folder, &collection, default_tag.as_deref())?;
            Outcome::Message(format!("Folder {} linked to collection {}", row.folder, row.collection_id))
        }
        Command::ListLinkedFolders => Outcome::LinkedFolders(db.list_linked_folders()?),

        Command::CopyTagFiles { tag, destination } => {
            Outcome::Transferred(bulk::copy_tag_files(db, session.mover, &tag, &destination)?)
        }
        Command::MoveTagFiles { tag, destination } => {
            Outcome::Transferred(bulk::move_tag_files(db, session.mover, &tag, &destination)?)
        }
        Command::CheckTagFilesContainWord { tag, word } => {
            Outcome::Files(bulk::check_tag_files_contain_word(db, &tag, &word)?)
        }
    };
    Ok(outcome)
}
