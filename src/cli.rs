//! Command-line interface definitions and parsing
//!
//! This module defines the CLI structure for mtm using the `clap` crate and
//! turns parsed arguments into [`Command`] values for the command layer.
//!
//! # Commands
//!
//! - **collection**: create, delete and list collections
//! - **tag**: manage tags and act on the files carrying one
//! - **file**: tag, untag and inspect a single file
//! - **search**: files carrying all of the given tags
//! - **folder**: bulk tagging, reconciliation and linked folders
//! - **completions**: print a shell completion script
//!
//! # Examples
//!
//! ```
//! use clap::Parser;
//! use mtm::cli::Cli;
//!
//! let cli = Cli::parse_from(["mtm", "search", "work", "urgent"]);
//! let command = cli.command.into_command();
//! assert!(command.is_some());
//! ```

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::io::Write;
use std::path::PathBuf;

use crate::commands::Command;

/// How file and folder arguments are stored, shown under `--help`
const PATH_NOTE: &str = "Paths are made absolute against the current directory but never resolved: \
`..` and symlinks are kept as typed. Pass `docs/a.txt`, not `tmp/../docs/a.txt`, \
or the same file is indexed under two folders.";

/// Main CLI structure for parsing command-line arguments
#[derive(Parser, Debug)]
#[command(name = "mtm")]
#[command(about = "A minimalist tag manager", long_about = None)]
#[command(after_help = PATH_NOTE)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Suppress informational output (only print results)
    #[arg(short = 'q', long = "quiet", global = true)]
    pub quiet: bool,

    /// Print results as JSON
    #[arg(long = "json", global = true)]
    pub json: bool,

    /// Index location (overrides config and MTM_DATABASE)
    #[arg(long = "db", value_name = "PATH", global = true)]
    pub db: Option<PathBuf>,
}

impl Cli {
    /// Parse command line arguments
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Manage collections
    #[command(subcommand, visible_alias = "c")]
    Collection(CollectionCommands),

    /// Manage tags
    #[command(subcommand, visible_alias = "t")]
    Tag(TagCommands),

    /// Tag and inspect single files
    #[command(subcommand, visible_alias = "f")]
    File(FileCommands),

    /// Find files carrying every given tag
    #[command(visible_alias = "s")]
    Search {
        /// Tags that must all be present
        #[arg(value_name = "TAG", required = true, num_args = 1..)]
        tags: Vec<String>,

        /// Treat the arguments as stored tag ids (no normalization)
        #[arg(long = "id")]
        by_id: bool,
    },

    /// Bulk tagging and folder reconciliation
    #[command(subcommand)]
    Folder(FolderCommands),

    /// Print a shell completion script
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Collection management subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum CollectionCommands {
    /// Create a collection
    Create { name: String },

    /// Delete a collection
    #[command(visible_alias = "rm")]
    Delete { name: String },

    /// List all collections
    #[command(visible_alias = "ls")]
    List,

    /// List the tags of a collection
    Tags { name: String },
}

/// Tag management subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum TagCommands {
    /// Create a tag
    Create {
        name: String,

        /// Collection the tag belongs to
        #[arg(short = 'c', long = "collection", value_name = "COLLECTION")]
        collection: Option<String>,
    },

    /// Delete a tag (file associations are kept)
    #[command(visible_alias = "rm")]
    Delete { name: String },

    /// List all tags
    #[command(visible_alias = "ls")]
    List,

    /// Move a tag into a collection
    SetCollection { tag: String, collection: String },

    /// Make a tag uncategorized
    UnsetCollection { tag: String },

    /// List the files carrying a tag
    Files {
        tag: String,

        /// Only files directly inside this folder
        #[arg(short = 'f', long = "folder", value_name = "FOLDER")]
        folder: Option<PathBuf>,
    },

    /// Copy the files carrying a tag into a folder
    #[command(visible_alias = "cp")]
    Copy { tag: String, destination: PathBuf },

    /// Move the files carrying a tag into a folder
    #[command(visible_alias = "mv")]
    Move { tag: String, destination: PathBuf },

    /// List files carrying a tag whose name lacks a word
    Check { tag: String, word: String },
}

/// Single-file subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum FileCommands {
    /// Tag a file
    Tag {
        file: PathBuf,

        #[arg(required_unless_present = "interactive", conflicts_with = "interactive")]
        tag: Option<String>,

        /// Ask for the tag
        #[arg(short = 'i', long = "interactive")]
        interactive: bool,
    },

    /// Remove a tag from a file
    Untag { file: PathBuf, tag: String },

    /// List the tags of a file
    Tags { file: PathBuf },
}

/// Folder subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum FolderCommands {
    /// List folders holding tagged files
    #[command(visible_alias = "ls")]
    List,

    /// List entries of a folder without any tag
    Untagged { folder: PathBuf },

    /// Tag every entry of a folder
    Tag {
        folder: PathBuf,

        #[arg(required_unless_present = "interactive", conflicts_with = "interactive")]
        tag: Option<String>,

        /// Only entries whose name contains this word (any common casing)
        #[arg(short = 'w', long = "word", value_name = "WORD", conflicts_with = "interactive")]
        word: Option<String>,

        /// Ask for one tag for the whole folder
        #[arg(short = 'i', long = "interactive")]
        interactive: bool,
    },

    /// Ask for a tag for each entry (SKIP skips, END stops)
    TagEach { folder: PathBuf },

    /// Link a folder to a collection
    Link {
        folder: PathBuf,
        collection: String,

        /// Tag suggested for files of this folder
        #[arg(short = 't', long = "default-tag", value_name = "TAG")]
        default_tag: Option<String>,
    },

    /// List linked folders
    Linked,
}

impl Commands {
    /// Convert into a command for the command layer
    ///
    /// Paths are made absolute against the current directory. `..` and
    /// symlinks are not resolved, so `a/../b` and `b` name different folders
    /// in the index. Returns `None` for `completions`, which never reaches
    /// the index.
    #[must_use]
    pub fn into_command(self) -> Option<Command> {
        let command = match self {
            Self::Collection(cmd) => match cmd {
                CollectionCommands::Create { name } => Command::CreateCollection { name },
                CollectionCommands::Delete { name } => Command::DeleteCollection { name },
                CollectionCommands::List => Command::ListCollections,
                CollectionCommands::Tags { name } => Command::ListCollectionTags { collection: name },
            },
            Self::Tag(cmd) => match cmd {
                TagCommands::Create { name, collection } => Command::CreateTag { name, collection },
                TagCommands::Delete { name } => Command::DeleteTag { name },
                TagCommands::List => Command::ListTags,
                TagCommands::SetCollection { tag, collection } => Command::AssignTagToCollection { tag, collection },
                TagCommands::UnsetCollection { tag } => Command::RemoveTagFromCollection { tag },
                TagCommands::Files { tag, folder } => Command::ListTagFiles {
                    tag,
                    folder: folder.map(absolute),
                },
                TagCommands::Copy { tag, destination } => Command::CopyTagFiles {
                    tag,
                    destination: absolute(destination),
                },
                TagCommands::Move { tag, destination } => Command::MoveTagFiles {
                    tag,
                    destination: absolute(destination),
                },
                TagCommands::Check { tag, word } => Command::CheckTagFilesContainWord { tag, word },
            },
            Self::File(cmd) => match cmd {
                FileCommands::Tag {
                    file,
                    tag: Some(tag),
                    interactive: false,
                } => Command::AssignTagToFile {
                    file: absolute(file),
                    tag,
                },
                FileCommands::Tag { file, .. } => Command::PromptTagFile { file: absolute(file) },
                FileCommands::Untag { file, tag } => Command::RemoveTagFromFile {
                    file: absolute(file),
                    tag,
                },
                FileCommands::Tags { file } => Command::ListFileTags { file: absolute(file) },
            },
            Self::Search { tags, by_id } => Command::SearchFiles { tags, by_id },
            Self::Folder(cmd) => match cmd {
                FolderCommands::List => Command::ListTaggedFolders,
                FolderCommands::Untagged { folder } => Command::ListUntaggedFiles {
                    folder: absolute(folder),
                },
                FolderCommands::Tag {
                    folder,
                    tag: Some(tag),
                    word,
                    interactive: false,
                } => Command::TagFolder {
                    folder: absolute(folder),
                    tag,
                    word,
                },
                FolderCommands::Tag { folder, .. } => Command::PromptTagFolder {
                    folder: absolute(folder),
                },
                FolderCommands::TagEach { folder } => Command::TagFolderEach {
                    folder: absolute(folder),
                },
                FolderCommands::Link {
                    folder,
                    collection,
                    default_tag,
                } => Command::LinkFolder {
                    folder: absolute(folder),
                    collection,
                    default_tag,
                },
                FolderCommands::Linked => Command::ListLinkedFolders,
            },
            Self::Completions { .. } => return None,
        };
        Some(command)
    }
}

/// Make `path` absolute without touching the filesystem
///
/// `..` components and symlinks are kept as given. An empty path is returned
/// as is so validation can reject it.
fn absolute(path: PathBuf) -> PathBuf {
    std::path::absolute(&path).unwrap_or(path)
}

/// Generate static shell completions for the mtm CLI
pub fn generate_completions<W: Write>(shell: Shell, buf: &mut W) {
    use clap::CommandFactory;

    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, name, buf);
}
