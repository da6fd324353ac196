//! Output formatting for CLI display
//!
//! Turns command outcomes into terminal lines or JSON. In quiet mode only
//! results are printed, one per line, so they can be piped.

use colored::Colorize;
use serde_json::json;

use crate::commands::{BulkSummary, Outcome};
use crate::db::{Collection, LinkedFolder, Tag};
use crate::{ErrorKind, MtmError};

/// How outcomes are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Headers, colors and status messages
    #[default]
    Normal,
    /// Results only
    Quiet,
    /// One JSON document per outcome
    Json,
}

impl OutputMode {
    /// Pick the mode from the global flags; `--json` wins over `--quiet`
    #[must_use]
    pub const fn from_flags(quiet: bool, json: bool) -> Self {
        if json {
            Self::Json
        } else if quiet {
            Self::Quiet
        } else {
            Self::Normal
        }
    }
}

/// Print an outcome to stdout
///
/// # Errors
/// Returns `MtmError::JsonError` if JSON serialization fails.
pub fn print_outcome(outcome: &Outcome, mode: OutputMode) -> Result<(), MtmError> {
    if mode == OutputMode::Json {
        println!("{}", serde_json::to_string_pretty(outcome)?);
        return Ok(());
    }
    for line in format_outcome(outcome, mode == OutputMode::Quiet) {
        println!("{line}");
    }
    Ok(())
}

/// Render an outcome as terminal lines
#[must_use]
pub fn format_outcome(outcome: &Outcome, quiet: bool) -> Vec<String> {
    match outcome {
        Outcome::Message(message) => {
            if quiet {
                Vec::new()
            } else {
                vec![message.clone()]
            }
        }
        Outcome::Collections(collections) => {
            listing("Collections", collections.iter().map(collection_line), quiet)
        }
        Outcome::Tags(tags) => listing("Tags", tags.iter().map(|t| tag_line(t, quiet)), quiet),
        Outcome::TagIds(ids) => listing("Tags", ids.iter().cloned(), quiet),
        Outcome::Files(files) => listing("Files", files.iter().map(ToString::to_string), quiet),
        Outcome::Folders(folders) => listing("Folders", folders.iter().cloned(), quiet),
        Outcome::FileNames(names) => listing("Untagged", names.iter().cloned(), quiet),
        Outcome::LinkedFolders(links) => {
            listing("Linked folders", links.iter().map(|l| linked_line(l, quiet)), quiet)
        }
        Outcome::Transferred(paths) => listing("Transferred", paths.iter().map(|p| p.display().to_string()), quiet),
        Outcome::Tagged(summary) => summary_lines(summary, quiet),
    }
}

fn listing(title: &str, items: impl Iterator<Item = String>, quiet: bool) -> Vec<String> {
    let items: Vec<String> = items.collect();
    if quiet {
        return items;
    }
    if items.is_empty() {
        return vec![format!("{} (none)", title.bold())];
    }
    let mut lines = Vec::with_capacity(items.len() + 1);
    lines.push(format!("{} ({}):", title.bold(), items.len()));
    lines.extend(items.into_iter().map(|item| format!("  {item}")));
    lines
}

fn collection_line(collection: &Collection) -> String {
    collection.name.clone()
}

fn tag_line(tag: &Tag, quiet: bool) -> String {
    match (&tag.collection_id, quiet) {
        (Some(collection), false) => format!("{} {}", tag.name, format!("[{collection}]").dimmed()),
        _ => tag.name.clone(),
    }
}

fn linked_line(link: &LinkedFolder, quiet: bool) -> String {
    if quiet {
        return link.folder.clone();
    }
    let mut line = format!("{} -> {}", link.folder, link.collection_id.cyan());
    if let Some(tag) = &link.default_tag_id {
        line.push_str(&format!(" (default tag: {tag})"));
    }
    line
}

fn summary_lines(summary: &BulkSummary, quiet: bool) -> Vec<String> {
    if quiet {
        return vec![summary.tagged.to_string()];
    }
    let mut lines = vec![format!("{} {}", "Tagged:".green(), summary.tagged)];
    if summary.skipped > 0 {
        lines.push(format!("{} {}", "Skipped:".yellow(), summary.skipped));
    }
    if summary.ended_early() {
        lines.push(format!("{} {}", "Not reached:".yellow(), summary.remaining));
    }
    lines
}

/// Render an error for stderr
#[must_use]
pub fn format_error(error: &MtmError, mode: OutputMode) -> String {
    if mode == OutputMode::Json {
        return json!({ "error": kind_name(error.kind()), "message": error.to_string() }).to_string();
    }
    format!("{} {error}", "Error:".red().bold())
}

fn kind_name(kind: ErrorKind) -> String {
    serde_json::to_value(kind)
        .ok()
        .and_then(|v| v.as_str().map(str::to_string))
        .unwrap_or_default()
}
