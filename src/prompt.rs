//! Interactive tag input
//!
//! Commands that ask the user for tag names do so through [`TagPrompt`], so
//! the engine does not depend on any particular terminal or GUI.

use dialoguer::{Input, theme::ColorfulTheme};
use std::io;

/// Answer that skips the current entry
pub const SKIP: &str = "SKIP";
/// Answer that stops the interactive loop
pub const END: &str = "END";

/// Source of tag names typed by a user
pub trait TagPrompt {
    /// Ask for a tag to apply to `subject` (a file or folder name).
    ///
    /// # Errors
    ///
    /// Returns `PromptError` if no answer can be read.
    fn ask(&mut self, subject: &str) -> Result<String, PromptError>;
}

/// Interpretation of one answer in the per-entry tagging loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptReply {
    Tag(String),
    Skip,
    End,
}

impl PromptReply {
    /// Parse a raw answer. Sentinels are matched case-insensitively after
    /// trimming; a blank answer skips.
    #[must_use]
    pub fn parse(answer: &str) -> Self {
        let answer = answer.trim();
        if answer.is_empty() || answer.eq_ignore_ascii_case(SKIP) {
            Self::Skip
        } else if answer.eq_ignore_ascii_case(END) {
            Self::End
        } else {
            Self::Tag(answer.to_string())
        }
    }
}

/// Terminal prompt backed by dialoguer
#[derive(Default)]
pub struct ConsolePrompt {
    theme: ColorfulTheme,
}

impl ConsolePrompt {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl TagPrompt for ConsolePrompt {
    fn ask(&mut self, subject: &str) -> Result<String, PromptError> {
        let answer: String = Input::with_theme(&self.theme)
            .with_prompt(format!("Tag for {subject} ({SKIP} / {END})"))
            .allow_empty(true)
            .interact_text()
            .map_err(|e| PromptError::Interaction(e.to_string()))?;
        Ok(answer.trim().to_string())
    }
}

/// Errors that can occur during prompting.
#[derive(Debug, thiserror::Error)]
pub enum PromptError {
    /// IO error during prompt
    #[error("Prompt IO error: {0}")]
    Io(#[from] io::Error),
    /// The terminal interaction failed or was aborted
    #[error("Prompt failed: {0}")]
    Interaction(String),
    /// No input source is attached
    #[error("No interactive input available")]
    Unavailable,
}

/// Prompt for non-interactive contexts; every question fails
#[derive(Debug, Default, Clone, Copy)]
pub struct NoPrompt;

impl TagPrompt for NoPrompt {
    fn ask(&mut self, _subject: &str) -> Result<String, PromptError> {
        Err(PromptError::Unavailable)
    }
}
