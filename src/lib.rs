//! mtm - a minimalist tag manager
//!
//! This library keeps a many-to-many index between files and tags, groups tags
//! into collections, answers "files having all of these tags" searches and
//! reconciles folders on disk against what the index has recorded.

use serde::Serialize;
use thiserror::Error;

pub mod cli;
pub mod commands;
pub mod config;
pub mod db;
pub mod discovery;
pub mod ident;
pub mod output;
pub mod prompt;

#[cfg(test)]
pub mod testing;

/// Error enum, contains all failure states of the program
#[derive(Debug, Error)]
pub enum MtmError {
    /// Database error
    #[error("Database error: {0}")]
    DbError(#[from] db::DbError),
    /// Filesystem scan or transfer error
    #[error("Filesystem error: {0}")]
    ScanError(#[from] discovery::ScanError),
    /// Interactive input error
    #[error("Input error: {0}")]
    PromptError(#[from] prompt::PromptError),
    /// Represents a configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] ::config::ConfigError),
    /// Represents an I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    /// Output serialization error
    #[error("Serialization error: {0}")]
    JsonError(#[from] serde_json::Error),
    /// Invalid input error
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Flat classification of failures for front-ends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    DuplicateKey,
    Filesystem,
    PartialBatchFailure,
    InvalidInput,
    Storage,
    Config,
    Prompt,
}

impl MtmError {
    /// Classify this error
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::DbError(db::DbError::DuplicateKey { .. }) => ErrorKind::DuplicateKey,
            Self::DbError(db::DbError::InvalidPath(_)) | Self::InvalidInput(_) => ErrorKind::InvalidInput,
            Self::DbError(_) | Self::JsonError(_) => ErrorKind::Storage,
            Self::ScanError(discovery::ScanError::PartialBatch { .. }) => ErrorKind::PartialBatchFailure,
            Self::ScanError(_) | Self::IoError(_) => ErrorKind::Filesystem,
            Self::PromptError(_) => ErrorKind::Prompt,
            Self::ConfigError(_) => ErrorKind::Config,
        }
    }
}
