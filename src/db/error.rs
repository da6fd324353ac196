//! Database-specific error types
//!
//! This module defines all error types that can occur during tag index operations.
//! Errors carry the offending key or path so a front-end can render a message
//! without re-deriving context.
//!
//! # Error Types
//!
//! - **`SledError`**: Errors from the underlying sled embedded database
//! - **`DecodeError`**: Failures when deserializing a stored row
//! - **`EncodeError`**: Failures when serializing a row for storage
//! - **`DuplicateKey`**: A collection or tag id already exists
//! - **`InvalidPath`**: A path cannot be split or is not valid UTF-8
//!
//! Absent rows are never an error: lookups return empty results and deletes of
//! missing rows affect zero rows.

use sled::transaction::TransactionError;
use thiserror::Error;

use super::types::EntityKind;

/// Database-specific errors
#[derive(Debug, Error)]
pub enum DbError {
    /// Represents a sled database error
    #[error("Database error: {0}")]
    SledError(#[from] sled::Error),

    /// Represents a bincode decoding error
    #[error("Error while decoding data: {0}")]
    DecodeError(#[from] bincode::error::DecodeError),

    /// Represents a bincode encoding error
    #[error("Error while encoding data: {0}")]
    EncodeError(#[from] bincode::error::EncodeError),

    /// Uniqueness violation on collection or tag creation
    #[error("{kind} '{key}' already exists")]
    DuplicateKey { kind: EntityKind, key: String },

    /// Path has no file name component or is not valid UTF-8
    #[error("Invalid path: {0}")]
    InvalidPath(String),
}

impl From<TransactionError<Self>> for DbError {
    fn from(err: TransactionError<Self>) -> Self {
        match err {
            TransactionError::Abort(inner) => inner,
            TransactionError::Storage(e) => Self::SledError(e),
        }
    }
}

impl DbError {
    /// Whether this error is a uniqueness violation
    #[must_use]
    pub const fn is_duplicate_key(&self) -> bool {
        matches!(self, Self::DuplicateKey { .. })
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod error_tests;
