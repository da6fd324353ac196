//! Row types and path helpers for the tag index
//!
//! This module defines the four stored relations and the helpers that turn
//! user-supplied paths into the `(folder, filename)` pairs the index keys on.
//!
//! # Types
//!
//! - **`Collection`**: named grouping for tags, keyed by normalized name
//! - **`Tag`**: named label, keyed by normalized name, optionally in one collection
//! - **`FileTag`**: one `(folder, filename, tag_id)` association row
//! - **`LinkedFolder`**: a folder bound to a collection with an optional default tag
//! - **`FileRef`**: a `(folder, filename)` pair returned by file queries
//!
//! Rows are serialized with bincode for storage and with serde for output.
//!
//! # Examples
//!
//! ```
//! use mtm::db::types::{folder_key, split_path};
//! use std::path::Path;
//!
//! let (folder, name) = split_path(Path::new("/docs/report.txt")).unwrap();
//! assert_eq!(folder, "/docs");
//! assert_eq!(name, "report.txt");
//! assert_eq!(folder_key(Path::new("/docs/")).unwrap(), "/docs");
//! ```

use super::error::DbError;
use bincode::{Decode, Encode};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Kind of uniquely keyed entity, reported with `DuplicateKey`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Collection,
    Tag,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Collection => f.write_str("collection"),
            Self::Tag => f.write_str("tag"),
        }
    }
}

/// A named grouping for tags
#[derive(Encode, Decode, Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Collection {
    pub id: String,
    pub name: String,
}

/// A named label, optionally owned by one collection
///
/// `collection_id` is `None` for uncategorized tags. It is not checked against
/// the collections relation and may point at a collection that no longer exists.
#[derive(Encode, Decode, Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Tag {
    pub id: String,
    pub name: String,
    pub collection_id: Option<String>,
}

/// One file-tag association row
#[derive(Encode, Decode, Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct FileTag {
    pub folder: String,
    pub filename: String,
    pub tag_id: String,
}

impl FileTag {
    #[must_use]
    pub fn new(folder: impl Into<String>, filename: impl Into<String>, tag_id: impl Into<String>) -> Self {
        Self {
            folder: folder.into(),
            filename: filename.into(),
            tag_id: tag_id.into(),
        }
    }

    #[must_use]
    pub fn file_ref(&self) -> FileRef {
        FileRef::new(self.folder.clone(), self.filename.clone())
    }
}

/// A folder bound to a collection
#[derive(Encode, Decode, Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct LinkedFolder {
    pub folder: String,
    pub collection_id: String,
    pub default_tag_id: Option<String>,
}

/// A file as the index sees it: parent folder plus base name
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FileRef {
    pub folder: String,
    pub filename: String,
}

impl FileRef {
    #[must_use]
    pub fn new(folder: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            folder: folder.into(),
            filename: filename.into(),
        }
    }

    /// Rejoin folder and filename into a full path
    #[must_use]
    pub fn path(&self) -> PathBuf {
        Path::new(&self.folder).join(&self.filename)
    }
}

impl fmt::Display for FileRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path().display())
    }
}

/// Borrow a path as UTF-8
///
/// # Errors
///
/// Returns `DbError::InvalidPath` if the path is not valid UTF-8.
pub fn path_str(path: &Path) -> Result<&str, DbError> {
    path.to_str()
        .ok_or_else(|| DbError::InvalidPath(path.to_string_lossy().into_owned()))
}

/// Canonical string form of a folder used as an index key
///
/// Trailing slashes are stripped so `/docs/` and `/docs` address the same
/// folder. The root folder stays `/`.
///
/// # Errors
///
/// Returns `DbError::InvalidPath` if the path is not valid UTF-8.
pub fn folder_key(path: &Path) -> Result<String, DbError> {
    Ok(strip_trailing_slash(path_str(path)?).to_string())
}

pub(crate) fn strip_trailing_slash(folder: &str) -> &str {
    let trimmed = folder.trim_end_matches('/');
    if trimmed.is_empty() && folder.starts_with('/') {
        "/"
    } else {
        trimmed
    }
}

/// Split a file path into `(folder, filename)`
///
/// A path without a parent component (e.g. `notes.txt`) is placed in `.`.
///
/// # Errors
///
/// Returns `DbError::InvalidPath` if the path has no file name (such as `/` or
/// a path ending in `..`) or is not valid UTF-8.
pub fn split_path(path: &Path) -> Result<(String, String), DbError> {
    let invalid = || DbError::InvalidPath(path.to_string_lossy().into_owned());

    let filename = path.file_name().ok_or_else(invalid)?;
    let filename = filename.to_str().ok_or_else(invalid)?;

    let folder = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => folder_key(parent)?,
        _ => ".".to_string(),
    };

    Ok((folder, filename.to_string()))
}

/// Encode a row with the standard bincode configuration
pub(crate) fn encode<T: Encode>(row: &T) -> Result<Vec<u8>, DbError> {
    Ok(bincode::encode_to_vec(row, bincode::config::standard())?)
}

/// Decode a row with the standard bincode configuration
pub(crate) fn decode<T: Decode<()>>(bytes: &[u8]) -> Result<T, DbError> {
    let (row, _): (T, usize) = bincode::decode_from_slice(bytes, bincode::config::standard())?;
    Ok(row)
}

#[cfg(test)]
#[path = "types_tests.rs"]
mod types_tests;
