//! Tag index store for mtm
//!
//! Provides the persistent model of collections, tags, file-tag associations
//! and linked folders, using sled as the embedded database backend.
//!
//! Uses one sled tree per relation:
//! - `collections`: collection id -> `Collection`
//! - `tags`: tag id -> `Tag`
//! - `file_tags`: generated row id -> `FileTag`
//! - `linked_folders`: generated row id -> `LinkedFolder`
//!
//! Ids of collections and tags are derived from display names with
//! [`normalize`](crate::ident::normalize). Association and linked-folder rows are
//! keyed by generated ids so duplicates are representable and iteration follows
//! insertion order. Nothing is cascaded: deleting a tag leaves its associations
//! in place and they keep matching queries by id.

use bincode::Decode;
use log::debug;
use sled::transaction::{ConflictableTransactionError, TransactionResult};
use sled::{Db, IVec, Tree};
use std::collections::{BTreeSet, HashSet};
use std::path::Path;

use crate::ident::normalize;

pub mod error;
mod query;
pub mod types;

pub use error::DbError;
pub use types::{Collection, EntityKind, FileRef, FileTag, LinkedFolder, Tag};

use types::{decode, encode, folder_key, split_path};

/// Database wrapper that encapsulates all tag index operations
///
/// The handle is owned by the caller and passed explicitly to every command.
pub struct Database {
    db: Db,
    collections: Tree,
    tags: Tree,
    file_tags: Tree,
    linked_folders: Tree,
}

impl Database {
    /// Opens or creates a database at the specified path
    ///
    /// # Examples
    /// ```no_run
    /// use mtm::db::Database;
    /// let db = Database::open("tag_index").unwrap();
    /// ```
    ///
    /// # Errors
    ///
    /// Returns `DbError` if the database cannot be opened or if the internal trees cannot be created.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, DbError> {
        debug!("opening tag index at {}", path.as_ref().display());
        Self::from_db(sled::open(path)?)
    }

    fn from_db(db: Db) -> Result<Self, DbError> {
        let collections = db.open_tree("collections")?;
        let tags = db.open_tree("tags")?;
        let file_tags = db.open_tree("file_tags")?;
        let linked_folders = db.open_tree("linked_folders")?;
        Ok(Self {
            db,
            collections,
            tags,
            file_tags,
            linked_folders,
        })
    }

    // Collections

    /// Create a collection keyed by the normalized form of `name`
    ///
    /// # Errors
    ///
    /// Returns `DbError::DuplicateKey` if a collection with the same id exists.
    pub fn create_collection(&self, name: &str) -> Result<Collection, DbError> {
        let row = Collection {
            id: normalize(name),
            name: name.to_string(),
        };
        insert_unique(&self.collections, EntityKind::Collection, &row.id, &row)?;
        debug!("created collection '{}'", row.id);
        Ok(row)
    }

    /// Delete collections whose stored display name equals `name` exactly
    ///
    /// Tags that reference the collection keep their (now dangling) reference.
    /// Returns the number of rows removed; zero when nothing matched.
    ///
    /// # Errors
    ///
    /// Returns `DbError` if database operations fail or a row cannot be decoded.
    pub fn delete_collection(&self, name: &str) -> Result<usize, DbError> {
        let mut keys = Vec::new();
        for entry in rows::<Collection>(&self.collections) {
            let (key, row) = entry?;
            if row.name == name {
                keys.push(key);
            }
        }
        let removed = remove_keys(&self.collections, &keys)?;
        debug!("deleted {removed} collection(s) named '{name}'");
        Ok(removed)
    }

    /// Lazily iterate collections ordered by id
    ///
    /// Each call starts a fresh scan of the current state.
    pub fn collections(&self) -> impl Iterator<Item = Result<Collection, DbError>> + '_ {
        rows::<Collection>(&self.collections).map(|entry| entry.map(|(_, row)| row))
    }

    /// List all collections ordered by id
    ///
    /// # Errors
    ///
    /// Returns `DbError` if database iteration fails or a row cannot be decoded.
    pub fn list_collections(&self) -> Result<Vec<Collection>, DbError> {
        self.collections().collect()
    }

    // Tags

    /// Create a tag, optionally placing it in a collection
    ///
    /// The collection is referenced by normalized name and is not required to
    /// exist. An empty collection name means uncategorized.
    ///
    /// # Errors
    ///
    /// Returns `DbError::DuplicateKey` if a tag with the same id exists.
    pub fn create_tag(&self, name: &str, collection: Option<&str>) -> Result<Tag, DbError> {
        let row = Tag {
            id: normalize(name),
            name: name.to_string(),
            collection_id: collection.filter(|c| !c.is_empty()).map(normalize),
        };
        insert_unique(&self.tags, EntityKind::Tag, &row.id, &row)?;
        debug!("created tag '{}' in {:?}", row.id, row.collection_id);
        Ok(row)
    }

    /// Delete a tag by normalized name
    ///
    /// Associations that reference the tag id are left in place.
    ///
    /// # Errors
    ///
    /// Returns `DbError` if the database operation fails.
    pub fn delete_tag(&self, name: &str) -> Result<bool, DbError> {
        let id = normalize(name);
        let removed = self.tags.remove(id.as_bytes())?.is_some();
        debug!("delete tag '{id}': removed={removed}");
        Ok(removed)
    }

    /// Look up a tag by normalized name
    ///
    /// # Errors
    ///
    /// Returns `DbError` if the database operation fails or the row cannot be decoded.
    pub fn get_tag(&self, name: &str) -> Result<Option<Tag>, DbError> {
        self.tags
            .get(normalize(name).as_bytes())?
            .map(|bytes| decode(&bytes))
            .transpose()
    }

    /// Lazily iterate tags ordered by id
    pub fn tags(&self) -> impl Iterator<Item = Result<Tag, DbError>> + '_ {
        rows::<Tag>(&self.tags).map(|entry| entry.map(|(_, row)| row))
    }

    /// List all tags ordered by id
    ///
    /// # Errors
    ///
    /// Returns `DbError` if database iteration fails or a row cannot be decoded.
    pub fn list_all_tags(&self) -> Result<Vec<Tag>, DbError> {
        self.tags().collect()
    }

    /// List tags whose collection is the normalized form of `collection`
    ///
    /// # Errors
    ///
    /// Returns `DbError` if database iteration fails or a row cannot be decoded.
    pub fn list_tags_for_collection(&self, collection: &str) -> Result<Vec<Tag>, DbError> {
        let collection_id = normalize(collection);
        let mut result = Vec::new();
        for tag in self.tags() {
            let tag = tag?;
            if tag.collection_id.as_deref() == Some(collection_id.as_str()) {
                result.push(tag);
            }
        }
        Ok(result)
    }

    /// Move a tag into a collection, replacing any previous membership
    ///
    /// Returns `false` when the tag does not exist.
    ///
    /// # Errors
    ///
    /// Returns `DbError` if the update transaction fails.
    pub fn assign_tag_to_collection(&self, tag: &str, collection: &str) -> Result<bool, DbError> {
        self.set_tag_collection(tag, Some(normalize(collection)))
    }

    /// Mark a tag as uncategorized
    ///
    /// Returns `false` when the tag does not exist.
    ///
    /// # Errors
    ///
    /// Returns `DbError` if the update transaction fails.
    pub fn remove_tag_from_collection(&self, tag: &str) -> Result<bool, DbError> {
        self.set_tag_collection(tag, None)
    }

    fn set_tag_collection(&self, tag: &str, collection_id: Option<String>) -> Result<bool, DbError> {
        let id = normalize(tag);
        let result: TransactionResult<bool, DbError> = self.tags.transaction(|tx| {
            let Some(bytes) = tx.get(id.as_bytes())? else {
                return Ok(false);
            };
            let mut row: Tag = decode(&bytes).map_err(ConflictableTransactionError::Abort)?;
            row.collection_id.clone_from(&collection_id);
            let value = encode(&row).map_err(ConflictableTransactionError::Abort)?;
            tx.insert(id.as_bytes(), value)?;
            Ok(true)
        });
        let updated = result?;
        debug!("tag '{id}' collection -> {collection_id:?}: updated={updated}");
        Ok(updated)
    }

    // File-tag associations

    /// Record that the file at `path` carries `tag`
    ///
    /// Duplicates are allowed: tagging the same file twice stores two rows.
    ///
    /// # Errors
    ///
    /// Returns `DbError::InvalidPath` if the path cannot be split, or `DbError`
    /// if the insert fails.
    pub fn assign_tag_to_file(&self, path: &Path, tag: &str) -> Result<FileTag, DbError> {
        let (folder, filename) = split_path(path)?;
        let row = FileTag::new(folder, filename, normalize(tag));
        self.insert_file_tags(std::slice::from_ref(&row))?;
        Ok(row)
    }

    /// Insert association rows in a single transaction
    ///
    /// Either every row is stored or none is. Returns the number of rows stored.
    ///
    /// # Errors
    ///
    /// Returns `DbError` if encoding or the transaction fails.
    pub fn insert_file_tags(&self, rows: &[FileTag]) -> Result<usize, DbError> {
        if rows.is_empty() {
            return Ok(0);
        }
        let mut encoded = Vec::with_capacity(rows.len());
        for row in rows {
            encoded.push((self.next_key()?, encode(row)?));
        }
        let result: TransactionResult<(), DbError> = self.file_tags.transaction(|tx| {
            for (key, value) in &encoded {
                tx.insert(key.as_slice(), value.as_slice())?;
            }
            Ok(())
        });
        result?;
        debug!("inserted {} association row(s)", rows.len());
        Ok(rows.len())
    }

    /// Remove every association matching `(folder, filename, tag_id)` exactly
    ///
    /// All duplicate rows are removed. Returns the number of rows removed.
    ///
    /// # Errors
    ///
    /// Returns `DbError::InvalidPath` if the path cannot be split, or `DbError`
    /// if the delete fails.
    pub fn remove_tag_from_file(&self, path: &Path, tag: &str) -> Result<usize, DbError> {
        let (folder, filename) = split_path(path)?;
        let tag_id = normalize(tag);
        let mut keys = Vec::new();
        for entry in rows::<FileTag>(&self.file_tags) {
            let (key, row) = entry?;
            if row.folder == folder && row.filename == filename && row.tag_id == tag_id {
                keys.push(key);
            }
        }
        let removed = remove_keys(&self.file_tags, &keys)?;
        debug!("untagged {folder}/{filename} from '{tag_id}': {removed} row(s)");
        Ok(removed)
    }

    /// List tag ids recorded for the file at `path`, in insertion order
    ///
    /// Ids are returned as stored, including ids of deleted tags.
    ///
    /// # Errors
    ///
    /// Returns `DbError::InvalidPath` if the path cannot be split, or `DbError`
    /// if iteration fails.
    pub fn list_tags_for_file(&self, path: &Path) -> Result<Vec<String>, DbError> {
        let (folder, filename) = split_path(path)?;
        let mut ids = Vec::new();
        for row in self.file_tag_rows() {
            let row = row?;
            if row.folder == folder && row.filename == filename {
                ids.push(row.tag_id);
            }
        }
        Ok(ids)
    }

    /// List files carrying `tag`, optionally restricted to one folder
    ///
    /// The folder filter is compared exactly after stripping trailing slashes.
    /// Each file appears once even if the tag was assigned to it repeatedly.
    ///
    /// # Errors
    ///
    /// Returns `DbError` if the folder is not valid UTF-8 or iteration fails.
    pub fn list_files_for_tag(&self, tag: &str, folder: Option<&Path>) -> Result<Vec<FileRef>, DbError> {
        let tag_id = normalize(tag);
        let folder = folder.map(folder_key).transpose()?;

        let mut seen = HashSet::new();
        let mut files = Vec::new();
        for row in self.file_tag_rows() {
            let row = row?;
            if row.tag_id != tag_id {
                continue;
            }
            if folder.as_deref().is_some_and(|f| f != row.folder) {
                continue;
            }
            let file = row.file_ref();
            if seen.insert(file.clone()) {
                files.push(file);
            }
        }
        Ok(files)
    }

    /// Distinct folders that hold at least one tagged entry, sorted
    ///
    /// # Errors
    ///
    /// Returns `DbError` if iteration fails or a row cannot be decoded.
    pub fn list_folders_with_tagged_content(&self) -> Result<Vec<String>, DbError> {
        let mut folders = BTreeSet::new();
        for row in self.file_tag_rows() {
            folders.insert(row?.folder);
        }
        Ok(folders.into_iter().collect())
    }

    /// Names with at least one association directly inside `folder`
    ///
    /// # Errors
    ///
    /// Returns `DbError` if the folder is not valid UTF-8 or iteration fails.
    pub fn tagged_names_in_folder(&self, folder: &Path) -> Result<HashSet<String>, DbError> {
        let folder = folder_key(folder)?;
        let mut names = HashSet::new();
        for row in self.file_tag_rows() {
            let row = row?;
            if row.folder == folder {
                names.insert(row.filename);
            }
        }
        Ok(names)
    }

    /// Lazily iterate all association rows in insertion order
    pub fn file_tag_rows(&self) -> impl Iterator<Item = Result<FileTag, DbError>> + '_ {
        rows::<FileTag>(&self.file_tags).map(|entry| entry.map(|(_, row)| row))
    }

    /// Number of association rows, duplicates included
    #[must_use]
    pub fn count_file_tags(&self) -> usize {
        self.file_tags.len()
    }

    // Linked folders

    /// Bind a folder to a collection, optionally with a default tag
    ///
    /// Linking is append-only: linking the same folder again adds another row.
    ///
    /// # Errors
    ///
    /// Returns `DbError` if the folder is not valid UTF-8 or the insert fails.
    pub fn link_folder(
        &self,
        folder: &Path,
        collection: &str,
        default_tag: Option<&str>,
    ) -> Result<LinkedFolder, DbError> {
        let row = LinkedFolder {
            folder: folder_key(folder)?,
            collection_id: normalize(collection),
            default_tag_id: default_tag.map(normalize),
        };
        self.linked_folders.insert(self.next_key()?, encode(&row)?)?;
        debug!("linked folder {} to '{}'", row.folder, row.collection_id);
        Ok(row)
    }

    /// List all linked folders in link order
    ///
    /// # Errors
    ///
    /// Returns `DbError` if iteration fails or a row cannot be decoded.
    pub fn list_linked_folders(&self) -> Result<Vec<LinkedFolder>, DbError> {
        rows::<LinkedFolder>(&self.linked_folders)
            .map(|entry| entry.map(|(_, row)| row))
            .collect()
    }

    // Maintenance

    /// Flush all pending writes to disk
    ///
    /// # Errors
    ///
    /// Returns `DbError` if the flush operation fails.
    pub fn flush(&self) -> Result<(), DbError> {
        self.db.flush()?;
        Ok(())
    }

    /// Clear every relation
    ///
    /// # Warning
    /// This operation is irreversible!
    ///
    /// # Errors
    ///
    /// Returns `DbError` if clearing any tree fails.
    pub fn clear(&self) -> Result<(), DbError> {
        self.collections.clear()?;
        self.tags.clear()?;
        self.file_tags.clear()?;
        self.linked_folders.clear()?;
        Ok(())
    }

    /// Next row key for append-only relations (big-endian so keys sort by age)
    fn next_key(&self) -> Result<Vec<u8>, DbError> {
        Ok(self.db.generate_id()?.to_be_bytes().to_vec())
    }
}

impl Drop for Database {
    fn drop(&mut self) {
        // Errors cannot be propagated from Drop; callers flush explicitly
        // when they need durability.
        let _ = self.db.flush();
    }
}

/// Insert `row` under `key` only if the key is absent
fn insert_unique<T: bincode::Encode>(
    tree: &Tree,
    kind: EntityKind,
    key: &str,
    row: &T,
) -> Result<(), DbError> {
    let value = encode(row)?;
    match tree.compare_and_swap(key.as_bytes(), None::<&[u8]>, Some(value))? {
        Ok(()) => Ok(()),
        Err(_) => Err(DbError::DuplicateKey {
            kind,
            key: key.to_string(),
        }),
    }
}

/// Remove a set of keys in one transaction, returning how many were given
fn remove_keys(tree: &Tree, keys: &[IVec]) -> Result<usize, DbError> {
    if keys.is_empty() {
        return Ok(0);
    }
    let result: TransactionResult<(), DbError> = tree.transaction(|tx| {
        for key in keys {
            tx.remove(key.clone())?;
        }
        Ok(())
    });
    result?;
    Ok(keys.len())
}

/// Decode every row of a tree, keeping the key
fn rows<T: Decode<()>>(tree: &Tree) -> impl Iterator<Item = Result<(IVec, T), DbError>> {
    tree.iter().map(|entry| {
        let (key, value) = entry?;
        Ok((key, decode(&value)?))
    })
}
