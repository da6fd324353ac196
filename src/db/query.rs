//! Multi-tag search over the association relation
//!
//! An intersection search returns the files that carry every tag of the
//! requested set. Matching counts distinct requested tags per file, so neither
//! repeated input tags nor repeated association rows can make a file pass with
//! a tag missing.

use std::collections::{HashMap, HashSet};

use super::{Database, DbError, FileRef};
use crate::ident::normalize;

impl Database {
    /// Find files tagged with all of `tags`
    ///
    /// With `by_id` the inputs are used as stored tag ids verbatim, which
    /// reaches associations whose tag row has been deleted. Otherwise each
    /// input is normalized first. An empty input yields no files.
    ///
    /// Files are returned in the order their first association was recorded.
    ///
    /// # Errors
    ///
    /// Returns `DbError` if iteration fails or a row cannot be decoded.
    pub fn list_files_for_tags<S: AsRef<str>>(&self, tags: &[S], by_id: bool) -> Result<Vec<FileRef>, DbError> {
        let wanted: HashSet<String> = tags
            .iter()
            .map(|t| if by_id { t.as_ref().to_string() } else { normalize(t.as_ref()) })
            .collect();
        if wanted.is_empty() {
            return Ok(Vec::new());
        }

        let mut order = Vec::new();
        let mut matched: HashMap<FileRef, HashSet<String>> = HashMap::new();
        for row in self.file_tag_rows() {
            let row = row?;
            if !wanted.contains(&row.tag_id) {
                continue;
            }
            let file = row.file_ref();
            let entry = matched.entry(file.clone()).or_insert_with(|| {
                order.push(file);
                HashSet::new()
            });
            entry.insert(row.tag_id);
        }

        Ok(order
            .into_iter()
            .filter(|file| matched.get(file).is_some_and(|found| found.len() == wanted.len()))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use crate::db::FileRef;
    use crate::testing::TestDb;
    use std::path::Path;

    fn tag(db: &crate::db::Database, path: &str, tag: &str) {
        db.assign_tag_to_file(Path::new(path), tag).unwrap();
    }

    #[test]
    fn test_intersection_of_two_tags() {
        let test_db = TestDb::new();
        let db = test_db.db();

        tag(db, "/docs/a.txt", "X");
        tag(db, "/docs/b.txt", "X");
        tag(db, "/docs/a.txt", "Y");

        let files = db.list_files_for_tags(&["X", "Y"], false).unwrap();
        assert_eq!(files, vec![FileRef::new("/docs", "a.txt")]);
    }

    #[test]
    fn test_singleton_matches_single_tag_listing() {
        let test_db = TestDb::new();
        let db = test_db.db();

        tag(db, "/d/1", "x");
        tag(db, "/d/2", "x");
        tag(db, "/e/1", "x");
        tag(db, "/d/1", "x");
        tag(db, "/d/3", "y");

        assert_eq!(
            db.list_files_for_tags(&["x"], false).unwrap(),
            db.list_files_for_tag("x", None).unwrap()
        );
    }

    #[test]
    fn test_duplicate_rows_do_not_satisfy_missing_tag() {
        let test_db = TestDb::new();
        let db = test_db.db();

        // Two rows for X, none for Y: row count equals the input size but
        // only one requested tag actually matched.
        tag(db, "/docs/a.txt", "X");
        tag(db, "/docs/a.txt", "X");

        assert!(db.list_files_for_tags(&["X", "Y"], false).unwrap().is_empty());
    }

    #[test]
    fn test_duplicate_rows_do_not_hide_a_match() {
        let test_db = TestDb::new();
        let db = test_db.db();

        tag(db, "/docs/a.txt", "X");
        tag(db, "/docs/a.txt", "X");
        tag(db, "/docs/a.txt", "Y");

        assert_eq!(
            db.list_files_for_tags(&["X", "Y"], false).unwrap(),
            vec![FileRef::new("/docs", "a.txt")]
        );
    }

    #[test]
    fn test_duplicate_inputs_do_not_inflate_requirement() {
        let test_db = TestDb::new();
        let db = test_db.db();

        tag(db, "/docs/a.txt", "X");

        assert_eq!(
            db.list_files_for_tags(&["X", "x", "X"], false).unwrap(),
            vec![FileRef::new("/docs", "a.txt")]
        );
    }

    #[test]
    fn test_empty_input_yields_nothing() {
        let test_db = TestDb::new();
        let db = test_db.db();
        tag(db, "/docs/a.txt", "X");

        let none: [&str; 0] = [];
        assert!(db.list_files_for_tags(&none, false).unwrap().is_empty());
    }

    #[test]
    fn test_search_by_id_reaches_orphans() {
        let test_db = TestDb::new();
        let db = test_db.db();

        db.create_tag("Old Name", None).unwrap();
        tag(db, "/docs/a.txt", "Old Name");
        db.delete_tag("Old Name").unwrap();

        let files = db.list_files_for_tags(&["oldname"], true).unwrap();
        assert_eq!(files, vec![FileRef::new("/docs", "a.txt")]);
    }

    #[test]
    fn test_search_by_id_is_not_normalized() {
        let test_db = TestDb::new();
        let db = test_db.db();
        tag(db, "/docs/a.txt", "Mixed Case");

        assert!(db.list_files_for_tags(&["Mixed Case"], true).unwrap().is_empty());
        assert_eq!(db.list_files_for_tags(&["mixedcase"], true).unwrap().len(), 1);
    }

    #[test]
    fn test_same_name_in_different_folders_are_distinct() {
        let test_db = TestDb::new();
        let db = test_db.db();

        tag(db, "/a/f.txt", "x");
        tag(db, "/b/f.txt", "y");

        assert!(db.list_files_for_tags(&["x", "y"], false).unwrap().is_empty());
    }

    #[test]
    fn test_three_way_intersection() {
        let test_db = TestDb::new();
        let db = test_db.db();

        for t in ["a", "b", "c"] {
            tag(db, "/d/all.txt", t);
        }
        tag(db, "/d/two.txt", "a");
        tag(db, "/d/two.txt", "b");

        let files = db.list_files_for_tags(&["a", "b", "c"], false).unwrap();
        assert_eq!(files, vec![FileRef::new("/d", "all.txt")]);
    }
}
