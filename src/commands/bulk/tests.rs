use std::fs;
use std::path::Path;

use crate::ErrorKind;
use crate::db::FileRef;
use crate::db::types::folder_key;
use crate::discovery::{DirScanner, FsMover};
use crate::testing::{ScriptedPrompt, TestDb, create_test_file_with_content, folder_with};

use super::{
    BulkSummary, check_tag_files_contain_word, copy_tag_files, interactive_tag_folder, move_tag_files,
    prompt_tag_file, prompt_tag_folder, tag_all_files_containing_word, tag_all_files_in_folder,
};

#[test]
fn test_tag_all_files_in_folder() {
    let test_db = TestDb::new();
    let db = test_db.db();
    let dir = folder_with(&["a.txt", "b.txt", ".hidden"]);
    fs::create_dir(dir.path().join("sub")).unwrap();

    let summary = tag_all_files_in_folder(db, &DirScanner, "Project X", dir.path()).unwrap();
    assert_eq!(summary, BulkSummary::tagged(3));

    let key = folder_key(dir.path()).unwrap();
    let files = db.list_files_for_tag("projectx", None).unwrap();
    assert_eq!(
        files,
        vec![
            FileRef::new(key.clone(), "a.txt"),
            FileRef::new(key.clone(), "b.txt"),
            FileRef::new(key, "sub"),
        ]
    );
}

#[test]
fn test_tag_all_files_in_empty_folder() {
    let test_db = TestDb::new();
    let dir = folder_with(&[]);

    let summary = tag_all_files_in_folder(test_db.db(), &DirScanner, "x", dir.path()).unwrap();
    assert_eq!(summary.tagged, 0);
    assert_eq!(test_db.db().count_file_tags(), 0);
}

#[test]
fn test_tag_missing_folder_writes_nothing() {
    let test_db = TestDb::new();
    let dir = folder_with(&[]);

    let err = tag_all_files_in_folder(test_db.db(), &DirScanner, "x", &dir.path().join("nope")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Filesystem);
    assert_eq!(test_db.db().count_file_tags(), 0);
}

#[test]
fn test_tag_files_containing_word_case_variants() {
    let test_db = TestDb::new();
    let db = test_db.db();
    let dir = folder_with(&["INVOICE_1.pdf", "Invoice_2.pdf", "invoice_3.pdf", "InVoIcE_4.pdf", "notes.txt"]);

    let summary = tag_all_files_containing_word(db, &DirScanner, "Bills", dir.path(), "invoice").unwrap();
    assert_eq!(summary.tagged, 3);

    let names: Vec<String> = db
        .list_files_for_tag("bills", None)
        .unwrap()
        .into_iter()
        .map(|f| f.filename)
        .collect();
    assert_eq!(names, vec!["INVOICE_1.pdf", "Invoice_2.pdf", "invoice_3.pdf"]);
}

#[test]
fn test_interactive_tags_skips_and_ends() {
    let test_db = TestDb::new();
    let db = test_db.db();
    let dir = folder_with(&["a.txt", "b.txt", "c.txt", "d.txt"]);
    let mut prompt = ScriptedPrompt::new(&["Red", "skip", "Blue", "END"]);

    let summary = interactive_tag_folder(db, &DirScanner, &mut prompt, dir.path()).unwrap();
    assert_eq!(
        summary,
        BulkSummary {
            tagged: 2,
            skipped: 1,
            remaining: 1,
        }
    );
    assert_eq!(prompt.asked, vec!["a.txt", "b.txt", "c.txt", "d.txt"]);

    let key = folder_key(dir.path()).unwrap();
    assert_eq!(db.list_files_for_tag("red", None).unwrap(), vec![FileRef::new(key.clone(), "a.txt")]);
    assert_eq!(db.list_files_for_tag("blue", None).unwrap(), vec![FileRef::new(key, "c.txt")]);
}

#[test]
fn test_interactive_end_first_tags_nothing() {
    let test_db = TestDb::new();
    let dir = folder_with(&["a.txt", "b.txt"]);
    let mut prompt = ScriptedPrompt::new(&["end"]);

    let summary = interactive_tag_folder(test_db.db(), &DirScanner, &mut prompt, dir.path()).unwrap();
    assert_eq!(summary.tagged, 0);
    assert_eq!(summary.remaining, 2);
    assert!(summary.ended_early());
    assert_eq!(test_db.db().count_file_tags(), 0);
}

#[test]
fn test_interactive_blank_answer_skips() {
    let test_db = TestDb::new();
    let dir = folder_with(&["a.txt"]);
    let mut prompt = ScriptedPrompt::new(&["   "]);

    let summary = interactive_tag_folder(test_db.db(), &DirScanner, &mut prompt, dir.path()).unwrap();
    assert_eq!(summary.skipped, 1);
    assert_eq!(test_db.db().count_file_tags(), 0);
}

#[test]
fn test_interactive_prompt_failure_writes_nothing() {
    let test_db = TestDb::new();
    let dir = folder_with(&["a.txt", "b.txt", "c.txt"]);
    // Runs out of answers on the third entry
    let mut prompt = ScriptedPrompt::new(&["Red", "Blue"]);

    let err = interactive_tag_folder(test_db.db(), &DirScanner, &mut prompt, dir.path()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Prompt);
    assert_eq!(test_db.db().count_file_tags(), 0);
}

#[test]
fn test_prompt_tag_file() {
    let test_db = TestDb::new();
    let db = test_db.db();
    let mut prompt = ScriptedPrompt::new(&["  Later  ", "SKIP"]);

    let row = prompt_tag_file(db, &mut prompt, Path::new("/docs/a.txt")).unwrap().unwrap();
    assert_eq!(row.tag_id, "later");
    assert!(prompt_tag_file(db, &mut prompt, Path::new("/docs/b.txt")).unwrap().is_none());
    assert_eq!(db.count_file_tags(), 1);
}

#[test]
fn test_prompt_tag_folder() {
    let test_db = TestDb::new();
    let db = test_db.db();
    let dir = folder_with(&["a.txt", "b.txt"]);
    let mut prompt = ScriptedPrompt::new(&["Archive", "skip"]);

    let summary = prompt_tag_folder(db, &DirScanner, &mut prompt, dir.path()).unwrap();
    assert_eq!(summary.tagged, 2);

    let summary = prompt_tag_folder(db, &DirScanner, &mut prompt, dir.path()).unwrap();
    assert_eq!(summary, BulkSummary::new());
    assert_eq!(db.count_file_tags(), 2);
}

#[test]
fn test_check_tag_files_contain_word() {
    let test_db = TestDb::new();
    let db = test_db.db();
    db.assign_tag_to_file(Path::new("/r/report_q1.txt"), "Reports").unwrap();
    db.assign_tag_to_file(Path::new("/r/Report_q2.txt"), "Reports").unwrap();
    db.assign_tag_to_file(Path::new("/r/notes.txt"), "Reports").unwrap();

    let missing = check_tag_files_contain_word(db, "reports", "report").unwrap();
    assert_eq!(
        missing,
        vec![FileRef::new("/r", "Report_q2.txt"), FileRef::new("/r", "notes.txt")]
    );
}

#[test]
fn test_copy_tag_files() {
    let test_db = TestDb::new();
    let db = test_db.db();
    let src = folder_with(&[]);
    let dest = folder_with(&[]);
    create_test_file_with_content(src.path().join("a.txt"), b"alpha").unwrap();
    create_test_file_with_content(src.path().join("b.txt"), b"beta").unwrap();
    db.assign_tag_to_file(&src.path().join("a.txt"), "Keep").unwrap();

    let copied = copy_tag_files(db, &FsMover, "keep", dest.path()).unwrap();
    assert_eq!(copied, vec![dest.path().join("a.txt")]);
    assert_eq!(fs::read(dest.path().join("a.txt")).unwrap(), b"alpha");
    assert!(src.path().join("a.txt").exists());
    assert!(!dest.path().join("b.txt").exists());
}

#[test]
fn test_move_tag_files_leaves_index_untouched() {
    let test_db = TestDb::new();
    let db = test_db.db();
    let src = folder_with(&["a.txt"]);
    let dest = folder_with(&[]);
    db.assign_tag_to_file(&src.path().join("a.txt"), "Go").unwrap();

    let moved = move_tag_files(db, &FsMover, "go", dest.path()).unwrap();
    assert_eq!(moved, vec![dest.path().join("a.txt")]);
    assert!(!src.path().join("a.txt").exists());
    assert!(dest.path().join("a.txt").exists());

    let key = folder_key(src.path()).unwrap();
    assert_eq!(db.list_files_for_tag("go", None).unwrap(), vec![FileRef::new(key, "a.txt")]);
}

#[test]
fn test_copy_to_missing_destination_fails() {
    let test_db = TestDb::new();
    let db = test_db.db();
    let src = folder_with(&["a.txt"]);
    db.assign_tag_to_file(&src.path().join("a.txt"), "x").unwrap();

    let err = copy_tag_files(db, &FsMover, "x", &src.path().join("missing")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Filesystem);
}

#[test]
fn test_move_same_name_from_two_folders_keeps_both() {
    let test_db = TestDb::new();
    let db = test_db.db();
    let first = folder_with(&[]);
    let second = folder_with(&[]);
    let dest = folder_with(&[]);
    create_test_file_with_content(first.path().join("x.txt"), b"from-a").unwrap();
    create_test_file_with_content(second.path().join("x.txt"), b"from-b").unwrap();
    db.assign_tag_to_file(&first.path().join("x.txt"), "Go").unwrap();
    db.assign_tag_to_file(&second.path().join("x.txt"), "Go").unwrap();

    let err = move_tag_files(db, &FsMover, "go", dest.path()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::PartialBatchFailure);
    assert_eq!(fs::read(dest.path().join("x.txt")).unwrap(), b"from-a");
    assert_eq!(fs::read(second.path().join("x.txt")).unwrap(), b"from-b");
}

#[test]
fn test_copy_does_not_overwrite_destination() {
    let test_db = TestDb::new();
    let db = test_db.db();
    let src = folder_with(&[]);
    let dest = folder_with(&[]);
    create_test_file_with_content(src.path().join("a.txt"), b"new").unwrap();
    create_test_file_with_content(dest.path().join("a.txt"), b"old").unwrap();
    db.assign_tag_to_file(&src.path().join("a.txt"), "Keep").unwrap();

    let err = copy_tag_files(db, &FsMover, "keep", dest.path()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Filesystem);
    assert_eq!(fs::read(dest.path().join("a.txt")).unwrap(), b"old");
}
