//! Tests for working directory handling, listing, naming and deletion

mod common;

use std::fs;
use std::path::PathBuf;

use common::{create_file, file_names, workspace};
use office_tweaks::error::OfficeError;
use office_tweaks::files::{resolve_unique_path, FileManager, PatternKind};
use office_tweaks::report::Reporter;
use tempfile::TempDir;

#[test]
fn test_set_missing_directory_keeps_current() {
    let (temp_dir, mut files) = workspace();
    let before = files.current_directory().to_path_buf();

    let result = files.set_working_directory(&temp_dir.path().join("does-not-exist"));

    assert!(matches!(result, Err(OfficeError::NotFound(_))));
    assert_eq!(files.current_directory(), before);
}

#[test]
fn test_set_file_as_directory_rejected() {
    let (temp_dir, mut files) = workspace();
    let file = create_file(temp_dir.path(), "notes.txt", b"hello");

    let result = files.set_working_directory(&file);

    assert!(matches!(result, Err(OfficeError::NotADirectory(_))));
}

#[test]
fn test_set_empty_path_rejected() {
    let (_temp_dir, mut files) = workspace();
    let result = files.set_working_directory(&PathBuf::new());
    assert!(matches!(result, Err(OfficeError::InvalidInput(_))));
}

#[test]
fn test_set_directory_is_canonical() {
    let (temp_dir, mut files) = workspace();
    fs::create_dir(temp_dir.path().join("sub")).unwrap();

    let dir = files
        .set_working_directory(&temp_dir.path().join("sub").join(".."))
        .unwrap()
        .to_path_buf();

    assert_eq!(dir, fs::canonicalize(temp_dir.path()).unwrap());
}

#[test]
fn test_with_directory_rejects_missing() {
    let temp_dir = TempDir::new().unwrap();
    let result = FileManager::with_directory(&temp_dir.path().join("nope"), Reporter::quiet());
    assert!(matches!(result, Err(OfficeError::NotFound(_))));
}

#[test]
fn test_list_by_extension_filters_and_sorts() {
    let (temp_dir, files) = workspace();
    create_file(temp_dir.path(), "b.pdf", b"b");
    create_file(temp_dir.path(), "A.PDF", b"a");
    create_file(temp_dir.path(), "c.docx", b"c");
    create_file(temp_dir.path(), "pdf", b"no extension");
    fs::create_dir(temp_dir.path().join("folder.pdf")).unwrap();

    let names: Vec<String> = files
        .list_pdf_files()
        .unwrap()
        .into_iter()
        .map(|c| c.name)
        .collect();

    assert_eq!(names, vec!["A.PDF", "b.pdf"]);
}

#[test]
fn test_list_is_repeatable() {
    let (temp_dir, files) = workspace();
    create_file(temp_dir.path(), "one.png", b"1");
    create_file(temp_dir.path(), "two.JPG", b"22");
    create_file(temp_dir.path(), "three.gif", b"333");

    let first = files.list_image_files().unwrap();
    let second = files.list_image_files().unwrap();

    assert_eq!(first, second);
    assert_eq!(first.len(), 3);
    let sizes: Vec<u64> = first.iter().map(|c| c.size).collect();
    assert_eq!(sizes, vec![1, 3, 2]);
}

#[test]
fn test_list_multiple_extensions() {
    let (temp_dir, files) = workspace();
    create_file(temp_dir.path(), "a.pdf", b"");
    create_file(temp_dir.path(), "b.docx", b"");
    create_file(temp_dir.path(), "c.txt", b"");

    let found = files.list_by_extension(&["pdf", ".docx"]).unwrap();
    assert_eq!(found.len(), 2);
}

#[test]
fn test_unique_path_when_free() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("report.docx");
    assert_eq!(resolve_unique_path(&path, None).unwrap(), path);
}

#[test]
fn test_unique_path_appends_counter() {
    let temp_dir = TempDir::new().unwrap();
    create_file(temp_dir.path(), "report.docx", b"");
    create_file(temp_dir.path(), "report_1.docx", b"");

    let resolved = resolve_unique_path(&temp_dir.path().join("report.docx"), None).unwrap();

    assert_eq!(resolved, temp_dir.path().join("report_2.docx"));
    assert!(!resolved.exists());
}

#[test]
fn test_unique_path_respects_limit() {
    let temp_dir = TempDir::new().unwrap();
    create_file(temp_dir.path(), "img.png", b"");
    create_file(temp_dir.path(), "img_1.png", b"");
    create_file(temp_dir.path(), "img_2.png", b"");

    let result = resolve_unique_path(&temp_dir.path().join("img.png"), Some(2));

    assert!(matches!(
        result,
        Err(OfficeError::SuffixLimitReached { limit: 2, .. })
    ));
}

#[test]
fn test_unique_path_without_extension() {
    let temp_dir = TempDir::new().unwrap();
    create_file(temp_dir.path(), "README", b"");

    let resolved = resolve_unique_path(&temp_dir.path().join("README"), None).unwrap();
    assert_eq!(resolved, temp_dir.path().join("README_1"));
}

#[test]
fn test_match_contains_pattern() {
    let (temp_dir, files) = workspace();
    create_file(temp_dir.path(), "draft1.pdf", b"x");
    create_file(temp_dir.path(), "final.pdf", b"x");
    create_file(temp_dir.path(), "old_draft.docx", b"x");

    let set = files
        .match_by_pattern(PatternKind::Contains, "draft", None)
        .unwrap();

    let names: Vec<&str> = set.candidates.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["draft1.pdf", "old_draft.docx"]);
    assert_eq!(set.total_size(), 2);
}

#[test]
fn test_match_each_kind() {
    let (temp_dir, files) = workspace();
    create_file(temp_dir.path(), "tmp_notes.TXT", b"");
    create_file(temp_dir.path(), "scan_backup", b"");
    create_file(temp_dir.path(), "photo.txt", b"");

    let count = |kind, pattern| files.match_by_pattern(kind, pattern, None).unwrap().len();

    assert_eq!(count(PatternKind::Prefix, "TMP"), 1);
    assert_eq!(count(PatternKind::Suffix, "backup"), 1);
    assert_eq!(count(PatternKind::Extension, "txt"), 2);
    assert_eq!(count(PatternKind::Extension, ".txt"), 2);
    assert_eq!(count(PatternKind::Contains, "o"), 2);
}

#[test]
fn test_match_nothing_is_empty_set() {
    let (temp_dir, files) = workspace();
    create_file(temp_dir.path(), "keep.pdf", b"");

    let set = files
        .match_by_pattern(PatternKind::Prefix, "zzz", None)
        .unwrap();

    assert!(set.is_empty());
}

#[test]
fn test_match_empty_pattern_rejected() {
    let (_temp_dir, files) = workspace();
    let result = files.match_by_pattern(PatternKind::Contains, "   ", None);
    assert!(matches!(result, Err(OfficeError::InvalidInput(_))));
}

#[test]
fn test_match_other_directory() {
    let (temp_dir, files) = workspace();
    let other = temp_dir.path().join("archive");
    fs::create_dir(&other).unwrap();
    create_file(&other, "old_a.pdf", b"");
    create_file(temp_dir.path(), "old_b.pdf", b"");

    let set = files
        .match_by_pattern(PatternKind::Prefix, "old", Some(&other))
        .unwrap();

    assert_eq!(set.len(), 1);
    assert_eq!(set.candidates[0].name, "old_a.pdf");
}

#[test]
fn test_delete_all_removes_matches_only() {
    let (temp_dir, files) = workspace();
    create_file(temp_dir.path(), "draft1.pdf", b"x");
    create_file(temp_dir.path(), "final.pdf", b"x");
    create_file(temp_dir.path(), "old_draft.docx", b"x");

    let set = files
        .match_by_pattern(PatternKind::Contains, "draft", None)
        .unwrap();
    let deleted = files.delete_all(&set);

    assert_eq!(deleted, 2);
    assert_eq!(file_names(temp_dir.path()), vec!["final.pdf"]);
}

#[test]
fn test_delete_all_continues_after_failure() {
    let (temp_dir, files) = workspace();
    create_file(temp_dir.path(), "tmp_a.log", b"");
    create_file(temp_dir.path(), "tmp_b.log", b"");
    create_file(temp_dir.path(), "tmp_c.log", b"");

    let set = files
        .match_by_pattern(PatternKind::Prefix, "tmp_", None)
        .unwrap();
    // Vanishes between matching and deleting
    fs::remove_file(temp_dir.path().join("tmp_b.log")).unwrap();

    let deleted = files.delete_all(&set);

    assert_eq!(deleted, 2);
    assert!(file_names(temp_dir.path()).is_empty());
}
