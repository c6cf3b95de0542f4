use std::fs;

use adpreview_engine::{ensure_output_dir, PageWriter, PREVIEW_PAGE_FILENAME};
use tempfile::TempDir;

#[test]
fn creates_missing_output_dir() {
    let temp = TempDir::new().unwrap();
    let new_dir = temp.path().join("out");
    assert!(!new_dir.exists());
    ensure_output_dir(&new_dir).unwrap();
    assert!(new_dir.is_dir());
}

#[test]
fn page_write_replaces_previous_page() {
    let temp = TempDir::new().unwrap();
    let writer = PageWriter::new(temp.path().join("site"));

    let first = writer.write("<p>one</p>").unwrap().to_path_buf();
    assert_eq!(first.file_name().unwrap(), PREVIEW_PAGE_FILENAME);
    assert_eq!(fs::read_to_string(&first).unwrap(), "<p>one</p>");

    let second = writer.write("<p>two</p>").unwrap();
    assert_eq!(first, second);
    assert_eq!(fs::read_to_string(second).unwrap(), "<p>two</p>");
    assert_eq!(fs::read_dir(temp.path().join("site")).unwrap().count(), 1);
}

#[test]
fn write_fails_when_output_is_a_file() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("not_a_dir");
    fs::write(&file_path, "x").unwrap();

    let writer = PageWriter::with_filename(file_path.clone(), "page.html");
    assert!(writer.write("data").is_err());
    assert_eq!(fs::read_to_string(&file_path).unwrap(), "x");
}
