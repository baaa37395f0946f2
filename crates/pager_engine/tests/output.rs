use std::fs;

use pager_engine::{
    ensure_output_dir, render_snapshot, snapshot_filename, summarize_fragment, FragmentSummary,
    SnapshotWriter,
};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

#[test]
fn summary_counts_top_level_rows() {
    let summary = summarize_fragment("<div>item3</div>\n<div> item4 </div>");
    assert_eq!(summary, FragmentSummary { rows: 2, text_len: 10 });
}

#[test]
fn empty_fragment_has_no_rows() {
    assert_eq!(summarize_fragment(""), FragmentSummary::default());
    assert_eq!(summarize_fragment("  \n"), FragmentSummary::default());
}

#[test]
fn creates_missing_output_dir() {
    let temp = TempDir::new().unwrap();
    let new_dir = temp.path().join("snapshots");
    assert!(!new_dir.exists());
    ensure_output_dir(&new_dir).unwrap();
    assert!(new_dir.is_dir());
}

#[test]
fn snapshot_wraps_non_empty_fragments() {
    let fragments = vec![
        "<div>item1</div>".to_string(),
        "<div>item3</div>\n".to_string(),
        String::new(),
    ];
    let html = render_snapshot(
        "http://admin.local/feedback?a=1&b=\"2\"",
        "2024-01-01T00:00:00Z",
        &fragments,
    );

    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("content=\"http://admin.local/feedback?a=1&amp;b=&quot;2&quot;\""));
    assert!(html.contains("<div id=\"tab_content\">\n<div>item1</div>\n<div>item3</div>\n</div>"));
}

#[test]
fn snapshot_write_replaces_existing_file() {
    let temp = TempDir::new().unwrap();
    let writer = SnapshotWriter::new(temp.path().to_path_buf());
    let name = snapshot_filename("http://admin.local/feedback");

    let first = writer.write(&name, "hello").unwrap();
    assert_eq!(first.file_name().unwrap().to_str().unwrap(), name);
    assert_eq!(fs::read_to_string(&first).unwrap(), "hello");

    let second = writer.write(&name, "world").unwrap();
    assert_eq!(first, second);
    assert_eq!(fs::read_to_string(&second).unwrap(), "world");
}

#[test]
fn no_partial_file_when_dir_is_a_file() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("not_a_dir");
    fs::write(&file_path, "x").unwrap();

    let writer = SnapshotWriter::new(file_path.clone());
    assert!(writer.write("listing.html", "data").is_err());
    assert!(!file_path.with_file_name("listing.html").exists());
}
