//! Tests for the flare cache store.

use super::*;
use proptest::prelude::*;
use std::fs;
use tempfile::TempDir;

const HEADER: &str = "description\tflare_class\tstart\tend\tcoordinates\twavelength";

fn store_with(contents: &str) -> (TempDir, RecordStore) {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("flare_cache.tsv");
    fs::write(&path, contents).expect("seed cache");
    (dir, RecordStore::new(path))
}

fn read(store: &RecordStore) -> String {
    fs::read_to_string(store.path()).expect("read cache")
}

fn row(n: usize) -> String {
    format!("flare {n}\tM{n}.0\t2024-01-0{n} 00:00\t2024-01-0{n} 01:00\tN{n}E{n}\t171")
}

#[test]
fn load_missing_file_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let store = RecordStore::new(dir.path().join("absent.tsv"));
    assert!(matches!(store.load(), Err(StoreError::NotFound { .. })));
}

#[test]
fn load_zero_byte_file_is_empty() {
    let (_dir, store) = store_with("");
    assert!(matches!(store.load(), Err(StoreError::Empty { .. })));
}

#[test]
fn load_header_only_yields_no_records() {
    let (_dir, store) = store_with(&format!("{HEADER}\n"));
    let contents = store.load().unwrap();
    assert_eq!(contents.header, HEADER);
    assert!(contents.records.is_empty());
}

#[test]
fn load_skips_blank_lines_and_tolerates_short_rows() {
    let (_dir, store) = store_with(&format!("{HEADER}\n{}\n\n   \nshort\tC1.0\n", row(1)));
    let contents = store.load().unwrap();
    assert_eq!(contents.records.len(), 2);
    assert_eq!(contents.records[1].class(), "C1.0");
    assert_eq!(contents.records[1].coordinates(), "");
}

#[test]
fn save_pruned_drops_selected_rows_in_order() {
    let (_dir, store) = store_with(&format!("{HEADER}\n{}\n{}\n{}\n", row(1), row(2), row(3)));
    let contents = store.load().unwrap();
    let delete: OriginalSelection = [OriginalIndex::new(1)].into_iter().collect();

    let removed = store
        .save_pruned(&contents.header, &contents.records, &delete)
        .unwrap();

    assert_eq!(removed, 1);
    assert_eq!(read(&store), format!("{HEADER}\n{}\n{}\n", row(1), row(3)));
}

#[test]
fn save_pruned_with_empty_set_rewrites_identically() {
    let original = format!("{HEADER}\n{}\n{}\n", row(1), row(2));
    let (_dir, store) = store_with(&original);
    let contents = store.load().unwrap();
    store
        .save_pruned(&contents.header, &contents.records, &OriginalSelection::new())
        .unwrap();
    assert_eq!(read(&store), original);
}

#[test]
fn clear_keeps_existing_header() {
    let (_dir, store) = store_with(&format!("custom\theader\n{}\n", row(1)));
    let header = store.clear().unwrap();
    assert_eq!(header, "custom\theader");
    assert_eq!(read(&store), "custom\theader\n");
}

#[test]
fn clear_missing_cache_writes_default_header() {
    let dir = tempfile::tempdir().unwrap();
    let store = RecordStore::new(dir.path().join("new.tsv"));
    assert_eq!(store.clear().unwrap(), DEFAULT_HEADER);
    assert_eq!(read(&store), format!("{DEFAULT_HEADER}\n"));
}

#[test]
fn append_dedup_collapses_repeats_and_header() {
    let (_dir, store) = store_with("");
    let existing = vec![row(1), row(1), String::new()];
    let new_lines = vec![row(2), row(1), HEADER.to_string(), row(2)];

    let added = store.append_dedup(HEADER, &existing, &new_lines).unwrap();

    assert_eq!(added, 1);
    assert_eq!(read(&store), format!("{HEADER}\n{}\n{}\n", row(1), row(2)));
}

#[test]
fn save_selection_appends_to_existing_cache() {
    let (_dir, store) = store_with(&format!("{HEADER}\n{}\n", row(1)));
    let added = store
        .save_selection("ignored header", &[row(2), row(1)])
        .unwrap();
    assert_eq!(added, 1);
    assert_eq!(read(&store), format!("{HEADER}\n{}\n{}\n", row(1), row(2)));
}

#[test]
fn save_selection_creates_missing_cache_with_fallback_header() {
    let dir = tempfile::tempdir().unwrap();
    let store = RecordStore::new(dir.path().join("fresh.tsv"));
    store.save_selection(HEADER, &[row(4)]).unwrap();
    assert_eq!(read(&store), format!("{HEADER}\n{}\n", row(4)));
}

#[test]
fn save_selection_without_any_header_writes_default() {
    let dir = tempfile::tempdir().unwrap();
    let store = RecordStore::new(dir.path().join("fresh.tsv"));
    let added = store.save_selection("  ", &[row(1)]).unwrap();
    assert_eq!(added, 1);
    assert_eq!(read(&store), format!("{DEFAULT_HEADER}\n{}\n", row(1)));
}

#[test]
fn save_selection_replaces_blank_cache_header() {
    let (_dir, store) = store_with(&format!("   \n{}\n", row(1)));
    store.save_selection("", &[row(2)]).unwrap();
    assert_eq!(read(&store), format!("{DEFAULT_HEADER}\n{}\n{}\n", row(1), row(2)));
}

#[test]
fn split_tsv_handles_crlf() {
    let doc = split_tsv("h1\th2\r\na\tb\r\n").unwrap();
    assert_eq!(doc.header, "h1\th2");
    assert_eq!(doc.lines, vec!["a\tb".to_string()]);
}

proptest! {
    #[test]
    fn append_dedup_twice_keeps_line_once(
        existing in proptest::collection::vec("[a-c]{1,3}", 0..6),
        line in "[a-c]{1,3}",
    ) {
        let (_dir, store) = store_with("");
        store.append_dedup(HEADER, &existing, &[line.clone()]).unwrap();
        let first = store.read_document().unwrap();
        store.append_dedup(&first.header, &first.lines, &[line.clone()]).unwrap();

        let doc = store.read_document().unwrap();
        prop_assert_eq!(doc.lines.iter().filter(|l| **l == line).count(), 1);
        let unique: HashSet<&String> = doc.lines.iter().collect();
        prop_assert_eq!(unique.len(), doc.lines.len());
    }
}
