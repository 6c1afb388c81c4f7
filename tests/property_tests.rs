//! Property-based tests for cache and search invariants.
//!
//! Tests validate:
//! 1. Pruning removes exactly the marked rows and keeps the rest in order
//! 2. Appending never duplicates a line already in the cache
//! 3. Search results map back to source rows that match the query

use flarecat::model::{DisplayedIndex, FlareRecord, OriginalIndex, OriginalSelection};
use flarecat::state::filter::RecordFilter;
use flarecat::store::RecordStore;
use proptest::prelude::*;

const HEADER: &str = "description\tflare_class\tstart\tend\tcoordinates\twavelength";

fn line(n: usize, class: &str) -> String {
    format!("flare {n}\t{class}\t2024-05-01 00:00\t2024-05-01 00:30\tN{n}E1\t171")
}

fn class_strategy() -> impl Strategy<Value = String> {
    (prop::sample::select(vec!['A', 'B', 'C', 'M', 'X']), 0u8..10, 0u8..10)
        .prop_map(|(letter, whole, tenth)| format!("{letter}{whole}.{tenth}"))
}

// ===== Property 1: Pruning =====

proptest! {
    #[test]
    fn prune_removes_exactly_marked_rows(
        classes in prop::collection::vec(class_strategy(), 0..30),
        marks in prop::collection::vec(any::<bool>(), 30),
    ) {
        let dir = tempfile::tempdir().unwrap();
        let store = RecordStore::new(dir.path().join("cache.tsv"));
        let lines: Vec<String> = classes.iter().enumerate().map(|(n, c)| line(n, c)).collect();
        let records: Vec<FlareRecord> = lines.iter().map(|l| FlareRecord::parse_line(l)).collect();

        let mut delete = OriginalSelection::new();
        for (idx, _) in marks.iter().take(records.len()).enumerate().filter(|(_, m)| **m) {
            delete.toggle(OriginalIndex::new(idx));
        }

        let removed = store.save_pruned(HEADER, &records, &delete).unwrap();
        prop_assert_eq!(removed, delete.len());

        let kept: Vec<String> = lines
            .iter()
            .enumerate()
            .filter(|(idx, _)| !delete.contains(OriginalIndex::new(*idx)))
            .map(|(_, l)| l.clone())
            .collect();
        let loaded = store.load().unwrap();
        prop_assert_eq!(loaded.header, HEADER);
        let raw: Vec<String> = loaded.records.iter().map(|r| r.raw_line().to_string()).collect();
        prop_assert_eq!(raw, kept);
    }
}

// ===== Property 2: Append Dedup =====

proptest! {
    #[test]
    fn append_never_duplicates(
        existing in prop::collection::vec(0usize..20, 0..15),
        incoming in prop::collection::vec(0usize..20, 0..15),
    ) {
        let dir = tempfile::tempdir().unwrap();
        let store = RecordStore::new(dir.path().join("cache.tsv"));
        let existing: Vec<String> = existing.iter().map(|&n| line(n, "M1.0")).collect();
        let incoming: Vec<String> = incoming.iter().map(|&n| line(n, "M1.0")).collect();

        store.append_dedup(HEADER, &existing, &incoming).unwrap();

        let text = std::fs::read_to_string(store.path()).unwrap();
        let written: Vec<&str> = text.lines().collect();
        let mut unique = written.clone();
        unique.sort_unstable();
        unique.dedup();
        prop_assert_eq!(unique.len(), written.len());
        prop_assert_eq!(written[0], HEADER);
        for l in existing.iter().chain(&incoming) {
            prop_assert!(written.contains(&l.as_str()));
        }
    }
}

// ===== Property 3: Search Index Map =====

proptest! {
    #[test]
    fn search_rows_map_to_matching_source_rows(
        classes in prop::collection::vec(class_strategy(), 0..40),
        query in prop::sample::select(vec!["m", "x1", "a9.9", "0.", "flare 1", "zzz"]),
    ) {
        let records: Vec<FlareRecord> = classes
            .iter()
            .enumerate()
            .map(|(n, c)| FlareRecord::parse_line(&line(n, c)))
            .collect();
        let mut filter = RecordFilter::new();
        filter.apply_query(&records, query);

        let visible = filter.visible(&records).to_vec();
        let mut previous = None;
        for (shown, record) in visible.iter().enumerate() {
            let original = filter
                .original_index(DisplayedIndex::new(shown), records.len())
                .expect("every shown row maps back");
            prop_assert_eq!(&records[original.get()], record);
            prop_assert!(record.matches(query));
            prop_assert!(previous.map_or(true, |p| p < original.get()));
            previous = Some(original.get());
        }
        let expected = records.iter().filter(|r| r.matches(query)).count();
        prop_assert_eq!(visible.len(), expected);
    }
}
