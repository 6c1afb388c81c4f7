//! Case-insensitive substring search over flare records.
//!
//! A search never reorders: matches keep their source order, and each match
//! remembers its source position so picks made on a filtered view land on
//! the right cache row.

use crate::model::{DisplayedIndex, FlareRecord, OriginalIndex};

/// Records matching a query, with their positions in the source list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterResult {
    records: Vec<FlareRecord>,
    index_map: Vec<usize>,
}

impl FilterResult {
    /// Matching records in source order.
    pub fn records(&self) -> &[FlareRecord] {
        &self.records
    }

    /// `index_map()[i]` is the source position of `records()[i]`.
    pub fn index_map(&self) -> &[usize] {
        &self.index_map
    }

    /// Number of matches.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether nothing matched.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Filter every record of `records` against `query`.
///
/// The query is trimmed and lowercased; a blank query keeps everything with
/// the identity index map.
pub fn apply(records: &[FlareRecord], query: &str) -> FilterResult {
    let needle = query.trim().to_lowercase();
    let (records, index_map) = records
        .iter()
        .enumerate()
        .filter(|(_, record)| needle.is_empty() || record.matches(&needle))
        .map(|(idx, record)| (record.clone(), idx))
        .unzip();
    FilterResult { records, index_map }
}

/// The active search of one list.
///
/// Before any query is applied the filter is inactive and the visible rows
/// are the source rows themselves.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RecordFilter {
    query: String,
    result: Option<FilterResult>,
}

impl RecordFilter {
    /// Inactive filter.
    pub fn new() -> Self {
        Self::default()
    }

    /// The applied query, trimmed.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Whether a query has been applied.
    pub fn is_active(&self) -> bool {
        self.result.is_some()
    }

    /// Re-filter `source` for `query`.
    pub fn apply_query(&mut self, source: &[FlareRecord], query: &str) {
        self.query = query.trim().to_string();
        self.result = Some(apply(source, &self.query));
    }

    /// Drop the query and show everything again.
    pub fn clear(&mut self, source: &[FlareRecord]) {
        self.apply_query(source, "");
    }

    /// Rows on screen.
    pub fn visible<'a>(&'a self, source: &'a [FlareRecord]) -> &'a [FlareRecord] {
        match &self.result {
            Some(result) => result.records(),
            None => source,
        }
    }

    /// Number of rows on screen.
    pub fn len(&self, source: &[FlareRecord]) -> usize {
        self.visible(source).len()
    }

    /// Source position of the row shown at `displayed`.
    ///
    /// Goes through the index map when a query is applied and maps to itself
    /// otherwise. Positions past the end resolve to `None`.
    pub fn original_index(
        &self,
        displayed: DisplayedIndex,
        source_len: usize,
    ) -> Option<OriginalIndex> {
        let idx = displayed.get();
        match &self.result {
            Some(result) => result.index_map().get(idx).copied().map(OriginalIndex::new),
            None => (idx < source_len).then(|| OriginalIndex::new(idx)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn with_classes(classes: &[&str]) -> Vec<FlareRecord> {
        classes
            .iter()
            .enumerate()
            .map(|(i, class)| FlareRecord::parse_line(&format!("flare {i}\t{class}\ts\te\tc\t171")))
            .collect()
    }

    #[test]
    fn query_matches_case_insensitively() {
        let records = with_classes(&["M5.2", "X1.0", "M5.0"]);
        let result = apply(&records, "m5");
        assert_eq!(result.index_map(), &[0, 2]);
        assert_eq!(result.records()[0].class(), "M5.2");
        assert_eq!(result.records()[1].class(), "M5.0");
    }

    #[test]
    fn blank_query_is_identity() {
        let records = with_classes(&["A1.0", "B2.0"]);
        let result = apply(&records, "   ");
        assert_eq!(result.records(), records.as_slice());
        assert_eq!(result.index_map(), &[0, 1]);
    }

    #[test]
    fn no_match_yields_empty_result() {
        let records = with_classes(&["A1.0"]);
        assert!(apply(&records, "zzz").is_empty());
    }

    #[test]
    fn inactive_filter_maps_to_itself() {
        let records = with_classes(&["A1.0", "B2.0"]);
        let filter = RecordFilter::new();
        assert_eq!(filter.len(&records), 2);
        assert_eq!(
            filter.original_index(DisplayedIndex::new(1), records.len()),
            Some(OriginalIndex::new(1))
        );
        assert_eq!(filter.original_index(DisplayedIndex::new(2), records.len()), None);
    }

    #[test]
    fn active_filter_maps_through_index_map() {
        let records = with_classes(&["M5.2", "X1.0", "M5.0"]);
        let mut filter = RecordFilter::new();
        filter.apply_query(&records, " X1 ");
        assert_eq!(filter.query(), "X1");
        assert_eq!(
            filter.original_index(DisplayedIndex::new(0), records.len()),
            Some(OriginalIndex::new(1))
        );
        assert_eq!(filter.original_index(DisplayedIndex::new(1), records.len()), None);
    }

    #[test]
    fn filter_with_no_matches_never_falls_back_to_identity() {
        let records = with_classes(&["M5.2"]);
        let mut filter = RecordFilter::new();
        filter.apply_query(&records, "nothing");
        assert_eq!(filter.original_index(DisplayedIndex::new(0), records.len()), None);
    }

    #[test]
    fn clear_restores_all_rows() {
        let records = with_classes(&["M5.2", "X1.0"]);
        let mut filter = RecordFilter::new();
        filter.apply_query(&records, "x");
        filter.clear(&records);
        assert_eq!(filter.query(), "");
        assert_eq!(filter.len(&records), 2);
    }

    proptest! {
        #[test]
        fn filtering_twice_is_idempotent(
            classes in proptest::collection::vec("[ABCMX][0-9]\\.[0-9]", 0..20),
            query in "[abcmx0-9. ]{0,3}",
        ) {
            let refs: Vec<&str> = classes.iter().map(String::as_str).collect();
            let records = with_classes(&refs);
            let once = apply(&records, &query);
            let twice = apply(once.records(), &query);
            prop_assert_eq!(twice.records(), once.records());
        }

        #[test]
        fn original_index_round_trips(
            classes in proptest::collection::vec("[ABCMX][0-9]\\.[0-9]", 0..20),
            query in "[abcmx0-9]{0,2}",
        ) {
            let refs: Vec<&str> = classes.iter().map(String::as_str).collect();
            let records = with_classes(&refs);
            let mut filter = RecordFilter::new();
            filter.apply_query(&records, &query);
            for (i, record) in filter.visible(&records).iter().enumerate() {
                let original = filter
                    .original_index(DisplayedIndex::new(i), records.len())
                    .expect("visible row has a source position");
                prop_assert_eq!(&records[original.get()], record);
            }
        }
    }
}
