//! Search filter benchmarks.
//!
//! The delete editor re-filters the whole cache on every keystroke, so
//! filtering has to stay well under a frame even for large caches.
//!
//! Run with: cargo bench --bench filter_benchmark

#![allow(missing_docs)] // criterion macros generate undocumented items

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use flarecat::model::{DisplayedIndex, FlareRecord};
use flarecat::state::filter::{apply, RecordFilter};

fn cache_records(count: usize) -> Vec<FlareRecord> {
    const LETTERS: [char; 5] = ['A', 'B', 'C', 'M', 'X'];
    (0..count)
        .map(|i| {
            FlareRecord::parse_line(&format!(
                "flare {i}\t{}{}.{}\t2024-05-{:02} 00:00\t2024-05-{:02} 00:30\tN{}E20\t171,304",
                LETTERS[i % 5],
                i % 9 + 1,
                i % 10,
                i % 28 + 1,
                i % 28 + 1,
                i % 90
            ))
        })
        .collect()
}

fn benchmark_apply(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter_apply");

    for count in [1_000, 10_000, 100_000] {
        let records = cache_records(count);
        for query in ["x5", "2024-05-17", "no such flare"] {
            group.bench_with_input(
                BenchmarkId::new(query, count),
                &records,
                |b, records| b.iter(|| apply(black_box(records), black_box(query))),
            );
        }
    }

    group.finish();
}

/// Typing a query one character at a time, as the delete editor sees it.
fn benchmark_incremental_typing(c: &mut Criterion) {
    let records = cache_records(50_000);
    let query = "m3.4";

    c.bench_function("filter_incremental_typing_50k", |b| {
        b.iter(|| {
            let mut filter = RecordFilter::new();
            for end in 1..=query.len() {
                filter.apply_query(&records, &query[..end]);
            }
            black_box(filter.original_index(DisplayedIndex::new(0), records.len()))
        })
    });
}

criterion_group!(benches, benchmark_apply, benchmark_incremental_typing);
criterion_main!(benches);
