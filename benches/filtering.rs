//! Benchmarks for the per-interaction hot paths: filtering, search/sort and quantity totals.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;
use std::sync::Arc;

use pod_worklist::columns::ColumnRules;
use pod_worklist::ingestion::normalize_rows;
use pod_worklist::processing::{apply_filters, quantity_summary, sort_rows, Direction};
use pod_worklist::types::{FilterSet, VisibleRows};
use pod_worklist::Dataset;

const CUSTOMERS: [&str; 4] = ["Acme Publishing", "Globex Books", "Initech Press", "Umbrella"];
const BINDINGS: [&str; 3] = ["Cased", "Limp", "Wiro"];

fn orders(n: usize) -> Arc<Dataset> {
    let mut raw = vec![
        ["Customer", "Bind Method", "Title", "Code", "Spine", "Quantity"]
            .map(String::from)
            .to_vec(),
    ];
    for i in 0..n {
        raw.push(vec![
            CUSTOMERS[i % CUSTOMERS.len()].to_string(),
            BINDINGS[i % BINDINGS.len()].to_string(),
            format!("Title {i}"),
            format!("978{i:010}"),
            format!("{}.{}", i % 40, i % 10),
            (i % 500).to_string(),
        ]);
    }
    Arc::new(normalize_rows(raw, &ColumnRules::default()).expect("valid bench data"))
}

fn bench_filters(c: &mut Criterion) {
    let mut group = c.benchmark_group("apply_filters");
    for n in [1_000usize, 10_000] {
        let ds = orders(n);
        let filters = FilterSet::new()
            .with("Customer", "acme publishing")
            .with("Bind Method", "cased");
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &ds, |b, ds| {
            b.iter(|| apply_filters(black_box(ds), black_box(&filters)));
        });
    }
    group.finish();
}

fn bench_sort_and_total(c: &mut Criterion) {
    let rules = ColumnRules::default();
    let ds = orders(10_000);
    let spine = ds.index_of("Spine").expect("spine column");

    c.bench_function("sort_by_spine_10k", |b| {
        b.iter(|| {
            let mut view = VisibleRows::all(&ds);
            sort_rows(&mut view.rows, &ds.headers, spine, Direction::Ascending, &rules);
            black_box(view.len())
        });
    });

    c.bench_function("quantity_summary_10k", |b| {
        b.iter(|| quantity_summary(black_box(&ds.headers), black_box(&ds.rows), &rules));
    });
}

criterion_group!(benches, bench_filters, bench_sort_and_total);
criterion_main!(benches);
