//! Benchmarks for treemask pattern filtering
//!
//! Covers each segment kind over a synthetic tree plus a deep chain for the
//! worklist traversal.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use serde_json::{json, Map, Value};
use treemask::{filter, filter_patterns, filter_with, Options, PatternEntry};

/// Builds a uniform tree: `width` children per object, `depth` levels, with
/// scalar leaves.
fn wide_tree(width: usize, depth: usize) -> Value {
    if depth == 0 {
        return json!("leaf");
    }
    let mut map = Map::new();
    for i in 0..width {
        map.insert(format!("k{}", i), wide_tree(width, depth - 1));
    }
    Value::Object(map)
}

/// Builds a single chain of nested objects `depth` levels deep.
fn deep_chain(depth: usize) -> Value {
    let mut value = json!("leaf");
    for _ in 0..depth {
        let mut map = Map::new();
        map.insert("next".to_string(), value);
        value = Value::Object(map);
    }
    value
}

fn bench_literal_path(c: &mut Criterion) {
    let tree = wide_tree(10, 4);

    c.bench_function("literal_path", |b| {
        b.iter(|| filter(black_box(&tree), "k3.k4.k5.k6").unwrap())
    });
}

fn bench_single_wildcard(c: &mut Criterion) {
    let tree = wide_tree(10, 4);

    c.bench_function("single_wildcard", |b| {
        b.iter(|| filter(black_box(&tree), "k3.*.k5").unwrap())
    });
}

fn bench_double_wildcard(c: &mut Criterion) {
    let tree = wide_tree(6, 4);

    c.bench_function("double_wildcard", |b| {
        b.iter(|| filter(black_box(&tree), "k3.**").unwrap())
    });
}

fn bench_double_wildcard_deep_chain(c: &mut Criterion) {
    // The worklist matcher handles depths that would exhaust a recursive
    // walker's call stack
    let tree = deep_chain(1_000);

    c.bench_function("double_wildcard_deep_chain", |b| {
        b.iter(|| {
            filter_with(
                black_box(&tree),
                "**",
                &Options {
                    max_depth: Some(64),
                    ..Options::default()
                },
            )
            .unwrap()
        })
    });
}

fn bench_alternation(c: &mut Criterion) {
    let tree = wide_tree(10, 3);

    c.bench_function("alternation", |b| {
        b.iter(|| filter(black_box(&tree), "[k1|k4|k7].k2").unwrap())
    });
}

fn bench_range(c: &mut Criterion) {
    let mut map = Map::new();
    for i in 0..100 {
        map.insert(i.to_string(), json!({"id": i}));
    }
    let tree = json!({ "items": Value::Object(map) });

    c.bench_function("range_expansion", |b| {
        b.iter(|| filter(black_box(&tree), "items.10..40.id").unwrap())
    });
}

fn bench_multi_pattern(c: &mut Criterion) {
    let tree = wide_tree(10, 4);
    let patterns: Vec<PatternEntry> = (0..10)
        .map(|i| PatternEntry::new(format!("k{}.k{}.k{}", i, (i + 1) % 10, (i + 2) % 10)))
        .collect();

    c.bench_function("multi_pattern", |b| {
        b.iter(|| filter_patterns(black_box(&tree), &patterns, &Options::default()).unwrap())
    });
}

fn bench_whole_subtree_clone(c: &mut Criterion) {
    let tree = wide_tree(10, 4);

    c.bench_function("whole_subtree_clone", |b| {
        b.iter(|| filter(black_box(&tree), "*").unwrap())
    });
}

criterion_group!(
    benches,
    bench_literal_path,
    bench_single_wildcard,
    bench_double_wildcard,
    bench_double_wildcard_deep_chain,
    bench_alternation,
    bench_range,
    bench_multi_pattern,
    bench_whole_subtree_clone,
);
criterion_main!(benches);
