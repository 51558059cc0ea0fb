use costexp_core::enums::Dimension;
use costexp_core::expression::Expression;
use costexp_core::types::{DimensionValues, TagValues};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::collections::HashSet;
use std::hint::black_box;

/// Balanced tree of `depth` levels alternating And and Or
fn build_tree(depth: usize) -> Expression {
    if depth <= 1 {
        return DimensionValues::new(Dimension::Region, ["us-east-1", "us-west-2"]).into();
    }
    let operands = [
        build_tree(depth - 1),
        !build_tree(depth - 1),
        TagValues::new("team", ["web", "data"]).into(),
    ];
    if depth % 2 == 0 {
        Expression::and(operands)
    } else {
        Expression::or(operands)
    }
}

fn benchmark_serialize(c: &mut Criterion) {
    let mut group = c.benchmark_group("expression serialize");
    for depth in [2, 4, 6] {
        let tree = build_tree(depth);
        group.bench_with_input(BenchmarkId::from_parameter(depth), &tree, |b, tree| {
            b.iter(|| serde_json::to_string(black_box(tree)).unwrap())
        });
    }
    group.finish();
}

fn benchmark_deserialize(c: &mut Criterion) {
    let mut group = c.benchmark_group("expression deserialize");
    for depth in [2, 4, 6] {
        let json = serde_json::to_string(&build_tree(depth)).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(depth), &json, |b, json| {
            b.iter(|| {
                let _tree: Expression = serde_json::from_str(black_box(json)).unwrap();
            })
        });
    }
    group.finish();
}

fn benchmark_equality_and_hashing(c: &mut Criterion) {
    let tree = build_tree(6);
    let copy = tree.clone();

    c.bench_function("expression equality depth 6", |b| {
        b.iter(|| black_box(&tree) == black_box(&copy))
    });

    c.bench_function("expression set insert depth 6", |b| {
        b.iter(|| {
            let mut set = HashSet::new();
            set.insert(black_box(tree.clone()));
            set.insert(black_box(copy.clone()));
            set.len()
        })
    });
}

fn benchmark_leaves(c: &mut Criterion) {
    let tree = build_tree(6);
    c.bench_function("expression leaves depth 6", |b| {
        b.iter(|| black_box(&tree).leaves().count())
    });
}

criterion_group!(
    benches,
    benchmark_serialize,
    benchmark_deserialize,
    benchmark_equality_and_hashing,
    benchmark_leaves
);
criterion_main!(benches);
