//! Criterion benchmarks comparing the construction strategies
//!
//! Mirrors `sprout bench`: every strategy over heights 2, 4, ..., 18 with
//! the default root and rule.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use sprout_engine::harness::progression;
use sprout_engine::{Squares, TreeParams};
use sprout_tree::Strategy;

fn benchmark_construction(c: &mut Criterion) {
    let mut group = c.benchmark_group("tree_construction");
    let heights = progression(2, 20, 2).expect("non-zero step");

    for strategy in Strategy::ALL {
        let builder = strategy.builder();
        for &height in &heights {
            let params = TreeParams::default().with_height(height);
            group.bench_with_input(
                BenchmarkId::new(strategy.name(), height),
                &params,
                |b, params| {
                    b.iter(|| builder.build(black_box(params), &Squares).expect("valid height"))
                },
            );
        }
    }

    group.finish();
}

fn benchmark_reference_tree(c: &mut Criterion) {
    let params = TreeParams::default();
    for strategy in Strategy::ALL {
        let builder = strategy.builder();
        c.bench_function(&format!("reference_tree_{}", strategy.name()), |b| {
            b.iter(|| builder.build(black_box(&params), &Squares).expect("valid height"))
        });
    }
}

criterion_group!(benches, benchmark_construction, benchmark_reference_tree);
criterion_main!(benches);
