mod common;

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use pattern_scatter::allocation::{allocate_counts, PositivityShift};
use pattern_scatter::random;

const CLUSTERS: [usize; 4] = [10, 100, 1_000, 10_000];

fn allocation_benches(c: &mut Criterion) {
    let mut group = c.benchmark_group("allocation/allocate_counts");

    for &k in &CLUSTERS {
        let mut rng = common::bench_rng(k as u64);
        let weights = random::normal(k, 1, &mut rng).into_flat();
        let total = k * 37 + 11;
        group.throughput(common::elements_throughput(k));

        group.bench_with_input(BenchmarkId::from_parameter(k), &k, |b, _| {
            b.iter(|| {
                let counts = allocate_counts(&weights, total, PositivityShift::ShiftToOne);
                black_box(counts.map(|c| c.len()).unwrap_or(0));
            });
        });
    }

    group.finish();
}

criterion_group! {
    name = benches;
    config = common::default_criterion();
    targets = allocation_benches
}
criterion_main!(benches);
