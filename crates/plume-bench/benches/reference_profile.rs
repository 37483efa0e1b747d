//! Criterion benchmarks for whole fluid steps on the benchmark profiles.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use plume_bench::{reference_profile, stress_profile};

fn bench_step_32(c: &mut Criterion) {
    let mut level = reference_profile(42).unwrap();
    // Warm up: one step so rayon's pool is running
    level.step().unwrap();

    c.bench_function("step_32cubed", |b| {
        b.iter(|| {
            let metrics = level.step().unwrap();
            black_box(&metrics);
        });
    });
}

fn bench_step_64(c: &mut Criterion) {
    let mut level = stress_profile(42).unwrap();
    level.step().unwrap();

    let mut group = c.benchmark_group("stress");
    group.sample_size(10);
    group.bench_function("step_64cubed", |b| {
        b.iter(|| {
            let metrics = level.step().unwrap();
            black_box(&metrics);
        });
    });
    group.finish();
}

criterion_group!(benches, bench_step_32, bench_step_64);
criterion_main!(benches);
