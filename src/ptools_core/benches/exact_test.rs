extern crate criterion;
use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use lazy_static::lazy_static;
use ptools_core::combinatorics::Compositions;
use ptools_core::prelude::*;

lazy_static! {
    static ref BENFORD: Vec<f64> = (1..10).map(|d| (1.0 + 1.0 / d as f64).log10()).collect();
    static ref UNIFORM_6: Vec<f64> = vec![1.0 / 6.0; 6];
}

/// Named cases, counts and the matching null probabilities.
fn cases() -> Vec<(&'static str, Vec<u64>, &'static [f64])> {
    vec![
        ("Benford-12", vec![3, 4, 1, 0, 0, 0, 2, 0, 2], BENFORD.as_slice()),
        ("Benford-16", vec![5, 4, 2, 1, 0, 1, 2, 0, 1], BENFORD.as_slice()),
        ("Dice-30", vec![8, 3, 5, 6, 4, 4], UNIFORM_6.as_slice()),
    ]
}

fn exact(counts: &[u64], null_probs: &[f64], parallel: bool) {
    let config = ExactTestConfig::new(StatisticKind::G)
        .with_limit(SupportLimit::Unbounded)
        .with_parallel(parallel);
    let _ = run_test_with_config(counts, null_probs, &config).unwrap();
}

pub fn exact_test(c: &mut Criterion) {
    let mut group = c.benchmark_group("Exact-Test");

    for (name, counts, null_probs) in cases() {
        group.bench_with_input(BenchmarkId::new("Single", name), &counts, |b, counts| {
            b.iter(|| exact(black_box(counts), black_box(null_probs), false))
        });
        group.bench_with_input(BenchmarkId::new("Parallel", name), &counts, |b, counts| {
            b.iter(|| exact(black_box(counts), black_box(null_probs), true))
        });
    }
}

pub fn enumerate(c: &mut Criterion) {
    let mut group = c.benchmark_group("Compositions");

    for (total, bins) in [(12_u64, 9_usize), (30, 6)] {
        let name = format!("{}-into-{}", total, bins);
        group.bench_with_input(BenchmarkId::new("Walk", name), &(total, bins), |b, s| {
            b.iter(|| {
                let mut comps = Compositions::new(s.0, s.1).unwrap();
                let mut n = 0_u64;
                while comps.next_slice().is_some() {
                    n += 1;
                }
                black_box(n)
            })
        });
    }
}

criterion_group!(name=benches;
                 config = Criterion::default().sample_size(30).measurement_time(Duration::from_secs(15));
                 targets=exact_test, enumerate);
criterion_main!(benches);
