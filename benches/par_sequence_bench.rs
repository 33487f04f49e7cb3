//! Benchmark for bounded parallel evaluation.
//!
//! Measures the per-producer overhead of `par_sequence_n` (task spawn, gate
//! admission, ordered aggregation) at several concurrency limits.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use eitherway::control::Either;
use eitherway::effect::{AdmissionGate, Concurrency, par_traverse_n};
use std::hint::black_box;

fn benchmark_par_traverse(criterion: &mut Criterion) {
    let runtime = tokio::runtime::Runtime::new().expect("Failed to create tokio runtime");
    let mut group = criterion.benchmark_group("par_traverse_n");

    for limit in [1, 4, 64] {
        group.bench_with_input(BenchmarkId::new("limit", limit), &limit, |bencher, &limit| {
            bencher.iter(|| {
                runtime.block_on(async {
                    let result = par_traverse_n(
                        0..256,
                        |value| async move { Either::<String, i32>::Right(black_box(value) * 2) },
                        Concurrency::bounded(limit).expect("limit is non-zero"),
                    )
                    .await;
                    black_box(result)
                })
            });
        });
    }

    group.finish();
}

fn benchmark_gate(criterion: &mut Criterion) {
    let runtime = tokio::runtime::Runtime::new().expect("Failed to create tokio runtime");
    let gate = AdmissionGate::new(1);

    criterion.bench_function("admission_gate_with_permit", |bencher| {
        bencher.iter(|| runtime.block_on(gate.with_permit(async { black_box(1) })));
    });
}

// =============================================================================
// Criterion Group and Main
// =============================================================================

criterion_group!(benches, benchmark_par_traverse, benchmark_gate);

criterion_main!(benches);
