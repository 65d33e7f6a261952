//! # Measurement Benchmarks
//!
//! Measures single-qubit collapse, sequential measurement over a
//! distribution, branch merging and seeded sampling.
//!
//! Run: `cargo bench --bench measure_bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use qcirc_core::prelude::*;
use qcirc_core::measure;
use qcirc_gates::{lift, Hadamard};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// |+⟩^⊗n: todos os ramos possíveis sobrevivem à medição
fn uniform(qubits: usize) -> State {
    let mut state = State::zeroed(qubits).unwrap();
    state.set_amplitude(0, Amplitude::new(1.0, 0.0)).unwrap();
    for q in 0..qubits {
        state = lift(&Hadamard, q, qubits).unwrap().apply(&state).unwrap();
    }
    state
}

fn bench_single(c: &mut Criterion) {
    let mut group = c.benchmark_group("measure_single");

    for qubits in [2usize, 8, 14] {
        let state = uniform(qubits);
        group.bench_with_input(BenchmarkId::from_parameter(qubits), &qubits, |bench, _| {
            bench.iter(|| black_box(measure(&state, 0).unwrap()))
        });
    }

    group.finish();
}

fn bench_sequence(c: &mut Criterion) {
    let mut group = c.benchmark_group("measure_sequence");
    let engine = QuantumEngine::new();

    for qubits in [2usize, 4, 6] {
        let state = uniform(qubits);
        let order: Vec<usize> = (0..qubits).collect();
        group.bench_with_input(BenchmarkId::from_parameter(qubits), &qubits, |bench, _| {
            bench.iter(|| black_box(engine.measure_sequence(&state, &order).unwrap().value))
        });
    }

    group.finish();
}

fn bench_merge_and_sample(c: &mut Criterion) {
    let mut group = c.benchmark_group("distribution");

    let state = uniform(6);
    let dist = measure(&state, 0).unwrap().measure(1).unwrap().measure(0).unwrap();

    group.bench_function("merge_identical", |bench| {
        bench.iter(|| black_box(dist.clone().merge_identical(1e-9)))
    });

    group.bench_function("sample", |bench| {
        let mut rng = StdRng::seed_from_u64(11);
        bench.iter(|| black_box(dist.sample(&mut rng).probability()))
    });

    group.finish();
}

criterion_group!(benches, bench_single, bench_sequence, bench_merge_and_sample);
criterion_main!(benches);
