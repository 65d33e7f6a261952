//! # Algebra Benchmarks
//!
//! Measures tensor products, operator application, composition and fidelity
//! across register sizes. Memory grows as 2^n per state and 4^n per operator.
//!
//! Run: `cargo bench --bench algebra_bench` (add `--features parallel` for rayon)

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use qcirc_core::prelude::*;
use qcirc_core::fidelity;
use qcirc_gates::{lift, states, Hadamard, QuantumGate};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Estado produto de `qubits` qubits aleatórios
fn random_state(qubits: usize, seed: u64) -> State {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut state = states::random(&mut rng).unwrap();
    for _ in 1..qubits {
        state = state.tensor(&states::random(&mut rng).unwrap()).unwrap();
    }
    state
}

fn bench_tensor(c: &mut Criterion) {
    let mut group = c.benchmark_group("tensor");

    for qubits in [2usize, 6, 10] {
        let a = random_state(qubits, 1);
        let b = random_state(qubits, 2);
        group.bench_with_input(BenchmarkId::new("state", qubits * 2), &qubits, |bench, _| {
            bench.iter(|| black_box(a.tensor(&b).unwrap()))
        });
    }

    let h = Hadamard.operator().unwrap();
    for qubits in [2usize, 4, 6] {
        let op = lift(&Hadamard, 0, qubits).unwrap();
        group.bench_with_input(BenchmarkId::new("operator", qubits + 1), &qubits, |bench, _| {
            bench.iter(|| black_box(op.tensor(&h).unwrap()))
        });
    }

    group.finish();
}

fn bench_apply(c: &mut Criterion) {
    let mut group = c.benchmark_group("apply");

    for qubits in [2usize, 6, 10] {
        let op = lift(&Hadamard, 0, qubits).unwrap();
        let state = random_state(qubits, 3);
        group.bench_with_input(BenchmarkId::from_parameter(qubits), &qubits, |bench, _| {
            bench.iter(|| black_box(op.apply(&state).unwrap()))
        });
    }

    group.finish();
}

fn bench_compose(c: &mut Criterion) {
    let mut group = c.benchmark_group("compose");
    group.sample_size(20);

    for qubits in [2usize, 4, 6] {
        let a = lift(&Hadamard, 0, qubits).unwrap();
        let b = lift(&Hadamard, qubits - 1, qubits).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(qubits), &qubits, |bench, _| {
            bench.iter(|| black_box(a.compose(&b).unwrap()))
        });
    }

    group.finish();
}

fn bench_fidelity(c: &mut Criterion) {
    let mut group = c.benchmark_group("fidelity");

    for qubits in [2usize, 10, 16] {
        let a = random_state(qubits, 4);
        let b = random_state(qubits, 5);
        group.bench_with_input(BenchmarkId::from_parameter(qubits), &qubits, |bench, _| {
            bench.iter(|| black_box(fidelity(&a, &b).unwrap()))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_tensor, bench_apply, bench_compose, bench_fidelity);
criterion_main!(benches);
