//! Benchmarks for state vector operations
//!
//! Compares sequential and rayon kernels, and single vs multi-worker sampling

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use num_complex::Complex64;
use simon_state::kernels::{apply_cnot, apply_hadamard};
use simon_state::{ComputationalBasis, QuantumState, ShotPlan};

fn basis_zero(num_qubits: usize) -> Vec<Complex64> {
    let mut state = vec![Complex64::new(0.0, 0.0); 1 << num_qubits];
    state[0] = Complex64::new(1.0, 0.0);
    state
}

fn bench_hadamard(c: &mut Criterion) {
    let mut group = c.benchmark_group("hadamard");

    for num_qubits in [10, 15, 20].iter() {
        group.throughput(Throughput::Elements(1u64 << num_qubits));

        for parallel in [false, true] {
            let label = if parallel { "parallel" } else { "sequential" };
            group.bench_with_input(
                BenchmarkId::new(label, num_qubits),
                num_qubits,
                |b, &num_qubits| {
                    let mut state = basis_zero(num_qubits);
                    b.iter(|| apply_hadamard(black_box(&mut state), num_qubits / 2, parallel))
                },
            );
        }
    }

    group.finish();
}

fn bench_cnot(c: &mut Criterion) {
    let mut group = c.benchmark_group("cnot");

    for num_qubits in [10, 15, 20].iter() {
        group.throughput(Throughput::Elements(1u64 << num_qubits));

        for parallel in [false, true] {
            let label = if parallel { "parallel" } else { "sequential" };
            group.bench_with_input(
                BenchmarkId::new(label, num_qubits),
                num_qubits,
                |b, &num_qubits| {
                    let mut state = basis_zero(num_qubits);
                    apply_hadamard(&mut state, 0, false);
                    b.iter(|| apply_cnot(black_box(&mut state), 0, num_qubits - 1, parallel))
                },
            );
        }
    }

    group.finish();
}

fn bench_sampling(c: &mut Criterion) {
    let mut group = c.benchmark_group("sampling");
    let state = QuantumState::uniform(12).unwrap();
    let basis = ComputationalBasis::new();

    for workers in [1, 4].iter() {
        group.bench_with_input(BenchmarkId::new("workers", workers), workers, |b, &w| {
            b.iter(|| basis.sample(black_box(&state), 100_000, ShotPlan::new(w, Some(7))))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_hadamard, bench_cnot, bench_sampling);
criterion_main!(benches);
