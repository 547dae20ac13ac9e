//! Property tests for gate evolution and Born-rule distributions

use num_complex::Complex64;
use proptest::prelude::*;
use simon_core::{GateOp, QubitId};
use simon_state::{ComputationalBasis, QuantumState, ShotPlan};

fn arb_state(num_qubits: usize) -> impl Strategy<Value = QuantumState> {
    prop::collection::vec((-1.0f64..1.0, -1.0f64..1.0), 1 << num_qubits)
        .prop_filter("needs mass", |amps| {
            amps.iter().map(|(re, im)| re * re + im * im).sum::<f64>() > 1e-3
        })
        .prop_map(move |amps| {
            let amps: Vec<Complex64> = amps.into_iter().map(|(re, im)| Complex64::new(re, im)).collect();
            let mut state = QuantumState::from_amplitudes(num_qubits, &amps).unwrap();
            state.normalize().unwrap();
            state
        })
}

fn arb_gate(num_qubits: usize) -> impl Strategy<Value = GateOp> {
    prop_oneof![
        (0..num_qubits).prop_map(|q| GateOp::hadamard(QubitId::new(q))),
        (0..num_qubits, 0..num_qubits)
            .prop_filter("distinct qubits", |(c, t)| c != t)
            .prop_map(|(c, t)| GateOp::cnot(QubitId::new(c), QubitId::new(t)).unwrap()),
    ]
}

proptest! {
    #[test]
    fn gates_preserve_total_probability(
        mut state in arb_state(4),
        gates in prop::collection::vec(arb_gate(4), 1..24),
    ) {
        state.apply_all(&gates).unwrap();
        prop_assert!((state.total_probability() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn each_gate_is_an_involution(state in arb_state(3), gate in arb_gate(3)) {
        let mut evolved = state.clone();
        evolved.apply(&gate).unwrap();
        evolved.apply(&gate).unwrap();

        for (a, b) in evolved.amplitudes().iter().zip(state.amplitudes()) {
            prop_assert!((a - b).norm() < 1e-10);
        }
    }

    #[test]
    fn marginals_sum_to_one(state in arb_state(4), mask in 1usize..16) {
        let measured: Vec<QubitId> = (0..4).filter(|i| mask & (1 << i) != 0).map(QubitId::new).collect();
        let marginal = state.marginal_probabilities(&measured).unwrap();
        prop_assert_eq!(marginal.len(), 1 << measured.len());
        prop_assert!((marginal.iter().sum::<f64>() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn sampled_counts_sum_to_shots(shots in 1usize..3000, workers in 1usize..6, seed in any::<u64>()) {
        let state = QuantumState::uniform(3).unwrap();
        let result = ComputationalBasis::new()
            .sample(&state, shots, ShotPlan::new(workers, Some(seed)))
            .unwrap();
        prop_assert_eq!(result.total_counts(), shots);
        prop_assert!(result.counts.keys().all(|&k| k < 8));
    }
}

#[test]
fn parallel_threshold_does_not_change_results() {
    let gates: Vec<GateOp> = (0..6)
        .map(|q| GateOp::hadamard(QubitId::new(q)))
        .chain((0..5).map(|q| GateOp::cnot(QubitId::new(q), QubitId::new(q + 1)).unwrap()))
        .collect();

    let mut sequential = QuantumState::new(6).unwrap().with_parallel_threshold(usize::MAX);
    let mut parallel = QuantumState::new(6).unwrap().with_parallel_threshold(1);
    sequential.apply_all(&gates).unwrap();
    parallel.apply_all(&gates).unwrap();

    for (a, b) in sequential.amplitudes().iter().zip(parallel.amplitudes()) {
        assert!((a - b).norm() < 1e-12);
    }
}
