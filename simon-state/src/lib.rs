//! Dense quantum state representation and measurement sampling
//!
//! This crate holds the amplitude-level machinery of the simulator:
//!
//! - [`QuantumState`]: a dense `2^n` complex amplitude vector, created in
//!   `|0…0⟩` and evolved in place by [`QuantumState::apply`]
//! - [`kernels`]: Hadamard and CNOT amplitude kernels, sequential and
//!   rayon-parallel
//! - [`measurement`]: Born-rule marginals over a measured register, alias
//!   table sampling, and multi-worker shot sampling
//!
//! # Example
//!
//! ```
//! use simon_core::{GateOp, QubitId};
//! use simon_state::QuantumState;
//!
//! let mut state = QuantumState::new(2).unwrap();
//! state.apply(&GateOp::hadamard(QubitId::new(0))).unwrap();
//! state.apply(&GateOp::cnot(QubitId::new(0), QubitId::new(1)).unwrap()).unwrap();
//!
//! let probs = state.probabilities();
//! assert!((probs[0] - 0.5).abs() < 1e-12);
//! assert!((probs[3] - 0.5).abs() < 1e-12);
//! ```

pub mod dense_state;
pub mod error;
pub mod kernels;
pub mod measurement;

pub use dense_state::{NormCheck, QuantumState, DEFAULT_PARALLEL_THRESHOLD, MAX_QUBITS};
pub use error::{Result, StateError};
pub use measurement::{
    outcome_to_bitstring, sample_distribution, AliasTable, ComputationalBasis, SamplingResult,
    ShotPlan,
};
