//! Core types for the Simon period-finding simulator
//!
//! This crate provides the fundamental types for describing quantum circuits:
//! - [`QubitId`]: Type-safe qubit addressing
//! - [`Gate`]: Trait for quantum operations, implemented by [`StandardGate`]
//! - [`GateOp`]: A gate bound to the qubits it acts on
//! - [`Circuit`]: An ordered, immutable-once-built gate sequence plus the
//!   qubits designated for terminal measurement
//!
//! # Example
//! ```
//! use simon_core::{Circuit, GateOp, QubitId};
//!
//! let mut circuit = Circuit::new(2).unwrap();
//! circuit.push(GateOp::hadamard(QubitId::new(0))).unwrap();
//! circuit.push(GateOp::cnot(QubitId::new(0), QubitId::new(1)).unwrap()).unwrap();
//! assert_eq!(circuit.len(), 2);
//! ```

pub mod circuit;
pub mod error;
pub mod gate;
pub mod qubit;

// Re-exports for convenience
pub use circuit::{Circuit, CircuitSummary, GateRecord};
pub use error::QuantumError;
pub use gate::{Gate, GateOp, StandardGate};
pub use qubit::QubitId;

/// Type alias for results in circuit construction
pub type Result<T> = std::result::Result<T, QuantumError>;
