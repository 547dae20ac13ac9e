//! Simon's period-finding algorithm on a dense state-vector simulator
//!
//! The pipeline runs in strict stages:
//!
//! 1. [`OracleBuilder`] encodes the hidden period as a CNOT network over a
//!    `2n`-qubit register
//! 2. [`simon_sim::CircuitExecutor`] wraps it in Hadamard layers, evolves the
//!    state, and samples the input register
//! 3. [`LinearSystemSolver`] turns non-zero outcomes into GF(2) equations
//!    and solves for the period
//!
//! All bitstrings are written qubit-0-first.
//!
//! # Example
//!
//! ```
//! use simon::{simulate_simon_with, SimulatorConfig};
//!
//! let outcome = simulate_simon_with("111", 6, SimulatorConfig::deterministic(3)).unwrap();
//! assert_eq!(outcome.recovered_period, "111");
//! assert_eq!(outcome.equations.len(), 2);
//! ```

pub mod error;
pub mod gf2;
pub mod info;
pub mod oracle;
pub mod simulate;
pub mod solver;

pub use error::{DegeneracyReport, DegeneracyStage, Result, SimonError};
pub use gf2::{BitVector, LinearEquation, LinearSystem};
pub use info::{describe, AlgorithmInfo};
pub use oracle::OracleBuilder;
pub use simulate::{simulate_simon, simulate_simon_with, SimonOutcome, SimonSimulator};
pub use solver::{LinearSystemSolver, Recovery};

pub use simon_sim::{Diagnostics, SimulatorConfig};
