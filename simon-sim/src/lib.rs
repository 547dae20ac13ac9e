//! Circuit execution for the Simon simulator
//!
//! This crate drives a [`simon_state::QuantumState`] through a
//! [`simon_core::Circuit`]:
//!
//! - [`SimulatorConfig`]: shots, seeding, tolerances and parallelism knobs
//! - [`CircuitExecutor`]: amplitude mode and sampling mode over one evolution
//! - [`Diagnostics`]: per-request event log, gate counts and degradation
//!
//! # Example
//!
//! ```
//! use simon_core::{Circuit, GateOp, QubitId};
//! use simon_sim::{CircuitExecutor, Diagnostics, SimulatorConfig};
//!
//! let mut circuit = Circuit::new(2).unwrap();
//! circuit.push(GateOp::hadamard(QubitId::new(0))).unwrap();
//! circuit.push(GateOp::cnot(QubitId::new(0), QubitId::new(1)).unwrap()).unwrap();
//!
//! let executor = CircuitExecutor::new(SimulatorConfig::deterministic(1)).unwrap();
//! let mut diagnostics = Diagnostics::new();
//! let counts = executor.run_sampling(&circuit, &mut diagnostics).unwrap();
//! assert_eq!(counts.get("00") + counts.get("11"), 1024);
//! ```

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod executor;
pub mod result;

pub use config::SimulatorConfig;
pub use diagnostics::{DiagnosticEvent, Diagnostics};
pub use error::{Result, SimulatorError};
pub use executor::CircuitExecutor;
pub use result::{Amplitude, AmplitudeResult, DegradationReason, Execution, MeasurementCounts};
