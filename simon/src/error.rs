//! Error types for the Simon pipeline

use serde::Serialize;
use simon_core::QuantumError;
use simon_sim::SimulatorError;
use simon_state::StateError;
use std::fmt;
use thiserror::Error;

/// Result type for Simon pipeline operations
pub type Result<T> = std::result::Result<T, SimonError>;

/// Which solver stage rejected the sampled equations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DegeneracyStage {
    /// Fewer than `n-1` independent equations among the distinct outcomes
    Underdetermined,
    /// An observed outcome contradicts the only candidate period
    Inconsistent,
}

impl fmt::Display for DegeneracyStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DegeneracyStage::Underdetermined => write!(f, "underdetermined"),
            DegeneracyStage::Inconsistent => write!(f, "inconsistent"),
        }
    }
}

/// Why the sampled equations admit no unique non-trivial period
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DegeneracyReport {
    pub stage: DegeneracyStage,
    pub independent_equations: usize,
    pub required_equations: usize,
    /// Distinct non-zero outcomes that were considered
    pub distinct_outcomes: usize,
    /// First observed outcome orthogonality failed for, if any
    pub conflicting_outcome: Option<String>,
    /// The samples came from a degraded fallback distribution
    pub degraded: bool,
}

impl fmt::Display for DegeneracyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} system: {} of {} independent equations from {} distinct outcomes",
            self.stage, self.independent_equations, self.required_equations, self.distinct_outcomes
        )?;
        if let Some(outcome) = &self.conflicting_outcome {
            write!(f, ", outcome {outcome} is not orthogonal to the candidate period")?;
        }
        if self.degraded {
            write!(f, " (degraded simulation)")?;
        }
        Ok(())
    }
}

/// Errors surfaced by [`crate::simulate_simon`] and its building blocks
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimonError {
    /// Malformed request input
    #[error("Invalid configuration: {reason}")]
    InvalidConfiguration { reason: String },

    /// A gate referenced a qubit outside the register
    #[error("Invalid qubit index {index} for {num_qubits}-qubit register")]
    InvalidQubitIndex { index: usize, num_qubits: usize },

    /// The sampled equations do not determine a unique non-zero period
    #[error("Degenerate oracle: {0}")]
    DegenerateOracle(DegeneracyReport),

    /// Engine failure not covered by the variants above
    #[error("Simulation failed: {0}")]
    Simulation(SimulatorError),
}

impl SimonError {
    pub fn invalid_configuration(reason: impl Into<String>) -> Self {
        SimonError::InvalidConfiguration {
            reason: reason.into(),
        }
    }

    /// Whether the caller's input is at fault
    ///
    /// Configuration errors and degenerate oracles are explained to the
    /// client; qubit-index and engine failures are internal defects.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            SimonError::InvalidConfiguration { .. } | SimonError::DegenerateOracle(_)
        )
    }
}

impl From<SimulatorError> for SimonError {
    fn from(err: SimulatorError) -> Self {
        match err {
            SimulatorError::InvalidConfig(reason) => SimonError::InvalidConfiguration { reason },
            SimulatorError::TooManyQubits { .. } => SimonError::InvalidConfiguration {
                reason: err.to_string(),
            },
            SimulatorError::InvalidQubit { qubit, num_qubits } => SimonError::InvalidQubitIndex {
                index: qubit,
                num_qubits,
            },
            SimulatorError::InvalidCircuit(QuantumError::InvalidQubit(index, num_qubits))
            | SimulatorError::GateApplicationFailed {
                source: StateError::InvalidQubitIndex { index, num_qubits },
                ..
            } => SimonError::InvalidQubitIndex { index, num_qubits },
            other => SimonError::Simulation(other),
        }
    }
}

impl From<QuantumError> for SimonError {
    fn from(err: QuantumError) -> Self {
        SimulatorError::InvalidCircuit(err).into()
    }
}
