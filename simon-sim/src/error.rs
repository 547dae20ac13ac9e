//! Error types for the simulator

use simon_core::QuantumError;
use simon_state::StateError;
use thiserror::Error;

/// Result type for simulator operations
pub type Result<T> = std::result::Result<T, SimulatorError>;

/// Errors that can occur during simulation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulatorError {
    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Circuit is invalid or malformed
    #[error("Invalid circuit: {0}")]
    InvalidCircuit(#[from] QuantumError),

    /// Register too wide for the configured limit
    #[error("Too many qubits: circuit has {num_qubits}, max supported is {max_qubits}")]
    TooManyQubits { num_qubits: usize, max_qubits: usize },

    /// Invalid qubit index
    #[error("Invalid qubit index {qubit}: circuit has {num_qubits} qubits")]
    InvalidQubit { qubit: usize, num_qubits: usize },

    /// Gate application failed
    #[error("Gate {gate_index} application failed: {source}")]
    GateApplicationFailed {
        gate_index: usize,
        #[source]
        source: StateError,
    },

    /// State error from state operations
    #[error("State error: {0}")]
    State(StateError),
}

impl From<StateError> for SimulatorError {
    fn from(err: StateError) -> Self {
        match err {
            StateError::InvalidQubitIndex { index, num_qubits } => SimulatorError::InvalidQubit {
                qubit: index,
                num_qubits,
            },
            other => SimulatorError::State(other),
        }
    }
}

impl SimulatorError {
    /// Whether the error stems from caller input rather than the engine
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            SimulatorError::InvalidConfig(_) | SimulatorError::TooManyQubits { .. }
        )
    }
}
