//! Error types for state vector operations

use thiserror::Error;

/// Errors that can occur during state vector operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StateError {
    /// Invalid qubit index
    #[error("Invalid qubit index {index} for {num_qubits}-qubit state")]
    InvalidQubitIndex { index: usize, num_qubits: usize },

    /// The same qubit was named twice where distinct qubits are required
    #[error("Qubit {index} used as both control and target")]
    DuplicateQubit { index: usize },

    /// Invalid state dimension
    #[error("Invalid state dimension {dimension}, expected power of 2")]
    InvalidDimension { dimension: usize },

    /// Register too wide for dense simulation
    #[error("Cannot allocate a dense state for {num_qubits} qubits (max {max})")]
    TooManyQubits { num_qubits: usize, max: usize },

    /// State not normalized
    #[error("State vector not normalized, norm = {norm}")]
    NotNormalized { norm: f64 },

    /// Dimension mismatch
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// A probability distribution with no usable mass
    #[error("Cannot sample from an empty or zero-mass distribution")]
    EmptyDistribution,
}

/// Result type for state vector operations
pub type Result<T> = std::result::Result<T, StateError>;
