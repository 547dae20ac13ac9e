//! Quantum gate definitions and operations

use crate::{QuantumError, QubitId, Result};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

/// Trait for quantum gate operations
///
/// Gates are stateless and reusable across circuits.
pub trait Gate: Send + Sync + fmt::Debug {
    /// The name of the gate (e.g., "H", "CNOT")
    fn name(&self) -> &str;

    /// Number of qubits this gate acts on
    fn num_qubits(&self) -> usize;
}

/// The fixed gate set needed for Simon's algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StandardGate {
    /// Single-qubit Hadamard
    Hadamard,
    /// Controlled-NOT, qubits ordered `[control, target]`
    CNot,
}

impl StandardGate {
    /// Gate name as it appears in summaries and gate counts
    #[inline]
    pub const fn name(self) -> &'static str {
        match self {
            StandardGate::Hadamard => "H",
            StandardGate::CNot => "CNOT",
        }
    }
}

impl Gate for StandardGate {
    fn name(&self) -> &str {
        StandardGate::name(*self)
    }

    fn num_qubits(&self) -> usize {
        match self {
            StandardGate::Hadamard => 1,
            StandardGate::CNot => 2,
        }
    }
}

/// A gate operation applied to specific qubits
///
/// Immutable once constructed.
///
/// # Example
/// ```
/// use simon_core::{GateOp, QubitId};
///
/// let op = GateOp::cnot(QubitId::new(0), QubitId::new(2)).unwrap();
/// assert_eq!(op.gate().name(), "CNOT");
/// assert_eq!(op.qubits(), &[QubitId::new(0), QubitId::new(2)]);
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct GateOp {
    gate: StandardGate,
    qubits: SmallVec<[QubitId; 2]>,
}

impl GateOp {
    /// Create a new gate operation
    ///
    /// # Errors
    /// Returns error if:
    /// - Qubit count doesn't match gate requirements
    /// - Duplicate qubits specified
    pub fn new(gate: StandardGate, qubits: &[QubitId]) -> Result<Self> {
        if qubits.len() != gate.num_qubits() {
            return Err(QuantumError::invalid_qubit_count(
                gate.name(),
                gate.num_qubits(),
                qubits.len(),
            ));
        }

        for i in 0..qubits.len() {
            for j in (i + 1)..qubits.len() {
                if qubits[i] == qubits[j] {
                    return Err(QuantumError::DuplicateQubit(qubits[i]));
                }
            }
        }

        Ok(Self {
            gate,
            qubits: SmallVec::from_slice(qubits),
        })
    }

    /// Hadamard on a single qubit
    pub fn hadamard(qubit: QubitId) -> Self {
        Self {
            gate: StandardGate::Hadamard,
            qubits: SmallVec::from_slice(&[qubit]),
        }
    }

    /// CNOT with the given control and target
    ///
    /// # Errors
    /// Returns [`QuantumError::DuplicateQubit`] if control equals target.
    pub fn cnot(control: QubitId, target: QubitId) -> Result<Self> {
        Self::new(StandardGate::CNot, &[control, target])
    }

    /// Get the gate
    #[inline]
    pub fn gate(&self) -> StandardGate {
        self.gate
    }

    /// Get the qubits this operation acts on
    #[inline]
    pub fn qubits(&self) -> &[QubitId] {
        &self.qubits
    }

    /// Get the number of qubits
    #[inline]
    pub fn num_qubits(&self) -> usize {
        self.qubits.len()
    }

    /// Highest qubit index this operation touches
    pub fn max_qubit(&self) -> Option<QubitId> {
        self.qubits.iter().copied().max()
    }
}

impl fmt::Debug for GateOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.gate.name())?;
        for (i, q) in self.qubits.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", q)?;
        }
        write!(f, ")")
    }
}

impl fmt::Display for GateOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}
