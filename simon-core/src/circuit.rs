//! Quantum circuit representation

use crate::{GateOp, QuantumError, QubitId, Result};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// A quantum circuit
///
/// An ordered sequence of gate operations over a fixed register, plus the
/// subset of qubits read out by the terminal measurement. Circuits are
/// composed by value with [`Circuit::concat`]; there is no shared registry.
///
/// # Example
/// ```
/// use simon_core::Circuit;
///
/// let circuit = Circuit::new(3).unwrap();
/// assert_eq!(circuit.num_qubits(), 3);
/// assert_eq!(circuit.len(), 0);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Circuit {
    num_qubits: usize,
    operations: Vec<GateOp>,
    measured: Vec<QubitId>,
}

impl Circuit {
    /// Create a new quantum circuit with the specified number of qubits
    ///
    /// # Errors
    /// Returns [`QuantumError::EmptyCircuit`] if `num_qubits` is 0
    pub fn new(num_qubits: usize) -> Result<Self> {
        Self::with_capacity(num_qubits, 0)
    }

    /// Create a circuit with pre-allocated capacity
    pub fn with_capacity(num_qubits: usize, capacity: usize) -> Result<Self> {
        if num_qubits == 0 {
            return Err(QuantumError::EmptyCircuit);
        }
        Ok(Self {
            num_qubits,
            operations: Vec::with_capacity(capacity),
            measured: Vec::new(),
        })
    }

    /// Build a circuit from an ordered list of operations
    pub fn from_ops(num_qubits: usize, ops: impl IntoIterator<Item = GateOp>) -> Result<Self> {
        let mut circuit = Self::new(num_qubits)?;
        circuit.extend(ops)?;
        Ok(circuit)
    }

    /// Get the number of qubits in the circuit
    #[inline]
    pub const fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Get the number of operations in the circuit
    #[inline]
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// Check if the circuit is empty (no operations)
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Append a gate operation
    ///
    /// # Errors
    /// Returns error if any qubit index is out of bounds
    pub fn push(&mut self, op: GateOp) -> Result<()> {
        self.check_qubits(op.qubits())?;
        self.operations.push(op);
        Ok(())
    }

    /// Append every operation of `ops`, in order
    pub fn extend(&mut self, ops: impl IntoIterator<Item = GateOp>) -> Result<()> {
        for op in ops {
            self.push(op)?;
        }
        Ok(())
    }

    /// Designate qubits for terminal measurement
    ///
    /// The measured set is kept sorted and free of duplicates.
    pub fn measure(&mut self, qubits: impl IntoIterator<Item = QubitId>) -> Result<()> {
        for qubit in qubits {
            self.check_qubits(&[qubit])?;
            if let Err(pos) = self.measured.binary_search(&qubit) {
                self.measured.insert(pos, qubit);
            }
        }
        Ok(())
    }

    /// Concatenate `other` after `self`
    ///
    /// Both circuits must act on the same register. The measured set of the
    /// result is the union of both.
    pub fn concat(mut self, other: Circuit) -> Result<Circuit> {
        if other.num_qubits != self.num_qubits {
            return Err(QuantumError::WidthMismatch {
                left: self.num_qubits,
                right: other.num_qubits,
            });
        }
        self.operations.extend(other.operations);
        self.measure(other.measured)?;
        Ok(self)
    }

    /// Get an iterator over the operations
    pub fn operations(&self) -> impl Iterator<Item = &GateOp> {
        self.operations.iter()
    }

    /// Qubits read out by the terminal measurement, ascending
    pub fn measured_qubits(&self) -> &[QubitId] {
        &self.measured
    }

    /// Depth of the circuit
    ///
    /// Each operation is scheduled one layer after the latest operation that
    /// touched any of its qubits.
    pub fn depth(&self) -> usize {
        let mut levels = vec![0usize; self.num_qubits];
        let mut depth = 0;
        for op in &self.operations {
            let layer = op
                .qubits()
                .iter()
                .map(|q| levels[q.index()])
                .max()
                .unwrap_or(0)
                + 1;
            for q in op.qubits() {
                levels[q.index()] = layer;
            }
            depth = depth.max(layer);
        }
        depth
    }

    /// Validate the circuit
    ///
    /// Checks that all operations are valid for this circuit.
    pub fn validate(&self) -> Result<()> {
        for op in &self.operations {
            self.check_qubits(op.qubits())?;
        }
        self.check_qubits(&self.measured)
    }

    /// Flat description of the circuit for inspection and visualisation
    pub fn summary(&self) -> CircuitSummary {
        let mut gate_counts = BTreeMap::new();
        let gates = self
            .operations
            .iter()
            .map(|op| {
                *gate_counts.entry(op.gate().name().to_string()).or_insert(0) += 1;
                GateRecord {
                    name: op.gate().name().to_string(),
                    qubits: op.qubits().iter().map(|q| q.index()).collect(),
                }
            })
            .collect();

        CircuitSummary {
            num_qubits: self.num_qubits,
            depth: self.depth(),
            gate_counts,
            gates,
            measured: self.measured.iter().map(|q| q.index()).collect(),
        }
    }

    fn check_qubits(&self, qubits: &[QubitId]) -> Result<()> {
        for &qubit in qubits {
            if qubit.index() >= self.num_qubits {
                return Err(QuantumError::invalid_qubit(qubit.index(), self.num_qubits));
            }
        }
        Ok(())
    }
}

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Circuit ({} qubits, {} gates):", self.num_qubits, self.len())?;
        for (i, op) in self.operations.iter().enumerate() {
            writeln!(f, "  {}: {}", i, op)?;
        }
        if !self.measured.is_empty() {
            let measured: Vec<String> = self.measured.iter().map(|q| q.to_string()).collect();
            writeln!(f, "  measure: {}", measured.join(", "))?;
        }
        Ok(())
    }
}

/// One gate application in a [`CircuitSummary`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GateRecord {
    pub name: String,
    pub qubits: Vec<usize>,
}

/// Serializable overview of a circuit
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CircuitSummary {
    pub num_qubits: usize,
    pub depth: usize,
    pub gate_counts: BTreeMap<String, usize>,
    pub gates: Vec<GateRecord>,
    pub measured: Vec<usize>,
}
