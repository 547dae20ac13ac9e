//! Dense quantum state representation
//!
//! [`QuantumState`] owns a `2^n` amplitude vector indexed by basis-state
//! integer, where bit `i` of the index is the value of qubit `i`. Gates act
//! on it in place through the kernels in [`crate::kernels`].

use crate::error::{Result, StateError};
use crate::kernels;
use num_complex::Complex64;
use simon_core::{Gate, GateOp, QubitId, StandardGate};
use std::fmt;

/// Widest register a dense state will allocate (2^30 amplitudes, 16 GiB)
pub const MAX_QUBITS: usize = 30;

/// Register width at which gate kernels switch to rayon data parallelism
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 14;

/// Outcome of a normalization check
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NormCheck {
    /// Total probability is within tolerance of 1
    Normalized { total: f64 },
    /// Total probability drifted beyond tolerance but is finite and non-zero
    Drifted { total: f64 },
    /// Amplitudes contain NaN/Inf or carry no probability mass
    Invalid,
}

/// Dense quantum state vector
///
/// # Example
///
/// ```
/// use simon_state::QuantumState;
///
/// let state = QuantumState::new(3).unwrap();
/// assert_eq!(state.dimension(), 8);
/// assert!(state.is_normalized(1e-12));
/// ```
#[derive(Clone, PartialEq)]
pub struct QuantumState {
    num_qubits: usize,
    amplitudes: Vec<Complex64>,
    parallel_threshold: usize,
}

impl QuantumState {
    /// Create a new state initialized to |0...0⟩
    ///
    /// # Errors
    /// Returns error if `num_qubits` is 0 or exceeds [`MAX_QUBITS`]
    pub fn new(num_qubits: usize) -> Result<Self> {
        let dimension = Self::checked_dimension(num_qubits)?;
        let mut amplitudes = vec![Complex64::new(0.0, 0.0); dimension];
        amplitudes[0] = Complex64::new(1.0, 0.0);

        Ok(Self {
            num_qubits,
            amplitudes,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        })
    }

    /// Create a state from amplitude data
    ///
    /// The amplitudes are taken as given; no normalization is applied.
    ///
    /// # Errors
    /// Returns error if the length is not `2^num_qubits`
    pub fn from_amplitudes(num_qubits: usize, amplitudes: &[Complex64]) -> Result<Self> {
        let dimension = Self::checked_dimension(num_qubits)?;
        if amplitudes.len() != dimension {
            return Err(StateError::DimensionMismatch {
                expected: dimension,
                actual: amplitudes.len(),
            });
        }

        Ok(Self {
            num_qubits,
            amplitudes: amplitudes.to_vec(),
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        })
    }

    /// Equal-magnitude superposition over every basis state
    pub fn uniform(num_qubits: usize) -> Result<Self> {
        let dimension = Self::checked_dimension(num_qubits)?;
        let amp = Complex64::new(1.0 / (dimension as f64).sqrt(), 0.0);

        Ok(Self {
            num_qubits,
            amplitudes: vec![amp; dimension],
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        })
    }

    /// Set the register width at which kernels run in parallel
    pub fn with_parallel_threshold(mut self, num_qubits: usize) -> Self {
        self.parallel_threshold = num_qubits;
        self
    }

    fn checked_dimension(num_qubits: usize) -> Result<usize> {
        if num_qubits == 0 {
            return Err(StateError::InvalidDimension { dimension: 0 });
        }
        if num_qubits > MAX_QUBITS {
            return Err(StateError::TooManyQubits {
                num_qubits,
                max: MAX_QUBITS,
            });
        }
        Ok(1usize << num_qubits)
    }

    /// Get the number of qubits
    #[inline]
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Get the state dimension (2^num_qubits)
    #[inline]
    pub fn dimension(&self) -> usize {
        self.amplitudes.len()
    }

    /// Get a reference to the state amplitudes
    #[inline]
    pub fn amplitudes(&self) -> &[Complex64] {
        &self.amplitudes
    }

    /// Consume the state, returning its amplitudes
    pub fn into_amplitudes(self) -> Vec<Complex64> {
        self.amplitudes
    }

    #[inline]
    fn parallel(&self) -> bool {
        self.num_qubits >= self.parallel_threshold && rayon::current_num_threads() > 1
    }

    fn check_qubit(&self, qubit: QubitId) -> Result<usize> {
        let index = qubit.index();
        if index >= self.num_qubits {
            return Err(StateError::InvalidQubitIndex {
                index,
                num_qubits: self.num_qubits,
            });
        }
        Ok(index)
    }

    /// Apply a gate operation in place
    ///
    /// The transformation acts as identity on every qubit the operation does
    /// not name.
    ///
    /// # Errors
    /// Returns [`StateError::InvalidQubitIndex`] if the operation names a
    /// qubit outside `[0, n)`. The state is left untouched in that case.
    pub fn apply(&mut self, op: &GateOp) -> Result<()> {
        match (op.gate(), op.qubits()) {
            (StandardGate::Hadamard, &[qubit]) => self.apply_hadamard(qubit),
            (StandardGate::CNot, &[control, target]) => self.apply_cnot(control, target),
            (gate, qubits) => Err(StateError::DimensionMismatch {
                expected: gate.num_qubits(),
                actual: qubits.len(),
            }),
        }
    }

    /// Apply every operation in order
    pub fn apply_all<'a>(&mut self, ops: impl IntoIterator<Item = &'a GateOp>) -> Result<()> {
        for op in ops {
            self.apply(op)?;
        }
        Ok(())
    }

    /// Apply a Hadamard gate to `qubit`
    pub fn apply_hadamard(&mut self, qubit: QubitId) -> Result<()> {
        let qubit = self.check_qubit(qubit)?;
        let parallel = self.parallel();
        kernels::apply_hadamard(&mut self.amplitudes, qubit, parallel);
        Ok(())
    }

    /// Apply a CNOT gate
    ///
    /// # Errors
    /// Returns error if either index is out of range or they coincide
    pub fn apply_cnot(&mut self, control: QubitId, target: QubitId) -> Result<()> {
        let control = self.check_qubit(control)?;
        let target = self.check_qubit(target)?;
        if control == target {
            return Err(StateError::DuplicateQubit { index: control });
        }
        let parallel = self.parallel();
        kernels::apply_cnot(&mut self.amplitudes, control, target, parallel);
        Ok(())
    }

    /// Born-rule probabilities `|a_i|^2` for every basis state
    pub fn probabilities(&self) -> Vec<f64> {
        kernels::compute_probabilities(&self.amplitudes, self.parallel())
    }

    /// Sum of squared magnitudes
    pub fn total_probability(&self) -> f64 {
        self.amplitudes.iter().map(|a| a.norm_sqr()).sum()
    }

    /// Check if the state is normalized (total probability ≈ 1)
    pub fn is_normalized(&self, epsilon: f64) -> bool {
        matches!(self.check_normalization(epsilon), NormCheck::Normalized { .. })
    }

    /// Classify the total probability against `tolerance`
    pub fn check_normalization(&self, tolerance: f64) -> NormCheck {
        if self
            .amplitudes
            .iter()
            .any(|a| !a.re.is_finite() || !a.im.is_finite())
        {
            return NormCheck::Invalid;
        }

        let total = self.total_probability();
        if total <= f64::EPSILON {
            NormCheck::Invalid
        } else if (total - 1.0).abs() <= tolerance {
            NormCheck::Normalized { total }
        } else {
            NormCheck::Drifted { total }
        }
    }

    /// Rescale the amplitudes to unit total probability
    ///
    /// # Errors
    /// Returns [`StateError::NotNormalized`] if the state has no finite,
    /// non-zero norm to rescale by.
    pub fn normalize(&mut self) -> Result<()> {
        let norm = self.total_probability().sqrt();
        if !norm.is_finite() || norm <= f64::EPSILON {
            return Err(StateError::NotNormalized { norm });
        }
        let inv = 1.0 / norm;
        for amp in &mut self.amplitudes {
            *amp *= inv;
        }
        Ok(())
    }

    /// Probability of each outcome of the `measured` register
    ///
    /// Outcome `k` has bit `j` equal to the value of `measured[j]`; the
    /// probability of `k` sums over every value of the unmeasured qubits.
    pub fn marginal_probabilities(&self, measured: &[QubitId]) -> Result<Vec<f64>> {
        let masks = measured
            .iter()
            .map(|&q| self.check_qubit(q).map(|i| 1usize << i))
            .collect::<Result<Vec<_>>>()?;

        let mut marginal = vec![0.0; 1usize << masks.len()];
        for (index, amp) in self.amplitudes.iter().enumerate() {
            let outcome = masks
                .iter()
                .enumerate()
                .filter(|(_, &mask)| index & mask != 0)
                .fold(0usize, |acc, (j, _)| acc | (1 << j));
            marginal[outcome] += amp.norm_sqr();
        }
        Ok(marginal)
    }
}

impl fmt::Debug for QuantumState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuantumState")
            .field("num_qubits", &self.num_qubits)
            .field("total_probability", &self.total_probability())
            .finish()
    }
}
