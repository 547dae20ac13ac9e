//! Oracle construction for a hidden period
//!
//! The oracle acts on a `2n`-qubit register: the input register is qubits
//! `[0, n)` and the output register is `[n, 2n)`. It is built from CNOTs
//! only, so the function it computes is linear over GF(2):
//!
//! ```text
//! f(x)_j = x_j ⊕ s_{j-1}·x_{j-1}      (indices mod n)
//! ```
//!
//! This is a structural encoding of the period rather than an arbitrary
//! two-to-one function. `f(x) = f(x ⊕ s)` holds for every `x` exactly when
//! `s` is all ones; for other periods `f` is one-to-one, which the solver
//! detects from the samples.

use crate::error::{Result, SimonError};
use crate::gf2::BitVector;
use simon_core::{GateOp, QubitId};
use tracing::debug;

/// Builds the CNOT network encoding a hidden period
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OracleBuilder {
    input_qubits: usize,
    period: BitVector,
}

impl OracleBuilder {
    /// Validate the request and normalize the period to `num_qubits / 2` bits
    ///
    /// The period is right-padded with `'0'` or truncated to length `n`.
    ///
    /// # Errors
    /// [`SimonError::InvalidConfiguration`] if `num_qubits` is odd or below
    /// 2, or the period is empty or contains anything but `'0'`/`'1'`.
    pub fn new(hidden_period: &str, num_qubits: usize) -> Result<Self> {
        if num_qubits < 2 {
            return Err(SimonError::invalid_configuration(format!(
                "num_qubits must be at least 2, got {num_qubits}"
            )));
        }
        if num_qubits % 2 != 0 {
            return Err(SimonError::invalid_configuration(format!(
                "num_qubits must be even, got {num_qubits}"
            )));
        }
        if hidden_period.is_empty() {
            return Err(SimonError::invalid_configuration(
                "hidden period must not be empty",
            ));
        }
        if let Some(bad) = hidden_period.chars().find(|c| *c != '0' && *c != '1') {
            return Err(SimonError::invalid_configuration(format!(
                "hidden period must contain only '0' and '1', found {bad:?}"
            )));
        }

        let input_qubits = num_qubits / 2;
        if input_qubits > crate::gf2::MAX_BITS {
            return Err(SimonError::invalid_configuration(format!(
                "input register of {input_qubits} qubits is too wide"
            )));
        }

        let normalized: String = hidden_period
            .chars()
            .chain(std::iter::repeat('0'))
            .take(input_qubits)
            .collect();
        let period = BitVector::parse(&normalized).ok_or_else(|| {
            SimonError::invalid_configuration(format!("cannot parse hidden period {normalized:?}"))
        })?;

        if hidden_period.len() != input_qubits {
            debug!(
                given = hidden_period,
                normalized = %period,
                "hidden period padded or truncated to the input register"
            );
        }

        Ok(Self {
            input_qubits,
            period,
        })
    }

    /// Width `n` of the input register
    pub fn input_qubits(&self) -> usize {
        self.input_qubits
    }

    /// Total register width `2n`
    pub fn num_qubits(&self) -> usize {
        2 * self.input_qubits
    }

    /// The normalized `n`-bit period
    pub fn period(&self) -> BitVector {
        self.period
    }

    /// The oracle's ordered gate sequence
    ///
    /// First CNOT(i, i+n) for every input qubit, copying the input into the
    /// output register; then CNOT(i, (i+1) mod n + n) for every `i` with
    /// `s_i = 1`.
    pub fn build(&self) -> Result<Vec<GateOp>> {
        let n = self.input_qubits;
        let copies = (0..n).map(|i| (i, i + n));
        let couplings = self.period.ones().map(|i| (i, (i + 1) % n + n));

        copies
            .chain(couplings)
            .map(|(control, target)| {
                GateOp::cnot(QubitId::new(control), QubitId::new(target)).map_err(SimonError::from)
            })
            .collect()
    }

    /// The classical function the oracle writes into the output register
    pub fn evaluate(&self, x: BitVector) -> BitVector {
        let n = self.input_qubits;
        let mut y = x;
        for i in self.period.ones() {
            if x.get(i) {
                y ^= BitVector::from_bits(1 << ((i + 1) % n), n);
            }
        }
        y
    }
}
