//! Qubit addressing

use serde::{Deserialize, Serialize};
use std::fmt;

/// Position of a qubit in the register
///
/// Bit `i` of a basis-state index holds the value of `QubitId(i)`, and
/// character `i` of every bitstring this workspace prints. Ordering follows
/// the index, so a sorted list of ids reads the register left to right.
///
/// # Example
/// ```
/// use simon_core::QubitId;
///
/// let input: Vec<QubitId> = (0..3).map(QubitId::new).collect();
/// assert_eq!(input.last().map(|q| q.index()), Some(2));
/// assert_eq!(input[1].to_string(), "q1");
/// ```
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QubitId(usize);

impl QubitId {
    #[inline]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Register position, also the bit this qubit occupies in a basis index
    #[inline]
    pub const fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for QubitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.0)
    }
}
