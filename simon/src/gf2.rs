//! Linear algebra over GF(2)
//!
//! Bit vectors are written qubit-0-first: character `j` of a bitstring is
//! bit `j` of the vector, matching the register order of measurement keys.

use serde::Serialize;
use std::fmt;
use std::ops::{BitXor, BitXorAssign};

/// Widest vector a [`BitVector`] can hold
pub const MAX_BITS: usize = 64;

/// A fixed-length vector over GF(2)
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub struct BitVector {
    bits: u64,
    len: usize,
}

impl BitVector {
    /// The zero vector of `len` bits
    pub fn zeros(len: usize) -> Self {
        debug_assert!(len <= MAX_BITS);
        Self { bits: 0, len }
    }

    /// Build from an integer whose bit `j` is component `j`
    ///
    /// Bits at or above `len` are discarded.
    pub fn from_bits(bits: u64, len: usize) -> Self {
        debug_assert!(len <= MAX_BITS);
        let mask = if len >= MAX_BITS { u64::MAX } else { (1u64 << len) - 1 };
        Self {
            bits: bits & mask,
            len,
        }
    }

    /// Parse a `'0'`/`'1'` string, character `j` becoming bit `j`
    ///
    /// Returns `None` for any other character or an over-long string.
    pub fn parse(s: &str) -> Option<Self> {
        if s.len() > MAX_BITS {
            return None;
        }
        let mut bits = 0u64;
        for (j, c) in s.chars().enumerate() {
            match c {
                '0' => {}
                '1' => bits |= 1 << j,
                _ => return None,
            }
        }
        Some(Self {
            bits,
            len: s.chars().count(),
        })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Integer value with bit `j` equal to component `j`
    #[inline]
    pub fn bits(&self) -> u64 {
        self.bits
    }

    #[inline]
    pub fn get(&self, index: usize) -> bool {
        index < self.len && (self.bits >> index) & 1 == 1
    }

    pub fn set(&mut self, index: usize) {
        debug_assert!(index < self.len);
        self.bits |= 1 << index;
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.bits == 0
    }

    pub fn count_ones(&self) -> u32 {
        self.bits.count_ones()
    }

    /// Lowest index holding a 1
    pub fn lowest_one(&self) -> Option<usize> {
        (!self.is_zero()).then(|| self.bits.trailing_zeros() as usize)
    }

    /// Indices holding a 1, ascending
    pub fn ones(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.len).filter(move |&j| self.get(j))
    }

    /// Inner product over GF(2)
    pub fn dot(&self, other: &BitVector) -> bool {
        (self.bits & other.bits).count_ones() % 2 == 1
    }
}

impl BitXor for BitVector {
    type Output = BitVector;

    fn bitxor(self, rhs: BitVector) -> BitVector {
        debug_assert_eq!(self.len, rhs.len);
        BitVector {
            bits: self.bits ^ rhs.bits,
            len: self.len,
        }
    }
}

impl BitXorAssign for BitVector {
    fn bitxor_assign(&mut self, rhs: BitVector) {
        debug_assert_eq!(self.len, rhs.len);
        self.bits ^= rhs.bits;
    }
}

impl fmt::Display for BitVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for j in 0..self.len {
            f.write_str(if self.get(j) { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl fmt::Debug for BitVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BitVector({})", self)
    }
}

impl From<BitVector> for String {
    fn from(v: BitVector) -> String {
        v.to_string()
    }
}

/// The constraint `s_{j1} ⊕ … ⊕ s_{jk} = 0` over the unknown period
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct LinearEquation {
    coefficients: BitVector,
}

impl LinearEquation {
    /// Equation whose variables are the 1 bits of `coefficients`
    pub fn new(coefficients: BitVector) -> Self {
        Self { coefficients }
    }

    pub fn coefficients(&self) -> BitVector {
        self.coefficients
    }

    /// Indices of the variables in the equation, ascending
    pub fn variables(&self) -> Vec<usize> {
        self.coefficients.ones().collect()
    }

    pub fn is_satisfied_by(&self, s: &BitVector) -> bool {
        !self.coefficients.dot(s)
    }
}

impl fmt::Display for LinearEquation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut vars = self.coefficients.ones();
        match vars.next() {
            Some(first) => write!(f, "s_{first}")?,
            None => write!(f, "0")?,
        }
        for j in vars {
            write!(f, " ⊕ s_{j}")?;
        }
        write!(f, " = 0")
    }
}

impl fmt::Debug for LinearEquation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LinearEquation({})", self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PivotRow {
    pivot: usize,
    row: BitVector,
}

/// A linearly independent set of homogeneous equations
///
/// Equations are admitted only if independent of those already held. The
/// system keeps a reduced row echelon form alongside the accepted
/// equations, so independence tests and null space extraction need no
/// separate elimination pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinearSystem {
    num_vars: usize,
    equations: Vec<LinearEquation>,
    rref: Vec<PivotRow>,
}

impl LinearSystem {
    pub fn new(num_vars: usize) -> Self {
        Self {
            num_vars,
            equations: Vec::new(),
            rref: Vec::new(),
        }
    }

    pub fn num_vars(&self) -> usize {
        self.num_vars
    }

    /// Accepted equations in the order they were added
    pub fn equations(&self) -> &[LinearEquation] {
        &self.equations
    }

    pub fn rank(&self) -> usize {
        self.rref.len()
    }

    fn reduce(&self, mut v: BitVector) -> BitVector {
        for pr in &self.rref {
            if v.get(pr.pivot) {
                v ^= pr.row;
            }
        }
        v
    }

    /// Whether `equation` is a GF(2) combination of the accepted equations
    pub fn is_dependent(&self, equation: &LinearEquation) -> bool {
        self.reduce(equation.coefficients).is_zero()
    }

    /// Add `equation` if it is independent; returns whether it was added
    pub fn try_add(&mut self, equation: LinearEquation) -> bool {
        debug_assert_eq!(equation.coefficients.len(), self.num_vars);
        let reduced = self.reduce(equation.coefficients);
        let Some(pivot) = reduced.lowest_one() else {
            return false;
        };

        for pr in &mut self.rref {
            if pr.row.get(pivot) {
                pr.row ^= reduced;
            }
        }
        self.rref.push(PivotRow {
            pivot,
            row: reduced,
        });
        self.equations.push(equation);
        true
    }

    /// A basis of the solutions `s` with every equation equal to 0
    pub fn null_space(&self) -> Vec<BitVector> {
        let mut is_pivot = vec![false; self.num_vars];
        for pr in &self.rref {
            is_pivot[pr.pivot] = true;
        }

        (0..self.num_vars)
            .filter(|&free| !is_pivot[free])
            .map(|free| {
                let mut v = BitVector::zeros(self.num_vars);
                v.set(free);
                for pr in &self.rref {
                    if pr.row.get(free) {
                        v.set(pr.pivot);
                    }
                }
                v
            })
            .collect()
    }

    /// The only non-zero solution, if the null space is one-dimensional
    pub fn unique_nontrivial_solution(&self) -> Option<BitVector> {
        match self.null_space().as_slice() {
            [only] => Some(*only),
            _ => None,
        }
    }

    pub fn is_satisfied_by(&self, s: &BitVector) -> bool {
        self.equations.iter().all(|e| e.is_satisfied_by(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bv(s: &str) -> BitVector {
        BitVector::parse(s).unwrap()
    }

    fn eq(s: &str) -> LinearEquation {
        LinearEquation::new(bv(s))
    }

    #[test]
    fn test_parse_is_qubit_zero_first() {
        let v = bv("100");
        assert_eq!(v.bits(), 0b001);
        assert!(v.get(0));
        assert!(!v.get(2));
        assert_eq!(v.to_string(), "100");
        assert_eq!(BitVector::from_bits(0b110, 3).to_string(), "011");
        assert!(BitVector::parse("10a").is_none());
    }

    #[test]
    fn test_dot_product() {
        assert!(bv("110").dot(&bv("100")));
        assert!(!bv("110").dot(&bv("110")));
        assert!(!bv("101").dot(&bv("010")));
    }

    #[test]
    fn test_equation_rendering() {
        assert_eq!(eq("101").to_string(), "s_0 ⊕ s_2 = 0");
        assert_eq!(eq("0001").to_string(), "s_3 = 0");
        assert_eq!(eq("1111").variables(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_independence() {
        let mut system = LinearSystem::new(3);
        assert!(system.try_add(eq("110")));
        assert!(system.try_add(eq("011")));
        // 110 ⊕ 011
        assert!(system.is_dependent(&eq("101")));
        assert!(!system.try_add(eq("101")));
        assert!(!system.try_add(eq("000")));
        assert_eq!(system.rank(), 2);
        assert_eq!(system.equations().len(), 2);
    }

    #[test]
    fn test_null_space_of_full_rank_minus_one() {
        let mut system = LinearSystem::new(3);
        system.try_add(eq("110"));
        system.try_add(eq("011"));

        let s = system.unique_nontrivial_solution().unwrap();
        assert_eq!(s.to_string(), "111");
        assert!(system.is_satisfied_by(&s));
    }

    #[test]
    fn test_null_space_dimension() {
        let empty = LinearSystem::new(3);
        assert_eq!(empty.null_space().len(), 3);
        assert!(empty.unique_nontrivial_solution().is_none());

        let mut full = LinearSystem::new(2);
        full.try_add(eq("10"));
        full.try_add(eq("01"));
        assert!(full.null_space().is_empty());
    }

    #[test]
    fn test_null_space_vectors_solve_system() {
        let mut system = LinearSystem::new(5);
        for e in ["11000", "01100", "10011"] {
            system.try_add(eq(e));
        }
        let basis = system.null_space();
        assert_eq!(basis.len(), 5 - system.rank());
        for v in basis {
            assert!(!v.is_zero());
            assert!(system.is_satisfied_by(&v));
        }
    }

    #[test]
    fn test_serialize_as_bitstring() {
        let json = serde_json::to_string(&eq("011")).unwrap();
        assert_eq!(json, r#"{"coefficients":"011"}"#);
    }
}
