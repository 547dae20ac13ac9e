//! Computational basis measurement with alias-table sampling
//!
//! This module turns a [`QuantumState`] into measurement counts:
//! - Born-rule distributions over all qubits or a chosen register
//! - Alias method for O(1) sampling after O(2^n) setup
//! - Multi-worker shot sampling, each worker with its own seeded RNG

use crate::dense_state::QuantumState;
use crate::error::{Result, StateError};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use simon_core::QubitId;
use std::collections::HashMap;

/// Render a register outcome as a bitstring, qubit 0 first
///
/// Character `j` of the result is bit `j` of `outcome`, so the string reads
/// in register order rather than as a binary numeral.
///
/// ```
/// use simon_state::outcome_to_bitstring;
///
/// assert_eq!(outcome_to_bitstring(0b001, 3), "100");
/// assert_eq!(outcome_to_bitstring(0b110, 3), "011");
/// ```
pub fn outcome_to_bitstring(outcome: u64, width: usize) -> String {
    (0..width)
        .map(|j| if (outcome >> j) & 1 == 1 { '1' } else { '0' })
        .collect()
}

/// Sampling result containing counts from multiple measurement shots
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SamplingResult {
    /// Map from register outcome to count
    pub counts: HashMap<u64, usize>,

    /// Total number of shots
    pub shots: usize,
}

impl SamplingResult {
    /// Create an empty result expecting `shots` shots
    pub fn new(shots: usize) -> Self {
        Self {
            counts: HashMap::new(),
            shots,
        }
    }

    /// Add a measurement outcome
    pub fn add_outcome(&mut self, outcome: u64) {
        *self.counts.entry(outcome).or_insert(0) += 1;
    }

    /// Get the count for a specific outcome
    pub fn get_count(&self, outcome: u64) -> usize {
        self.counts.get(&outcome).copied().unwrap_or(0)
    }

    /// Sum of all recorded counts
    pub fn total_counts(&self) -> usize {
        self.counts.values().sum()
    }

    /// Fold another worker's counts into this one
    pub fn merge(mut self, other: SamplingResult) -> Self {
        for (outcome, count) in other.counts {
            *self.counts.entry(outcome).or_insert(0) += count;
        }
        self.shots += other.shots;
        self
    }

    /// Convert counts to qubit-0-first bitstrings
    pub fn to_bitstring_counts(&self, width: usize) -> HashMap<String, usize> {
        self.counts
            .iter()
            .map(|(&outcome, &count)| (outcome_to_bitstring(outcome, width), count))
            .collect()
    }
}

/// How shots are spread over workers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShotPlan {
    /// Number of independent sampling workers (at least 1)
    pub workers: usize,

    /// Base seed; `None` seeds every worker from OS entropy
    pub seed: Option<u64>,
}

impl ShotPlan {
    pub fn new(workers: usize, seed: Option<u64>) -> Self {
        Self {
            workers: workers.max(1),
            seed,
        }
    }

    /// A single worker with a fixed seed
    pub fn seeded(seed: u64) -> Self {
        Self::new(1, Some(seed))
    }

    /// Shot count for each worker, summing to `shots`
    fn split(&self, shots: usize) -> Vec<usize> {
        let workers = self.workers.min(shots).max(1);
        let base = shots / workers;
        let extra = shots % workers;
        (0..workers)
            .map(|w| base + usize::from(w < extra))
            .collect()
    }

    fn worker_rng(&self, worker: usize) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(
                seed ^ (worker as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15),
            ),
            None => StdRng::from_entropy(),
        }
    }
}

impl Default for ShotPlan {
    fn default() -> Self {
        Self::new(rayon::current_num_threads(), None)
    }
}

/// Computational basis measurement
///
/// Measures the chosen qubits (or the whole register) in the Z basis
/// without collapsing the state, so one evolved state serves every shot.
#[derive(Debug, Clone, Default)]
pub struct ComputationalBasis {
    /// Qubits to measure; `None` measures all qubits
    qubits: Option<Vec<QubitId>>,
}

impl ComputationalBasis {
    /// Create a measurement of all qubits
    pub fn new() -> Self {
        Self { qubits: None }
    }

    /// Create a measurement of specific qubits
    ///
    /// Bit `j` of every sampled outcome is the value of `qubits[j]`.
    pub fn of_qubits(qubits: Vec<QubitId>) -> Self {
        Self {
            qubits: Some(qubits),
        }
    }

    /// Number of bits in each sampled outcome
    pub fn width(&self, state: &QuantumState) -> usize {
        self.qubits
            .as_ref()
            .map_or(state.num_qubits(), |qubits| qubits.len())
    }

    /// Outcome distribution of the measured register
    pub fn distribution(&self, state: &QuantumState) -> Result<Vec<f64>> {
        match &self.qubits {
            Some(qubits) => state.marginal_probabilities(qubits),
            None => Ok(state.probabilities()),
        }
    }

    /// Sample `shots` outcomes across the workers in `plan`
    pub fn sample(
        &self,
        state: &QuantumState,
        shots: usize,
        plan: ShotPlan,
    ) -> Result<SamplingResult> {
        let distribution = self.distribution(state)?;
        sample_distribution(&distribution, shots, plan)
    }
}

/// Sample a precomputed distribution with the workers in `plan`
///
/// The alias table is built once and shared; each worker draws its share of
/// shots from its own RNG and the partial counts are merged. With a fixed
/// seed and worker count the merged counts are reproducible.
pub fn sample_distribution(
    probabilities: &[f64],
    shots: usize,
    plan: ShotPlan,
) -> Result<SamplingResult> {
    if shots == 0 {
        return Ok(SamplingResult::new(0));
    }

    let table = AliasTable::new(probabilities)?;
    let result = plan
        .split(shots)
        .into_par_iter()
        .enumerate()
        .map(|(worker, worker_shots)| {
            let mut rng = plan.worker_rng(worker);
            let mut next = || rng.gen::<f64>();
            let mut partial = SamplingResult::new(worker_shots);
            for _ in 0..worker_shots {
                partial.add_outcome(table.sample(&mut next) as u64);
            }
            partial
        })
        .reduce(|| SamplingResult::new(0), SamplingResult::merge);

    Ok(result)
}

/// Alias table for O(1) sampling from a discrete distribution
///
/// Uses Walker's alias method. The input is rescaled by its total, so
/// slightly unnormalized distributions sample correctly.
///
/// Reference: Walker, A. J. (1977). "An Efficient Method for Generating
/// Discrete Random Variables with General Distributions"
#[derive(Debug, Clone)]
pub struct AliasTable {
    /// Probability threshold for each index
    prob: Vec<f64>,

    /// Alias index for each index
    alias: Vec<usize>,
}

impl AliasTable {
    /// Build a table from non-negative weights
    ///
    /// # Errors
    /// [`StateError::EmptyDistribution`] if there are no weights, any weight
    /// is negative or non-finite, or the total is zero.
    pub fn new(probabilities: &[f64]) -> Result<Self> {
        let n = probabilities.len();
        if n == 0 || probabilities.iter().any(|p| !p.is_finite() || *p < 0.0) {
            return Err(StateError::EmptyDistribution);
        }
        let total: f64 = probabilities.iter().sum();
        if total <= 0.0 {
            return Err(StateError::EmptyDistribution);
        }

        let mut prob = vec![1.0; n];
        let mut alias: Vec<usize> = (0..n).collect();

        let mut scaled: Vec<f64> = probabilities
            .iter()
            .map(|&p| p * n as f64 / total)
            .collect();

        let (mut small, mut large): (Vec<usize>, Vec<usize>) =
            (0..n).partition(|&i| scaled[i] < 1.0);

        while let (Some(s), Some(l)) = (small.pop(), large.pop()) {
            prob[s] = scaled[s];
            alias[s] = l;

            scaled[l] = (scaled[l] + scaled[s]) - 1.0;

            if scaled[l] < 1.0 {
                small.push(l);
            } else {
                large.push(l);
            }
        }
        // Leftovers in either list are floating-point residue and keep prob 1.0

        Ok(Self { prob, alias })
    }

    /// Number of outcomes
    pub fn len(&self) -> usize {
        self.prob.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prob.is_empty()
    }

    /// Sample an index using two uniform draws from `rng`
    pub fn sample(&self, rng: &mut dyn FnMut() -> f64) -> usize {
        let n = self.prob.len();
        let i = ((rng() * n as f64) as usize).min(n - 1);

        if rng() < self.prob[i] {
            i
        } else {
            self.alias[i]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_complex::Complex64;

    // Simple linear congruential generator for testing
    struct TestRng {
        state: u64,
    }

    impl TestRng {
        fn new(seed: u64) -> Self {
            Self { state: seed }
        }

        fn next(&mut self) -> f64 {
            self.state = self.state.wrapping_mul(1103515245).wrapping_add(12345);
            ((self.state / 65536) % 32768) as f64 / 32768.0
        }
    }

    #[test]
    fn test_bitstring_is_qubit_zero_first() {
        assert_eq!(outcome_to_bitstring(0, 2), "00");
        assert_eq!(outcome_to_bitstring(1, 2), "10");
        assert_eq!(outcome_to_bitstring(2, 2), "01");
        assert_eq!(outcome_to_bitstring(3, 2), "11");
    }

    #[test]
    fn test_sampling_result() {
        let mut result = SamplingResult::new(100);
        for _ in 0..40 {
            result.add_outcome(1);
        }
        for _ in 0..40 {
            result.add_outcome(0);
        }
        for _ in 0..20 {
            result.add_outcome(2);
        }

        assert_eq!(result.get_count(0), 40);
        assert_eq!(result.get_count(3), 0);
        assert_eq!(result.total_counts(), 100);

        let bits = result.to_bitstring_counts(2);
        assert_eq!(bits["10"], 40);
        assert_eq!(bits["01"], 20);
    }

    #[test]
    fn test_merge() {
        let mut a = SamplingResult::new(2);
        a.add_outcome(0);
        a.add_outcome(1);
        let mut b = SamplingResult::new(1);
        b.add_outcome(1);

        let merged = a.merge(b);
        assert_eq!(merged.shots, 3);
        assert_eq!(merged.get_count(1), 2);
    }

    #[test]
    fn test_alias_table_uniform() {
        let alias_table = AliasTable::new(&[0.25, 0.25, 0.25, 0.25]).unwrap();

        let mut rng = TestRng::new(42);
        let mut counts = vec![0; 4];

        let shots = 10000;
        for _ in 0..shots {
            counts[alias_table.sample(&mut || rng.next())] += 1;
        }

        for count in counts {
            let freq = count as f64 / shots as f64;
            assert!((freq - 0.25).abs() < 0.02, "Frequency {} too far from 0.25", freq);
        }
    }

    #[test]
    fn test_alias_table_nonuniform() {
        let probabilities = vec![0.5, 0.3, 0.15, 0.05];
        let alias_table = AliasTable::new(&probabilities).unwrap();

        let mut rng = TestRng::new(123);
        let mut counts = vec![0; 4];

        let shots = 10000;
        for _ in 0..shots {
            counts[alias_table.sample(&mut || rng.next())] += 1;
        }

        for (i, (&prob, &count)) in probabilities.iter().zip(counts.iter()).enumerate() {
            let freq = count as f64 / shots as f64;
            assert!(
                (freq - prob).abs() < 0.02,
                "Outcome {} frequency {} too far from {}",
                i,
                freq,
                prob
            );
        }
    }

    #[test]
    fn test_alias_table_never_samples_zero_weight() {
        let alias_table = AliasTable::new(&[0.0, 2.0, 0.0, 2.0]).unwrap();
        let mut rng = TestRng::new(7);
        for _ in 0..5000 {
            let outcome = alias_table.sample(&mut || rng.next());
            assert!(outcome == 1 || outcome == 3);
        }
    }

    #[test]
    fn test_alias_table_rejects_bad_input() {
        assert_eq!(AliasTable::new(&[]).unwrap_err(), StateError::EmptyDistribution);
        assert_eq!(
            AliasTable::new(&[0.0, 0.0]).unwrap_err(),
            StateError::EmptyDistribution
        );
        assert_eq!(
            AliasTable::new(&[f64::NAN, 1.0]).unwrap_err(),
            StateError::EmptyDistribution
        );
    }

    #[test]
    fn test_born_rule_frequencies() {
        let amplitudes = vec![
            Complex64::new(0.6, 0.0),
            Complex64::new(0.8, 0.0),
            Complex64::new(0.0, 0.0),
            Complex64::new(0.0, 0.0),
        ];
        let state = QuantumState::from_amplitudes(2, &amplitudes).unwrap();

        let result = ComputationalBasis::new()
            .sample(&state, 1000, ShotPlan::seeded(42))
            .unwrap();

        assert_eq!(result.total_counts(), 1000);
        assert_eq!(result.get_count(2) + result.get_count(3), 0);
        let freq0 = result.get_count(0) as f64 / result.shots as f64;
        assert!((freq0 - 0.36).abs() < 0.05, "freq0 = {}", freq0);
    }

    #[test]
    fn test_partial_register_sampling() {
        // qubit 1 is |1⟩, qubit 0 is |0⟩
        let mut amplitudes = vec![Complex64::new(0.0, 0.0); 4];
        amplitudes[0b10] = Complex64::new(1.0, 0.0);
        let state = QuantumState::from_amplitudes(2, &amplitudes).unwrap();

        let basis = ComputationalBasis::of_qubits(vec![QubitId::new(1)]);
        assert_eq!(basis.width(&state), 1);

        let result = basis.sample(&state, 64, ShotPlan::seeded(3)).unwrap();
        assert_eq!(result.get_count(1), 64);
    }

    #[test]
    fn test_shot_plan_split() {
        assert_eq!(ShotPlan::new(4, None).split(10), vec![3, 3, 2, 2]);
        assert_eq!(ShotPlan::new(8, None).split(3), vec![1, 1, 1]);
        assert_eq!(ShotPlan::new(0, None).split(5), vec![5]);
    }

    #[test]
    fn test_seeded_sampling_is_reproducible() {
        let state = QuantumState::uniform(3).unwrap();
        let basis = ComputationalBasis::new();
        let plan = ShotPlan::new(4, Some(99));

        let a = basis.sample(&state, 2048, plan).unwrap();
        let b = basis.sample(&state, 2048, plan).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.shots, 2048);
        assert_eq!(a.total_counts(), 2048);
    }

    #[test]
    fn test_zero_shots() {
        let state = QuantumState::new(1).unwrap();
        let result = ComputationalBasis::new()
            .sample(&state, 0, ShotPlan::default())
            .unwrap();
        assert!(result.counts.is_empty());
    }
}
