//! Simulation result types

use num_complex::Complex64;
use serde::Serialize;
use simon_state::SamplingResult;
use std::collections::BTreeMap;
use std::fmt;

/// Why a result was produced from a fallback rather than the evolved state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DegradationReason {
    /// The evolved state held NaN or infinite amplitudes
    NonFiniteAmplitudes,
    /// The evolved state carried no probability mass to renormalize
    VanishingNorm,
}

impl fmt::Display for DegradationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DegradationReason::NonFiniteAmplitudes => {
                write!(f, "state vector contained non-finite amplitudes")
            }
            DegradationReason::VanishingNorm => write!(f, "state vector had zero norm"),
        }
    }
}

/// A complex amplitude as a serializable pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Amplitude {
    pub re: f64,
    pub im: f64,
}

impl From<Complex64> for Amplitude {
    fn from(c: Complex64) -> Self {
        Self { re: c.re, im: c.im }
    }
}

/// Amplitude-mode output: the full state and its distribution
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AmplitudeResult {
    pub num_qubits: usize,
    pub amplitudes: Vec<Amplitude>,
    pub probabilities: Vec<f64>,
    /// True when the vectors are a uniform fallback, not the evolved state
    pub degraded: bool,
    pub degradation: Option<DegradationReason>,
}

impl AmplitudeResult {
    /// Sum of the probability distribution
    pub fn total_probability(&self) -> f64 {
        self.probabilities.iter().sum()
    }
}

/// Measurement outcome counts
///
/// Maps bitstrings over the measured register (qubit 0 first) to the number
/// of times they were observed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MeasurementCounts {
    /// Map from bitstring to count
    counts: BTreeMap<String, usize>,
    /// Total number of shots
    total_shots: usize,
    /// True when sampled from a uniform fallback distribution
    degraded: bool,
}

impl MeasurementCounts {
    /// Create an empty counts object
    pub fn new(total_shots: usize) -> Self {
        Self {
            counts: BTreeMap::new(),
            total_shots,
            degraded: false,
        }
    }

    /// Create from a counts map
    pub fn from_counts(counts: BTreeMap<String, usize>) -> Self {
        let total_shots = counts.values().sum();
        Self {
            counts,
            total_shots,
            degraded: false,
        }
    }

    /// Convert raw register outcomes into bitstring counts of `width` bits
    pub fn from_sampling(sampling: &SamplingResult, width: usize) -> Self {
        let counts = sampling.to_bitstring_counts(width).into_iter().collect();
        Self {
            counts,
            total_shots: sampling.shots,
            degraded: false,
        }
    }

    pub(crate) fn mark_degraded(mut self) -> Self {
        self.degraded = true;
        self
    }

    /// Add a measurement outcome
    pub fn add(&mut self, bitstring: String, count: usize) {
        *self.counts.entry(bitstring).or_insert(0) += count;
    }

    /// Get the count for a specific bitstring
    pub fn get(&self, bitstring: &str) -> usize {
        self.counts.get(bitstring).copied().unwrap_or(0)
    }

    /// Get the observed frequency of a specific bitstring
    pub fn probability(&self, bitstring: &str) -> f64 {
        if self.total_shots == 0 {
            0.0
        } else {
            self.get(bitstring) as f64 / self.total_shots as f64
        }
    }

    /// Get all counts
    pub fn counts(&self) -> &BTreeMap<String, usize> {
        &self.counts
    }

    /// Get the total number of shots
    pub fn total_shots(&self) -> usize {
        self.total_shots
    }

    /// Number of distinct bitstrings observed
    pub fn num_outcomes(&self) -> usize {
        self.counts.len()
    }

    pub fn is_degraded(&self) -> bool {
        self.degraded
    }

    /// Outcomes sorted by count descending, ties by bitstring ascending
    pub fn sorted(&self) -> Vec<(&str, usize)> {
        let mut sorted: Vec<_> = self.counts.iter().map(|(k, &v)| (k.as_str(), v)).collect();
        sorted.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        sorted
    }

    /// Get the most frequent outcome
    pub fn most_frequent(&self) -> Option<(&str, usize)> {
        self.sorted().into_iter().next()
    }
}

impl fmt::Display for MeasurementCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Measurement results ({} shots):", self.total_shots)?;
        for (bitstring, count) in self.sorted() {
            writeln!(
                f,
                "  |{}⟩: {} ({:.2}%)",
                bitstring,
                count,
                self.probability(bitstring) * 100.0
            )?;
        }
        Ok(())
    }
}

/// Both execution modes over one evolved state
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Execution {
    pub amplitudes: AmplitudeResult,
    pub counts: MeasurementCounts,
}

impl Execution {
    pub fn is_degraded(&self) -> bool {
        self.amplitudes.degraded
    }

    pub fn degradation(&self) -> Option<DegradationReason> {
        self.amplitudes.degradation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measurement_counts() {
        let mut counts = MeasurementCounts::new(100);
        counts.add("00".to_string(), 50);
        counts.add("11".to_string(), 30);
        counts.add("01".to_string(), 20);

        assert_eq!(counts.get("00"), 50);
        assert_eq!(counts.get("10"), 0);
        assert_eq!(counts.probability("11"), 0.3);
        assert_eq!(counts.num_outcomes(), 3);
        assert_eq!(counts.most_frequent(), Some(("00", 50)));
        assert!(!counts.is_degraded());
    }

    #[test]
    fn test_sorted_breaks_ties_by_bitstring() {
        let mut counts = MeasurementCounts::new(20);
        counts.add("11".to_string(), 10);
        counts.add("01".to_string(), 10);
        assert_eq!(counts.sorted(), vec![("01", 10), ("11", 10)]);
    }

    #[test]
    fn test_from_sampling_uses_register_order() {
        let mut sampling = SamplingResult::new(3);
        sampling.add_outcome(0b01);
        sampling.add_outcome(0b01);
        sampling.add_outcome(0b10);

        let counts = MeasurementCounts::from_sampling(&sampling, 2);
        assert_eq!(counts.get("10"), 2);
        assert_eq!(counts.get("01"), 1);
        assert_eq!(counts.total_shots(), 3);
    }

    #[test]
    fn test_serialize_degradation() {
        let json = serde_json::to_string(&DegradationReason::NonFiniteAmplitudes).unwrap();
        assert_eq!(json, r#"{"kind":"non_finite_amplitudes"}"#);
    }
}
