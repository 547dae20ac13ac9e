//! Simulator configuration

use crate::error::{Result, SimulatorError};
use simon_state::DEFAULT_PARALLEL_THRESHOLD;

/// Configuration for the circuit executor
#[derive(Debug, Clone, PartialEq)]
pub struct SimulatorConfig {
    /// Number of measurement shots for sampling
    ///
    /// Default: 1024
    pub shots: usize,

    /// Random number generator seed for reproducibility
    ///
    /// If None, every sampling worker seeds from OS entropy. With Some(seed)
    /// each worker derives its stream from the seed and its worker index.
    ///
    /// Default: None (random)
    pub seed: Option<u64>,

    /// Allowed deviation of total probability from 1 before renormalizing
    ///
    /// Default: 1e-6
    pub norm_tolerance: f64,

    /// Minimum number of qubits to enable parallel gate kernels
    ///
    /// Circuits with fewer qubits use single-threaded kernels to avoid
    /// synchronization overhead.
    ///
    /// Default: 14
    pub parallel_threshold: usize,

    /// Number of shot-sampling workers
    ///
    /// Default: the rayon thread count
    pub workers: usize,

    /// Widest circuit the executor accepts
    ///
    /// A dense state holds `2^max_qubits` amplitudes.
    ///
    /// Default: 20
    pub max_qubits: usize,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            shots: 1024,
            seed: None,
            norm_tolerance: 1e-6,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
            workers: rayon::current_num_threads(),
            max_qubits: 20,
        }
    }
}

impl SimulatorConfig {
    /// Create a new configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a reproducible configuration
    ///
    /// - Fixed seed
    /// - Fixed worker count, so the shot split does not depend on the host
    pub fn deterministic(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            workers: 4,
            ..Default::default()
        }
    }

    /// Set the number of measurement shots
    pub fn with_shots(mut self, shots: usize) -> Self {
        self.shots = shots;
        self
    }

    /// Set the random seed for deterministic execution
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the register width at which kernels go parallel
    pub fn with_parallel_threshold(mut self, num_qubits: usize) -> Self {
        self.parallel_threshold = num_qubits;
        self
    }

    /// Set the normalization tolerance
    pub fn with_norm_tolerance(mut self, tolerance: f64) -> Self {
        self.norm_tolerance = tolerance;
        self
    }

    /// Set the widest accepted circuit
    pub fn with_max_qubits(mut self, max_qubits: usize) -> Self {
        self.max_qubits = max_qubits;
        self
    }

    /// Set the number of sampling workers
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.shots == 0 {
            return Err(SimulatorError::InvalidConfig("shots must be > 0".to_string()));
        }

        if !(self.norm_tolerance > 0.0 && self.norm_tolerance < 1.0) {
            return Err(SimulatorError::InvalidConfig(format!(
                "norm_tolerance must be in (0,1), got {}",
                self.norm_tolerance
            )));
        }

        if self.workers == 0 {
            return Err(SimulatorError::InvalidConfig("workers must be > 0".to_string()));
        }

        if self.max_qubits == 0 || self.max_qubits > simon_state::MAX_QUBITS {
            return Err(SimulatorError::InvalidConfig(format!(
                "max_qubits must be in 1..={}, got {}",
                simon_state::MAX_QUBITS,
                self.max_qubits
            )));
        }

        Ok(())
    }
}
