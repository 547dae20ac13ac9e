//! The end-to-end period-finding pipeline

use crate::error::Result;
use crate::gf2::LinearEquation;
use crate::oracle::OracleBuilder;
use crate::solver::LinearSystemSolver;
use crate::SimonError;
use serde::Serialize;
use simon_core::CircuitSummary;
use simon_sim::{
    Amplitude, CircuitExecutor, DegradationReason, Diagnostics, Execution, SimulatorConfig,
};
use std::collections::BTreeMap;
use tracing::{info_span, instrument};

/// Everything one simulation request produces
#[derive(Debug, Clone, Serialize)]
pub struct SimonOutcome {
    /// The period after padding or truncation to the input register
    pub hidden_period: String,
    pub num_qubits: usize,
    pub amplitudes: Vec<Amplitude>,
    pub probabilities: Vec<f64>,
    pub measurement_counts: BTreeMap<String, usize>,
    pub equations: Vec<String>,
    pub linear_equations: Vec<LinearEquation>,
    pub recovered_period: String,
    pub degraded: bool,
    pub degradation: Option<DegradationReason>,
    pub circuit: CircuitSummary,
    pub diagnostics: Diagnostics,
}

impl SimonOutcome {
    /// Whether the recovered period equals the (normalized) hidden period
    pub fn is_correct(&self) -> bool {
        self.recovered_period == self.hidden_period
    }
}

/// Runs Simon's algorithm with a fixed configuration
#[derive(Debug, Clone)]
pub struct SimonSimulator {
    executor: CircuitExecutor,
}

impl SimonSimulator {
    pub fn new(config: SimulatorConfig) -> Result<Self> {
        Ok(Self {
            executor: CircuitExecutor::new(config)?,
        })
    }

    pub fn config(&self) -> &SimulatorConfig {
        self.executor.config()
    }

    /// Build the oracle, run the circuit in both modes, and solve
    ///
    /// # Errors
    /// - [`SimonError::InvalidConfiguration`] for malformed input or a
    ///   register wider than the configured maximum, before any gate runs
    /// - [`SimonError::DegenerateOracle`] if the samples do not determine a
    ///   unique non-zero period
    #[instrument(skip(self), fields(shots = self.config().shots))]
    pub fn simulate(&self, hidden_period: &str, num_qubits: usize) -> Result<SimonOutcome> {
        let oracle = OracleBuilder::new(hidden_period, num_qubits)?;
        let max_qubits = self.config().max_qubits;
        if num_qubits > max_qubits {
            return Err(SimonError::invalid_configuration(format!(
                "num_qubits {num_qubits} exceeds the maximum of {max_qubits}"
            )));
        }

        let mut diagnostics = Diagnostics::new();
        let n = oracle.input_qubits();

        let circuit = {
            let _span = info_span!("build_circuit", n).entered();
            CircuitExecutor::assemble(num_qubits, n, oracle.build()?)?
        };
        diagnostics.log_event("circuit_built");

        let Execution { amplitudes, counts } = self.executor.run(&circuit, &mut diagnostics)?;

        let solver = LinearSystemSolver::new(n).with_degraded(amplitudes.degraded);
        let recovery = solver.solve(&counts, &mut diagnostics)?;

        Ok(SimonOutcome {
            hidden_period: oracle.period().to_string(),
            num_qubits,
            equations: recovery.rendered_equations(),
            linear_equations: recovery.system.equations().to_vec(),
            recovered_period: recovery.period.to_string(),
            amplitudes: amplitudes.amplitudes,
            probabilities: amplitudes.probabilities,
            measurement_counts: counts.counts().clone(),
            degraded: amplitudes.degraded,
            degradation: amplitudes.degradation,
            circuit: circuit.summary(),
            diagnostics,
        })
    }
}

/// Run Simon's algorithm with the default configuration
///
/// `hidden_period` is written qubit-0-first; `num_qubits` is the full
/// register width `2n`.
///
/// # Example
///
/// ```
/// let outcome = simon::simulate_simon("11", 4).unwrap();
/// assert_eq!(outcome.recovered_period, "11");
/// assert_eq!(outcome.equations, vec!["s_0 ⊕ s_1 = 0"]);
/// ```
pub fn simulate_simon(hidden_period: &str, num_qubits: usize) -> Result<SimonOutcome> {
    simulate_simon_with(hidden_period, num_qubits, SimulatorConfig::default())
}

/// Run Simon's algorithm with an explicit configuration
pub fn simulate_simon_with(
    hidden_period: &str,
    num_qubits: usize,
    config: SimulatorConfig,
) -> Result<SimonOutcome> {
    SimonSimulator::new(config)?.simulate(hidden_period, num_qubits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DegeneracyStage;
    use approx::assert_relative_eq;

    #[test]
    fn test_recovers_two_bit_period() {
        let outcome = simulate_simon_with("11", 4, SimulatorConfig::deterministic(5)).unwrap();

        assert_eq!(outcome.hidden_period, "11");
        assert_eq!(outcome.recovered_period, "11");
        assert!(outcome.is_correct());
        assert!(!outcome.degraded);
        assert_eq!(outcome.amplitudes.len(), 16);
        assert_relative_eq!(outcome.probabilities.iter().sum::<f64>(), 1.0, epsilon = 1e-6);
        assert_eq!(outcome.measurement_counts.values().sum::<usize>(), 1024);
        // only outcomes orthogonal to 11 can appear
        assert!(outcome.measurement_counts.keys().all(|k| k == "00" || k == "11"));
    }

    #[test]
    fn test_circuit_summary_and_diagnostics() {
        let outcome = simulate_simon_with("11", 4, SimulatorConfig::deterministic(5)).unwrap();

        assert_eq!(outcome.circuit.gate_counts["H"], 4);
        assert_eq!(outcome.circuit.gate_counts["CNOT"], 4);
        assert_eq!(outcome.circuit.measured, vec![0, 1]);
        assert_eq!(outcome.diagnostics.gates_applied, 8);
        assert!(outcome.diagnostics.has_event("period_recovered"));
    }

    #[test]
    fn test_zero_period_is_degenerate() {
        let err = simulate_simon_with("00", 4, SimulatorConfig::deterministic(5)).unwrap_err();
        match err {
            SimonError::DegenerateOracle(report) => {
                assert_eq!(report.stage, DegeneracyStage::Inconsistent);
                assert!(!report.degraded);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_config_errors_precede_simulation() {
        assert!(matches!(
            simulate_simon("11", 3),
            Err(SimonError::InvalidConfiguration { .. })
        ));
        assert!(matches!(
            simulate_simon("1a", 4),
            Err(SimonError::InvalidConfiguration { .. })
        ));

        let narrow = SimulatorConfig::default().with_max_qubits(4);
        assert!(matches!(
            simulate_simon_with("111", 6, narrow),
            Err(SimonError::InvalidConfiguration { .. })
        ));
        assert!(matches!(
            simulate_simon_with("11", 4, SimulatorConfig::default().with_shots(0)),
            Err(SimonError::InvalidConfiguration { .. })
        ));
    }
}
