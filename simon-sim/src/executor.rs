//! Circuit execution engine
//!
//! [`CircuitExecutor`] evolves a dense state through a [`Circuit`] and reads
//! it out in two modes: the full amplitude vector, and multi-shot sampling
//! over the circuit's measured register.

use crate::config::SimulatorConfig;
use crate::diagnostics::Diagnostics;
use crate::error::{Result, SimulatorError};
use crate::result::{AmplitudeResult, DegradationReason, Execution, MeasurementCounts};
use simon_core::{Circuit, GateOp, QubitId};
use simon_state::{ComputationalBasis, NormCheck, QuantumState, ShotPlan};
use tracing::{debug, info, instrument, warn};

/// Executes circuits against a dense state vector
#[derive(Debug, Clone)]
pub struct CircuitExecutor {
    config: SimulatorConfig,
}

impl CircuitExecutor {
    /// Create an executor, rejecting an invalid configuration
    pub fn new(config: SimulatorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    /// Assemble `H(input) · oracle · H(input)` measuring the input register
    ///
    /// The input register is qubits `[0, input_qubits)`; the oracle may act
    /// on any qubit of the `num_qubits`-wide register.
    pub fn assemble(
        num_qubits: usize,
        input_qubits: usize,
        oracle: impl IntoIterator<Item = GateOp>,
    ) -> Result<Circuit> {
        if input_qubits == 0 || input_qubits > num_qubits {
            return Err(SimulatorError::InvalidConfig(format!(
                "input register of {input_qubits} qubits does not fit a {num_qubits}-qubit circuit"
            )));
        }

        let input: Vec<QubitId> = (0..input_qubits).map(QubitId::new).collect();
        let layer = || input.iter().map(|&q| GateOp::hadamard(q));

        let mut circuit = Circuit::new(num_qubits)?;
        circuit.extend(layer())?;
        circuit.extend(oracle)?;
        circuit.extend(layer())?;
        circuit.measure(input.iter().copied())?;
        Ok(circuit)
    }

    /// Evolve `|0…0⟩` through every gate of `circuit`
    ///
    /// Measurement is not applied; the returned state is the pre-measurement
    /// state.
    #[instrument(skip_all, fields(num_qubits = circuit.num_qubits(), gates = circuit.len()))]
    pub fn evolve(&self, circuit: &Circuit, diagnostics: &mut Diagnostics) -> Result<QuantumState> {
        if circuit.num_qubits() > self.config.max_qubits {
            return Err(SimulatorError::TooManyQubits {
                num_qubits: circuit.num_qubits(),
                max_qubits: self.config.max_qubits,
            });
        }
        circuit.validate()?;

        let mut state = QuantumState::new(circuit.num_qubits())?
            .with_parallel_threshold(self.config.parallel_threshold);
        diagnostics.parallel_kernels = circuit.num_qubits() >= self.config.parallel_threshold;
        diagnostics.log_event("evolution_start");

        for (gate_index, op) in circuit.operations().enumerate() {
            state
                .apply(op)
                .map_err(|source| SimulatorError::GateApplicationFailed { gate_index, source })?;
            diagnostics.inc_gate_type(op.gate().name());
        }

        diagnostics.log_event("evolution_complete");
        debug!(gates_applied = diagnostics.gates_applied, "state evolved");
        Ok(state)
    }

    /// Check the evolved state and repair or replace it
    ///
    /// Drift beyond the configured tolerance is renormalized and recorded.
    /// A state with no usable norm is replaced by the uniform superposition
    /// and the returned reason marks everything derived from it as degraded.
    pub fn stabilize(
        &self,
        state: QuantumState,
        diagnostics: &mut Diagnostics,
    ) -> Result<(QuantumState, Option<DegradationReason>)> {
        match state.check_normalization(self.config.norm_tolerance) {
            NormCheck::Normalized { .. } => Ok((state, None)),
            NormCheck::Drifted { total } => {
                let mut state = state;
                diagnostics.record_drift(total);
                match state.normalize() {
                    Ok(()) => Ok((state, None)),
                    Err(_) => {
                        let reason = DegradationReason::VanishingNorm;
                        self.fallback(state.num_qubits(), reason, diagnostics)
                    }
                }
            }
            NormCheck::Invalid => {
                let reason = if state
                    .amplitudes()
                    .iter()
                    .any(|a| !a.re.is_finite() || !a.im.is_finite())
                {
                    DegradationReason::NonFiniteAmplitudes
                } else {
                    DegradationReason::VanishingNorm
                };
                self.fallback(state.num_qubits(), reason, diagnostics)
            }
        }
    }

    fn fallback(
        &self,
        num_qubits: usize,
        reason: DegradationReason,
        diagnostics: &mut Diagnostics,
    ) -> Result<(QuantumState, Option<DegradationReason>)> {
        warn!(%reason, num_qubits, "falling back to uniform distribution");
        diagnostics.record_degradation(reason);
        Ok((QuantumState::uniform(num_qubits)?, Some(reason)))
    }

    /// Amplitude-mode readout of an already evolved state
    pub fn read_amplitudes(
        &self,
        state: QuantumState,
        diagnostics: &mut Diagnostics,
    ) -> Result<AmplitudeResult> {
        let (state, degradation) = self.stabilize(state, diagnostics)?;
        Ok(Self::amplitude_result(&state, degradation))
    }

    fn amplitude_result(state: &QuantumState, degradation: Option<DegradationReason>) -> AmplitudeResult {
        AmplitudeResult {
            num_qubits: state.num_qubits(),
            amplitudes: state.amplitudes().iter().map(|&a| a.into()).collect(),
            probabilities: state.probabilities(),
            degraded: degradation.is_some(),
            degradation,
        }
    }

    /// Draw `config.shots` shots over `measured` from an evolved state
    pub fn sample(
        &self,
        state: &QuantumState,
        measured: &[QubitId],
        diagnostics: &mut Diagnostics,
    ) -> Result<MeasurementCounts> {
        let plan = ShotPlan::new(self.config.workers, self.config.seed);
        diagnostics.sampling_workers = plan.workers.min(self.config.shots);

        let basis = ComputationalBasis::of_qubits(measured.to_vec());
        let sampling = basis.sample(state, self.config.shots, plan)?;
        diagnostics.log_event("sampling_complete");

        debug!(
            shots = sampling.shots,
            distinct = sampling.counts.len(),
            "sampled measured register"
        );
        Ok(MeasurementCounts::from_sampling(&sampling, measured.len()))
    }

    /// Amplitude mode: the full state vector and its distribution
    pub fn run_amplitudes(
        &self,
        circuit: &Circuit,
        diagnostics: &mut Diagnostics,
    ) -> Result<AmplitudeResult> {
        let state = self.evolve(circuit, diagnostics)?;
        self.read_amplitudes(state, diagnostics)
    }

    /// Sampling mode: counts over the circuit's measured register
    ///
    /// A circuit with no measured qubits is read out over every qubit.
    pub fn run_sampling(
        &self,
        circuit: &Circuit,
        diagnostics: &mut Diagnostics,
    ) -> Result<MeasurementCounts> {
        let state = self.evolve(circuit, diagnostics)?;
        Ok(self.measure(state, &Self::register(circuit), diagnostics)?.counts)
    }

    /// Both modes from a single evolution
    #[instrument(skip_all, fields(num_qubits = circuit.num_qubits(), shots = self.config.shots))]
    pub fn run(&self, circuit: &Circuit, diagnostics: &mut Diagnostics) -> Result<Execution> {
        let state = self.evolve(circuit, diagnostics)?;
        let execution = self.measure(state, &Self::register(circuit), diagnostics)?;
        info!(
            degraded = execution.is_degraded(),
            outcomes = execution.counts.num_outcomes(),
            "circuit executed"
        );
        Ok(execution)
    }

    /// Stabilize an evolved state, then read it out in both modes
    pub fn measure(
        &self,
        state: QuantumState,
        measured: &[QubitId],
        diagnostics: &mut Diagnostics,
    ) -> Result<Execution> {
        let (state, degradation) = self.stabilize(state, diagnostics)?;
        let mut counts = self.sample(&state, measured, diagnostics)?;
        if degradation.is_some() {
            counts = counts.mark_degraded();
        }

        Ok(Execution {
            amplitudes: Self::amplitude_result(&state, degradation),
            counts,
        })
    }

    fn register(circuit: &Circuit) -> Vec<QubitId> {
        if circuit.measured_qubits().is_empty() {
            (0..circuit.num_qubits()).map(QubitId::new).collect()
        } else {
            circuit.measured_qubits().to_vec()
        }
    }
}
