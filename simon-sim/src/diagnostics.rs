//! Per-request diagnostics
//!
//! A [`Diagnostics`] value travels `&mut` through one request. Every record
//! is mirrored to `tracing` so that a subscriber sees the same events live.

use crate::result::DegradationReason;
use serde::Serialize;
use std::collections::BTreeMap;
use std::time::Instant;
use tracing::{debug, warn};

/// A labelled point in the request timeline
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiagnosticEvent {
    pub label: String,
    /// Microseconds since the diagnostics were created
    pub elapsed_us: u64,
}

/// Diagnostic record of one simulation request
#[derive(Debug, Clone, Serialize)]
pub struct Diagnostics {
    pub events: Vec<DiagnosticEvent>,
    pub warnings: Vec<String>,
    pub gate_type_counts: BTreeMap<String, usize>,
    pub gates_applied: usize,
    /// Total probability observed before renormalization, if it drifted
    pub norm_drift: Option<f64>,
    pub degradation: Option<DegradationReason>,
    pub parallel_kernels: bool,
    pub sampling_workers: usize,
    #[serde(skip)]
    started: Instant,
}

impl Default for Diagnostics {
    fn default() -> Self {
        Self {
            events: Vec::new(),
            warnings: Vec::new(),
            gate_type_counts: BTreeMap::new(),
            gates_applied: 0,
            norm_drift: None,
            degradation: None,
            parallel_kernels: false,
            sampling_workers: 0,
            started: Instant::now(),
        }
    }
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn log_event(&mut self, label: impl Into<String>) {
        let label = label.into();
        let elapsed_us = u64::try_from(self.started.elapsed().as_micros()).unwrap_or(u64::MAX);
        debug!(event = %label, elapsed_us, "diagnostic event");
        self.events.push(DiagnosticEvent { label, elapsed_us });
    }

    pub fn log_warning(&mut self, msg: impl Into<String>) {
        let msg = msg.into();
        warn!(warning = %msg);
        self.warnings.push(msg);
    }

    pub fn inc_gate_type(&mut self, gate_name: &str) {
        *self
            .gate_type_counts
            .entry(gate_name.to_string())
            .or_insert(0) += 1;
        self.gates_applied += 1;
    }

    pub fn record_drift(&mut self, total_probability: f64) {
        self.norm_drift = Some(total_probability);
        self.log_warning(format!(
            "total probability {total_probability:.3e} outside tolerance, renormalized"
        ));
    }

    pub fn record_degradation(&mut self, reason: DegradationReason) {
        self.degradation = Some(reason);
        self.log_warning(format!("degraded to uniform distribution: {reason}"));
    }

    pub fn is_degraded(&self) -> bool {
        self.degradation.is_some()
    }

    /// Whether the request has an event with this label
    pub fn has_event(&self, label: &str) -> bool {
        self.events.iter().any(|e| e.label == label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_counts() {
        let mut diag = Diagnostics::new();
        diag.inc_gate_type("H");
        diag.inc_gate_type("CNOT");
        diag.inc_gate_type("H");

        assert_eq!(diag.gates_applied, 3);
        assert_eq!(diag.gate_type_counts["H"], 2);
        assert_eq!(diag.gate_type_counts["CNOT"], 1);
    }

    #[test]
    fn test_events_are_ordered() {
        let mut diag = Diagnostics::new();
        diag.log_event("first");
        diag.log_event("second");

        assert!(diag.has_event("first"));
        assert!(!diag.has_event("third"));
        assert!(diag.events[0].elapsed_us <= diag.events[1].elapsed_us);
    }

    #[test]
    fn test_drift_and_degradation() {
        let mut diag = Diagnostics::new();
        assert!(!diag.is_degraded());

        diag.record_drift(1.01);
        assert_eq!(diag.norm_drift, Some(1.01));
        assert!(!diag.is_degraded());

        diag.record_degradation(DegradationReason::VanishingNorm);
        assert!(diag.is_degraded());
        assert_eq!(diag.warnings.len(), 2);
    }

    #[test]
    fn test_serialize_skips_clock() {
        let mut diag = Diagnostics::new();
        diag.inc_gate_type("H");
        let json = serde_json::to_value(&diag).unwrap();
        assert_eq!(json["gates_applied"], 1);
        assert!(json.get("started").is_none());
    }
}
