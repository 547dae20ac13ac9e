//! Period recovery from measurement outcomes
//!
//! Each non-zero outcome `y` of the input register satisfies `y·s = 0`.
//! The solver collects `n-1` independent such equations, takes the single
//! non-zero vector of their null space, and checks it against every
//! observed outcome before reporting it.

use crate::error::{DegeneracyReport, DegeneracyStage, Result, SimonError};
use crate::gf2::{BitVector, LinearEquation, LinearSystem};
use simon_sim::{Diagnostics, MeasurementCounts};
use tracing::{debug, info, warn};

/// A period recovered from sampled equations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recovery {
    pub period: BitVector,
    pub system: LinearSystem,
}

impl Recovery {
    /// Equations rendered as `s_0 ⊕ s_2 = 0`
    pub fn rendered_equations(&self) -> Vec<String> {
        self.system
            .equations()
            .iter()
            .map(ToString::to_string)
            .collect()
    }
}

/// Solves for the hidden period of an `n`-bit input register
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinearSystemSolver {
    num_vars: usize,
    degraded: bool,
}

impl LinearSystemSolver {
    pub fn new(num_vars: usize) -> Self {
        Self {
            num_vars,
            degraded: false,
        }
    }

    /// Mark reports from this solver as coming from degraded samples
    pub fn with_degraded(mut self, degraded: bool) -> Self {
        self.degraded = degraded;
        self
    }

    /// Number of independent equations needed
    pub fn required_equations(&self) -> usize {
        self.num_vars.saturating_sub(1)
    }

    /// Non-zero outcomes by count descending, ties by value ascending
    ///
    /// # Errors
    /// [`SimonError::InvalidConfiguration`] if a key is not an `n`-bit string
    pub fn rank_outcomes(&self, counts: &MeasurementCounts) -> Result<Vec<(BitVector, usize)>> {
        let mut ranked = counts
            .counts()
            .iter()
            .map(|(key, &count)| match BitVector::parse(key) {
                Some(v) if v.len() == self.num_vars => Ok((v, count)),
                _ => Err(SimonError::invalid_configuration(format!(
                    "measurement key {key:?} is not a {}-bit string",
                    self.num_vars
                ))),
            })
            .collect::<Result<Vec<_>>>()?;

        ranked.retain(|(v, count)| !v.is_zero() && *count > 0);
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.bits().cmp(&b.0.bits())));
        Ok(ranked)
    }

    /// Greedily accept independent outcomes until `n-1` are held
    pub fn collect(&self, ranked: &[(BitVector, usize)]) -> LinearSystem {
        let mut system = LinearSystem::new(self.num_vars);
        for (outcome, _) in ranked {
            if system.rank() == self.required_equations() {
                break;
            }
            system.try_add(LinearEquation::new(*outcome));
        }
        system
    }

    /// Recover the period from sampled counts
    ///
    /// # Errors
    /// [`SimonError::DegenerateOracle`] if fewer than `n-1` independent
    /// equations exist among the outcomes, or if some observed outcome is
    /// not orthogonal to the only candidate.
    pub fn solve(&self, counts: &MeasurementCounts, diagnostics: &mut Diagnostics) -> Result<Recovery> {
        let ranked = self.rank_outcomes(counts)?;
        let system = self.collect(&ranked);
        diagnostics.log_event("equations_collected");
        debug!(
            distinct_outcomes = ranked.len(),
            rank = system.rank(),
            required = self.required_equations(),
            "linear system collected"
        );

        let report = |stage, conflicting_outcome: Option<String>| DegeneracyReport {
            stage,
            independent_equations: system.rank(),
            required_equations: self.required_equations(),
            distinct_outcomes: ranked.len(),
            conflicting_outcome,
            degraded: self.degraded,
        };

        if system.rank() < self.required_equations() {
            let report = report(DegeneracyStage::Underdetermined, None);
            warn!(%report, "period not recoverable");
            diagnostics.log_warning(report.to_string());
            return Err(SimonError::DegenerateOracle(report));
        }

        let Some(period) = system.unique_nontrivial_solution() else {
            let report = report(DegeneracyStage::Inconsistent, None);
            diagnostics.log_warning(report.to_string());
            return Err(SimonError::DegenerateOracle(report));
        };

        if let Some((conflict, _)) = ranked.iter().find(|(y, _)| y.dot(&period)) {
            let report = report(DegeneracyStage::Inconsistent, Some(conflict.to_string()));
            warn!(%report, candidate = %period, "period not recoverable");
            diagnostics.log_warning(report.to_string());
            return Err(SimonError::DegenerateOracle(report));
        }

        diagnostics.log_event("period_recovered");
        info!(period = %period, equations = system.rank(), "period recovered");
        Ok(Recovery { period, system })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(entries: &[(&str, usize)]) -> MeasurementCounts {
        MeasurementCounts::from_counts(
            entries
                .iter()
                .map(|&(k, v)| (k.to_string(), v))
                .collect(),
        )
    }

    fn degeneracy(err: SimonError) -> DegeneracyReport {
        match err {
            SimonError::DegenerateOracle(report) => report,
            other => panic!("expected degenerate oracle, got {other:?}"),
        }
    }

    #[test]
    fn test_recovers_all_ones_period() {
        let solver = LinearSystemSolver::new(3);
        let sample = counts(&[("000", 250), ("110", 260), ("011", 255), ("101", 259)]);

        let recovery = solver.solve(&sample, &mut Diagnostics::new()).unwrap();
        assert_eq!(recovery.period.to_string(), "111");
        assert_eq!(
            recovery.rendered_equations(),
            vec!["s_0 ⊕ s_1 = 0", "s_0 ⊕ s_2 = 0"]
        );
    }

    #[test]
    fn test_ranking_is_deterministic() {
        let solver = LinearSystemSolver::new(2);
        let sample = counts(&[("01", 10), ("10", 10), ("11", 30), ("00", 50)]);
        let ranked: Vec<String> = solver
            .rank_outcomes(&sample)
            .unwrap()
            .iter()
            .map(|(v, _)| v.to_string())
            .collect();
        // "10" has value 1, "01" has value 2
        assert_eq!(ranked, vec!["11", "10", "01"]);
    }

    #[test]
    fn test_ties_rank_by_basis_index_not_string() {
        // "10" is basis index 1 and "01" is index 2, although "01" < "10" as text
        let solver = LinearSystemSolver::new(2);
        let sample = counts(&[("01", 10), ("10", 10)]);
        let ranked: Vec<String> = solver
            .rank_outcomes(&sample)
            .unwrap()
            .iter()
            .map(|(v, _)| v.to_string())
            .collect();
        assert_eq!(ranked, vec!["10", "01"]);

        // the tie winner becomes the only equation, so "01" is left to conflict
        let report = degeneracy(solver.solve(&sample, &mut Diagnostics::new()).unwrap_err());
        assert_eq!(report.stage, DegeneracyStage::Inconsistent);
        assert_eq!(report.conflicting_outcome.as_deref(), Some("01"));
    }

    #[test]
    fn test_underdetermined() {
        let solver = LinearSystemSolver::new(3);
        let sample = counts(&[("000", 500), ("110", 524)]);

        let report = degeneracy(solver.solve(&sample, &mut Diagnostics::new()).unwrap_err());
        assert_eq!(report.stage, DegeneracyStage::Underdetermined);
        assert_eq!(report.independent_equations, 1);
        assert_eq!(report.required_equations, 2);
        assert_eq!(report.distinct_outcomes, 1);
    }

    #[test]
    fn test_only_zero_outcome_is_underdetermined() {
        let solver = LinearSystemSolver::new(2);
        let report = degeneracy(
            solver
                .solve(&counts(&[("00", 1024)]), &mut Diagnostics::new())
                .unwrap_err(),
        );
        assert_eq!(report.stage, DegeneracyStage::Underdetermined);
        assert_eq!(report.distinct_outcomes, 0);
    }

    #[test]
    fn test_one_to_one_samples_are_inconsistent() {
        // uniform outcomes from a one-to-one oracle
        let solver = LinearSystemSolver::new(2).with_degraded(true);
        let sample = counts(&[("00", 256), ("10", 260), ("01", 250), ("11", 258)]);

        let report = degeneracy(solver.solve(&sample, &mut Diagnostics::new()).unwrap_err());
        assert_eq!(report.stage, DegeneracyStage::Inconsistent);
        assert_eq!(report.independent_equations, 1);
        assert!(report.conflicting_outcome.is_some());
        assert!(report.degraded);
    }

    #[test]
    fn test_single_input_qubit_needs_no_equations() {
        let solver = LinearSystemSolver::new(1);
        let recovery = solver
            .solve(&counts(&[("0", 1024)]), &mut Diagnostics::new())
            .unwrap();
        assert_eq!(recovery.period.to_string(), "1");
        assert!(recovery.system.equations().is_empty());
    }

    #[test]
    fn test_malformed_key() {
        let solver = LinearSystemSolver::new(2);
        let err = solver
            .solve(&counts(&[("1", 3)]), &mut Diagnostics::new())
            .unwrap_err();
        assert!(matches!(err, SimonError::InvalidConfiguration { .. }));
    }
}
