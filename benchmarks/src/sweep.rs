use std::time::{Duration, Instant};

use pricefit::dataset::Sample;
use pricefit::trainer::{Divergence, Trainer};
use pricefit::{LinearParams, Result};

use crate::{evaluate, RegressionMetrics};

/// Learning rates tried by `learning_rate_search` when none are given.
pub const DEFAULT_LEARNING_RATES: [f64; 8] = [0.001, 0.01, 0.05, 0.1, 0.5, 1.0, 1.9, 2.5];

/// Outcome of one training run in a learning-rate sweep.
#[derive(Debug, Clone)]
pub struct SweepResult {
    pub learning_rate: f64,
    pub final_cost: f64,
    pub iterations: usize,
    pub params: LinearParams,
    pub divergence: Option<Divergence>,
    pub metrics: RegressionMetrics,
    pub elapsed: Duration,
}

impl SweepResult {
    pub fn diverged(&self) -> bool {
        self.divergence.is_some()
    }
}

/// Trains once per learning rate with the same iteration budget.
///
/// Divergence is reported in the result rather than aborting the sweep.
pub fn sweep_learning_rates(
    samples: &[Sample],
    learning_rates: &[f64],
    max_iterations: usize,
) -> Result<Vec<SweepResult>> {
    learning_rates
        .iter()
        .map(|&lr| {
            let trainer = Trainer::builder()
                .learning_rate(lr)
                .max_iterations(max_iterations)
                .record_history(false)
                .build()?;

            let start = Instant::now();
            let report = trainer.fit(samples)?;
            let elapsed = start.elapsed();

            Ok(SweepResult {
                learning_rate: lr,
                final_cost: report.final_cost,
                iterations: report.iterations,
                params: *report.model.params(),
                metrics: evaluate(&report.model, samples),
                divergence: report.divergence,
                elapsed,
            })
        })
        .collect()
}

/// Lowest final cost among the runs that did not diverge.
pub fn best(results: &[SweepResult]) -> Option<&SweepResult> {
    results
        .iter()
        .filter(|r| !r.diverged() && r.final_cost.is_finite())
        .min_by(|a, b| a.final_cost.total_cmp(&b.final_cost))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_samples() -> Vec<Sample> {
        pricefit::dataset::from_reader(include_str!("../../data/data.csv").as_bytes()).unwrap()
    }

    #[test]
    fn test_sweep_flags_divergent_rates() {
        let samples = reference_samples();
        let results = sweep_learning_rates(&samples, &[0.1, 2.5], 200).unwrap();
        assert_eq!(results.len(), 2);
        assert!(!results[0].diverged());
        assert!(results[1].diverged());
    }

    #[test]
    fn test_best_skips_diverged_runs() {
        let samples = reference_samples();
        let results = sweep_learning_rates(&samples, &[0.001, 0.1, 2.5], 200).unwrap();
        let best = best(&results).unwrap();
        assert_eq!(best.learning_rate, 0.1);
    }

    #[test]
    fn test_sweep_rejects_bad_rate() {
        let samples = reference_samples();
        assert!(sweep_learning_rates(&samples, &[-1.0], 10).is_err());
    }
}
