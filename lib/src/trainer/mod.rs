// trainer/mod.rs
use crate::{
    dataset::Sample,
    error::{RegressionError, Result},
    loss::{self, Loss, MSELoss},
    model::{
        linear::{LinearModel, LinearParams, LinearRegression},
        Fitted, TrainableModel,
    },
    optimizer::{GradientDescent, Optimizer},
    preprocessing::{NormalizationStats, StandardScaler},
};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub mod history;
pub use history::{CostEntry, CostHistory};

pub const DEFAULT_LEARNING_RATE: f64 = 0.1;
pub const DEFAULT_MAX_ITERATIONS: usize = 1000;

/// A cost rise smaller than `RTOL * |previous| + ATOL` is rounding noise
/// around the minimum, not divergence.
const DIVERGENCE_RTOL: f64 = 1e-9;
const DIVERGENCE_ATOL: f64 = 1e-12;

const PROGRESS_EVERY: usize = 100;

/// Hyperparameters of a training run.
///
/// Defaults:
/// - `learning_rate`: 0.1
/// - `max_iterations`: 1000
/// - `record_history`: true
/// - `tolerance`: none (always run the full iteration budget)
/// - `abort_on_divergence`: false
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    pub learning_rate: f64,
    pub max_iterations: usize,
    pub record_history: bool,
    /// Stop once the absolute cost change between two iterations drops
    /// below this value.
    pub tolerance: Option<f64>,
    /// Fail with [`RegressionError::NumericDivergence`] instead of only
    /// reporting it.
    pub abort_on_divergence: bool,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            learning_rate: DEFAULT_LEARNING_RATE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            record_history: true,
            tolerance: None,
            abort_on_divergence: false,
        }
    }
}

impl TrainingConfig {
    /// Reads a JSON config; missing fields take their defaults.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.learning_rate.is_finite() && self.learning_rate > 0.0) {
            return Err(RegressionError::InvalidConfiguration(format!(
                "learning_rate must be a positive finite number, got {}",
                self.learning_rate
            )));
        }
        if self.max_iterations == 0 {
            return Err(RegressionError::InvalidConfiguration(
                "max_iterations must be greater than zero".to_string(),
            ));
        }
        if let Some(tol) = self.tolerance {
            if !(tol.is_finite() && tol > 0.0) {
                return Err(RegressionError::InvalidConfiguration(format!(
                    "tolerance must be a positive finite number, got {}",
                    tol
                )));
            }
        }
        Ok(())
    }
}

/// Fluent builder for a validated [`Trainer`].
#[derive(Clone, Debug, Default)]
pub struct TrainerBuilder {
    config: TrainingConfig,
}

impl TrainerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: TrainingConfig) -> Self {
        Self { config }
    }

    pub fn learning_rate(mut self, lr: f64) -> Self {
        self.config.learning_rate = lr;
        self
    }

    pub fn max_iterations(mut self, iterations: usize) -> Self {
        self.config.max_iterations = iterations;
        self
    }

    /// When `false`, the report's cost history stays empty. Costs are still
    /// evaluated for divergence checks.
    pub fn record_history(mut self, record: bool) -> Self {
        self.config.record_history = record;
        self
    }

    pub fn tolerance(mut self, tolerance: f64) -> Self {
        self.config.tolerance = Some(tolerance);
        self
    }

    pub fn abort_on_divergence(mut self, abort: bool) -> Self {
        self.config.abort_on_divergence = abort;
        self
    }

    /// # Errors
    /// [`RegressionError::InvalidConfiguration`] for a non-positive or
    /// non-finite learning rate or tolerance, or zero iterations.
    pub fn build(self) -> Result<Trainer> {
        self.config.validate()?;
        Ok(Trainer {
            optimizer: GradientDescent::new(self.config.learning_rate),
            loss_fn: MSELoss,
            config: self.config,
        })
    }
}

/// Why an iteration was flagged as diverging.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DivergenceKind {
    CostIncreased { previous: f64 },
    NonFinite,
}

/// First sign of divergence seen during a run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Divergence {
    pub iteration: usize,
    pub cost: f64,
    pub kind: DivergenceKind,
}

/// Outcome of the iteration loop, in the coordinate space of the samples it
/// ran on.
#[derive(Clone, Debug)]
pub struct Descent {
    pub params: LinearParams,
    /// Cost at θ₀ = θ₁ = 0, before the first update.
    pub initial_cost: f64,
    pub final_cost: f64,
    pub iterations: usize,
    pub history: CostHistory,
    pub divergence: Option<Divergence>,
    /// Stopped by `tolerance` before the budget ran out.
    pub converged: bool,
}

/// Everything a full training run produces.
#[derive(Clone, Debug)]
pub struct TrainingReport {
    /// Raw-space model, ready for prediction and persistence.
    pub model: LinearModel<Fitted>,
    pub normalized_params: LinearParams,
    pub stats: NormalizationStats,
    pub initial_cost: f64,
    pub final_cost: f64,
    pub iterations: usize,
    pub history: CostHistory,
    pub divergence: Option<Divergence>,
    pub converged: bool,
}

/// Batch gradient descent over the full sample set.
///
/// Built via [`TrainerBuilder`]; immutable afterwards and reusable across
/// datasets.
#[derive(Clone, Debug)]
pub struct Trainer {
    config: TrainingConfig,
    loss_fn: MSELoss,
    optimizer: GradientDescent,
}

impl Trainer {
    pub fn builder() -> TrainerBuilder {
        TrainerBuilder::new()
    }

    pub fn new(config: TrainingConfig) -> Result<Self> {
        TrainerBuilder::from_config(config).build()
    }

    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    /// One iteration.
    ///
    /// Both gradients are computed from `params` before the optimizer builds
    /// the next pair, so θ₁'s gradient never sees an already-moved θ₀.
    pub fn step(&self, params: LinearParams, samples: &[Sample]) -> LinearParams {
        let model = LinearRegression::from_params(params);
        let targets: Vec<f64> = samples.iter().map(|s| s.price).collect();
        let preds = model.forward(samples);
        let grad_preds = self.loss_fn.grad_wrt_prediction(&preds, &targets);
        let grads = model.backward(samples, &grad_preds);
        self.optimizer.step(&params, &grads)
    }

    /// Normalizes `samples`, runs gradient descent and denormalizes the
    /// result.
    ///
    /// # Errors
    /// - [`RegressionError::DegenerateInput`]: empty set or a constant
    ///   column; nothing is iterated.
    /// - [`RegressionError::NumericDivergence`]: only with
    ///   `abort_on_divergence`.
    pub fn fit(&self, samples: &[Sample]) -> Result<TrainingReport> {
        let (stats, normalized) = StandardScaler::fit_transform(samples)?;
        info!(
            "training on {} samples (learning rate {}, {} iterations)",
            samples.len(),
            self.config.learning_rate,
            self.config.max_iterations
        );
        debug!(
            "mileage: mean={:.2}, std={:.2}; price: mean={:.2}, std={:.2}",
            stats.mean_x, stats.std_x, stats.mean_y, stats.std_y
        );

        let descent = self.descend(&normalized)?;
        let model = LinearRegression::from_params(descent.params).into_fitted(&stats);

        info!(
            "training finished after {} iterations: theta0={:.4}, theta1={:.8}",
            descent.iterations,
            model.theta0(),
            model.theta1()
        );

        Ok(TrainingReport {
            model,
            normalized_params: descent.params,
            stats,
            initial_cost: descent.initial_cost,
            final_cost: descent.final_cost,
            iterations: descent.iterations,
            history: descent.history,
            divergence: descent.divergence,
            converged: descent.converged,
        })
    }

    /// The iteration loop on samples as given, without normalization.
    ///
    /// Starts from θ₀ = θ₁ = 0 and runs `max_iterations` iterations, or
    /// fewer when `tolerance` is set and met.
    pub fn descend(&self, samples: &[Sample]) -> Result<Descent> {
        if samples.is_empty() {
            return Err(RegressionError::DegenerateInput(
                "cannot train on an empty sample set".to_string(),
            ));
        }

        let max_iterations = self.config.max_iterations;
        let mut model = LinearRegression::new();
        let initial_cost = loss::cost(samples, *model.params());
        let mut previous = initial_cost;
        let mut history = if self.config.record_history {
            CostHistory::with_capacity(max_iterations)
        } else {
            CostHistory::new()
        };
        let mut divergence = None;
        let mut iterations = 0;
        let mut converged = false;

        for iteration in 0..max_iterations {
            let next = self.step(*model.params(), samples);
            model.update_params(next);
            iterations = iteration + 1;

            let current = loss::cost(samples, next);
            if self.config.record_history {
                history.push(iteration, current);
            }

            if iteration % PROGRESS_EVERY == 0 || iterations == max_iterations {
                debug!(
                    "iteration {:4} | cost {:.6} | theta0 {:8.4} | theta1 {:8.4}",
                    iteration, current, next.theta0, next.theta1
                );
            }

            if let Some(kind) = check_divergence(previous, current, &next) {
                if divergence.is_none() {
                    warn!(
                        "gradient descent is diverging at iteration {} (cost {}, {:?}); \
                         consider a smaller learning rate",
                        iteration, current, kind
                    );
                    divergence = Some(Divergence {
                        iteration,
                        cost: current,
                        kind,
                    });
                }
                if self.config.abort_on_divergence {
                    return Err(RegressionError::NumericDivergence {
                        iteration,
                        cost: current,
                    });
                }
            }

            if let Some(tol) = self.config.tolerance {
                if (previous - current).abs() < tol {
                    info!("cost change below {} at iteration {}, stopping", tol, iteration);
                    converged = true;
                    previous = current;
                    break;
                }
            }

            previous = current;
        }

        Ok(Descent {
            params: *model.params(),
            initial_cost,
            final_cost: previous,
            iterations,
            history,
            divergence,
            converged,
        })
    }
}

fn check_divergence(previous: f64, current: f64, params: &LinearParams) -> Option<DivergenceKind> {
    if !params.is_finite() || !current.is_finite() {
        return Some(DivergenceKind::NonFinite);
    }
    if previous.is_finite() && current > previous + DIVERGENCE_RTOL * previous.abs() + DIVERGENCE_ATOL
    {
        return Some(DivergenceKind::CostIncreased { previous });
    }
    None
}
