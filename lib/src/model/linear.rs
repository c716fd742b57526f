//! Univariate linear model `price = θ₀ + θ₁ · mileage`.
//!
//! The model carries its training state in the type system:
//! - [`LinearRegression`] = `LinearModel<Unfitted>`: normalized-space
//!   parameters, used by the trainer.
//! - `LinearModel<Fitted>`: raw-space parameters, used for prediction and
//!   persistence.
//!
//! The only way from one to the other is [`LinearModel::into_fitted`], which
//! applies the closed-form denormalization.

use crate::dataset::Sample;
use crate::model::{Fitted, InferenceModel, ParamOps, TrainableModel, Unfitted};
use crate::preprocessing::NormalizationStats;
use serde::{Deserialize, Serialize};
use std::marker::PhantomData;

/// The linear hypothesis. Shared unchanged by training (normalized space)
/// and inference (raw space).
#[inline]
pub fn estimate(mileage: f64, theta0: f64, theta1: f64) -> f64 {
    theta0 + theta1 * mileage
}

/// Intercept and slope of the hypothesis.
///
/// The pair is a plain `Copy` value: every update produces a new pair, so
/// there is never a state where only one half has moved.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LinearParams {
    pub theta0: f64,
    pub theta1: f64,
}

impl LinearParams {
    pub const ZERO: Self = Self {
        theta0: 0.0,
        theta1: 0.0,
    };

    pub fn new(theta0: f64, theta1: f64) -> Self {
        Self { theta0, theta1 }
    }

    #[inline]
    pub fn estimate(&self, mileage: f64) -> f64 {
        estimate(mileage, self.theta0, self.theta1)
    }

    pub fn is_finite(&self) -> bool {
        self.theta0.is_finite() && self.theta1.is_finite()
    }

    /// Maps normalized-space parameters back to raw space.
    ///
    /// Substituting `x' = (x - μx)/σx`, `y' = (y - μy)/σy` into
    /// `y' = θ₀ + θ₁x'` gives
    /// ```text
    /// raw_θ₁ = θ₁ · σy / σx
    /// raw_θ₀ = μy + σy · θ₀ − raw_θ₁ · μx
    /// ```
    pub fn denormalize(&self, stats: &NormalizationStats) -> Self {
        let theta1 = self.theta1 * (stats.std_y / stats.std_x);
        let theta0 = stats.mean_y + stats.std_y * self.theta0 - theta1 * stats.mean_x;
        Self { theta0, theta1 }
    }
}

impl ParamOps for LinearParams {
    fn add(&self, other: &Self) -> Self {
        Self {
            theta0: self.theta0 + other.theta0,
            theta1: self.theta1 + other.theta1,
        }
    }

    fn scale(&self, factor: f64) -> Self {
        Self {
            theta0: self.theta0 * factor,
            theta1: self.theta1 * factor,
        }
    }
}

/// A linear model with state encoded at the type level.
///
/// - `S = Unfitted`: implements [`TrainableModel`].
/// - `S = Fitted`: implements [`InferenceModel`].
#[derive(Clone, Copy, Debug)]
pub struct LinearModel<S> {
    params: LinearParams,
    _state: PhantomData<S>,
}

/// Alias for an **unfitted** linear regression model.
pub type LinearRegression = LinearModel<Unfitted>;

impl LinearModel<Unfitted> {
    /// A model starting at θ₀ = θ₁ = 0.
    pub fn new() -> Self {
        Self::from_params(LinearParams::ZERO)
    }

    /// Starts from explicit parameters (warm start, tests).
    pub fn from_params(params: LinearParams) -> Self {
        Self {
            params,
            _state: PhantomData,
        }
    }

    /// Finishes training: denormalizes the parameters with the statistics the
    /// training samples were normalized with.
    pub fn into_fitted(self, stats: &NormalizationStats) -> LinearModel<Fitted> {
        LinearModel::<Fitted>::new(self.params.denormalize(stats))
    }
}

impl Default for LinearModel<Unfitted> {
    fn default() -> Self {
        Self::new()
    }
}

/// Forward: `θ₀ + θ₁·xᵢ` per sample.
/// Backward: `∇θ₀ = Σ gᵢ`, `∇θ₁ = Σ gᵢ·xᵢ`.
impl TrainableModel for LinearModel<Unfitted> {
    type Params = LinearParams;

    fn forward(&self, samples: &[Sample]) -> Vec<f64> {
        samples
            .iter()
            .map(|s| self.params.estimate(s.mileage))
            .collect()
    }

    fn backward(&self, samples: &[Sample], grad_output: &[f64]) -> LinearParams {
        let (grad0, grad1) = samples
            .iter()
            .zip(grad_output)
            .fold((0.0, 0.0), |(g0, g1), (s, &g)| (g0 + g, g1 + g * s.mileage));
        LinearParams::new(grad0, grad1)
    }

    fn params(&self) -> &LinearParams {
        &self.params
    }

    fn update_params(&mut self, new_params: LinearParams) {
        self.params = new_params;
    }
}

impl LinearModel<Fitted> {
    /// A fitted model from raw-space parameters.
    pub fn new(params: LinearParams) -> Self {
        Self {
            params,
            _state: PhantomData,
        }
    }

    /// The untrained model (θ₀ = θ₁ = 0); predicts 0 everywhere.
    pub fn untrained() -> Self {
        Self::new(LinearParams::ZERO)
    }

    pub fn params(&self) -> &LinearParams {
        &self.params
    }

    pub fn theta0(&self) -> f64 {
        self.params.theta0
    }

    pub fn theta1(&self) -> f64 {
        self.params.theta1
    }

    /// `false` for the all-zero default parameters.
    pub fn is_trained(&self) -> bool {
        self.params != LinearParams::ZERO
    }
}

impl InferenceModel for LinearModel<Fitted> {
    fn predict(&self, mileage: f64) -> f64 {
        self.params.estimate(mileage)
    }
}
