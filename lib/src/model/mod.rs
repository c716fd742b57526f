pub mod state;
pub use state::{Fitted, Unfitted};

pub mod linear;

use crate::dataset::Sample;

/// Training-side interface of a model.
pub trait TrainableModel {
    type Params;

    /// Predictions for every sample's mileage.
    fn forward(&self, samples: &[Sample]) -> Vec<f64>;

    /// Gradients of the loss w.r.t. the parameters, given the gradient of the
    /// loss w.r.t. each prediction.
    fn backward(&self, samples: &[Sample], grad_output: &[f64]) -> Self::Params;

    fn params(&self) -> &Self::Params;

    /// Replaces the whole parameter set at once.
    fn update_params(&mut self, new_params: Self::Params);
}

pub trait ParamOps: Copy {
    fn add(&self, other: &Self) -> Self;
    fn scale(&self, factor: f64) -> Self;
}

pub trait InferenceModel {
    fn predict(&self, mileage: f64) -> f64;

    fn predict_batch(&self, mileages: &[f64]) -> Vec<f64> {
        mileages.iter().map(|&km| self.predict(km)).collect()
    }
}
