//! Evaluation and tuning tools built on `pricefit`.
//!
//! - Metrics calculation (MSE, RMSE, MAE, R², MAPE)
//! - Model evaluation against a dataset
//! - Learning-rate sweeps

pub mod metrics;
pub mod sweep;

pub use metrics::{AccuracyGrade, FitGrade, Metrics, RegressionMetrics};
pub use sweep::{sweep_learning_rates, SweepResult};

use pricefit::dataset::Sample;
use pricefit::model::{Fitted, InferenceModel};
use pricefit::LinearModel;

/// Scores `model` on `samples`.
pub fn evaluate(model: &LinearModel<Fitted>, samples: &[Sample]) -> RegressionMetrics {
    let prices: Vec<f64> = samples.iter().map(|s| s.price).collect();
    let mileages: Vec<f64> = samples.iter().map(|s| s.mileage).collect();
    let predictions = model.predict_batch(&mileages);
    Metrics::calculate_all(&prices, &predictions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pricefit::LinearParams;

    #[test]
    fn test_evaluate_exact_model() {
        let samples = vec![
            Sample::new(0.0, 100.0),
            Sample::new(10.0, 80.0),
            Sample::new(20.0, 60.0),
        ];
        let model = LinearModel::<Fitted>::new(LinearParams::new(100.0, -2.0));
        let metrics = evaluate(&model, &samples);
        assert_eq!(metrics.mse, 0.0);
        assert!((metrics.r_squared - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_evaluate_reference_model() {
        let samples =
            pricefit::dataset::from_reader(include_str!("../../data/data.csv").as_bytes()).unwrap();
        let report = pricefit::Trainer::builder().build().unwrap().fit(&samples).unwrap();
        let metrics = evaluate(&report.model, &samples);
        // mileage explains roughly three quarters of the price variance
        assert!(metrics.r_squared > 0.7 && metrics.r_squared < 0.8, "r2 = {}", metrics.r_squared);
        assert!(metrics.accuracy().unwrap() > 85.0);
    }
}
