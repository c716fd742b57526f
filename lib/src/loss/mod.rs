use crate::dataset::Sample;
use crate::model::linear::{LinearModel, LinearParams};
use crate::model::TrainableModel;

/// A differentiable loss used during training.
///
/// Implementors define:
/// - the scalar loss value (for monitoring);
/// - the gradient of the loss w.r.t. each prediction, which is handed to the
///   model's `backward()`.
pub trait Loss {
    fn loss(&self, predictions: &[f64], targets: &[f64]) -> f64;

    fn grad_wrt_prediction(&self, predictions: &[f64], targets: &[f64]) -> Vec<f64>;
}

/// Halved mean squared error: `L = (1/2m) · Σ(predᵢ − targetᵢ)²`.
///
/// Gradient w.r.t. prediction: `∂L/∂predᵢ = (predᵢ − targetᵢ) / m`.
/// The ½ cancels the 2 from differentiating the square.
#[derive(Clone, Copy, Debug, Default)]
pub struct MSELoss;

impl Loss for MSELoss {
    fn loss(&self, predictions: &[f64], targets: &[f64]) -> f64 {
        let m = predictions.len();
        if m == 0 {
            return 0.0;
        }
        let sum_sq: f64 = predictions
            .iter()
            .zip(targets)
            .map(|(p, t)| (p - t) * (p - t))
            .sum();
        sum_sq / (2.0 * m as f64)
    }

    fn grad_wrt_prediction(&self, predictions: &[f64], targets: &[f64]) -> Vec<f64> {
        let inv_m = 1.0 / predictions.len() as f64;
        predictions
            .iter()
            .zip(targets)
            .map(|(p, t)| (p - t) * inv_m)
            .collect()
    }
}

/// Cost of `params` over `samples`: `(1/2m) · Σ(θ₀ + θ₁xᵢ − yᵢ)²`.
///
/// Returns 0 for an empty slice.
pub fn cost(samples: &[Sample], params: LinearParams) -> f64 {
    let model = LinearModel::from_params(params);
    let targets: Vec<f64> = samples.iter().map(|s| s.price).collect();
    MSELoss.loss(&model.forward(samples), &targets)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mse_loss_value() {
        // errors 1, -2 => (1 + 4) / (2 * 2)
        let loss = MSELoss.loss(&[2.0, 1.0], &[1.0, 3.0]);
        assert_eq!(loss, 1.25);
    }

    #[test]
    fn test_mse_loss_perfect_fit() {
        assert_eq!(MSELoss.loss(&[1.0, 2.0, 3.0], &[1.0, 2.0, 3.0]), 0.0);
    }

    #[test]
    fn test_mse_loss_empty() {
        assert_eq!(MSELoss.loss(&[], &[]), 0.0);
    }

    #[test]
    fn test_mse_grad() {
        let grad = MSELoss.grad_wrt_prediction(&[2.0, 1.0], &[1.0, 3.0]);
        assert_eq!(grad, vec![0.5, -1.0]);
    }

    #[test]
    fn test_cost_matches_formula() {
        let samples = vec![
            Sample::new(1.0, 2.0),
            Sample::new(2.0, 3.0),
            Sample::new(3.0, 5.0),
        ];
        let params = LinearParams::new(0.5, 1.0);
        // predictions 1.5, 2.5, 3.5 => errors -0.5, -0.5, -1.5
        let expected = (0.25 + 0.25 + 2.25) / 6.0;
        assert!((cost(&samples, params) - expected).abs() < 1e-15);
    }

    #[test]
    fn test_cost_untrained_is_half_mean_square_target() {
        let samples = vec![Sample::new(10.0, 2.0), Sample::new(20.0, -2.0)];
        assert_eq!(cost(&samples, LinearParams::ZERO), 2.0);
    }
}
