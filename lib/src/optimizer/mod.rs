use crate::model::linear::LinearParams;
use crate::model::ParamOps;

/// Trait for gradient-based optimizers.
///
/// Optimizers turn the current parameters and their gradients into the next
/// parameters. The trainer owns the loop; the optimizer owns the update rule.
///
/// # Example
/// ```rust
/// use pricefit::model::linear::LinearParams;
/// use pricefit::optimizer::{GradientDescent, Optimizer};
///
/// let gd = GradientDescent::new(0.1);
/// let next = gd.step(&LinearParams::ZERO, &LinearParams::new(-1.0, 2.0));
/// assert_eq!(next, LinearParams::new(0.1, -0.2));
/// ```
pub trait Optimizer<P> {
    /// Returns the updated parameters:
    /// ```text
    /// params_new = params - learning_rate * gradients
    /// ```
    ///
    /// Inputs are never mutated. Both halves of the returned value are
    /// computed from the same `params` and `gradients`, so the update is
    /// simultaneous.
    fn step(&self, params: &P, gradients: &P) -> P;
}

/// Batch gradient descent: `θ ← θ − α · ∇J(θ)`.
///
/// Stateless: no momentum or adaptive rates.
#[derive(Clone, Copy, Debug)]
pub struct GradientDescent {
    lr: f64,
}

impl GradientDescent {
    /// Creates the optimizer. `lr` is validated by the trainer builder, not
    /// here.
    pub fn new(lr: f64) -> Self {
        Self { lr }
    }

    pub fn learning_rate(&self) -> f64 {
        self.lr
    }
}

impl Optimizer<LinearParams> for GradientDescent {
    fn step(&self, params: &LinearParams, grads: &LinearParams) -> LinearParams {
        params.add(&grads.scale(-self.lr))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gd_learning_rate_accessor() {
        let gd = GradientDescent::new(0.001);
        assert_eq!(gd.learning_rate(), 0.001);
    }

    #[test]
    fn test_gd_step() {
        let gd = GradientDescent::new(0.5);
        let next = gd.step(&LinearParams::new(1.0, 2.0), &LinearParams::new(0.2, -4.0));
        assert_eq!(next, LinearParams::new(0.9, 4.0));
    }

    #[test]
    fn test_gd_zero_gradient_is_fixed_point() {
        let gd = GradientDescent::new(0.1);
        let p = LinearParams::new(3.5, -0.25);
        assert_eq!(gd.step(&p, &LinearParams::ZERO), p);
    }

    #[test]
    fn test_gd_does_not_mutate_inputs() {
        let gd = GradientDescent::new(0.1);
        let params = LinearParams::new(1.0, 1.0);
        let grads = LinearParams::new(1.0, 1.0);
        let _ = gd.step(&params, &grads);
        assert_eq!(params, LinearParams::new(1.0, 1.0));
        assert_eq!(grads, LinearParams::new(1.0, 1.0));
    }

    #[test]
    fn test_gd_propagates_nan() {
        let gd = GradientDescent::new(0.1);
        let next = gd.step(&LinearParams::ZERO, &LinearParams::new(f64::NAN, 1.0));
        assert!(next.theta0.is_nan());
        assert!(!next.is_finite());
    }
}
