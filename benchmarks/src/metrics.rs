/// Metrics for evaluating the trained price model.
pub struct Metrics;

impl Metrics {
    /// Mean Squared Error: `mean((y_true - y_pred)^2)`.
    pub fn mse(y_true: &[f64], y_pred: &[f64]) -> f64 {
        assert_eq!(
            y_true.len(),
            y_pred.len(),
            "Arrays must have the same length"
        );

        if y_true.is_empty() {
            return 0.0;
        }

        let sum_sq: f64 = y_true
            .iter()
            .zip(y_pred.iter())
            .map(|(&t, &p)| (t - p).powi(2))
            .sum();

        sum_sq / y_true.len() as f64
    }

    /// Root Mean Squared Error, in price units.
    pub fn rmse(y_true: &[f64], y_pred: &[f64]) -> f64 {
        Self::mse(y_true, y_pred).sqrt()
    }

    /// Mean Absolute Error: `mean(|y_true - y_pred|)`.
    pub fn mae(y_true: &[f64], y_pred: &[f64]) -> f64 {
        assert_eq!(
            y_true.len(),
            y_pred.len(),
            "Arrays must have the same length"
        );

        if y_true.is_empty() {
            return 0.0;
        }

        let sum_abs: f64 = y_true
            .iter()
            .zip(y_pred.iter())
            .map(|(&t, &p)| (t - p).abs())
            .sum();

        sum_abs / y_true.len() as f64
    }

    /// Coefficient of determination, `1 - SS_res / SS_tot`.
    ///
    /// Returns 0 when the targets have no variance (`SS_tot = 0`): nothing
    /// is left for mileage to explain.
    pub fn r_squared(y_true: &[f64], y_pred: &[f64]) -> f64 {
        assert_eq!(
            y_true.len(),
            y_pred.len(),
            "Arrays must have the same length"
        );

        if y_true.is_empty() {
            return 0.0;
        }

        let mean_true = y_true.iter().sum::<f64>() / y_true.len() as f64;

        let ss_res: f64 = y_true
            .iter()
            .zip(y_pred.iter())
            .map(|(&t, &p)| (t - p).powi(2))
            .sum();

        let ss_tot: f64 = y_true.iter().map(|&t| (t - mean_true).powi(2)).sum();

        if ss_tot == 0.0 {
            return 0.0;
        }

        1.0 - (ss_res / ss_tot)
    }

    /// Mean Absolute Percentage Error, in percent:
    /// `100 * mean(|y_true - y_pred| / y_true)`.
    ///
    /// Targets equal to zero are skipped; `None` if none remain.
    pub fn mape(y_true: &[f64], y_pred: &[f64]) -> Option<f64> {
        assert_eq!(
            y_true.len(),
            y_pred.len(),
            "Arrays must have the same length"
        );

        let (sum, n) = y_true
            .iter()
            .zip(y_pred.iter())
            .filter(|(&t, _)| t != 0.0)
            .fold((0.0, 0usize), |(sum, n), (&t, &p)| {
                (sum + ((t - p) / t).abs(), n + 1)
            });

        (n > 0).then(|| 100.0 * sum / n as f64)
    }

    pub fn calculate_all(y_true: &[f64], y_pred: &[f64]) -> RegressionMetrics {
        RegressionMetrics {
            mse: Self::mse(y_true, y_pred),
            rmse: Self::rmse(y_true, y_pred),
            mae: Self::mae(y_true, y_pred),
            r_squared: Self::r_squared(y_true, y_pred),
            mape: Self::mape(y_true, y_pred),
        }
    }
}

/// All regression metrics of one evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegressionMetrics {
    pub mse: f64,
    pub rmse: f64,
    pub mae: f64,
    pub r_squared: f64,
    pub mape: Option<f64>,
}

impl RegressionMetrics {
    /// `100 - MAPE`, the "average accuracy" shown by the precision report.
    pub fn accuracy(&self) -> Option<f64> {
        self.mape.map(|m| 100.0 - m)
    }
}

/// How much of the price variance the model explains.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FitGrade {
    Good,
    Moderate,
    Poor,
}

impl FitGrade {
    /// R² ≥ 0.7 is a good fit, ≥ 0.5 moderate, below that poor.
    pub fn for_r_squared(r2: f64) -> Self {
        if r2 >= 0.7 {
            FitGrade::Good
        } else if r2 >= 0.5 {
            FitGrade::Moderate
        } else {
            FitGrade::Poor
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FitGrade::Good => "good fit",
            FitGrade::Moderate => "moderate fit",
            FitGrade::Poor => "poor fit",
        }
    }
}

/// Grade of the average accuracy (`100 - MAPE`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccuracyGrade {
    Excellent,
    Good,
    NeedsImprovement,
}

impl AccuracyGrade {
    /// Accuracy ≥ 90% is excellent, ≥ 80% good, below that it needs work.
    pub fn for_accuracy(accuracy: f64) -> Self {
        if accuracy >= 90.0 {
            AccuracyGrade::Excellent
        } else if accuracy >= 80.0 {
            AccuracyGrade::Good
        } else {
            AccuracyGrade::NeedsImprovement
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AccuracyGrade::Excellent => "excellent",
            AccuracyGrade::Good => "good",
            AccuracyGrade::NeedsImprovement => "needs improvement",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mse_perfect() {
        let y_true = vec![1.0, 2.0, 3.0, 4.0];
        let y_pred = vec![1.0, 2.0, 3.0, 4.0];
        assert_eq!(Metrics::mse(&y_true, &y_pred), 0.0);
    }

    #[test]
    fn test_mse_error() {
        let y_true = vec![1.0, 2.0, 3.0, 4.0];
        let y_pred = vec![2.0, 3.0, 4.0, 5.0];
        assert!((Metrics::mse(&y_true, &y_pred) - 1.0).abs() < 1e-12);
        assert!((Metrics::rmse(&y_true, &y_pred) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_mae() {
        let y_true = vec![1.0, 2.0, 3.0, 4.0];
        let y_pred = vec![2.0, 1.0, 4.0, 2.0];
        // |errors| = 1, 1, 1, 2
        assert!((Metrics::mae(&y_true, &y_pred) - 1.25).abs() < 1e-12);
    }

    #[test]
    fn test_r_squared_perfect() {
        let y_true = vec![1.0, 2.0, 3.0, 4.0];
        assert!((Metrics::r_squared(&y_true, &y_true) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_r_squared_mean_predictor() {
        let y_true = vec![1.0, 2.0, 3.0, 4.0];
        let y_pred = vec![2.5; 4];
        assert!(Metrics::r_squared(&y_true, &y_pred).abs() < 1e-12);
    }

    #[test]
    fn test_r_squared_constant_targets() {
        let y_true = vec![2.0, 2.0, 2.0];
        assert_eq!(Metrics::r_squared(&y_true, &y_true), 0.0);
    }

    #[test]
    fn test_mape() {
        let y_true = vec![100.0, 200.0];
        let y_pred = vec![110.0, 180.0];
        // 10% and 10%
        assert!((Metrics::mape(&y_true, &y_pred).unwrap() - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_mape_skips_zero_targets() {
        assert_eq!(Metrics::mape(&[0.0], &[5.0]), None);
        let mape = Metrics::mape(&[0.0, 50.0], &[5.0, 25.0]).unwrap();
        assert!((mape - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_calculate_all() {
        let y_true = vec![1.0, 2.0, 3.0, 4.0];
        let metrics = Metrics::calculate_all(&y_true, &y_true);
        assert_eq!(metrics.mse, 0.0);
        assert_eq!(metrics.mae, 0.0);
        assert!((metrics.r_squared - 1.0).abs() < 1e-12);
        assert_eq!(metrics.accuracy(), Some(100.0));
    }

    #[test]
    fn test_fit_grades() {
        assert_eq!(FitGrade::for_r_squared(0.99), FitGrade::Good);
        assert_eq!(FitGrade::for_r_squared(0.73), FitGrade::Good);
        assert_eq!(FitGrade::for_r_squared(0.5), FitGrade::Moderate);
        assert_eq!(FitGrade::for_r_squared(0.1), FitGrade::Poor);
        assert_eq!(FitGrade::for_r_squared(0.5).label(), "moderate fit");
    }

    #[test]
    fn test_accuracy_grades() {
        assert_eq!(AccuracyGrade::for_accuracy(91.0), AccuracyGrade::Excellent);
        assert_eq!(AccuracyGrade::for_accuracy(85.0), AccuracyGrade::Good);
        assert_eq!(
            AccuracyGrade::for_accuracy(60.0),
            AccuracyGrade::NeedsImprovement
        );
        assert_eq!(AccuracyGrade::for_accuracy(60.0).label(), "needs improvement");
    }

    #[test]
    #[should_panic(expected = "same length")]
    fn test_length_mismatch_panics() {
        Metrics::mse(&[1.0], &[1.0, 2.0]);
    }
}
