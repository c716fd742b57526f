//! Error types for training, persistence and prediction.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, RegressionError>;

/// Error type for every fallible operation in `pricefit`.
#[derive(Error, Debug)]
pub enum RegressionError {
    /// Nothing to train on, or a column with no variance to normalize.
    #[error("Degenerate input: {0}")]
    DegenerateInput(String),

    /// A hyperparameter outside its valid range.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Cost grew or parameters left the finite range while descending.
    ///
    /// Only returned when the trainer is built with `abort_on_divergence`;
    /// otherwise divergence is logged and reported but training continues.
    #[error("Numeric divergence at iteration {iteration}: cost = {cost}")]
    NumericDivergence { iteration: usize, cost: f64 },

    /// A dataset row that violates the input contract.
    #[error("Invalid sample at row {row}: {reason}")]
    InvalidSample { row: usize, reason: String },

    /// A mileage string that cannot be used for prediction.
    #[error("Invalid mileage: {0}")]
    InvalidMileage(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_degenerate_input() {
        let err = RegressionError::DegenerateInput("mileage has zero variance".to_string());
        assert!(err.to_string().contains("Degenerate input"));
        assert!(err.to_string().contains("mileage"));
    }

    #[test]
    fn test_error_display_invalid_configuration() {
        let err = RegressionError::InvalidConfiguration("learning_rate = -1".to_string());
        assert!(err.to_string().contains("Invalid configuration"));
    }

    #[test]
    fn test_error_display_numeric_divergence() {
        let err = RegressionError::NumericDivergence {
            iteration: 7,
            cost: f64::INFINITY,
        };
        let msg = err.to_string();
        assert!(msg.contains("iteration 7"));
        assert!(msg.contains("inf"));
    }

    #[test]
    fn test_error_display_invalid_sample() {
        let err = RegressionError::InvalidSample {
            row: 3,
            reason: "negative mileage".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid sample at row 3: negative mileage");
    }

    #[test]
    fn test_error_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "test");
        let err: RegressionError = io_err.into();
        assert!(matches!(err, RegressionError::Io(_)));
    }

    #[test]
    fn test_error_from_json_error() {
        let json_err = serde_json::from_str::<f64>("not json").unwrap_err();
        let err: RegressionError = json_err.into();
        assert!(matches!(err, RegressionError::Json(_)));
    }

    #[test]
    fn test_error_is_std_error() {
        let err = RegressionError::InvalidMileage("abc".to_string());
        let _: &dyn std::error::Error = &err;
    }
}
