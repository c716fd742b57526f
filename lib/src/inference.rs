//! Helpers for the prediction front end.

use crate::error::{RegressionError, Result};

/// Predictions above this are probably outside the training range.
pub const HIGH_PRICE_THRESHOLD: f64 = 20_000.0;

/// Parses a user-supplied mileage (km).
///
/// # Errors
/// [`RegressionError::InvalidMileage`] for empty, non-numeric, non-finite or
/// negative input.
pub fn parse_mileage(input: &str) -> Result<f64> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(RegressionError::InvalidMileage(
            "please enter a value".to_string(),
        ));
    }
    let mileage: f64 = trimmed
        .parse()
        .map_err(|_| RegressionError::InvalidMileage(format!("'{trimmed}' is not a number")))?;
    if !mileage.is_finite() {
        return Err(RegressionError::InvalidMileage(format!(
            "'{trimmed}' is not a finite number"
        )));
    }
    if mileage < 0.0 {
        return Err(RegressionError::InvalidMileage(
            "mileage cannot be negative".to_string(),
        ));
    }
    Ok(mileage)
}

/// Plausibility of an estimated price.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PriceWarning {
    Negative,
    UnusuallyHigh,
}

impl PriceWarning {
    pub fn check(price: f64) -> Option<Self> {
        if price < 0.0 {
            Some(PriceWarning::Negative)
        } else if price > HIGH_PRICE_THRESHOLD {
            Some(PriceWarning::UnusuallyHigh)
        } else {
            None
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            PriceWarning::Negative => {
                "Negative price predicted; the model may not be reliable for this mileage range."
            }
            PriceWarning::UnusuallyHigh => {
                "Very high price predicted; this mileage may be outside the training data range."
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mileage_valid() {
        assert_eq!(parse_mileage("100000").unwrap(), 100_000.0);
        assert_eq!(parse_mileage("  42.5 \n").unwrap(), 42.5);
        assert_eq!(parse_mileage("0").unwrap(), 0.0);
    }

    #[test]
    fn test_parse_mileage_empty() {
        assert!(matches!(
            parse_mileage("   "),
            Err(RegressionError::InvalidMileage(_))
        ));
    }

    #[test]
    fn test_parse_mileage_not_a_number() {
        let err = parse_mileage("lots").unwrap_err();
        assert!(err.to_string().contains("not a number"));
    }

    #[test]
    fn test_parse_mileage_negative() {
        let err = parse_mileage("-1").unwrap_err();
        assert!(err.to_string().contains("negative"));
    }

    #[test]
    fn test_parse_mileage_non_finite() {
        assert!(parse_mileage("inf").is_err());
        assert!(parse_mileage("NaN").is_err());
    }

    #[test]
    fn test_price_warning() {
        assert_eq!(PriceWarning::check(-0.01), Some(PriceWarning::Negative));
        assert_eq!(PriceWarning::check(0.0), None);
        assert_eq!(PriceWarning::check(6355.0), None);
        assert_eq!(PriceWarning::check(20_000.0), None);
        assert_eq!(
            PriceWarning::check(20_000.5),
            Some(PriceWarning::UnusuallyHigh)
        );
    }
}
