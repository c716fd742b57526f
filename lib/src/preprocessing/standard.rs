//! Standard Scaler (Z-score normalization).
//!
//! Transforms a column by removing the mean and scaling to unit variance:
//! ```text
//! z = (x - u) / s
//! ```
//! where `u` is the mean of the training samples and `s` their population
//! standard deviation (ddof = 0).
//!
//! # Example
//! ```rust
//! use pricefit::dataset::Sample;
//! use pricefit::preprocessing::{Column, StandardScaler};
//!
//! let samples = vec![Sample::new(0.0, 10.0), Sample::new(2.0, 30.0)];
//! let stats = StandardScaler::fit(&samples).unwrap();
//!
//! assert_eq!(stats.transform(Column::Mileage, 2.0), 1.0);
//! assert_eq!(stats.inverse_transform(Column::Price, -1.0), 10.0);
//! ```

use crate::dataset::{self, Sample};
use crate::error::{RegressionError, Result};
use serde::{Deserialize, Serialize};

/// The two columns of a [`Sample`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Column {
    Mileage,
    Price,
}

impl Column {
    pub fn name(self) -> &'static str {
        match self {
            Column::Mileage => "mileage",
            Column::Price => "price",
        }
    }
}

/// Mean and standard deviation of a single column.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ColumnStats {
    pub mean: f64,
    pub std: f64,
}

impl ColumnStats {
    /// Population mean and standard deviation of `values`.
    ///
    /// # Errors
    /// [`RegressionError::DegenerateInput`] when `values` is empty, holds a
    /// non-finite value, or has zero variance.
    pub fn fit(values: impl Iterator<Item = f64> + Clone, column: Column) -> Result<Self> {
        let mut n = 0usize;
        let mut sum = 0.0;
        let mut first = None;
        let mut constant = true;
        for v in values.clone() {
            if !v.is_finite() {
                return Err(RegressionError::DegenerateInput(format!(
                    "{} contains a non-finite value ({v})",
                    column.name()
                )));
            }
            match first {
                None => first = Some(v),
                Some(f) => constant &= v == f,
            }
            sum += v;
            n += 1;
        }
        if n == 0 {
            return Err(RegressionError::DegenerateInput(
                "cannot normalize an empty sample set".to_string(),
            ));
        }

        let mean = sum / n as f64;
        let variance = values.map(|v| (v - mean) * (v - mean)).sum::<f64>() / n as f64;
        let std = variance.sqrt();

        // the computed std of a constant column can be a rounding residue
        if constant || std == 0.0 || !std.is_finite() {
            return Err(RegressionError::DegenerateInput(format!(
                "{} has zero variance (every value is {})",
                column.name(),
                first.unwrap_or(mean)
            )));
        }

        Ok(Self { mean, std })
    }

    #[inline]
    pub fn transform(&self, value: f64) -> f64 {
        (value - self.mean) / self.std
    }

    #[inline]
    pub fn inverse_transform(&self, value: f64) -> f64 {
        value * self.std + self.mean
    }
}

/// Normalization statistics for both columns, fitted once on the full
/// training set and read-only afterwards.
///
/// Serialized with the field names used by the model file
/// (`km_mean`, `km_std`, `price_mean`, `price_std`).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct NormalizationStats {
    #[serde(rename = "km_mean")]
    pub mean_x: f64,
    #[serde(rename = "km_std")]
    pub std_x: f64,
    #[serde(rename = "price_mean")]
    pub mean_y: f64,
    #[serde(rename = "price_std")]
    pub std_y: f64,
}

impl NormalizationStats {
    pub fn column(&self, column: Column) -> ColumnStats {
        match column {
            Column::Mileage => ColumnStats {
                mean: self.mean_x,
                std: self.std_x,
            },
            Column::Price => ColumnStats {
                mean: self.mean_y,
                std: self.std_y,
            },
        }
    }

    /// `(value - mean) / std` for the given column.
    pub fn transform(&self, column: Column, value: f64) -> f64 {
        self.column(column).transform(value)
    }

    /// Exact algebraic inverse of [`Self::transform`].
    pub fn inverse_transform(&self, column: Column, value: f64) -> f64 {
        self.column(column).inverse_transform(value)
    }

    /// Maps every sample into normalized space.
    pub fn transform_samples(&self, samples: &[Sample]) -> Vec<Sample> {
        let x = self.column(Column::Mileage);
        let y = self.column(Column::Price);
        samples
            .iter()
            .map(|s| Sample::new(x.transform(s.mileage), y.transform(s.price)))
            .collect()
    }
}

/// Fits [`NormalizationStats`] on raw samples.
#[derive(Clone, Copy, Debug, Default)]
pub struct StandardScaler;

impl StandardScaler {
    /// Computes mean and population std of both columns.
    ///
    /// # Errors
    /// [`RegressionError::DegenerateInput`] on an empty set, a constant
    /// column, or non-finite values.
    pub fn fit(samples: &[Sample]) -> Result<NormalizationStats> {
        let x = ColumnStats::fit(dataset::mileages(samples), Column::Mileage)?;
        let y = ColumnStats::fit(dataset::prices(samples), Column::Price)?;
        Ok(NormalizationStats {
            mean_x: x.mean,
            std_x: x.std,
            mean_y: y.mean,
            std_y: y.std,
        })
    }

    /// Fit, then transform the same samples.
    pub fn fit_transform(samples: &[Sample]) -> Result<(NormalizationStats, Vec<Sample>)> {
        let stats = Self::fit(samples)?;
        let normalized = stats.transform_samples(samples);
        Ok((stats, normalized))
    }
}
