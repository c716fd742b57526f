//! Data preprocessing.
//!
//! Training runs in z-score normalized space: both columns are rescaled to
//! zero mean and unit variance so that a single learning rate works whatever
//! the raw units of mileage and price are.

pub mod standard;

pub use standard::{Column, ColumnStats, NormalizationStats, StandardScaler};
