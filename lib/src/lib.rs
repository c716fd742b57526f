//! # pricefit
//!
//! Estimates a car's price from its mileage with univariate linear
//! regression, trained by batch gradient descent.
//!
//! ## Core Design Principles
//!
//! - **Normalized training, raw inference**: the trainer works on z-score
//!   normalized samples; the exported model is denormalized once, so the
//!   predictor is the bare hypothesis `θ₀ + θ₁ · mileage`.
//! - **Stateful Type Safety**: models carry their state in the type system
//!   (`Unfitted` vs `Fitted`); only a fitted model can predict.
//! - **Simultaneous updates by construction**: parameters are an immutable
//!   `Copy` pair and every iteration produces a fresh one.
//!
//! ## Quick Start
//!
//! ```rust
//! use pricefit::dataset::Sample;
//! use pricefit::model::InferenceModel;
//! use pricefit::trainer::Trainer;
//!
//! let samples: Vec<Sample> = [(240000.0, 3650.0), (139800.0, 3800.0), (22899.0, 7990.0)]
//!     .into_iter()
//!     .map(Sample::from)
//!     .collect();
//!
//! let trainer = Trainer::builder()
//!     .learning_rate(0.1)
//!     .max_iterations(1000)
//!     .build()
//!     .unwrap();
//! let report = trainer.fit(&samples).unwrap();
//! let price = report.model.predict(100_000.0);
//! assert!(price > 3650.0 && price < 7990.0);
//! ```
//!
//! ## Module Structure
//!
//! - `dataset`: samples and CSV loading
//! - `preprocessing`: z-score normalization
//! - `model`: the linear hypothesis and parameter denormalization
//! - `loss`: halved mean squared error
//! - `optimizer`: gradient descent update rule
//! - `trainer`: iteration loop, cost history, divergence diagnostics
//! - `serialization`: model and history files
//! - `inference`: input validation for the predictor

pub mod dataset;

pub mod error;

pub mod inference;

/// Differentiable loss functions for model training.
pub mod loss;

/// Linear model with compile-time state safety.
pub mod model;

/// Optimization algorithms for parameter updates.
pub mod optimizer;

/// Data preprocessing transformers.
pub mod preprocessing;

/// Model persistence.
pub mod serialization;

/// Training loop orchestration.
pub mod trainer;

pub use dataset::Sample;
pub use error::{RegressionError, Result};
pub use model::linear::{estimate, LinearModel, LinearParams, LinearRegression};
pub use preprocessing::NormalizationStats;
pub use trainer::{Trainer, TrainerBuilder, TrainingConfig, TrainingReport};
