/// Marker for a model that is **not yet trained**.
///
/// An `Unfitted` model holds parameters in normalized space and exposes the
/// training interface ([`TrainableModel`](super::TrainableModel)). It has no
/// `predict`, so an in-progress model cannot be used for inference.
#[derive(Debug, Clone, Copy)]
pub struct Unfitted;

/// Marker for a model whose parameters are in **raw space**.
///
/// A `Fitted` model carries only `(θ₀, θ₁)` for inference. No optimizer
/// state, normalization statistics or hyperparameters.
#[derive(Debug, Clone, Copy)]
pub struct Fitted;
