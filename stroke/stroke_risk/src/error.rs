use stroke_features::EncodingError;
use stroke_model::{BackendError, ModelUnavailableError};
use thiserror::Error;

/// What callers are shown for any failed prediction.
pub const PREDICTION_UNAVAILABLE: &str = "prediction unavailable";

/// A vector reached the scaler or classifier in a shape they cannot handle.
///
/// Indicates a broken contract between encoder and scorer, not bad user input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InferenceError {
    #[error("scaler transform failed: {0}")]
    Transform(#[source] BackendError),
    #[error("scaler returned {got} columns, expected {expected}")]
    ScaledWidth { expected: usize, got: usize },
    #[error("classifier failed: {0}")]
    Classify(#[source] BackendError),
    #[error("classifier returned probability {0} outside [0, 1]")]
    InvalidProbability(f64),
}

/// Any failure of the encode → score pipeline. Every variant is terminal for
/// the request.
#[derive(Debug, Error)]
pub enum PredictionError {
    #[error(transparent)]
    Encoding(#[from] EncodingError),
    #[error(transparent)]
    ModelUnavailable(#[from] ModelUnavailableError),
    #[error(transparent)]
    Inference(#[from] InferenceError),
}

impl PredictionError {
    pub fn user_message(&self) -> &'static str {
        PREDICTION_UNAVAILABLE
    }
}
