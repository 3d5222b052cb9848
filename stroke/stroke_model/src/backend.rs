//! Pluggable capabilities for model inference: a feature [`Transform`] (the
//! scaler) and a binary [`Classify`] (the classifier).
//!
//! Concrete artifact formats live in [`crate::backends`]; anything else that
//! implements these traits can be handed to [`crate::ModelArtifacts::new`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised by a transform or classifier, at load time or at inference time.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BackendError {
    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },
    #[error("non-finite value at index {index}: {value}")]
    NonFinite { index: usize, value: f64 },
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Class predicted by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassLabel {
    NoStroke,
    Stroke,
}

impl ClassLabel {
    /// Training-set class code: 0 = no stroke, 1 = stroke.
    pub fn code(self) -> u8 {
        match self {
            ClassLabel::NoStroke => 0,
            ClassLabel::Stroke => 1,
        }
    }

    /// Positive iff `probability >= threshold`.
    pub fn from_probability(probability: f64, threshold: f64) -> Self {
        if probability >= threshold {
            ClassLabel::Stroke
        } else {
            ClassLabel::NoStroke
        }
    }
}

/// Output of a classifier for one feature vector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub label: ClassLabel,
    /// Probability of the positive (stroke) class.
    pub probability: f64,
}

/// Per-column normalization fit offline (e.g. standardization).
pub trait Transform: Send + Sync {
    /// Number of columns the transform was fit on.
    fn n_features(&self) -> usize;

    /// Map a raw feature vector to a normalized one of the same length and order.
    fn transform(&self, features: &[f64]) -> Result<Vec<f64>, BackendError>;

    fn backend_name(&self) -> &str;
}

/// Binary classifier over normalized features.
pub trait Classify: Send + Sync {
    fn n_features(&self) -> usize;

    fn classify(&self, features: &[f64]) -> Result<Classification, BackendError>;

    fn backend_name(&self) -> &str;
}

/// Reject inputs of the wrong length or containing NaN/infinity.
pub fn check_input(features: &[f64], expected: usize) -> Result<(), BackendError> {
    if features.len() != expected {
        return Err(BackendError::DimensionMismatch {
            expected,
            got: features.len(),
        });
    }
    check_finite(features)
}

pub(crate) fn check_finite(values: &[f64]) -> Result<(), BackendError> {
    match values.iter().position(|v| !v.is_finite()) {
        Some(index) => Err(BackendError::NonFinite {
            index,
            value: values[index],
        }),
        None => Ok(()),
    }
}

pub(crate) fn check_threshold(threshold: f64) -> Result<(), BackendError> {
    if (0.0..=1.0).contains(&threshold) {
        Ok(())
    } else {
        Err(BackendError::InvalidParameter(format!(
            "threshold {threshold} not in [0, 1]"
        )))
    }
}
