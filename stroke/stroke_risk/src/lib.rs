//! Stroke risk scoring.
//!
//! [`RiskScorer`] owns the loaded scaler and classifier and turns an encoded
//! [`FeatureVector`] into a [`Verdict`]. The end-to-end path from a form record
//! is [`RiskScorer::predict`].

pub mod error;
pub mod scorer;
pub mod verdict;

pub use error::{InferenceError, PredictionError, PREDICTION_UNAVAILABLE};
pub use scorer::RiskScorer;
pub use verdict::{RiskLabel, Verdict};

pub use stroke_features::{encode, EncodingError, FeatureVector, PatientAttributes};
pub use stroke_model::{ArtifactPaths, ModelArtifacts, ModelUnavailableError};
