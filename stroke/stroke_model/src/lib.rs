//! Scaler and classifier artifacts for stroke risk inference.
//!
//! The scaler and classifier are treated as two pluggable capabilities,
//! [`Transform`] and [`Classify`]. Fitted artifacts are JSON documents loaded
//! once into a [`ModelArtifacts`] context; loading is all-or-nothing and
//! fails with [`ModelUnavailableError`].

pub mod artifacts;
pub mod backend;
pub mod backends;
pub mod error;
pub mod metadata;

pub use artifacts::{
    ArtifactPaths, ClassifierArtifact, ClassifierModel, ModelArtifacts, ScalerArtifact,
    ScalerModel, CLASSIFIER_FILE, SCALER_FILE,
};
pub use backend::{check_input, BackendError, ClassLabel, Classification, Classify, Transform};
pub use error::{ArtifactKind, ModelUnavailableError};
pub use metadata::{ArtifactMetadata, ModelVersion};
