use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::backend::BackendError;

/// Which of the two artifacts an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    Scaler,
    Classifier,
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArtifactKind::Scaler => f.write_str("scaler"),
            ArtifactKind::Classifier => f.write_str("classifier"),
        }
    }
}

/// The scaler or classifier could not be made ready for inference.
///
/// Raised only while loading; a process that sees it must not serve predictions.
#[derive(Debug, Error)]
pub enum ModelUnavailableError {
    #[error("cannot read {artifact} artifact at {}: {source}", .path.display())]
    Io {
        artifact: ArtifactKind,
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("cannot parse {artifact} artifact at {}: {source}", .path.display())]
    Parse {
        artifact: ArtifactKind,
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("invalid {artifact} artifact: {source}")]
    Invalid {
        artifact: ArtifactKind,
        source: BackendError,
    },
    #[error("{artifact} artifact was fit against encoding version {found}, encoder uses {expected}")]
    EncodingVersion {
        artifact: ArtifactKind,
        expected: u32,
        found: u32,
    },
    #[error("{artifact} artifact feature order {found:?} does not match encoder columns {expected:?}")]
    FeatureOrder {
        artifact: ArtifactKind,
        expected: Vec<String>,
        found: Vec<String>,
    },
}

impl ModelUnavailableError {
    pub fn artifact(&self) -> ArtifactKind {
        match self {
            ModelUnavailableError::Io { artifact, .. }
            | ModelUnavailableError::Parse { artifact, .. }
            | ModelUnavailableError::Invalid { artifact, .. }
            | ModelUnavailableError::EncodingVersion { artifact, .. }
            | ModelUnavailableError::FeatureOrder { artifact, .. } => *artifact,
        }
    }
}
