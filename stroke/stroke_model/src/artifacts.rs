//! Loading the scaler and classifier artifacts into an immutable context.

use std::fmt;
use std::fs::read_to_string;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use stroke_features::FEATURE_COUNT;

use crate::backend::{BackendError, Classification, Classify, Transform};
use crate::backends::{LogisticRegression, MinMaxScaler, RandomForest, StandardScaler};
use crate::error::{ArtifactKind, ModelUnavailableError};
use crate::metadata::ArtifactMetadata;

pub const SCALER_FILE: &str = "scaler.json";
pub const CLASSIFIER_FILE: &str = "stroke_model.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScalerModel {
    Standard(StandardScaler),
    MinMax(MinMaxScaler),
}

impl ScalerModel {
    fn validate(&self) -> Result<(), BackendError> {
        match self {
            ScalerModel::Standard(s) => s.validate(),
            ScalerModel::MinMax(s) => s.validate(),
        }
    }

    fn into_transform(self) -> Box<dyn Transform> {
        match self {
            ScalerModel::Standard(s) => Box::new(s),
            ScalerModel::MinMax(s) => Box::new(s),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ClassifierModel {
    Logistic(LogisticRegression),
    RandomForest(RandomForest),
}

impl ClassifierModel {
    fn validate(&self) -> Result<(), BackendError> {
        match self {
            ClassifierModel::Logistic(m) => m.validate(),
            ClassifierModel::RandomForest(m) => m.validate(),
        }
    }

    fn into_classify(self) -> Box<dyn Classify> {
        match self {
            ClassifierModel::Logistic(m) => Box::new(m),
            ClassifierModel::RandomForest(m) => Box::new(m),
        }
    }
}

/// On-disk scaler document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalerArtifact {
    pub metadata: ArtifactMetadata,
    pub scaler: ScalerModel,
}

/// On-disk classifier document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifierArtifact {
    pub metadata: ArtifactMetadata,
    pub classifier: ClassifierModel,
}

/// Locations of the two artifacts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub scaler: PathBuf,
    pub classifier: PathBuf,
}

impl ArtifactPaths {
    /// Default file names inside a model directory.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            scaler: dir.join(SCALER_FILE),
            classifier: dir.join(CLASSIFIER_FILE),
        }
    }
}

/// The loaded scaler and classifier. Built once, read-only afterwards.
pub struct ModelArtifacts {
    scaler: Box<dyn Transform>,
    classifier: Box<dyn Classify>,
    scaler_metadata: Option<ArtifactMetadata>,
    classifier_metadata: Option<ArtifactMetadata>,
}

impl ModelArtifacts {
    /// Assemble from already-constructed capabilities. Both must accept exactly
    /// one encoded feature vector.
    pub fn new(
        scaler: Box<dyn Transform>,
        classifier: Box<dyn Classify>,
    ) -> Result<Self, ModelUnavailableError> {
        check_width(ArtifactKind::Scaler, scaler.n_features())?;
        check_width(ArtifactKind::Classifier, classifier.n_features())?;
        Ok(Self {
            scaler,
            classifier,
            scaler_metadata: None,
            classifier_metadata: None,
        })
    }

    /// Load both artifacts. Fails if either one is missing, unparsable,
    /// structurally invalid or fit against a different encoding.
    pub fn load(paths: &ArtifactPaths) -> Result<Self, ModelUnavailableError> {
        let scaler: ScalerArtifact = read_artifact(ArtifactKind::Scaler, &paths.scaler)?;
        scaler.metadata.check_compatible(ArtifactKind::Scaler)?;
        scaler.scaler.validate().map_err(|source| ModelUnavailableError::Invalid {
            artifact: ArtifactKind::Scaler,
            source,
        })?;

        let classifier: ClassifierArtifact =
            read_artifact(ArtifactKind::Classifier, &paths.classifier)?;
        classifier
            .metadata
            .check_compatible(ArtifactKind::Classifier)?;
        classifier
            .classifier
            .validate()
            .map_err(|source| ModelUnavailableError::Invalid {
                artifact: ArtifactKind::Classifier,
                source,
            })?;

        let mut artifacts = Self::new(
            scaler.scaler.into_transform(),
            classifier.classifier.into_classify(),
        )?;
        log::info!(
            "loaded {} scaler {} v{} and {} classifier {} v{}",
            artifacts.scaler.backend_name(),
            scaler.metadata.name,
            scaler.metadata.version,
            artifacts.classifier.backend_name(),
            classifier.metadata.name,
            classifier.metadata.version,
        );
        artifacts.scaler_metadata = Some(scaler.metadata);
        artifacts.classifier_metadata = Some(classifier.metadata);
        Ok(artifacts)
    }

    /// Load `scaler.json` and `stroke_model.json` from `dir`.
    pub fn load_dir(dir: impl AsRef<Path>) -> Result<Self, ModelUnavailableError> {
        Self::load(&ArtifactPaths::in_dir(dir))
    }

    pub fn scaler(&self) -> &dyn Transform {
        self.scaler.as_ref()
    }

    pub fn classifier(&self) -> &dyn Classify {
        self.classifier.as_ref()
    }

    pub fn scaler_metadata(&self) -> Option<&ArtifactMetadata> {
        self.scaler_metadata.as_ref()
    }

    pub fn classifier_metadata(&self) -> Option<&ArtifactMetadata> {
        self.classifier_metadata.as_ref()
    }

    /// Scale then classify one raw feature vector.
    pub fn infer(&self, features: &[f64]) -> Result<Classification, BackendError> {
        let scaled = self.scaler.transform(features)?;
        self.classifier.classify(&scaled)
    }
}

impl fmt::Debug for ModelArtifacts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelArtifacts")
            .field("scaler", &self.scaler.backend_name())
            .field("classifier", &self.classifier.backend_name())
            .field("scaler_metadata", &self.scaler_metadata)
            .field("classifier_metadata", &self.classifier_metadata)
            .finish()
    }
}

fn check_width(artifact: ArtifactKind, n_features: usize) -> Result<(), ModelUnavailableError> {
    if n_features == FEATURE_COUNT {
        Ok(())
    } else {
        Err(ModelUnavailableError::Invalid {
            artifact,
            source: BackendError::DimensionMismatch {
                expected: FEATURE_COUNT,
                got: n_features,
            },
        })
    }
}

fn read_artifact<T: DeserializeOwned>(
    artifact: ArtifactKind,
    path: &Path,
) -> Result<T, ModelUnavailableError> {
    log::debug!("reading {artifact} artifact from {}", path.display());
    let text = read_to_string(path).map_err(|source| ModelUnavailableError::Io {
        artifact,
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| ModelUnavailableError::Parse {
        artifact,
        path: path.to_path_buf(),
        source,
    })
}
