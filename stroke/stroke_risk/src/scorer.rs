use std::path::Path;

use stroke_features::{encode, FeatureVector, PatientAttributes};
use stroke_model::{ArtifactPaths, Classification, ModelArtifacts, ModelUnavailableError};

use crate::error::{InferenceError, PredictionError};
use crate::verdict::Verdict;

/// Scores encoded feature vectors against a loaded scaler/classifier pair.
///
/// Holds its artifacts for its whole lifetime and never mutates them, so a
/// single scorer can be shared across threads.
#[derive(Debug)]
pub struct RiskScorer {
    artifacts: ModelArtifacts,
}

impl RiskScorer {
    pub fn new(artifacts: ModelArtifacts) -> Self {
        Self { artifacts }
    }

    /// Load both artifacts; no scorer exists unless both load.
    pub fn load(paths: &ArtifactPaths) -> Result<Self, ModelUnavailableError> {
        ModelArtifacts::load(paths).map(Self::new)
    }

    pub fn load_dir(dir: impl AsRef<Path>) -> Result<Self, ModelUnavailableError> {
        ModelArtifacts::load_dir(dir).map(Self::new)
    }

    pub fn artifacts(&self) -> &ModelArtifacts {
        &self.artifacts
    }

    pub fn score(&self, vector: &FeatureVector) -> Result<Verdict, InferenceError> {
        self.score_slice(vector.as_slice())
    }

    /// Score a raw vector. Anything but a finite vector of the encoder's
    /// width is an [`InferenceError`].
    pub fn score_slice(&self, features: &[f64]) -> Result<Verdict, InferenceError> {
        match self.classify(features) {
            Ok(c) => {
                let verdict = Verdict::from(c);
                log::debug!(
                    "scored vector: label={:?} probability={}",
                    verdict.label,
                    verdict.probability
                );
                Ok(verdict)
            }
            Err(e) => {
                log::error!("inference failed on a {}-column vector: {e}", features.len());
                Err(e)
            }
        }
    }

    /// Encode then score one patient record.
    pub fn predict(&self, attrs: &PatientAttributes) -> Result<Verdict, PredictionError> {
        let vector = encode(attrs)?;
        Ok(self.score(&vector)?)
    }

    fn classify(&self, features: &[f64]) -> Result<Classification, InferenceError> {
        let scaler = self.artifacts.scaler();
        let classifier = self.artifacts.classifier();

        let scaled = scaler
            .transform(features)
            .map_err(InferenceError::Transform)?;
        if scaled.len() != classifier.n_features() {
            return Err(InferenceError::ScaledWidth {
                expected: classifier.n_features(),
                got: scaled.len(),
            });
        }
        let c = classifier
            .classify(&scaled)
            .map_err(InferenceError::Classify)?;
        if !(0.0..=1.0).contains(&c.probability) {
            return Err(InferenceError::InvalidProbability(c.probability));
        }
        Ok(c)
    }
}
