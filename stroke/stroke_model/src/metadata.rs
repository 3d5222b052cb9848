//! Artifact metadata and versioning

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use stroke_features::{ENCODING_VERSION, FEATURE_NAMES};

use crate::error::{ArtifactKind, ModelUnavailableError};

/// Semantic version of a fitted artifact, written as `"MAJOR.MINOR.PATCH"`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ModelVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl ModelVersion {
    pub fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Parse `"MAJOR.MINOR.PATCH"`; each part is a plain unsigned integer.
    pub fn parse(s: &str) -> Result<Self, String> {
        let mut parts = s.split('.');
        let mut next = |part: &str| -> Result<u32, String> {
            let raw = parts
                .next()
                .ok_or_else(|| format!("version {s:?} has no {part} part"))?;
            raw.parse()
                .map_err(|_| format!("version {s:?} has a non-numeric {part} part {raw:?}"))
        };
        let version = Self::new(next("major")?, next("minor")?, next("patch")?);
        if parts.next().is_some() {
            return Err(format!("version {s:?} has more than three parts"));
        }
        Ok(version)
    }
}

impl std::fmt::Display for ModelVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl TryFrom<String> for ModelVersion {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<ModelVersion> for String {
    fn from(v: ModelVersion) -> Self {
        v.to_string()
    }
}

/// Descriptive block carried by both the scaler and the classifier artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtifactMetadata {
    pub name: String,
    pub version: ModelVersion,
    /// Encoding table version the artifact was fit against.
    pub encoding_version: u32,
    /// Column order seen at fit time. Empty means unrecorded.
    #[serde(default)]
    pub feature_names: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Fit timestamp (ISO 8601)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub tags: BTreeMap<String, String>,
}

impl ArtifactMetadata {
    /// Metadata for an artifact fit against the current encoding table.
    pub fn new(name: String, version: ModelVersion) -> Self {
        Self {
            name,
            version,
            encoding_version: ENCODING_VERSION,
            feature_names: FEATURE_NAMES.iter().map(|s| s.to_string()).collect(),
            description: None,
            created_at: None,
            tags: BTreeMap::new(),
        }
    }

    pub fn with_description(mut self, description: String) -> Self {
        self.description = Some(description);
        self
    }

    pub fn with_tag(mut self, key: String, value: String) -> Self {
        self.tags.insert(key, value);
        self
    }

    /// Reject artifacts fit against a different encoding or column order.
    pub fn check_compatible(&self, artifact: ArtifactKind) -> Result<(), ModelUnavailableError> {
        if self.encoding_version != ENCODING_VERSION {
            return Err(ModelUnavailableError::EncodingVersion {
                artifact,
                expected: ENCODING_VERSION,
                found: self.encoding_version,
            });
        }
        if !self.feature_names.is_empty()
            && !self.feature_names.iter().map(String::as_str).eq(FEATURE_NAMES)
        {
            return Err(ModelUnavailableError::FeatureOrder {
                artifact,
                expected: FEATURE_NAMES.iter().map(|s| s.to_string()).collect(),
                found: self.feature_names.clone(),
            });
        }
        Ok(())
    }
}
