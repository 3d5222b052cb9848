use serde::{Deserialize, Serialize};

use crate::error::EncodingError;

/// A patient record as submitted by the input form.
///
/// Categorical fields carry the form's option labels verbatim; membership in
/// each domain is checked by [`crate::encode`]. Yes/no fields accept either a
/// JSON boolean or the labels `"Yes"` / `"No"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PatientAttributes {
    pub gender: String,
    pub age: f64,
    #[serde(with = "yes_no")]
    pub hypertension: bool,
    #[serde(with = "yes_no")]
    pub heart_disease: bool,
    #[serde(with = "yes_no")]
    pub ever_married: bool,
    pub work_type: String,
    #[serde(alias = "Residence_type")]
    pub residence_type: String,
    pub avg_glucose_level: f64,
    pub bmi: f64,
    pub smoking_status: String,
}

impl PatientAttributes {
    /// Parse a record from JSON. A missing field is an error, never a default.
    pub fn from_json(json: &str) -> Result<Self, EncodingError> {
        serde_json::from_str(json).map_err(|e| EncodingError::Malformed(e.to_string()))
    }
}

/// Serde adapter for the form's yes/no selectors.
pub mod yes_no {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub const YES: &str = "Yes";
    pub const NO: &str = "No";

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Label(String),
    }

    pub fn parse(label: &str) -> Option<bool> {
        match label {
            YES => Some(true),
            NO => Some(false),
            _ => None,
        }
    }

    pub fn serialize<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(if *value { YES } else { NO })
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        match Flag::deserialize(deserializer)? {
            Flag::Bool(b) => Ok(b),
            Flag::Label(s) => parse(&s).ok_or_else(|| {
                D::Error::custom(format!("expected \"{YES}\" or \"{NO}\", found {s:?}"))
            }),
        }
    }
}
