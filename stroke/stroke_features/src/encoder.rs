use serde::Serialize;

use crate::attributes::PatientAttributes;
use crate::error::EncodingError;
use crate::table::{
    flag_code, Column, Gender, ResidenceType, SmokingStatus, WorkType, FEATURE_COUNT,
    FEATURE_NAMES,
};

/// Fixed-order numeric encoding of one patient record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FeatureVector([f64; FEATURE_COUNT]);

impl FeatureVector {
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn to_array(self) -> [f64; FEATURE_COUNT] {
        self.0
    }

    pub fn get(&self, column: Column) -> f64 {
        self.0[column.index()]
    }

    /// Values paired with their column names.
    pub fn named(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        FEATURE_NAMES.iter().copied().zip(self.0.iter().copied())
    }
}

impl From<[f64; FEATURE_COUNT]> for FeatureVector {
    fn from(values: [f64; FEATURE_COUNT]) -> Self {
        Self(values)
    }
}

impl AsRef<[f64]> for FeatureVector {
    fn as_ref(&self) -> &[f64] {
        &self.0
    }
}

/// Encode a patient record into the model's feature vector.
///
/// Categorical values must match an option label exactly; numeric values are
/// passed through unchanged but must be finite.
pub fn encode(attrs: &PatientAttributes) -> Result<FeatureVector, EncodingError> {
    let gender = Gender::from_label(&attrs.gender)?;
    let work_type = WorkType::from_label(&attrs.work_type)?;
    let residence = ResidenceType::from_label(&attrs.residence_type)?;
    let smoking = SmokingStatus::from_label(&attrs.smoking_status)?;

    let values = [
        f64::from(gender.code()),
        finite(Column::Age, attrs.age)?,
        f64::from(flag_code(attrs.hypertension)),
        f64::from(flag_code(attrs.heart_disease)),
        f64::from(flag_code(attrs.ever_married)),
        f64::from(work_type.code()),
        f64::from(residence.code()),
        finite(Column::AvgGlucoseLevel, attrs.avg_glucose_level)?,
        finite(Column::Bmi, attrs.bmi)?,
        f64::from(smoking.code()),
    ];

    log::debug!("encoded patient attributes: {values:?}");
    Ok(FeatureVector(values))
}

fn finite(column: Column, value: f64) -> Result<f64, EncodingError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(EncodingError::NonFinite {
            field: column.name(),
            value,
        })
    }
}
