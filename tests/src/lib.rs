//! Shared fixtures for the end-to-end tests.

use std::path::{Path, PathBuf};

use stroke_features::PatientAttributes;
use stroke_risk::RiskScorer;

/// Directory holding the checked-in scaler and classifier artifacts.
pub fn models_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../models")
}

pub fn fixture_scorer() -> RiskScorer {
    match RiskScorer::load_dir(models_dir()) {
        Ok(scorer) => scorer,
        Err(e) => panic!("fixture artifacts in {} do not load: {e}", models_dir().display()),
    }
}

/// 67-year-old male smoker-in-the-past with hypertension and heart disease.
pub fn elderly_patient() -> PatientAttributes {
    PatientAttributes {
        gender: "Male".into(),
        age: 67.0,
        hypertension: true,
        heart_disease: true,
        ever_married: true,
        work_type: "Private".into(),
        residence_type: "Urban".into(),
        avg_glucose_level: 228.7,
        bmi: 36.6,
        smoking_status: "formerly smoked".into(),
    }
}

pub fn child_patient() -> PatientAttributes {
    PatientAttributes {
        gender: "Female".into(),
        age: 3.0,
        hypertension: false,
        heart_disease: false,
        ever_married: false,
        work_type: "children".into(),
        residence_type: "Rural".into(),
        avg_glucose_level: 95.0,
        bmi: 18.0,
        smoking_status: "Unknown".into(),
    }
}

/// The record the input form submits with its default selections.
pub fn form_default_json() -> String {
    serde_json::json!({
        "gender": "Male",
        "age": 50,
        "hypertension": "No",
        "heart_disease": "No",
        "ever_married": "Yes",
        "work_type": "Private",
        "Residence_type": "Urban",
        "avg_glucose_level": 100.0,
        "bmi": 25.0,
        "smoking_status": "never smoked",
    })
    .to_string()
}
