use pretty_assertions::assert_eq;
use serde_json::Value;
use stroke_features::{encode, EncodingTable, PatientAttributes, FEATURE_NAMES};
use stroke_model::{ArtifactPaths, ModelUnavailableError};
use stroke_risk::{PredictionError, RiskLabel, RiskScorer, PREDICTION_UNAVAILABLE};
use tests::{child_patient, elderly_patient, fixture_scorer, form_default_json, models_dir};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn elderly_patient_end_to_end() {
    init_logger();
    let attrs = elderly_patient();
    let vector = encode(&attrs).unwrap();
    assert_eq!(
        vector.to_array(),
        [1.0, 67.0, 1.0, 1.0, 1.0, 3.0, 1.0, 228.7, 36.6, 0.0]
    );

    let verdict = fixture_scorer().predict(&attrs).unwrap();
    assert_eq!(verdict.label, RiskLabel::HighRisk);
    assert!(verdict.probability > 0.85 && verdict.probability < 0.95);
}

#[test]
fn child_end_to_end() {
    let attrs = child_patient();
    assert_eq!(
        encode(&attrs).unwrap().to_array(),
        [0.0, 3.0, 0.0, 0.0, 0.0, 0.0, 0.0, 95.0, 18.0, 3.0]
    );

    let verdict = fixture_scorer().predict(&attrs).unwrap();
    assert_eq!(verdict.label, RiskLabel::LowRisk);
    assert!(verdict.probability < 0.05);
}

#[test]
fn form_json_record_scores() {
    let attrs = PatientAttributes::from_json(&form_default_json()).unwrap();
    assert_eq!(attrs.residence_type, "Urban");
    assert!(attrs.ever_married);

    let verdict = fixture_scorer().predict(&attrs).unwrap();
    assert_eq!(verdict.label, RiskLabel::LowRisk);
    assert!(verdict.probability > 0.1);
}

#[test]
fn verdict_label_follows_probability() {
    let scorer = fixture_scorer();
    for attrs in [elderly_patient(), child_patient()] {
        let v = scorer.predict(&attrs).unwrap();
        assert_eq!(v.is_high_risk(), v.probability >= 0.5);
    }
}

#[test]
fn encoding_table_matches_encoder_order() {
    let json: Value = serde_json::from_str(&EncodingTable::current().to_json_pretty().unwrap())
        .unwrap();
    let names: Vec<&str> = json["columns"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, FEATURE_NAMES.to_vec());

    let named: Vec<&str> = encode(&elderly_patient())
        .unwrap()
        .named()
        .map(|(name, _)| name)
        .collect();
    assert_eq!(named, names);
}

#[test]
fn scorer_is_unavailable_without_classifier() {
    init_logger();
    let dir = tempfile::tempdir().unwrap();
    std::fs::copy(models_dir().join("scaler.json"), dir.path().join("scaler.json")).unwrap();

    let err = RiskScorer::load_dir(dir.path()).unwrap_err();
    assert!(matches!(err, ModelUnavailableError::Io { .. }), "{err}");
    assert_eq!(PredictionError::from(err).user_message(), PREDICTION_UNAVAILABLE);
}

#[test]
fn artifacts_can_live_in_separate_directories() {
    let scaler_dir = tempfile::tempdir().unwrap();
    let model_dir = tempfile::tempdir().unwrap();
    let scaler = scaler_dir.path().join("fit-scaler.json");
    let classifier = model_dir.path().join("lr.json");
    std::fs::copy(models_dir().join("scaler.json"), &scaler).unwrap();
    std::fs::copy(models_dir().join("stroke_model.json"), &classifier).unwrap();

    let scorer = RiskScorer::load(&ArtifactPaths { scaler, classifier }).unwrap();
    let expected = fixture_scorer().predict(&elderly_patient()).unwrap();
    assert_eq!(scorer.predict(&elderly_patient()).unwrap(), expected);
}
