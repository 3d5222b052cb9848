use pretty_assertions::assert_eq;
use proptest::prelude::*;
use stroke_features::{
    encode, EncodingError, Gender, PatientAttributes, ResidenceType, SmokingStatus, WorkType,
    FEATURE_COUNT,
};

fn example_high_risk() -> PatientAttributes {
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

fn example_child() -> PatientAttributes {
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

#[test]
fn elderly_smoker_example_encodes_to_reference_vector() {
    let v = encode(&example_high_risk()).expect("valid record");
    assert_eq!(
        v.to_array(),
        [1.0, 67.0, 1.0, 1.0, 1.0, 3.0, 1.0, 228.7, 36.6, 0.0]
    );
}

#[test]
fn child_example_encodes_to_reference_vector() {
    let v = encode(&example_child()).expect("valid record");
    assert_eq!(
        v.to_array(),
        [0.0, 3.0, 0.0, 0.0, 0.0, 0.0, 0.0, 95.0, 18.0, 3.0]
    );
}

#[test]
fn each_categorical_field_rejects_values_outside_its_domain() {
    let cases: [(&str, fn(&mut PatientAttributes)); 4] = [
        ("gender", |a| a.gender = "Unspecified".into()),
        ("work_type", |a| a.work_type = "Retired".into()),
        ("residence_type", |a| a.residence_type = "Suburban".into()),
        ("smoking_status", |a| a.smoking_status = "".into()),
    ];
    for (field, mutate) in cases {
        let mut attrs = example_child();
        mutate(&mut attrs);
        match encode(&attrs) {
            Err(EncodingError::UnknownCategory { field: f, .. }) => assert_eq!(f, field),
            other => panic!("{field}: expected UnknownCategory, got {other:?}"),
        }
    }
}

fn valid_attributes() -> impl Strategy<Value = PatientAttributes> {
    (
        prop::sample::select(Gender::LABELS),
        1u8..=120,
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
        prop::sample::select(WorkType::LABELS),
        prop::sample::select(ResidenceType::LABELS),
        40.0f64..=300.0,
        10.0f64..=60.0,
        prop::sample::select(SmokingStatus::LABELS),
    )
        .prop_map(
            |(gender, age, hyp, heart, married, work, residence, glucose, bmi, smoking)| {
                PatientAttributes {
                    gender: gender.to_string(),
                    age: f64::from(age),
                    hypertension: hyp,
                    heart_disease: heart,
                    ever_married: married,
                    work_type: work.to_string(),
                    residence_type: residence.to_string(),
                    avg_glucose_level: glucose,
                    bmi,
                    smoking_status: smoking.to_string(),
                }
            },
        )
}

proptest! {
    #[test]
    fn encoding_is_deterministic_and_matches_table(attrs in valid_attributes()) {
        let first = encode(&attrs).unwrap();
        let second = encode(&attrs).unwrap();
        prop_assert_eq!(first.as_slice().len(), FEATURE_COUNT);
        for (a, b) in first.as_slice().iter().zip(second.as_slice()) {
            prop_assert_eq!(a.to_bits(), b.to_bits());
        }

        let v = first.to_array();
        prop_assert_eq!(v[0], f64::from(Gender::from_label(&attrs.gender).unwrap().code()));
        prop_assert_eq!(v[1], attrs.age);
        prop_assert_eq!(v[2], if attrs.hypertension { 1.0 } else { 0.0 });
        prop_assert_eq!(v[3], if attrs.heart_disease { 1.0 } else { 0.0 });
        prop_assert_eq!(v[4], if attrs.ever_married { 1.0 } else { 0.0 });
        prop_assert_eq!(v[5], f64::from(WorkType::from_label(&attrs.work_type).unwrap().code()));
        prop_assert_eq!(v[6], f64::from(ResidenceType::from_label(&attrs.residence_type).unwrap().code()));
        prop_assert_eq!(v[7], attrs.avg_glucose_level);
        prop_assert_eq!(v[8], attrs.bmi);
        prop_assert_eq!(v[9], f64::from(SmokingStatus::from_label(&attrs.smoking_status).unwrap().code()));
    }

    #[test]
    fn labels_outside_the_domain_never_encode(label in "[a-zA-Z _-]{0,16}") {
        prop_assume!(!WorkType::LABELS.contains(&label.as_str()));
        let mut attrs = example_child();
        attrs.work_type = label;
        let is_unknown = matches!(encode(&attrs), Err(EncodingError::UnknownCategory { .. }));
        prop_assert!(is_unknown);
    }
}
