//! Logistic regression: p = σ(coef · z + intercept)

use serde::{Deserialize, Serialize};

use crate::backend::{
    check_finite, check_input, check_threshold, BackendError, ClassLabel, Classification,
    Classify,
};

pub(crate) fn default_threshold() -> f64 {
    0.5
}

/// Numerically stable logistic function.
pub fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

/// Binary logistic regression over normalized features.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticRegression {
    pub coef: Vec<f64>,
    pub intercept: f64,
    /// Positive iff probability >= threshold.
    #[serde(default = "default_threshold")]
    pub threshold: f64,
}

impl LogisticRegression {
    pub fn new(coef: Vec<f64>, intercept: f64) -> Result<Self, BackendError> {
        let model = Self {
            coef,
            intercept,
            threshold: default_threshold(),
        };
        model.validate()?;
        Ok(model)
    }

    pub fn with_threshold(mut self, threshold: f64) -> Result<Self, BackendError> {
        check_threshold(threshold)?;
        self.threshold = threshold;
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), BackendError> {
        check_finite(&self.coef)?;
        if !self.intercept.is_finite() {
            return Err(BackendError::InvalidParameter(format!(
                "non-finite intercept: {}",
                self.intercept
            )));
        }
        check_threshold(self.threshold)
    }

    /// Raw decision value before the logistic link.
    pub fn decision_function(&self, features: &[f64]) -> Result<f64, BackendError> {
        check_input(features, self.coef.len())?;
        let dot: f64 = features
            .iter()
            .zip(self.coef.iter())
            .map(|(x, w)| x * w)
            .sum();
        Ok(dot + self.intercept)
    }
}

impl Classify for LogisticRegression {
    fn n_features(&self) -> usize {
        self.coef.len()
    }

    fn classify(&self, features: &[f64]) -> Result<Classification, BackendError> {
        let z = self.decision_function(features)?;
        let probability = sigmoid(z);
        Ok(Classification {
            label: ClassLabel::from_probability(probability, self.threshold),
            probability,
        })
    }

    fn backend_name(&self) -> &str {
        "logistic"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sigmoid_is_stable_at_extremes() {
        assert_eq!(sigmoid(0.0), 0.5);
        assert!(sigmoid(-800.0) >= 0.0);
        assert!(sigmoid(800.0) <= 1.0);
        assert!((sigmoid(2.0) + sigmoid(-2.0) - 1.0).abs() < 1e-15);
    }

    #[test]
    fn logistic_classify() {
        let model = LogisticRegression::new(vec![0.5, 1.5, -1.0], 0.25).unwrap();
        // z = 0.5*2.0 + 1.5*(-1.0) + (-1.0)*0.5 + 0.25 = -0.75
        let z = model.decision_function(&[2.0, -1.0, 0.5]).unwrap();
        assert!((z - (-0.75)).abs() < 1e-12);

        let out = model.classify(&[2.0, -1.0, 0.5]).unwrap();
        assert!((out.probability - sigmoid(-0.75)).abs() < 1e-12);
        assert_eq!(out.label, ClassLabel::NoStroke);

        let out = model.classify(&[2.0, 1.0, 0.5]).unwrap();
        assert_eq!(out.label, ClassLabel::Stroke);
    }

    #[test]
    fn custom_threshold_moves_the_decision() {
        let model = LogisticRegression::new(vec![1.0], 0.0)
            .unwrap()
            .with_threshold(0.2)
            .unwrap();
        // p = σ(-1) ≈ 0.269
        let out = model.classify(&[-1.0]).unwrap();
        assert_eq!(out.label, ClassLabel::Stroke);

        assert!(LogisticRegression::new(vec![1.0], 0.0)
            .unwrap()
            .with_threshold(1.5)
            .is_err());
    }

    #[test]
    fn wrong_length_is_an_error() {
        let model = LogisticRegression::new(vec![1.0, 1.0], 0.0).unwrap();
        assert!(matches!(
            model.classify(&[1.0]),
            Err(BackendError::DimensionMismatch {
                expected: 2,
                got: 1
            })
        ));
    }

    #[test]
    fn threshold_defaults_when_absent_from_json() {
        let model: LogisticRegression =
            serde_json::from_str(r#"{"coef":[0.1,0.2],"intercept":-1.0}"#).unwrap();
        assert_eq!(model.threshold, 0.5);
    }
}
