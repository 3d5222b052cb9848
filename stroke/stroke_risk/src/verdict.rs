use serde::{Deserialize, Serialize};
use std::fmt;
use stroke_model::{ClassLabel, Classification};

/// Two-level risk outcome.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum RiskLabel {
    LowRisk,
    HighRisk,
}

impl From<ClassLabel> for RiskLabel {
    fn from(label: ClassLabel) -> Self {
        match label {
            ClassLabel::Stroke => RiskLabel::HighRisk,
            ClassLabel::NoStroke => RiskLabel::LowRisk,
        }
    }
}

impl fmt::Display for RiskLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskLabel::LowRisk => f.write_str("Low Risk"),
            RiskLabel::HighRisk => f.write_str("High Risk"),
        }
    }
}

/// Risk label plus the classifier's stroke probability. Built per request.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Verdict {
    pub label: RiskLabel,
    pub probability: f64,
}

impl Verdict {
    pub fn is_high_risk(&self) -> bool {
        self.label == RiskLabel::HighRisk
    }
}

impl From<Classification> for Verdict {
    fn from(c: Classification) -> Self {
        Self {
            label: c.label.into(),
            probability: c.probability,
        }
    }
}
