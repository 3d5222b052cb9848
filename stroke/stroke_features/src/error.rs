use thiserror::Error;

/// Errors raised while turning patient attributes into a feature vector.
///
/// Every variant is terminal for the request: the encoder never substitutes a
/// default for a value it cannot map.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EncodingError {
    #[error("unknown {field} value {value:?}; expected one of {expected:?}")]
    UnknownCategory {
        field: &'static str,
        value: String,
        expected: &'static [&'static str],
    },
    #[error("missing required field: {0}")]
    MissingField(&'static str),
    #[error("{field} must be a finite number, got {value}")]
    NonFinite { field: &'static str, value: f64 },
    #[error("malformed patient record: {0}")]
    Malformed(String),
}

impl EncodingError {
    /// Name of the offending field, when the error is tied to one.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            EncodingError::UnknownCategory { field, .. }
            | EncodingError::MissingField(field)
            | EncodingError::NonFinite { field, .. } => Some(*field),
            EncodingError::Malformed(_) => None,
        }
    }
}
