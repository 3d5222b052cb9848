//! Per-column affine scalers, in the parameterization scikit-learn stores.

use serde::{Deserialize, Serialize};

use crate::backend::{check_finite, check_input, BackendError, Transform};

/// Standardization: `z = (x - mean) / scale`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

impl StandardScaler {
    pub fn new(mean: Vec<f64>, scale: Vec<f64>) -> Result<Self, BackendError> {
        let scaler = Self { mean, scale };
        scaler.validate()?;
        Ok(scaler)
    }

    pub fn validate(&self) -> Result<(), BackendError> {
        if self.mean.len() != self.scale.len() {
            return Err(BackendError::DimensionMismatch {
                expected: self.mean.len(),
                got: self.scale.len(),
            });
        }
        check_finite(&self.mean)?;
        check_finite(&self.scale)
    }
}

impl Transform for StandardScaler {
    fn n_features(&self) -> usize {
        self.mean.len()
    }

    fn transform(&self, features: &[f64]) -> Result<Vec<f64>, BackendError> {
        check_input(features, self.n_features())?;
        let out: Vec<f64> = features
            .iter()
            .zip(self.mean.iter().zip(self.scale.iter()))
            .map(|(x, (m, s))| {
                // constant column at fit time
                let s = if *s == 0.0 { 1.0 } else { *s };
                (x - m) / s
            })
            .collect();
        check_finite(&out)?;
        Ok(out)
    }

    fn backend_name(&self) -> &str {
        "standard_scaler"
    }
}

/// Min-max scaling: `z = x * scale + min`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MinMaxScaler {
    pub min: Vec<f64>,
    pub scale: Vec<f64>,
}

impl MinMaxScaler {
    pub fn new(min: Vec<f64>, scale: Vec<f64>) -> Result<Self, BackendError> {
        let scaler = Self { min, scale };
        scaler.validate()?;
        Ok(scaler)
    }

    pub fn validate(&self) -> Result<(), BackendError> {
        if self.min.len() != self.scale.len() {
            return Err(BackendError::DimensionMismatch {
                expected: self.min.len(),
                got: self.scale.len(),
            });
        }
        check_finite(&self.min)?;
        check_finite(&self.scale)
    }
}

impl Transform for MinMaxScaler {
    fn n_features(&self) -> usize {
        self.min.len()
    }

    fn transform(&self, features: &[f64]) -> Result<Vec<f64>, BackendError> {
        check_input(features, self.n_features())?;
        let out: Vec<f64> = features
            .iter()
            .zip(self.min.iter().zip(self.scale.iter()))
            .map(|(x, (m, s))| x * s + m)
            .collect();
        check_finite(&out)?;
        Ok(out)
    }

    fn backend_name(&self) -> &str {
        "min_max_scaler"
    }
}
