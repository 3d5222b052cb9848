//! Random forest of binary decision trees stored as flat node arrays.
//!
//! Node `i` is a leaf when `children_left[i] == children_right[i] == -1`;
//! otherwise descent goes left when `z[feature[i]] <= threshold[i]`.
//! `value[i]` holds the `[negative, positive]` sample weights at the node.

use serde::{Deserialize, Serialize};

use super::logistic::default_threshold;
use crate::backend::{
    check_input, check_threshold, BackendError, ClassLabel, Classification, Classify,
};

const LEAF: i64 = -1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTree {
    pub children_left: Vec<i64>,
    pub children_right: Vec<i64>,
    pub feature: Vec<i64>,
    pub threshold: Vec<f64>,
    pub value: Vec<[f64; 2]>,
}

impl DecisionTree {
    pub fn node_count(&self) -> usize {
        self.children_left.len()
    }

    fn is_leaf(&self, node: usize) -> bool {
        self.children_left[node] == LEAF && self.children_right[node] == LEAF
    }

    /// Children always follow their parent in the arrays, which rules out cycles.
    pub fn validate(&self, n_features: usize) -> Result<(), BackendError> {
        let n = self.node_count();
        if n == 0 {
            return Err(BackendError::InvalidParameter("empty decision tree".into()));
        }
        for (name, len) in [
            ("children_right", self.children_right.len()),
            ("feature", self.feature.len()),
            ("threshold", self.threshold.len()),
            ("value", self.value.len()),
        ] {
            if len != n {
                return Err(BackendError::InvalidParameter(format!(
                    "{name} has {len} entries, expected {n}"
                )));
            }
        }

        for node in 0..n {
            if self.is_leaf(node) {
                let [neg, pos] = self.value[node];
                if !(neg.is_finite() && pos.is_finite()) || neg < 0.0 || pos < 0.0 {
                    return Err(BackendError::InvalidParameter(format!(
                        "leaf {node} has invalid class weights {:?}",
                        self.value[node]
                    )));
                }
                if neg + pos <= 0.0 {
                    return Err(BackendError::InvalidParameter(format!(
                        "leaf {node} has no samples"
                    )));
                }
                continue;
            }

            for child in [self.children_left[node], self.children_right[node]] {
                let valid = usize::try_from(child)
                    .map(|c| c > node && c < n)
                    .unwrap_or(false);
                if !valid {
                    return Err(BackendError::InvalidParameter(format!(
                        "node {node} has invalid child {child}"
                    )));
                }
            }
            let feature_ok = usize::try_from(self.feature[node])
                .map(|f| f < n_features)
                .unwrap_or(false);
            if !feature_ok {
                return Err(BackendError::InvalidParameter(format!(
                    "node {node} splits on unknown feature {}",
                    self.feature[node]
                )));
            }
            if !self.threshold[node].is_finite() {
                return Err(BackendError::InvalidParameter(format!(
                    "node {node} has non-finite threshold"
                )));
            }
        }
        Ok(())
    }

    /// Positive-class fraction at the leaf reached by `features`.
    pub fn predict_positive(&self, features: &[f64]) -> Result<f64, BackendError> {
        let n = self.node_count();
        let ragged = [
            self.children_right.len(),
            self.feature.len(),
            self.threshold.len(),
            self.value.len(),
        ]
        .iter()
        .any(|&len| len != n);
        if ragged {
            return Err(BackendError::InvalidParameter(
                "decision tree arrays differ in length".into(),
            ));
        }

        let mut node = 0usize;
        // a valid tree reaches a leaf in fewer than node_count steps
        for _ in 0..self.node_count() {
            if self.is_leaf(node) {
                let [neg, pos] = self.value[node];
                return Ok(pos / (neg + pos));
            }
            let feature = self.index(self.feature[node], features.len())?;
            let next = if features[feature] <= self.threshold[node] {
                self.children_left[node]
            } else {
                self.children_right[node]
            };
            node = self.index(next, self.node_count())?;
        }
        Err(BackendError::InvalidParameter(
            "decision tree descent did not reach a leaf".into(),
        ))
    }

    fn index(&self, raw: i64, bound: usize) -> Result<usize, BackendError> {
        usize::try_from(raw)
            .ok()
            .filter(|&i| i < bound)
            .ok_or_else(|| BackendError::InvalidParameter(format!("index {raw} out of range")))
    }
}

/// Averages the positive-class fraction of every tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomForest {
    pub n_features: usize,
    pub trees: Vec<DecisionTree>,
    #[serde(default = "default_threshold")]
    pub threshold: f64,
}

impl RandomForest {
    pub fn new(n_features: usize, trees: Vec<DecisionTree>) -> Result<Self, BackendError> {
        let forest = Self {
            n_features,
            trees,
            threshold: default_threshold(),
        };
        forest.validate()?;
        Ok(forest)
    }

    pub fn validate(&self) -> Result<(), BackendError> {
        if self.trees.is_empty() {
            return Err(BackendError::InvalidParameter("forest has no trees".into()));
        }
        for tree in &self.trees {
            tree.validate(self.n_features)?;
        }
        check_threshold(self.threshold)
    }
}

impl Classify for RandomForest {
    fn n_features(&self) -> usize {
        self.n_features
    }

    fn classify(&self, features: &[f64]) -> Result<Classification, BackendError> {
        check_input(features, self.n_features)?;
        if self.trees.is_empty() {
            return Err(BackendError::InvalidParameter("forest has no trees".into()));
        }
        let mut sum = 0.0;
        for tree in &self.trees {
            sum += tree.predict_positive(features)?;
        }
        let probability = (sum / self.trees.len() as f64).clamp(0.0, 1.0);
        Ok(Classification {
            label: ClassLabel::from_probability(probability, self.threshold),
            probability,
        })
    }

    fn backend_name(&self) -> &str {
        "random_forest"
    }
}
