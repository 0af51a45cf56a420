//! Forest Regressor - averaged regression trees
//!
//! Trees use the flat node-array layout common to tree exporters: node `i`
//! is a leaf when `children_left[i] == -1`; otherwise samples with
//! `x[feature[i]] <= threshold[i]` go left.

use serde::{Deserialize, Serialize};

use super::inference::{ModelError, Regressor};

/// Leaf marker in `children_left` / `children_right`
pub const TREE_LEAF: i64 = -1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegressionTree {
    pub children_left: Vec<i64>,
    pub children_right: Vec<i64>,
    pub feature: Vec<i64>,
    pub threshold: Vec<f64>,
    pub value: Vec<f64>,
}

impl RegressionTree {
    pub fn node_count(&self) -> usize {
        self.value.len()
    }

    /// Structural checks so `predict` can walk without bounds surprises.
    /// Children must point forward, which also rules out cycles.
    pub fn validate(&self, n_features: usize) -> Result<(), String> {
        let n = self.node_count();
        if n == 0 {
            return Err("tree has no nodes".into());
        }
        if [self.children_left.len(), self.children_right.len(), self.feature.len(), self.threshold.len()]
            .iter()
            .any(|&len| len != n)
        {
            return Err("tree arrays differ in length".into());
        }

        for i in 0..n {
            let (left, right) = (self.children_left[i], self.children_right[i]);

            if left == TREE_LEAF || right == TREE_LEAF {
                if left != right {
                    return Err(format!("node {i} has exactly one child"));
                }
                if !self.value[i].is_finite() {
                    return Err(format!("leaf {i} has a non-finite value"));
                }
                continue;
            }

            for child in [left, right] {
                if child <= i as i64 || child as usize >= n {
                    return Err(format!("node {i} has invalid child {child}"));
                }
            }

            if self.feature[i] < 0 || self.feature[i] as usize >= n_features {
                return Err(format!("node {i} splits on unknown feature {}", self.feature[i]));
            }
            if self.threshold[i].is_nan() {
                return Err(format!("node {i} has a NaN threshold"));
            }
        }

        Ok(())
    }

    /// Walk from the root to a leaf
    pub fn predict(&self, features: &[f64]) -> f64 {
        let mut node = 0usize;

        while self.children_left[node] != TREE_LEAF {
            let x = features[self.feature[node] as usize];
            node = if x <= self.threshold[node] {
                self.children_left[node] as usize
            } else {
                self.children_right[node] as usize
            };
        }

        self.value[node]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForestRegressor {
    pub n_features: usize,
    pub trees: Vec<RegressionTree>,
}

impl ForestRegressor {
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.trees.is_empty() {
            return Err(ModelError::InvalidArtifact("forest has no trees".into()));
        }

        for (index, tree) in self.trees.iter().enumerate() {
            tree.validate(self.n_features)
                .map_err(|e| ModelError::InvalidArtifact(format!("tree {index}: {e}")))?;
        }

        Ok(())
    }
}

impl Regressor for ForestRegressor {
    fn kind(&self) -> &'static str {
        "forest"
    }

    fn n_features(&self) -> usize {
        self.n_features
    }

    fn predict(&self, features: &[f64]) -> Result<f64, ModelError> {
        if features.len() != self.n_features {
            return Err(ModelError::FeatureCount {
                expected: self.n_features,
                actual: features.len(),
            });
        }

        let sum: f64 = self.trees.iter().map(|tree| tree.predict(features)).sum();
        Ok(sum / self.trees.len() as f64)
    }
}
