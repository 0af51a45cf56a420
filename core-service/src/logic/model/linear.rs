//! Linear Regressor - `y = intercept + Σ coefᵢ·xᵢ`

use serde::{Deserialize, Serialize};

use super::inference::{ModelError, Regressor};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearRegressor {
    pub coefficients: Vec<f64>,
    #[serde(default)]
    pub intercept: f64,
}

impl LinearRegressor {
    pub fn new(coefficients: Vec<f64>, intercept: f64) -> Self {
        Self { coefficients, intercept }
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        if self.coefficients.is_empty() {
            return Err(ModelError::InvalidArtifact("linear model has no coefficients".into()));
        }
        if !self.intercept.is_finite() || self.coefficients.iter().any(|c| !c.is_finite()) {
            return Err(ModelError::InvalidArtifact("linear model has non-finite weights".into()));
        }
        Ok(())
    }
}

impl Regressor for LinearRegressor {
    fn kind(&self) -> &'static str {
        "linear"
    }

    fn n_features(&self) -> usize {
        self.coefficients.len()
    }

    fn predict(&self, features: &[f64]) -> Result<f64, ModelError> {
        if features.len() != self.coefficients.len() {
            return Err(ModelError::FeatureCount {
                expected: self.coefficients.len(),
                actual: features.len(),
            });
        }

        let dot: f64 = self.coefficients.iter().zip(features).map(|(c, x)| c * x).sum();
        Ok(self.intercept + dot)
    }
}
