//! Binary logistic regression.

use crate::error::AppError;

#[derive(Debug, Clone)]
pub struct LogisticModel {
    coefficients: Vec<f64>,
    intercept: f64,
}

impl LogisticModel {
    pub fn new(coefficients: Vec<f64>, intercept: f64, n_features: usize) -> Result<Self, AppError> {
        if coefficients.len() != n_features {
            return Err(AppError::invalid_artifact(format!(
                "Logistic model has {} coefficients but the encoded width is {n_features}.",
                coefficients.len()
            )));
        }
        if !intercept.is_finite() || coefficients.iter().any(|c| !c.is_finite()) {
            return Err(AppError::invalid_artifact("Logistic model has non-finite parameters."));
        }
        Ok(Self {
            coefficients,
            intercept,
        })
    }

    pub fn n_coefficients(&self) -> usize {
        self.coefficients.len()
    }

    pub fn predict_proba(&self, x: &[f64]) -> [f64; 2] {
        let z = self.intercept
            + self
                .coefficients
                .iter()
                .zip(x)
                .map(|(w, v)| w * v)
                .sum::<f64>();
        let p1 = sigmoid(z);
        [1.0 - p1, p1]
    }
}

/// Logistic function, stable for large `|z|`.
fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}
