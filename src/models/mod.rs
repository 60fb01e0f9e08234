//! Survival classifiers.
//!
//! The handler only sees the [`Classifier`] trait. [`Predictor`] implements it for
//! a loaded artifact: the artifact's column encoders followed by its estimator.

pub mod artifact;
pub mod encoding;
pub mod forest;
pub mod loader;
pub mod logistic;

pub use artifact::*;
pub use loader::PredictorLoader;

use crate::domain::Record;
use crate::error::AppError;

use encoding::FeatureEncoder;
use forest::RandomForest;
use logistic::LogisticModel;

/// Binary classifier over a single-row record.
pub trait Classifier: Send + Sync {
    /// Class probabilities `[p(did not survive), p(survived)]`.
    fn predict_probability(&self, record: &Record) -> Result<[f64; 2], AppError>;

    /// Predicted label: `1` when the survived class is strictly more likely.
    fn predict(&self, record: &Record) -> Result<u8, AppError> {
        let [p0, p1] = self.predict_probability(record)?;
        Ok(u8::from(p1 > p0))
    }
}

#[derive(Debug, Clone)]
enum Estimator {
    Forest(RandomForest),
    Logistic(LogisticModel),
}

/// A classifier built from a [`ModelArtifact`].
#[derive(Debug, Clone)]
pub struct Predictor {
    name: String,
    encoder: FeatureEncoder,
    estimator: Estimator,
}

impl Predictor {
    pub fn from_artifact(artifact: ModelArtifact) -> Result<Self, AppError> {
        if artifact.format_version == 0 || artifact.format_version > SUPPORTED_FORMAT_VERSION {
            return Err(AppError::invalid_artifact(format!(
                "Unsupported artifact format_version {} (supported: {SUPPORTED_FORMAT_VERSION}).",
                artifact.format_version
            )));
        }

        let encoder = FeatureEncoder::new(artifact.columns)?;
        let estimator = match artifact.estimator {
            EstimatorSpec::RandomForest { trees } => {
                Estimator::Forest(RandomForest::from_spec(&trees, encoder.width())?)
            }
            EstimatorSpec::Logistic {
                coefficients,
                intercept,
            } => Estimator::Logistic(LogisticModel::new(coefficients, intercept, encoder.width())?),
        };

        Ok(Self {
            name: artifact.name,
            encoder,
            estimator,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn columns(&self) -> &[ColumnSpec] {
        self.encoder.columns()
    }

    pub fn n_features(&self) -> usize {
        self.encoder.width()
    }

    /// One-line description of the estimator, e.g. `random forest (3 trees)`.
    pub fn estimator_summary(&self) -> String {
        match &self.estimator {
            Estimator::Forest(forest) => format!("random forest ({} trees)", forest.n_trees()),
            Estimator::Logistic(model) => {
                format!("logistic regression ({} coefficients)", model.n_coefficients())
            }
        }
    }
}

impl Classifier for Predictor {
    fn predict_probability(&self, record: &Record) -> Result<[f64; 2], AppError> {
        let x = self.encoder.encode(record)?;
        let proba = match &self.estimator {
            Estimator::Forest(forest) => forest.predict_proba(&x),
            Estimator::Logistic(model) => model.predict_proba(&x),
        };
        if proba.iter().any(|p| !p.is_finite()) {
            return Err(AppError::prediction("Model produced a non-finite probability."));
        }
        if proba.iter().any(|p| *p < 0.0) || (proba[0] + proba[1] - 1.0).abs() > 1e-6 {
            return Err(AppError::prediction(format!(
                "Model produced {proba:?}, which is not a probability distribution."
            )));
        }
        Ok(proba)
    }
}
