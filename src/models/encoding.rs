//! Record → feature vector encoding declared by the artifact.

use crate::domain::Record;
use crate::error::AppError;
use crate::models::artifact::{ColumnSpec, Encoding};

/// Column encoders in training order.
#[derive(Debug, Clone)]
pub struct FeatureEncoder {
    columns: Vec<ColumnSpec>,
    width: usize,
}

impl FeatureEncoder {
    pub fn new(columns: Vec<ColumnSpec>) -> Result<Self, AppError> {
        if columns.is_empty() {
            return Err(AppError::invalid_artifact("Artifact declares no input columns."));
        }
        for (idx, col) in columns.iter().enumerate() {
            if columns[..idx].iter().any(|c| c.name == col.name) {
                return Err(AppError::invalid_artifact(format!(
                    "Artifact declares column '{}' twice.",
                    col.name
                )));
            }
            match &col.encoding {
                Encoding::Numeric { scale, offset } => {
                    if !(scale.is_finite() && offset.is_finite()) || *scale == 0.0 {
                        return Err(AppError::invalid_artifact(format!(
                            "Column '{}' has an invalid numeric scaling.",
                            col.name
                        )));
                    }
                }
                Encoding::OneHot { categories } => {
                    if categories.is_empty() {
                        return Err(AppError::invalid_artifact(format!(
                            "Column '{}' has no one-hot categories.",
                            col.name
                        )));
                    }
                }
            }
        }

        let width = columns.iter().map(|c| c.encoding.width()).sum();
        Ok(Self { columns, width })
    }

    /// Total number of encoded features.
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn columns(&self) -> &[ColumnSpec] {
        &self.columns
    }

    /// Encode one record.
    ///
    /// Columns are looked up by exact name; a column the artifact expects but the
    /// record lacks is a prediction error, as is a category the encoder never saw.
    pub fn encode(&self, record: &Record) -> Result<Vec<f64>, AppError> {
        let mut out = Vec::with_capacity(self.width);
        for col in &self.columns {
            let value = record.get(&col.name).ok_or_else(|| {
                AppError::prediction(format!(
                    "Input is missing column '{}' required by the model (have: {}).",
                    col.name,
                    record.column_names().join(", ")
                ))
            })?;

            match &col.encoding {
                Encoding::Numeric { offset, scale } => {
                    let x = value.as_f64().ok_or_else(|| {
                        AppError::prediction(format!(
                            "Column '{}' expects a number, got '{value}'.",
                            col.name
                        ))
                    })?;
                    out.push((x - offset) / scale);
                }
                Encoding::OneHot { categories } => {
                    let label = value.as_category();
                    if !categories.iter().any(|c| *c == label) {
                        return Err(AppError::prediction(format!(
                            "Column '{}' has unknown category '{label}' (known: {}).",
                            col.name,
                            categories.join(", ")
                        )));
                    }
                    out.extend(categories.iter().map(|c| if *c == label { 1.0 } else { 0.0 }));
                }
            }
        }
        Ok(out)
    }
}
