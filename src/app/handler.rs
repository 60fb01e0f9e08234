//! Prediction handler shared by the CLI and TUI front-ends.
//!
//! input -> record -> predict + predict_probability -> result
//!
//! The front-ends only differ in how they collect the input and present the
//! result.

use crate::domain::{PassengerInput, PredictionResult};
use crate::error::AppError;
use crate::models::Classifier;

/// Run one prediction for `input`.
///
/// The reported probability is always the survived class (index 1), whichever
/// label the classifier picks.
pub fn handle_submit(
    classifier: &dyn Classifier,
    input: &PassengerInput,
) -> Result<PredictionResult, AppError> {
    let record = input.to_record();
    let label = classifier.predict(&record)?;
    let proba = classifier.predict_probability(&record)?;

    let survival_probability = proba[1];
    if !(0.0..=1.0).contains(&survival_probability) {
        return Err(AppError::prediction(format!(
            "Model returned a survival probability outside [0, 1]: {survival_probability}"
        )));
    }

    Ok(PredictionResult {
        survived: label == 1,
        survival_probability,
    })
}
