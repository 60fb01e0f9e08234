//! Text formatting shared by the TUI and the one-shot CLI.
//!
//! Keeping the wording here means the two front-ends can never disagree on what
//! a result says.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::{PassengerInput, PredictionResult};
use crate::error::AppError;
use crate::models::Predictor;

pub const SURVIVED_LABEL: &str = "SURVIVED";
pub const DID_NOT_SURVIVE_LABEL: &str = "DID NOT SURVIVE";

/// Format a probability as a percentage with exactly one decimal digit.
///
/// `0.1416` → `14.2%`.
pub fn format_probability(p: f64) -> String {
    format!("{:.1}%", p * 100.0)
}

/// Headline for a result: `Result: SURVIVED` / `Result: DID NOT SURVIVE`.
pub fn result_headline(result: &PredictionResult) -> String {
    let label = if result.survived {
        SURVIVED_LABEL
    } else {
        DID_NOT_SURVIVE_LABEL
    };
    format!("Result: {label}")
}

/// Detail line carrying the survival probability (same wording on both branches).
pub fn result_detail(result: &PredictionResult) -> String {
    format!(
        "This passenger had a {} chance of survival.",
        format_probability(result.survival_probability)
    )
}

/// One-line summary of the passenger, e.g. `3rd class, male, 25, fare 15.00, Southampton`.
pub fn format_passenger(input: &PassengerInput) -> String {
    format!(
        "{} class, {}, {}, fare {:.2}, {}",
        input.class.display_name(),
        input.sex.code(),
        input.age,
        input.fare,
        input.embarked.display_name()
    )
}

/// JSON document printed by `titanic predict --json`.
#[derive(Debug, Serialize)]
struct PredictionReport<'a> {
    input: &'a PassengerInput,
    survived: bool,
    survival_probability: f64,
    survival_percent: String,
    model: &'a str,
    generated_at: DateTime<Utc>,
}

pub fn format_prediction_json(
    input: &PassengerInput,
    result: &PredictionResult,
    model_name: &str,
) -> Result<String, AppError> {
    let report = PredictionReport {
        input,
        survived: result.survived,
        survival_probability: result.survival_probability,
        survival_percent: format_probability(result.survival_probability),
        model: model_name,
        generated_at: Utc::now(),
    };
    serde_json::to_string_pretty(&report)
        .map_err(|e| AppError::io(format!("Failed to serialize prediction: {e}")))
}

/// Description of a loaded model for `titanic info`.
pub fn format_model_info(predictor: &Predictor, path: &Path) -> String {
    let mut out = String::new();
    out.push_str(&format!("Model: {}\n", predictor.name()));
    out.push_str(&format!("Artifact: {}\n", path.display()));
    out.push_str(&format!("Estimator: {}\n", predictor.estimator_summary()));
    out.push_str(&format!("Encoded features: {}\n", predictor.n_features()));
    out.push_str("Columns:\n");
    for col in predictor.columns() {
        out.push_str(&format!("  {:<10} {}\n", col.name, col.encoding.describe()));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn probability_has_one_decimal() {
        assert_eq!(format_probability(0.0), "0.0%");
        assert_eq!(format_probability(1.0), "100.0%");
        assert_eq!(format_probability(0.141689), "14.2%");
        assert_eq!(format_probability(0.81127), "81.1%");
        assert_eq!(format_probability(0.5), "50.0%");
    }

    #[test]
    fn both_branches_report_the_survival_probability() {
        let survived = PredictionResult {
            survived: true,
            survival_probability: 0.732,
        };
        let lost = PredictionResult {
            survived: false,
            survival_probability: 0.268,
        };
        assert_eq!(result_headline(&survived), "Result: SURVIVED");
        assert_eq!(result_headline(&lost), "Result: DID NOT SURVIVE");
        assert_eq!(result_detail(&survived), "This passenger had a 73.2% chance of survival.");
        assert_eq!(result_detail(&lost), "This passenger had a 26.8% chance of survival.");
    }

    #[test]
    fn json_report_carries_input_and_result() {
        let result = PredictionResult {
            survived: false,
            survival_probability: 0.25,
        };
        let json = format_prediction_json(&PassengerInput::default(), &result, "Forest").unwrap();
        let v: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(v["input"]["class"], 3);
        assert_eq!(v["input"]["embarked"], "S");
        assert_eq!(v["survived"], false);
        assert_eq!(v["survival_probability"], 0.25);
        assert_eq!(v["survival_percent"], "25.0%");
        assert_eq!(v["model"], "Forest");
        assert!(chrono::DateTime::parse_from_rfc3339(v["generated_at"].as_str().unwrap()).is_ok());
    }

    #[test]
    fn passenger_summary_uses_display_names() {
        assert_eq!(
            format_passenger(&PassengerInput::default()),
            "3rd class, male, 25, fare 15.00, Southampton"
        );
    }
}
