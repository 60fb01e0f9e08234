//! Serialized model artifact schema.
//!
//! The artifact is a JSON export of a trained pipeline: per-column encoders
//! followed by a binary estimator. It is produced outside this application and
//! only ever read here.

use serde::{Deserialize, Serialize};

/// Highest artifact `format_version` this build understands.
pub const SUPPORTED_FORMAT_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub format_version: u32,
    /// Human-readable model name, shown in the footer.
    #[serde(default = "default_model_name")]
    pub name: String,
    /// Input columns in training order, with the encoding each one receives.
    pub columns: Vec<ColumnSpec>,
    pub estimator: EstimatorSpec,
}

fn default_model_name() -> String {
    "Unnamed classifier".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSpec {
    pub name: String,
    pub encoding: Encoding,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Encoding {
    /// One feature: `(x - offset) / scale`.
    Numeric {
        #[serde(default)]
        offset: f64,
        #[serde(default = "default_scale")]
        scale: f64,
    },
    /// One 0/1 feature per category, in the listed order.
    OneHot { categories: Vec<String> },
}

fn default_scale() -> f64 {
    1.0
}

impl Encoding {
    /// Number of features this column contributes.
    pub fn width(&self) -> usize {
        match self {
            Encoding::Numeric { .. } => 1,
            Encoding::OneHot { categories } => categories.len(),
        }
    }

    pub fn describe(&self) -> String {
        match self {
            Encoding::Numeric { offset, scale } => {
                if *offset == 0.0 && *scale == 1.0 {
                    "numeric".to_string()
                } else {
                    format!("numeric (x - {offset}) / {scale}")
                }
            }
            Encoding::OneHot { categories } => format!("one-hot [{}]", categories.join(", ")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EstimatorSpec {
    RandomForest { trees: Vec<TreeSpec> },
    Logistic { coefficients: Vec<f64>, intercept: f64 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeSpec {
    /// Nodes in array form; node 0 is the root.
    pub nodes: Vec<NodeSpec>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NodeSpec {
    /// Go to `left` when `x[feature] <= threshold`, else to `right`.
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    /// Per-class weights `[did not survive, survived]`.
    Leaf { value: [f64; 2] },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_forest_artifact() {
        let json = r#"{
            "format_version": 1,
            "name": "Random Forest Classifier",
            "columns": [
                {"name": "Pclass", "encoding": {"kind": "numeric"}},
                {"name": "Sex", "encoding": {"kind": "one_hot", "categories": ["female", "male"]}}
            ],
            "estimator": {
                "kind": "random_forest",
                "trees": [{"nodes": [
                    {"feature": 2, "threshold": 0.5, "left": 1, "right": 2},
                    {"value": [1.0, 3.0]},
                    {"value": [4.0, 1.0]}
                ]}]
            }
        }"#;

        let artifact: ModelArtifact = serde_json::from_str(json).unwrap();
        assert_eq!(artifact.columns.len(), 2);
        assert_eq!(
            artifact.columns[0].encoding,
            Encoding::Numeric { offset: 0.0, scale: 1.0 }
        );
        assert_eq!(artifact.columns[1].encoding.width(), 2);
        let EstimatorSpec::RandomForest { trees } = &artifact.estimator else {
            panic!("expected a forest");
        };
        assert_eq!(trees[0].nodes.len(), 3);
        assert_eq!(trees[0].nodes[1], NodeSpec::Leaf { value: [1.0, 3.0] });
    }

    #[test]
    fn missing_name_gets_a_placeholder() {
        let json = r#"{
            "format_version": 1,
            "columns": [],
            "estimator": {"kind": "logistic", "coefficients": [], "intercept": 0.0}
        }"#;
        let artifact: ModelArtifact = serde_json::from_str(json).unwrap();
        assert_eq!(artifact.name, "Unnamed classifier");
    }

    #[test]
    fn unknown_estimator_kind_is_rejected() {
        let json = r#"{
            "format_version": 1,
            "columns": [],
            "estimator": {"kind": "svm"}
        }"#;
        assert!(serde_json::from_str::<ModelArtifact>(json).is_err());
    }
}
