//! Random forest of binary decision trees.
//!
//! Each tree maps a feature vector to a leaf holding per-class weights. The leaf
//! weights are normalized to probabilities per tree and the forest averages
//! them, so every tree has the same vote regardless of its leaf sample counts.

use crate::error::AppError;
use crate::models::artifact::{NodeSpec, TreeSpec};

#[derive(Debug, Clone)]
enum Node {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        proba: [f64; 2],
    },
}

#[derive(Debug, Clone)]
struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    fn from_spec(spec: &TreeSpec, tree_idx: usize, n_features: usize) -> Result<Self, AppError> {
        if spec.nodes.is_empty() {
            return Err(AppError::invalid_artifact(format!("Tree {tree_idx} has no nodes.")));
        }

        let n_nodes = spec.nodes.len();
        let mut nodes = Vec::with_capacity(n_nodes);
        for (idx, node) in spec.nodes.iter().enumerate() {
            let invalid = |what: String| {
                AppError::invalid_artifact(format!("Tree {tree_idx}, node {idx}: {what}."))
            };
            match *node {
                NodeSpec::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    if feature >= n_features {
                        return Err(invalid(format!(
                            "feature index {feature} exceeds encoded width {n_features}"
                        )));
                    }
                    if !threshold.is_finite() {
                        return Err(invalid("threshold is not finite".to_string()));
                    }
                    // Children must come after their parent; this rules out cycles.
                    for child in [left, right] {
                        if child <= idx || child >= n_nodes {
                            return Err(invalid(format!("child index {child} out of range")));
                        }
                    }
                    nodes.push(Node::Split {
                        feature,
                        threshold,
                        left,
                        right,
                    });
                }
                NodeSpec::Leaf { value } => {
                    let total = value[0] + value[1];
                    if value.iter().any(|v| !v.is_finite() || *v < 0.0)
                        || !total.is_finite()
                        || total <= 0.0
                    {
                        return Err(invalid(format!("leaf weights {value:?} are not a distribution")));
                    }
                    nodes.push(Node::Leaf {
                        proba: [value[0] / total, value[1] / total],
                    });
                }
            }
        }

        Ok(Self { nodes })
    }

    fn leaf_proba(&self, x: &[f64]) -> [f64; 2] {
        let mut idx = 0;
        loop {
            match &self.nodes[idx] {
                Node::Leaf { proba } => return *proba,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    idx = if x[*feature] <= *threshold { *left } else { *right };
                }
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct RandomForest {
    trees: Vec<Tree>,
    n_features: usize,
}

impl RandomForest {
    pub fn from_spec(trees: &[TreeSpec], n_features: usize) -> Result<Self, AppError> {
        if trees.is_empty() {
            return Err(AppError::invalid_artifact("Random forest has no trees."));
        }
        let trees = trees
            .iter()
            .enumerate()
            .map(|(idx, spec)| Tree::from_spec(spec, idx, n_features))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { trees, n_features })
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    /// Average class probabilities across trees.
    ///
    /// # Panics
    /// Panics if `x` is shorter than the encoded width the forest was built for.
    pub fn predict_proba(&self, x: &[f64]) -> [f64; 2] {
        assert!(x.len() >= self.n_features, "feature vector too short");
        let mut sum = [0.0, 0.0];
        for tree in &self.trees {
            let p = tree.leaf_proba(x);
            sum[0] += p[0];
            sum[1] += p[1];
        }
        let n = self.trees.len() as f64;
        [sum[0] / n, sum[1] / n]
    }
}
