//! Decision tree exported as JSON in the sklearn `tree_` array layout.
//!
//! Node `i` is a leaf when `children_left[i] == -1`; otherwise go left when
//! `x[feature[i]] <= threshold[i]`. A leaf's class is the argmax of `value[i]`.

use super::Classifier;
use crate::error::ModelError;
use crate::features::EncodedVector;
use serde::Deserialize;
use std::path::Path;

const LEAF: i64 = -1;

#[derive(Debug, Clone, Deserialize)]
pub struct TreeClassifier {
    n_features: usize,
    children_left: Vec<i64>,
    children_right: Vec<i64>,
    feature: Vec<i64>,
    threshold: Vec<f64>,
    /// Per node class weights, `[n_nodes][n_classes]`
    value: Vec<Vec<f64>>,
}

impl TreeClassifier {
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        let data = std::fs::read(path).map_err(|e| ModelError::Load {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let tree: TreeClassifier = serde_json::from_slice(&data).map_err(|e| ModelError::Load {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        tree.validate()?;
        tracing::info!(path = %path.display(), nodes = tree.node_count(), "decision tree loaded");
        Ok(tree)
    }

    pub fn from_json(json: &str) -> Result<Self, ModelError> {
        let tree: TreeClassifier =
            serde_json::from_str(json).map_err(|e| ModelError::InvalidTree(e.to_string()))?;
        tree.validate()?;
        Ok(tree)
    }

    pub fn node_count(&self) -> usize {
        self.children_left.len()
    }

    /// Children must come after their parent, which rules out cycles.
    fn validate(&self) -> Result<(), ModelError> {
        let n = self.node_count();
        if n == 0 {
            return Err(ModelError::InvalidTree("tree has no nodes".into()));
        }
        if [
            self.children_right.len(),
            self.feature.len(),
            self.threshold.len(),
            self.value.len(),
        ]
        .iter()
        .any(|&len| len != n)
        {
            return Err(ModelError::InvalidTree("node arrays differ in length".into()));
        }
        let classes = self.value[0].len();
        for i in 0..n {
            if self.value[i].is_empty() {
                return Err(ModelError::InvalidTree(format!("node {i} has no class weights")));
            }
            if self.value[i].len() != classes {
                return Err(ModelError::InvalidTree(format!(
                    "node {i} has {} class weights, expected {classes}",
                    self.value[i].len()
                )));
            }
            let (left, right) = (self.children_left[i], self.children_right[i]);
            if left == LEAF {
                continue;
            }
            let in_range = |c: i64| c > i as i64 && (c as usize) < n;
            if !in_range(left) || !in_range(right) {
                return Err(ModelError::InvalidTree(format!("node {i} has invalid children")));
            }
            let f = self.feature[i];
            if f < 0 || f as usize >= self.n_features {
                return Err(ModelError::InvalidTree(format!("node {i} splits on feature {f}")));
            }
        }
        Ok(())
    }

    fn classify(&self, x: &[f32]) -> usize {
        let mut node = 0usize;
        while self.children_left[node] != LEAF {
            let f = self.feature[node] as usize;
            node = if f64::from(x[f]) <= self.threshold[node] {
                self.children_left[node] as usize
            } else {
                self.children_right[node] as usize
            };
        }
        argmax(&self.value[node])
    }
}

/// First index of the largest weight.
fn argmax(weights: &[f64]) -> usize {
    let mut best = 0;
    for (i, w) in weights.iter().enumerate() {
        if *w > weights[best] {
            best = i;
        }
    }
    best
}

impl Classifier for TreeClassifier {
    fn predict(&self, inputs: &[EncodedVector]) -> Result<Vec<usize>, ModelError> {
        inputs
            .iter()
            .map(|v| {
                if v.len() != self.n_features {
                    return Err(ModelError::InputWidth {
                        expected: self.n_features,
                        actual: v.len(),
                    });
                }
                Ok(self.classify(v.as_slice()))
            })
            .collect()
    }

    fn n_features(&self) -> Option<usize> {
        Some(self.n_features)
    }

    fn n_classes(&self) -> Option<usize> {
        Some(self.value[0].len())
    }

    fn backend(&self) -> &'static str {
        "decision-tree"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // x0 <= 0.5 → class 0, else x1 <= 10 → class 1, else class 2
    const TREE: &str = r#"{
        "n_features": 2,
        "children_left":  [1, -1, 3, -1, -1],
        "children_right": [2, -1, 4, -1, -1],
        "feature":        [0, -2, 1, -2, -2],
        "threshold":      [0.5, -2.0, 10.0, -2.0, -2.0],
        "value": [[1, 1, 1], [5, 0, 0], [0, 2, 2], [0, 3, 1], [0, 0, 4]]
    }"#;

    #[test]
    fn walks_to_leaves() {
        let t = TreeClassifier::from_json(TREE).unwrap();
        let xs = vec![
            EncodedVector::from_values(vec![0.0, 99.0]),
            EncodedVector::from_values(vec![1.0, 10.0]),
            EncodedVector::from_values(vec![1.0, 10.5]),
        ];
        assert_eq!(t.predict(&xs).unwrap(), vec![0, 1, 2]);
    }

    #[test]
    fn wrong_width_rejected() {
        let t = TreeClassifier::from_json(TREE).unwrap();
        let err = t.predict(&[EncodedVector::from_values(vec![0.0])]).unwrap_err();
        assert!(matches!(err, ModelError::InputWidth { expected: 2, actual: 1 }));
    }

    #[test]
    fn cyclic_tree_rejected() {
        let bad = r#"{"n_features": 1, "children_left": [0], "children_right": [0],
                      "feature": [0], "threshold": [0.0], "value": [[1]]}"#;
        assert!(matches!(TreeClassifier::from_json(bad), Err(ModelError::InvalidTree(_))));
    }

    #[test]
    fn ragged_class_weights_rejected() {
        let bad = r#"{"n_features": 1, "children_left": [1, -1, -1], "children_right": [2, -1, -1],
                      "feature": [0, -2, -2], "threshold": [0.5, -2.0, -2.0],
                      "value": [[1, 1], [2, 0], [0, 1, 1]]}"#;
        assert!(matches!(TreeClassifier::from_json(bad), Err(ModelError::InvalidTree(_))));
    }

    #[test]
    fn reports_class_count() {
        let t = TreeClassifier::from_json(TREE).unwrap();
        assert_eq!(t.n_classes(), Some(3));
    }
}
