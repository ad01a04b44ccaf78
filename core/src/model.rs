//! Scorer: the pre-trained classification pipeline.
//!
//! The pipeline ships as a JSON artifact: the ColumnSpec it was trained
//! on, its operating threshold, ordinal encodings for text columns, and
//! the fitted estimator. Everything is validated once at load time so
//! that scoring can only fail on bad *input*, never on a bad artifact.

use crate::{
    decision::{DecisionRule, DEFAULT_THRESHOLD},
    error::{LoadError, ScoringError},
    schema::{AlignedRecord, ColumnSpec},
    types::{FeatureValue, Probability},
};
use serde::Deserialize;
use std::{collections::BTreeMap, path::Path};

/// The one capability the pipeline needs from a model.
pub trait Classifier {
    /// Columns the model was trained on, in order.
    fn columns(&self) -> &ColumnSpec;

    /// Positive-class probability for one aligned record.
    fn predict_proba(&self, record: &AlignedRecord) -> Result<Probability, ScoringError>;
}

// ── Artifact format ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct ModelArtifact {
    pub model_version: String,
    #[serde(default = "ColumnSpec::standard")]
    pub columns: ColumnSpec,
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    #[serde(default)]
    pub categorical: BTreeMap<String, Vec<String>>,
    pub estimator: Estimator,
}

fn default_threshold() -> f64 {
    DEFAULT_THRESHOLD
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Estimator {
    /// Averaged ensemble of binary trees.
    TreeEnsemble { trees: Vec<DecisionTree> },
    /// Standard-scaled logistic regression.
    Logistic {
        intercept:    f64,
        coefficients: Vec<f64>,
        #[serde(default)]
        scaler:       Option<StandardScaler>,
    },
}

#[derive(Debug, Clone, Deserialize)]
pub struct DecisionTree {
    pub nodes: Vec<TreeNode>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TreeNode {
    Split {
        feature:   usize,
        threshold: f64,
        left:      usize,
        right:     usize,
    },
    Leaf {
        value: f64,
    },
}

#[derive(Debug, Clone, Deserialize)]
pub struct StandardScaler {
    pub mean:  Vec<f64>,
    pub scale: Vec<f64>,
}

// ── Loaded model ─────────────────────────────────────────────────────────────

/// A validated artifact, ready to score.
#[derive(Debug, Clone)]
pub struct LoadedModel {
    pub model_version: String,
    columns:   ColumnSpec,
    threshold: f64,
    /// Per column: `Some(categories)` for text columns, `None` for numeric.
    encoders:  Vec<Option<Vec<String>>>,
    estimator: Estimator,
}

impl LoadedModel {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let display = path.display().to_string();
        let content = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: display.clone(),
            source,
        })?;
        let artifact: ModelArtifact = serde_json::from_str(&content)
            .map_err(|source| LoadError::Json { path: display.clone(), source })?;
        let model = Self::from_artifact(artifact)?;
        log::info!(
            "Loaded model '{}' from {display} ({} columns, threshold {})",
            model.model_version,
            model.columns.len(),
            model.threshold
        );
        Ok(model)
    }

    pub fn from_json_str(json: &str) -> Result<Self, LoadError> {
        let artifact: ModelArtifact = serde_json::from_str(json).map_err(|source| LoadError::Json {
            path: "<inline>".into(),
            source,
        })?;
        Self::from_artifact(artifact)
    }

    pub fn from_artifact(artifact: ModelArtifact) -> Result<Self, LoadError> {
        let n = artifact.columns.len();

        if !(0.0..=1.0).contains(&artifact.threshold) {
            return Err(invalid(format!("threshold {} outside [0, 1]", artifact.threshold)));
        }

        let mut encoders: Vec<Option<Vec<String>>> = vec![None; n];
        for (column, categories) in &artifact.categorical {
            let idx = artifact
                .columns
                .position(column)
                .ok_or_else(|| invalid(format!("categorical column '{column}' is not a model column")))?;
            if categories.is_empty() {
                return Err(invalid(format!("categorical column '{column}' has no categories")));
            }
            encoders[idx] = Some(categories.clone());
        }

        match &artifact.estimator {
            Estimator::TreeEnsemble { trees } => {
                if trees.is_empty() {
                    return Err(invalid("tree ensemble has no trees".into()));
                }
                for (t, tree) in trees.iter().enumerate() {
                    validate_tree(tree, n).map_err(|e| invalid(format!("tree {t}: {e}")))?;
                }
            }
            Estimator::Logistic { intercept, coefficients, scaler } => {
                if coefficients.len() != n {
                    return Err(invalid(format!(
                        "{} coefficients for {n} columns",
                        coefficients.len()
                    )));
                }
                if !intercept.is_finite() || coefficients.iter().any(|c| !c.is_finite()) {
                    return Err(invalid("non-finite logistic parameters".into()));
                }
                if let Some(s) = scaler {
                    if s.mean.len() != n || s.scale.len() != n {
                        return Err(invalid(format!("scaler length does not match {n} columns")));
                    }
                    if s.mean.iter().any(|m| !m.is_finite())
                        || s.scale.iter().any(|v| !v.is_finite() || *v <= 0.0)
                    {
                        return Err(invalid("scaler needs finite means and positive scales".into()));
                    }
                }
            }
        }

        Ok(Self {
            model_version: artifact.model_version,
            columns: artifact.columns,
            threshold: artifact.threshold,
            encoders,
            estimator: artifact.estimator,
        })
    }

    /// The operating point shipped with this artifact.
    pub fn decision_rule(&self) -> DecisionRule {
        DecisionRule::new(self.threshold)
    }

    /// Encode an aligned record into the estimator's numeric row.
    fn encode(&self, record: &AlignedRecord) -> Result<Vec<f64>, ScoringError> {
        let expected = self.columns.names();
        if record.columns().len() != expected.len() {
            return Err(ScoringError::ColumnCount {
                expected: expected.len(),
                actual: record.columns().len(),
            });
        }

        let mut row = Vec::with_capacity(expected.len());
        for (position, ((name, value), want)) in record.iter().zip(expected).enumerate() {
            if name != want.as_str() {
                return Err(ScoringError::ColumnMismatch {
                    position,
                    expected: want.clone(),
                    actual: name.to_string(),
                });
            }
            let x = match (&self.encoders[position], value) {
                (Some(categories), FeatureValue::Text(s)) => categories
                    .iter()
                    .position(|c| c == s)
                    .ok_or_else(|| ScoringError::UnknownCategory {
                        column: name.to_string(),
                        value: s.clone(),
                    })? as f64,
                (Some(_), other) => {
                    return Err(ScoringError::IncompatibleType {
                        column: name.to_string(),
                        expected: "text",
                        actual: other.kind(),
                    })
                }
                (None, FeatureValue::Text(_)) => {
                    return Err(ScoringError::IncompatibleType {
                        column: name.to_string(),
                        expected: "number",
                        actual: "text",
                    })
                }
                (None, numeric) => {
                    let x = numeric.as_f64().unwrap_or(f64::NAN);
                    if !x.is_finite() {
                        return Err(ScoringError::NonFinite { column: name.to_string() });
                    }
                    x
                }
            };
            row.push(x);
        }
        Ok(row)
    }
}

impl Classifier for LoadedModel {
    fn columns(&self) -> &ColumnSpec {
        &self.columns
    }

    fn predict_proba(&self, record: &AlignedRecord) -> Result<Probability, ScoringError> {
        let row = self.encode(record)?;

        let p = match &self.estimator {
            Estimator::TreeEnsemble { trees } => {
                let sum: f64 = trees.iter().map(|t| tree_leaf(t, &row)).sum();
                sum / trees.len() as f64
            }
            Estimator::Logistic { intercept, coefficients, scaler } => {
                let z = row.iter().enumerate().fold(*intercept, |acc, (i, x)| {
                    let scaled = match scaler {
                        Some(s) => (x - s.mean[i]) / s.scale[i],
                        None => *x,
                    };
                    acc + coefficients[i] * scaled
                });
                sigmoid(z)
            }
        };

        if !(0.0..=1.0).contains(&p) {
            return Err(ScoringError::InvalidProbability(p));
        }
        Ok(p)
    }
}

// ── Helpers ──────────────────────────────────────────────────────────────────

fn invalid(msg: String) -> LoadError {
    LoadError::InvalidArtifact(msg)
}

/// Children must point forward, which rules out cycles and guarantees
/// every walk from the root ends at a leaf.
fn validate_tree(tree: &DecisionTree, n_features: usize) -> Result<(), String> {
    if tree.nodes.is_empty() {
        return Err("no nodes".into());
    }
    let len = tree.nodes.len();
    for (i, node) in tree.nodes.iter().enumerate() {
        match node {
            TreeNode::Split { feature, threshold, left, right } => {
                if *feature >= n_features {
                    return Err(format!("node {i} splits on feature {feature}, only {n_features} columns"));
                }
                if !threshold.is_finite() {
                    return Err(format!("node {i} has a non-finite threshold"));
                }
                for child in [left, right] {
                    if *child <= i || *child >= len {
                        return Err(format!("node {i} has invalid child {child}"));
                    }
                }
            }
            TreeNode::Leaf { value } => {
                if !(0.0..=1.0).contains(value) {
                    return Err(format!("node {i} leaf value {value} outside [0, 1]"));
                }
            }
        }
    }
    Ok(())
}

fn tree_leaf(tree: &DecisionTree, row: &[f64]) -> f64 {
    let mut idx = 0;
    loop {
        match &tree.nodes[idx] {
            TreeNode::Leaf { value } => return *value,
            TreeNode::Split { feature, threshold, left, right } => {
                idx = if row[*feature] <= *threshold { *left } else { *right };
            }
        }
    }
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}
