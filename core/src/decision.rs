//! Decision rule: probability to label at a calibrated operating point.

use crate::types::{Label, Probability};
use serde::{Deserialize, Serialize};

/// Operating point the shipped model was tuned for. Not 0.5.
pub const DEFAULT_THRESHOLD: f64 = 0.305;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DecisionRule {
    pub threshold: f64,
}

impl DecisionRule {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    /// `WillJoin` iff `p >= threshold`; the boundary itself is positive.
    pub fn decide(&self, p: Probability) -> Label {
        if p >= self.threshold {
            Label::WillJoin
        } else {
            Label::WillNotJoin
        }
    }
}

impl Default for DecisionRule {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD)
    }
}
