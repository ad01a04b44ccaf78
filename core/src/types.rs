//! Shared primitive types used across the whole pipeline.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Positive-class probability returned by a classifier, in [0, 1].
pub type Probability = f64;

/// Row id assigned by the prediction store.
pub type RowId = i64;

/// Binary campaign-participation label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Label {
    WillNotJoin,
    WillJoin,
}

impl Label {
    /// Integer form stored in the `Prediction` column.
    pub fn as_int(self) -> i64 {
        match self {
            Label::WillNotJoin => 0,
            Label::WillJoin    => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Education {
    Basic,
    Graduation,
    Master,
    PhD,
    #[serde(rename = "2n Cycle")]
    TwoNCycle,
}

impl Education {
    pub const ALL: [Education; 5] = [
        Education::Basic,
        Education::Graduation,
        Education::Master,
        Education::PhD,
        Education::TwoNCycle,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Education::Basic      => "Basic",
            Education::Graduation => "Graduation",
            Education::Master     => "Master",
            Education::PhD        => "PhD",
            Education::TwoNCycle  => "2n Cycle",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|e| e.as_str() == s)
    }
}

impl fmt::Display for Education {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MaritalStatus {
    Single,
    Together,
    Married,
    Divorced,
    Widow,
    Alone,
    Absurd,
    #[serde(rename = "YOLO")]
    Yolo,
}

impl MaritalStatus {
    pub const ALL: [MaritalStatus; 8] = [
        MaritalStatus::Single,
        MaritalStatus::Together,
        MaritalStatus::Married,
        MaritalStatus::Divorced,
        MaritalStatus::Widow,
        MaritalStatus::Alone,
        MaritalStatus::Absurd,
        MaritalStatus::Yolo,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            MaritalStatus::Single   => "Single",
            MaritalStatus::Together => "Together",
            MaritalStatus::Married  => "Married",
            MaritalStatus::Divorced => "Divorced",
            MaritalStatus::Widow    => "Widow",
            MaritalStatus::Alone    => "Alone",
            MaritalStatus::Absurd   => "Absurd",
            MaritalStatus::Yolo     => "YOLO",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.as_str() == s)
    }
}

impl fmt::Display for MaritalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single cell of a feature record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FeatureValue {
    Integer(i64),
    Real(f64),
    Text(String),
}

impl FeatureValue {
    pub fn kind(&self) -> &'static str {
        match self {
            FeatureValue::Integer(_) => "integer",
            FeatureValue::Real(_)    => "real",
            FeatureValue::Text(_)    => "text",
        }
    }

    /// Numeric view; `None` for text.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FeatureValue::Integer(v) => Some(*v as f64),
            FeatureValue::Real(v)    => Some(*v),
            FeatureValue::Text(_)    => None,
        }
    }
}
