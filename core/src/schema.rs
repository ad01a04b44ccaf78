//! Column spec and the schema aligner.
//!
//! The aligner is the only path from a feature record to the scorer:
//! whatever columns come in, exactly the spec's columns go out, in order.

use crate::{error::LoadError, record::CUSTOMER_COLUMNS, types::FeatureValue};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// An ordered set of named cells. Duplicate names are not expected;
/// if present, the last occurrence wins during alignment.
pub type FeatureRecord = Vec<(String, FeatureValue)>;

/// Ordered feature names the scoring model was trained on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct ColumnSpec {
    columns: Vec<String>,
}

impl ColumnSpec {
    pub fn new(columns: Vec<String>) -> Result<Self, LoadError> {
        if columns.is_empty() {
            return Err(LoadError::InvalidColumnSpec("no columns".into()));
        }
        let mut seen = HashSet::new();
        for c in &columns {
            if !seen.insert(c.as_str()) {
                return Err(LoadError::InvalidColumnSpec(format!("duplicate column '{c}'")));
            }
        }
        Ok(Self { columns })
    }

    /// The 22 customer columns, in training order.
    pub fn standard() -> Self {
        Self {
            columns: CUSTOMER_COLUMNS.iter().map(|c| c.to_string()).collect(),
        }
    }

    pub fn names(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }
}

impl TryFrom<Vec<String>> for ColumnSpec {
    type Error = LoadError;

    fn try_from(columns: Vec<String>) -> Result<Self, Self::Error> {
        Self::new(columns)
    }
}

impl From<ColumnSpec> for Vec<String> {
    fn from(spec: ColumnSpec) -> Self {
        spec.columns
    }
}

/// A record whose columns are exactly a `ColumnSpec`, in its order.
/// Only `align` constructs one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlignedRecord {
    columns: Vec<String>,
    values:  Vec<FeatureValue>,
}

impl AlignedRecord {
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn get(&self, name: &str) -> Option<&FeatureValue> {
        self.columns
            .iter()
            .position(|c| c == name)
            .map(|i| &self.values[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FeatureValue)> {
        self.columns.iter().map(String::as_str).zip(self.values.iter())
    }
}

/// Value inserted for a spec column the record does not carry.
pub const MISSING_COLUMN_DEFAULT: FeatureValue = FeatureValue::Integer(0);

/// Project `record` onto `spec`: fill missing columns with 0,
/// drop columns the spec does not name, reorder to the spec's order.
pub fn align(record: FeatureRecord, spec: &ColumnSpec) -> AlignedRecord {
    let mut by_name: HashMap<String, FeatureValue> = record.into_iter().collect();

    let mut filled = Vec::new();
    let values: Vec<FeatureValue> = spec
        .names()
        .iter()
        .map(|name| {
            by_name.remove(name).unwrap_or_else(|| {
                filled.push(name.as_str());
                MISSING_COLUMN_DEFAULT
            })
        })
        .collect();

    if !filled.is_empty() {
        log::debug!("Aligner filled {} missing column(s): {}", filled.len(), filled.join(", "));
    }
    if !by_name.is_empty() {
        log::debug!("Aligner dropped {} extra column(s)", by_name.len());
    }

    AlignedRecord {
        columns: spec.names().to_vec(),
        values,
    }
}
