use thiserror::Error;

/// The model artifact, column spec, or app config could not be loaded.
/// Fatal: the process halts before accepting any submission.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Cannot read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed JSON in {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid model artifact: {0}")]
    InvalidArtifact(String),

    #[error("Invalid column spec: {0}")]
    InvalidColumnSpec(String),
}

/// The classifier rejected a record. Recoverable: reported per submission.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScoringError {
    #[error("Column mismatch at position {position}: model expects '{expected}', got '{actual}'")]
    ColumnMismatch {
        position: usize,
        expected: String,
        actual: String,
    },

    #[error("Record has {actual} columns, model expects {expected}")]
    ColumnCount { expected: usize, actual: usize },

    #[error("Column '{column}' expects {expected}, got {actual}")]
    IncompatibleType {
        column: String,
        expected: &'static str,
        actual: &'static str,
    },

    #[error("Column '{column}': unknown category '{value}'")]
    UnknownCategory { column: String, value: String },

    #[error("Column '{column}' is not a finite number")]
    NonFinite { column: String },

    #[error("Model produced an invalid probability: {0}")]
    InvalidProbability(f64),
}

/// A write to the prediction store failed. Recoverable: the prediction
/// already shown to the user stands.
#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Store rejected the write: {0}")]
    Rejected(String),
}

/// A form field violated its boundary constraint.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InputError {
    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        min: f64,
        max: f64,
        value: f64,
    },

    #[error("{field} must be a finite, non-negative number, got {value}")]
    Negative { field: &'static str, value: f64 },

    #[error("{field}: '{value}' is not one of the offered choices")]
    UnknownChoice { field: &'static str, value: String },
}

/// Everything that can end a submission early. Load failures are not
/// here: they halt startup before a `Predictor` exists.
#[derive(Error, Debug)]
pub enum PredictorError {
    #[error(transparent)]
    Scoring(#[from] ScoringError),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    #[error(transparent)]
    InvalidInput(#[from] InputError),
}

impl From<rusqlite::Error> for PredictorError {
    fn from(e: rusqlite::Error) -> Self {
        PredictorError::Persistence(PersistenceError::Database(e))
    }
}

pub type PredictorResult<T> = Result<T, PredictorError>;
