//! The submission pipeline: the heart of the predictor.
//!
//! EXECUTION ORDER (fixed, linear, synchronous):
//!   1. Validate   form boundary          Received → (input checked)
//!   2. Derive     features::derive       → Derived
//!   3. Align      schema::align          → Aligned
//!   4. Score      Classifier             → Scored
//!   5. Decide     DecisionRule           → Decided
//!   6. Record     PredictionSink         → Recorded
//!
//! RULES:
//!   - The first failure is terminal for the submission. No retries.
//!   - A failure never poisons the predictor: the next submission starts clean.
//!   - A persistence failure does not retract the prediction already produced.

use crate::{
    clock::{Clock, SystemClock},
    decision::DecisionRule,
    error::PredictorError,
    features,
    form::FormInput,
    model::Classifier,
    schema,
    store::{PredictionRow, PredictionSink},
    types::{Label, Probability, RowId},
};
use serde::Serialize;
use uuid::Uuid;

// ── Outcome types ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionState {
    Received,
    Derived,
    Aligned,
    Scored,
    Decided,
    Recorded,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    InvalidInput,
    Scoring,
    Persistence,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageLevel {
    Success,
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusMessage {
    pub level: MessageLevel,
    pub text:  String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionSummary {
    pub label:           Label,
    /// 0 or 1, as stored.
    pub prediction:      i64,
    pub probability:     Probability,
    /// e.g. "42.10%".
    pub probability_pct: String,
}

/// Everything the front end needs to render one submission's result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmissionOutcome {
    pub submission_id: Uuid,
    pub state:         SubmissionState,
    /// Last stage completed before failing.
    pub failed_after:  Option<SubmissionState>,
    pub failure:       Option<FailureKind>,
    pub prediction:    Option<PredictionSummary>,
    pub row_id:        Option<RowId>,
    pub messages:      Vec<StatusMessage>,
}

impl SubmissionOutcome {
    fn new(submission_id: Uuid) -> Self {
        Self {
            submission_id,
            state: SubmissionState::Received,
            failed_after: None,
            failure: None,
            prediction: None,
            row_id: None,
            messages: Vec::new(),
        }
    }

    fn advance(&mut self, next: SubmissionState) {
        log::trace!("Submission {}: {:?} -> {:?}", self.submission_id, self.state, next);
        self.state = next;
    }

    fn fail(mut self, err: PredictorError) -> Self {
        let (kind, text) = match &err {
            PredictorError::InvalidInput(e) => (FailureKind::InvalidInput, format!("Invalid input: {e}")),
            PredictorError::Persistence(e) => (FailureKind::Persistence, format!("Failed to save record: {e}")),
            PredictorError::Scoring(e) => (FailureKind::Scoring, format!("Prediction failed: {e}")),
        };
        log::warn!(
            "Submission {} failed after {:?}: {err}",
            self.submission_id,
            self.state
        );
        self.failed_after = Some(self.state);
        self.state = SubmissionState::Failed;
        self.failure = Some(kind);
        self.push(MessageLevel::Error, text);
        self
    }

    fn push(&mut self, level: MessageLevel, text: String) {
        self.messages.push(StatusMessage { level, text });
    }

    pub fn is_recorded(&self) -> bool {
        self.state == SubmissionState::Recorded
    }
}

/// `0.4210` → `"42.10%"`.
pub fn format_probability(p: Probability) -> String {
    format!("{:.2}%", p * 100.0)
}

// ── Predictor ────────────────────────────────────────────────────────────────

pub struct Predictor<C: Classifier, S: PredictionSink> {
    classifier: C,
    rule:       DecisionRule,
    sink:       S,
    clock:      Box<dyn Clock>,
}

impl<C: Classifier, S: PredictionSink> Predictor<C, S> {
    pub fn new(classifier: C, rule: DecisionRule, sink: S) -> Self {
        Self {
            classifier,
            rule,
            sink,
            clock: Box::new(SystemClock),
        }
    }

    pub fn with_clock(mut self, clock: Box<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Hand the sink back so the caller can release it.
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Run one submission start to finish.
    ///
    /// Never returns an error: every failure is converted into a
    /// user-visible message on the outcome.
    pub fn submit(&mut self, form: &FormInput) -> SubmissionOutcome {
        let mut outcome = SubmissionOutcome::new(Uuid::new_v4());
        log::debug!("Submission {} received", outcome.submission_id);

        let validated = match form.validate() {
            Ok(v) => v,
            Err(e) => return outcome.fail(e.into()),
        };

        let record = features::derive(&validated);
        outcome.advance(SubmissionState::Derived);

        let aligned = schema::align(record.to_feature_record(), self.classifier.columns());
        outcome.advance(SubmissionState::Aligned);

        let probability = match self.classifier.predict_proba(&aligned) {
            Ok(p) => p,
            Err(e) => return outcome.fail(e.into()),
        };
        outcome.advance(SubmissionState::Scored);

        let label = self.rule.decide(probability);
        outcome.advance(SubmissionState::Decided);

        let pct = format_probability(probability);
        match label {
            Label::WillJoin => outcome.push(
                MessageLevel::Success,
                format!("This customer is likely to join the campaign (probability {pct})"),
            ),
            Label::WillNotJoin => outcome.push(
                MessageLevel::Info,
                format!("This customer is unlikely to join the campaign (probability {pct})"),
            ),
        }
        outcome.prediction = Some(PredictionSummary {
            label,
            prediction: label.as_int(),
            probability,
            probability_pct: pct,
        });
        log::info!(
            "Submission {} scored: p={probability:.4} label={}",
            outcome.submission_id,
            label.as_int()
        );

        let row = PredictionRow {
            timestamp: self.clock.timestamp(),
            record,
            prediction: label,
            probability,
        };
        match self.sink.append(&row) {
            Ok(id) => {
                outcome.row_id = Some(id);
                outcome.advance(SubmissionState::Recorded);
                outcome.push(MessageLevel::Success, "Record saved".into());
                outcome
            }
            Err(e) => outcome.fail(e.into()),
        }
    }
}
