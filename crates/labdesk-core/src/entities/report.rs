use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Upper bound (inclusive) for an evaluation score.
pub const MAX_MARKS: i64 = 100;

/// One student's submitted lab experiment write-up plus its evaluation
/// sub-record.
///
/// `id` and `submission_date` are assigned by the store, never the client.
/// The evaluation sub-record is the only part that mutates after creation.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Report {
    pub id: String,
    pub student_id: String,
    /// Denormalized at creation so faculty listings don't need a user lookup.
    pub student_name: String,
    pub experiment_name: String,
    pub data_observations: String,
    pub submission_date: DateTime<Utc>,
    pub evaluation: Evaluation,
}

/// The faculty-authored score/feedback sub-record embedded in a [`Report`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Evaluation {
    pub marked: bool,
    /// `None` until marked; in `[0, MAX_MARKS]` once present.
    pub marks: Option<i64>,
    pub feedback: String,
    pub faculty_id: Option<String>,
    pub evaluation_date: Option<DateTime<Utc>>,
    /// Concurrency token: incremented on every successful evaluation write.
    pub revision: i64,
}

/// Creation payload for a report. Identity fields come from the signed-in
/// student; the two free-text fields are user input.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ReportDraft {
    pub student_id: String,
    pub student_name: String,
    pub experiment_name: String,
    pub data_observations: String,
}

impl ReportDraft {
    /// Validate the two required free-text fields.
    ///
    /// Fields are trimmed first, so whitespace-only input is rejected.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` naming the first empty field.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.experiment_name.trim().is_empty() {
            return Err(CoreError::Validation(
                "experiment_name must not be empty".into(),
            ));
        }
        if self.data_observations.trim().is_empty() {
            return Err(CoreError::Validation(
                "data_observations must not be empty".into(),
            ));
        }
        Ok(())
    }
}

/// Check that a score is within `[0, MAX_MARKS]`.
///
/// # Errors
///
/// Returns `CoreError::Validation` if the score is out of range.
pub fn validate_marks(marks: i64) -> Result<(), CoreError> {
    if (0..=MAX_MARKS).contains(&marks) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "marks must be between 0 and {MAX_MARKS}, got {marks}"
        )))
    }
}
