//! Per-report evaluation editor.

use labdesk_core::entities::{Report, validate_marks};
use labdesk_core::errors::CoreError;
use labdesk_store::{ReportStore, Revision};

/// What the caller should do after a save attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorSignal {
    /// Keep the editor open (rejection or store failure) with input intact.
    StayOpen,
    /// Evaluation saved — close the editor.
    Close,
}

/// Marks/feedback editor for one report.
///
/// Pre-fills any existing evaluation so re-marking starts from the stored
/// values, and carries the evaluation revision it loaded for the
/// compare-and-set on save.
#[derive(Debug, Clone)]
pub struct EvaluationEditor {
    report_id: String,
    revision: i64,
    pub marks_input: String,
    pub feedback_input: String,
    saving: bool,
    error: Option<String>,
}

impl EvaluationEditor {
    #[must_use]
    pub fn for_report(report: &Report) -> Self {
        Self {
            report_id: report.id.clone(),
            revision: report.evaluation.revision,
            marks_input: report
                .evaluation
                .marks
                .map(|m| m.to_string())
                .unwrap_or_default(),
            feedback_input: report.evaluation.feedback.clone(),
            saving: false,
            error: None,
        }
    }

    #[must_use]
    pub fn report_id(&self) -> &str {
        &self.report_id
    }

    #[must_use]
    pub const fn is_saving(&self) -> bool {
        self.saving
    }

    /// Inline message from the last rejected or failed save, if any.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Parse the marks input as a whole number in `[0, 100]`.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` for non-integer input or an
    /// out-of-range score.
    pub fn parse_marks(&self) -> Result<i64, CoreError> {
        let marks: i64 = self
            .marks_input
            .trim()
            .parse()
            .map_err(|_| CoreError::Validation("marks must be a whole number".into()))?;
        validate_marks(marks)?;
        Ok(marks)
    }

    /// Validate and save the evaluation.
    ///
    /// Invalid marks reject with no write attempted. On store failure the
    /// editor stays open with prior input intact — the only retry affordance
    /// is saving again.
    pub async fn save(&mut self, store: &ReportStore, faculty_id: &str) -> EditorSignal {
        let marks = match self.parse_marks() {
            Ok(marks) => marks,
            Err(error) => {
                tracing::debug!(%error, report_id = %self.report_id, "evaluation rejected");
                self.error = Some(error.to_string());
                return EditorSignal::StayOpen;
            }
        };

        self.saving = true;
        self.error = None;

        let result = store
            .mark_evaluation(
                &self.report_id,
                marks,
                &self.feedback_input,
                faculty_id,
                Revision::Exact(self.revision),
            )
            .await;
        self.saving = false;

        match result {
            Ok(report) => {
                self.revision = report.evaluation.revision;
                EditorSignal::Close
            }
            Err(error) => {
                tracing::warn!(%error, report_id = %self.report_id, "evaluation save failed");
                self.error = Some(error.to_string());
                EditorSignal::StayOpen
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use labdesk_core::entities::ReportDraft;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    async fn store_with_report() -> (ReportStore, Report) {
        let store = ReportStore::open_local(":memory:", "local").await.unwrap();
        let report = store
            .create_report(&ReportDraft {
                student_id: "user_ada".into(),
                student_name: "Ada".into(),
                experiment_name: "Calorimetry".into(),
                data_observations: "delta T = 3.2 K".into(),
            })
            .await
            .unwrap();
        (store, report)
    }

    #[rstest]
    #[case("150")]
    #[case("-3")]
    #[case("abc")]
    #[case("")]
    #[case("8.5")]
    fn invalid_marks_input_rejected(#[case] input: &str) {
        let editor = EvaluationEditor {
            report_id: "rpt-x".into(),
            revision: 0,
            marks_input: input.into(),
            feedback_input: String::new(),
            saving: false,
            error: None,
        };
        assert!(editor.parse_marks().is_err(), "input {input:?}");
    }

    #[rstest]
    #[case("0", 0)]
    #[case("87", 87)]
    #[case(" 100 ", 100)]
    fn valid_marks_input_parses(#[case] input: &str, #[case] expected: i64) {
        let editor = EvaluationEditor {
            report_id: "rpt-x".into(),
            revision: 0,
            marks_input: input.into(),
            feedback_input: String::new(),
            saving: false,
            error: None,
        };
        assert_eq!(editor.parse_marks().unwrap(), expected);
    }

    #[tokio::test]
    async fn rejected_save_makes_no_write() {
        let (store, report) = store_with_report().await;
        let mut editor = EvaluationEditor::for_report(&report);
        editor.marks_input = "150".into();
        editor.feedback_input = "too generous".into();

        let signal = editor.save(&store, "user_prof").await;

        assert_eq!(signal, EditorSignal::StayOpen);
        assert_eq!(editor.marks_input, "150", "input preserved");
        assert!(editor.error().is_some());
        let fetched = store.get_report(&report.id).await.unwrap();
        assert!(!fetched.evaluation.marked, "no write attempted");
    }

    #[tokio::test]
    async fn successful_save_closes_editor() {
        let (store, report) = store_with_report().await;
        let mut editor = EvaluationEditor::for_report(&report);
        editor.marks_input = "87".into();
        editor.feedback_input = "Good work".into();

        let signal = editor.save(&store, "user_prof").await;

        assert_eq!(signal, EditorSignal::Close);
        let fetched = store.get_report(&report.id).await.unwrap();
        assert!(fetched.evaluation.marked);
        assert_eq!(fetched.evaluation.marks, Some(87));
        assert_eq!(fetched.evaluation.feedback, "Good work");
        assert_eq!(fetched.evaluation.faculty_id.as_deref(), Some("user_prof"));
        assert!(fetched.evaluation.evaluation_date.is_some());
    }

    #[tokio::test]
    async fn editor_prefills_existing_evaluation() {
        let (store, report) = store_with_report().await;
        store
            .mark_evaluation(&report.id, 60, "first pass", "user_prof", Revision::Any)
            .await
            .unwrap();
        let marked = store.get_report(&report.id).await.unwrap();

        let editor = EvaluationEditor::for_report(&marked);
        assert_eq!(editor.marks_input, "60");
        assert_eq!(editor.feedback_input, "first pass");
    }

    #[tokio::test]
    async fn concurrent_evaluation_surfaces_conflict() {
        let (store, report) = store_with_report().await;

        let mut editor_a = EvaluationEditor::for_report(&report);
        let mut editor_b = EvaluationEditor::for_report(&report);

        editor_a.marks_input = "70".into();
        assert_eq!(editor_a.save(&store, "user_prof_a").await, EditorSignal::Close);

        editor_b.marks_input = "95".into();
        let signal = editor_b.save(&store, "user_prof_b").await;

        assert_eq!(signal, EditorSignal::StayOpen);
        assert!(editor_b.error().unwrap().contains("Conflict"));
        assert_eq!(editor_b.marks_input, "95", "input preserved for retry");

        let fetched = store.get_report(&report.id).await.unwrap();
        assert_eq!(fetched.evaluation.marks, Some(70), "first evaluation intact");
    }
}
