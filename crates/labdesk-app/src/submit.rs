//! Report submission form.

use labdesk_core::entities::ReportDraft;
use labdesk_core::identity::AuthIdentity;
use labdesk_store::ReportStore;

/// Form lifecycle: `idle → submitting → idle` (with an outcome message).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    Idle,
    Submitting,
}

/// Outcome message surfaced inline under the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMessage {
    Success(String),
    Error(String),
}

impl FormMessage {
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Success(text) | Self::Error(text) => text,
        }
    }
}

/// What the caller should do after a submit attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormSignal {
    /// Keep the form visible (validation failure or store error).
    Stay,
    /// Submission confirmed — switch the view back to the dashboard.
    SwitchToDashboard,
}

/// Collects the two required free-text fields and creates one immutable
/// report.
///
/// Identity fields are fixed at construction from the signed-in student; on
/// success the two mutable fields reset while the identity fields remain
/// populated. On failure both fields are preserved so the student can retry
/// without re-entry.
#[derive(Debug, Clone)]
pub struct SubmissionForm {
    student_id: String,
    student_name: String,
    pub experiment_name: String,
    pub data_observations: String,
    phase: FormPhase,
    message: Option<FormMessage>,
}

impl SubmissionForm {
    #[must_use]
    pub fn new(identity: &AuthIdentity) -> Self {
        Self {
            student_id: identity.user_id.clone(),
            student_name: identity.display_label(),
            experiment_name: String::new(),
            data_observations: String::new(),
            phase: FormPhase::Idle,
            message: None,
        }
    }

    #[must_use]
    pub fn student_id(&self) -> &str {
        &self.student_id
    }

    #[must_use]
    pub fn student_name(&self) -> &str {
        &self.student_name
    }

    #[must_use]
    pub const fn phase(&self) -> FormPhase {
        self.phase
    }

    #[must_use]
    pub const fn message(&self) -> Option<&FormMessage> {
        self.message.as_ref()
    }

    fn draft(&self) -> ReportDraft {
        ReportDraft {
            student_id: self.student_id.clone(),
            student_name: self.student_name.clone(),
            experiment_name: self.experiment_name.clone(),
            data_observations: self.data_observations.clone(),
        }
    }

    /// Validate and submit.
    ///
    /// Validation happens pre-flight: an empty (or whitespace-only) required
    /// field surfaces an inline message and no store call is made. On store
    /// failure the error message is surfaced verbatim and the fields stay
    /// intact.
    pub async fn submit(&mut self, store: &ReportStore) -> FormSignal {
        let draft = self.draft();
        if let Err(error) = draft.validate() {
            tracing::debug!(%error, "submission blocked by validation");
            self.message = Some(FormMessage::Error(
                "Please fill in all required fields.".into(),
            ));
            return FormSignal::Stay;
        }

        self.phase = FormPhase::Submitting;
        self.message = None;

        let result = store.create_report(&draft).await;
        self.phase = FormPhase::Idle;

        match result {
            Ok(report) => {
                tracing::info!(report_id = %report.id, "submission confirmed");
                self.experiment_name.clear();
                self.data_observations.clear();
                self.message = Some(FormMessage::Success(
                    "Report submitted successfully! The faculty will review it shortly.".into(),
                ));
                FormSignal::SwitchToDashboard
            }
            Err(error) => {
                tracing::warn!(%error, "submission failed");
                self.message = Some(FormMessage::Error(error.to_string()));
                FormSignal::Stay
            }
        }
    }
}
