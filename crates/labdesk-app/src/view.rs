//! Two-state view router.

use labdesk_core::enums::{Role, ViewState};

/// Per-session view-state machine: `dashboard ↔ submit`.
///
/// Faculty sessions are pinned to `dashboard` — the evaluation editor is an
/// overlay, not a view transition. Student sessions toggle on explicit
/// action and auto-return to `dashboard` after a successful submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewRouter {
    role: Role,
    view: ViewState,
}

impl ViewRouter {
    /// Every session starts on the dashboard.
    #[must_use]
    pub const fn new(role: Role) -> Self {
        Self {
            role,
            view: ViewState::Dashboard,
        }
    }

    #[must_use]
    pub const fn view(self) -> ViewState {
        self.view
    }

    #[must_use]
    pub const fn role(self) -> Role {
        self.role
    }

    /// Explicit user action: show the submission form.
    ///
    /// Returns `false` (and stays put) for faculty sessions.
    pub fn go_to_submit(&mut self) -> bool {
        if self.role == Role::Faculty {
            return false;
        }
        if self.view.can_transition_to(ViewState::Submit) {
            self.view = ViewState::Submit;
        }
        self.view == ViewState::Submit
    }

    /// Explicit user action: back to the dashboard.
    pub fn go_to_dashboard(&mut self) {
        self.view = ViewState::Dashboard;
    }

    /// A submission succeeded — auto-return to the dashboard.
    pub fn on_submission_success(&mut self) {
        self.view = ViewState::Dashboard;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn student_toggles_between_views() {
        let mut router = ViewRouter::new(Role::Student);
        assert_eq!(router.view(), ViewState::Dashboard);

        assert!(router.go_to_submit());
        assert_eq!(router.view(), ViewState::Submit);

        router.go_to_dashboard();
        assert_eq!(router.view(), ViewState::Dashboard);
    }

    #[test]
    fn faculty_is_pinned_to_dashboard() {
        let mut router = ViewRouter::new(Role::Faculty);
        assert!(!router.go_to_submit());
        assert_eq!(router.view(), ViewState::Dashboard);
    }

    #[test]
    fn submission_success_returns_to_dashboard() {
        let mut router = ViewRouter::new(Role::Student);
        router.go_to_submit();
        router.on_submission_success();
        assert_eq!(router.view(), ViewState::Dashboard);
    }
}
