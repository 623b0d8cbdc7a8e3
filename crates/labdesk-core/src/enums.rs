//! Role and view-state enums for Labdesk.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`.
//! `ViewState` provides `allowed_next_states()` so the router can enforce
//! valid transitions at the application layer.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Role
// ---------------------------------------------------------------------------

/// Session role. Determines query scope and write permissions.
///
/// Derived from the authenticated identity by a role rule — never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Student,
    Faculty,
}

impl Role {
    /// Return the string representation used in logs and SQL storage.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Faculty => "faculty",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ViewState
// ---------------------------------------------------------------------------

/// Which view a student session is showing.
///
/// ```text
/// dashboard ↔ submit
/// ```
///
/// Faculty sessions never leave `dashboard`; the evaluation editor is an
/// overlay, not a view transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ViewState {
    Dashboard,
    Submit,
}

impl ViewState {
    /// Valid next states from the current state.
    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::Dashboard => &[Self::Submit],
            Self::Submit => &[Self::Dashboard],
        }
    }

    /// Check whether transitioning to `next` is allowed.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::Submit => "submit",
        }
    }
}

impl fmt::Display for ViewState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_serializes_snake_case() {
        assert_eq!(serde_json::to_string(&Role::Faculty).unwrap(), "\"faculty\"");
        assert_eq!(serde_json::to_string(&Role::Student).unwrap(), "\"student\"");
    }

    #[test]
    fn view_state_toggles_both_ways() {
        assert!(ViewState::Dashboard.can_transition_to(ViewState::Submit));
        assert!(ViewState::Submit.can_transition_to(ViewState::Dashboard));
        assert!(!ViewState::Dashboard.can_transition_to(ViewState::Dashboard));
    }

    #[test]
    fn display_matches_as_str() {
        assert_eq!(Role::Faculty.to_string(), "faculty");
        assert_eq!(ViewState::Submit.to_string(), "submit");
    }
}
