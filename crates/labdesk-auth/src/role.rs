//! Role assignment.
//!
//! Classification is a capability, not a hardcoded comparison: callers hold
//! a `RoleRule` and never inspect identities themselves, so the rule can be
//! swapped (claims lookup, external table) without touching call sites.

use std::collections::HashSet;

use labdesk_core::enums::Role;
use labdesk_core::identity::AuthIdentity;
use labdesk_config::AuthConfig;

/// Maps an (optional) identity to exactly one role.
pub trait RoleRule {
    /// `None` means no identity (signed out / disconnected) and must fall
    /// back to `Role::Student`.
    fn resolve_role(&self, identity: Option<&AuthIdentity>) -> Role;
}

/// Role table backed by the configured faculty user-id set.
#[derive(Debug, Clone)]
pub struct FacultyTable {
    faculty_ids: HashSet<String>,
}

impl FacultyTable {
    #[must_use]
    pub fn new(faculty_ids: impl IntoIterator<Item = String>) -> Self {
        Self {
            faculty_ids: faculty_ids.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(config.faculty_ids.iter().cloned())
    }
}

impl RoleRule for FacultyTable {
    fn resolve_role(&self, identity: Option<&AuthIdentity>) -> Role {
        match identity {
            Some(identity) if self.faculty_ids.contains(&identity.user_id) => Role::Faculty,
            _ => Role::Student,
        }
    }
}
