use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Lightweight authenticated user identity for cross-crate passing.
///
/// Produced by `labdesk-auth`, consumed by `labdesk-store` and
/// `labdesk-app`. Contains only data fields — no auth logic, no provider
/// SDK calls.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct AuthIdentity {
    /// Provider-issued user ID (from the JWT `sub` claim).
    pub user_id: String,
    /// Display name, when the provider supplies one. Anonymous sign-ins
    /// usually don't.
    pub display_name: Option<String>,
}

impl AuthIdentity {
    /// Human-readable label: the display name when present, else
    /// `User_<first 8 chars of the user id>`.
    #[must_use]
    pub fn display_label(&self) -> String {
        match &self.display_name {
            Some(name) if !name.is_empty() => name.clone(),
            _ => {
                let short: String = self.user_id.chars().take(8).collect();
                format!("User_{short}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn display_label_prefers_name() {
        let id = AuthIdentity {
            user_id: "user_abcdef1234".into(),
            display_name: Some("Grace Hopper".into()),
        };
        assert_eq!(id.display_label(), "Grace Hopper");
    }

    #[test]
    fn display_label_falls_back_to_uid_prefix() {
        let id = AuthIdentity {
            user_id: "abcdef1234567890".into(),
            display_name: None,
        };
        assert_eq!(id.display_label(), "User_abcdef12");
    }

    #[test]
    fn display_label_handles_short_uid() {
        let id = AuthIdentity {
            user_id: "ab".into(),
            display_name: Some(String::new()),
        };
        assert_eq!(id.display_label(), "User_ab");
    }
}
