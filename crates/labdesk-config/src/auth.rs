//! Auth provider configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AuthConfig {
    /// Auth provider base URL (e.g., `https://auth.example.io`).
    #[serde(default)]
    pub provider_url: String,

    /// Static sign-in token. When set, sign-in is token-based; when empty,
    /// sign-in is anonymous.
    #[serde(default)]
    pub token: String,

    /// User IDs classified as `faculty`. Everyone else is `student`.
    #[serde(default)]
    pub faculty_ids: Vec<String>,
}

impl AuthConfig {
    /// Check if the provider endpoint is configured.
    pub fn is_configured(&self) -> bool {
        !self.provider_url.is_empty()
    }

    /// Check if a static sign-in token is available.
    pub fn has_token(&self) -> bool {
        !self.token.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_not_configured() {
        let config = AuthConfig::default();
        assert!(!config.is_configured());
        assert!(!config.has_token());
        assert!(config.faculty_ids.is_empty());
    }

    #[test]
    fn configured_when_url_set() {
        let config = AuthConfig {
            provider_url: "https://auth.example.io".into(),
            ..Default::default()
        };
        assert!(config.is_configured());
        assert!(!config.has_token());
    }
}
