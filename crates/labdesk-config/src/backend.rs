//! Report store backend configuration (libSQL/Turso-style).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct BackendConfig {
    /// Database URL (e.g., `libsql://reports.turso.io`).
    #[serde(default)]
    pub url: String,

    /// Database auth token.
    #[serde(default)]
    pub auth_token: String,

    /// Local replica path for embedded replica mode.
    #[serde(default)]
    pub local_replica_path: String,
}

impl BackendConfig {
    /// Check if the backend config has the minimum required fields for
    /// remote access.
    pub fn is_configured(&self) -> bool {
        !self.url.is_empty() && !self.auth_token.is_empty()
    }

    /// Check if embedded replica mode is enabled.
    pub fn has_local_replica(&self) -> bool {
        !self.local_replica_path.is_empty()
    }
}
