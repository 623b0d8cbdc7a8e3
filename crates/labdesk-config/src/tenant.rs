//! Tenant partitioning configuration.

use serde::{Deserialize, Serialize};

/// Default app identifier for single-tenant local use.
fn default_app_id() -> String {
    "local".into()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TenantConfig {
    /// Application identifier — the second segment of the collection
    /// namespace `tenant/{app_id}/public/data/lab_reports`.
    #[serde(default = "default_app_id")]
    pub app_id: String,
}

impl Default for TenantConfig {
    fn default() -> Self {
        Self {
            app_id: default_app_id(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_app_id_is_local() {
        assert_eq!(TenantConfig::default().app_id, "local");
    }
}
