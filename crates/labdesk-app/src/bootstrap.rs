//! Build session components from configuration.
//!
//! The host constructs everything here once at startup and injects it into
//! [`crate::PortalSession`] — components never reach for ambient state.

use std::path::Path;

use labdesk_auth::{AuthError, FacultyTable, HttpIdentityProvider, IdentityResolver};
use labdesk_config::LabdeskConfig;
use labdesk_store::{ReportStore, StoreError};

/// Open the report store: a synced embedded replica when the backend is
/// configured, else a local database under `data_dir`.
///
/// A synced open that fails falls back to local with a warning, so a dead
/// backend never blocks startup.
///
/// # Errors
///
/// Returns `StoreError` if the local database cannot be opened either.
pub async fn store_from_config(
    config: &LabdeskConfig,
    data_dir: &Path,
) -> Result<ReportStore, StoreError> {
    let app_id = &config.tenant.app_id;

    if config.backend.is_configured() {
        let replica_path = if config.backend.has_local_replica() {
            config.backend.local_replica_path.clone()
        } else {
            data_dir.join("labdesk-synced.db").to_string_lossy().into_owned()
        };

        match ReportStore::open_synced(
            &replica_path,
            &config.backend.url,
            &config.backend.auth_token,
            app_id,
        )
        .await
        {
            Ok(store) => return Ok(store),
            Err(error) => {
                tracing::warn!(%error, "failed to open synced report store; falling back to local");
            }
        }
    }

    let local_path = data_dir.join("labdesk.db");
    ReportStore::open_local(&local_path.to_string_lossy(), app_id).await
}

/// Build the identity resolver against the configured provider.
///
/// Sign-in mode follows the config: token-based when `auth.token` is set,
/// anonymous otherwise.
///
/// # Errors
///
/// Returns `AuthError::NotConfigured` if no provider URL is set.
pub fn resolver_from_config(
    config: &LabdeskConfig,
) -> Result<IdentityResolver<HttpIdentityProvider>, AuthError> {
    let provider = HttpIdentityProvider::new(config.auth.provider_url.clone())?;
    let token = config.auth.has_token().then(|| config.auth.token.clone());
    Ok(IdentityResolver::new(provider, token))
}

/// Build the role rule from the configured faculty table.
#[must_use]
pub fn role_rule_from_config(config: &LabdeskConfig) -> FacultyTable {
    FacultyTable::from_config(&config.auth)
}

#[cfg(test)]
mod tests {
    use super::*;
    use labdesk_auth::RoleRule;
    use labdesk_core::enums::Role;
    use labdesk_core::identity::AuthIdentity;
    use labdesk_store::QueryScope;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn unconfigured_backend_opens_local_store() {
        let dir = tempfile::tempdir().unwrap();
        let config = LabdeskConfig::default();

        let store = store_from_config(&config, dir.path()).await.unwrap();
        assert!(!store.db().is_synced_replica());
        assert_eq!(store.collection().app_id(), "local");
        assert!(dir.path().join("labdesk.db").exists());

        // And it is usable
        let all = store.list_reports(&QueryScope::Faculty).await.unwrap();
        assert!(all.is_empty());
    }

    #[tokio::test]
    async fn store_uses_configured_app_id() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = LabdeskConfig::default();
        config.tenant.app_id = "chem-101".into();

        let store = store_from_config(&config, dir.path()).await.unwrap();
        assert_eq!(
            store.collection().to_string(),
            "tenant/chem-101/public/data/lab_reports"
        );
    }

    #[test]
    fn resolver_requires_provider_url() {
        let config = LabdeskConfig::default();
        assert!(matches!(
            resolver_from_config(&config),
            Err(AuthError::NotConfigured)
        ));
    }

    #[test]
    fn role_rule_reads_faculty_table() {
        let mut config = LabdeskConfig::default();
        config.auth.faculty_ids = vec!["user_prof".into()];

        let rule = role_rule_from_config(&config);
        let prof = AuthIdentity {
            user_id: "user_prof".into(),
            display_name: None,
        };
        assert_eq!(rule.resolve_role(Some(&prof)), Role::Faculty);
        assert_eq!(rule.resolve_role(None), Role::Student);
    }
}
