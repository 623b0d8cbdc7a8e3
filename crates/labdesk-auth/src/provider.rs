//! Auth provider transport.
//!
//! Calls the provider's session API directly via `reqwest`. The trait seam
//! exists so the resolver can be driven by a stub in tests — live provider
//! calls need real credentials.

use crate::claims::{SessionClaims, decode_claims};
use crate::error::AuthError;

/// Transport for obtaining a session from the external auth provider.
pub trait IdentityProvider {
    /// Exchange a configured static token for a session.
    fn sign_in_with_token(
        &self,
        token: &str,
    ) -> impl Future<Output = Result<SessionClaims, AuthError>> + Send;

    /// Open an anonymous session.
    fn sign_in_anonymous(&self) -> impl Future<Output = Result<SessionClaims, AuthError>> + Send;
}

/// HTTP implementation against the provider's session endpoints.
pub struct HttpIdentityProvider {
    base_url: String,
    client: reqwest::Client,
}

impl HttpIdentityProvider {
    /// # Errors
    ///
    /// Returns `AuthError::NotConfigured` if `base_url` is empty.
    pub fn new(base_url: impl Into<String>) -> Result<Self, AuthError> {
        let base_url = base_url.into();
        if base_url.is_empty() {
            return Err(AuthError::NotConfigured);
        }
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        })
    }

    async fn request_session(
        &self,
        path: &str,
        body: serde_json::Value,
    ) -> Result<SessionClaims, AuthError> {
        let url = format!("{}{path}", self.base_url);
        let resp = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| AuthError::ProviderUnreachable(format!("{path}: {e}")))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(AuthError::SignInFailed(format!("HTTP {status}: {body}")));
        }

        #[derive(serde::Deserialize)]
        struct SessionResponse {
            jwt: String,
        }

        let session: SessionResponse = resp
            .json()
            .await
            .map_err(|e| AuthError::SignInFailed(format!("parse session: {e}")))?;
        decode_claims(&session.jwt)
    }
}

impl IdentityProvider for HttpIdentityProvider {
    async fn sign_in_with_token(&self, token: &str) -> Result<SessionClaims, AuthError> {
        self.request_session("/v1/sessions/token", serde_json::json!({ "token": token }))
            .await
    }

    async fn sign_in_anonymous(&self) -> Result<SessionClaims, AuthError> {
        self.request_session("/v1/sessions/anonymous", serde_json::json!({}))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_base_url_is_not_configured() {
        assert!(matches!(
            HttpIdentityProvider::new(""),
            Err(AuthError::NotConfigured)
        ));
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let provider = HttpIdentityProvider::new("https://auth.example.io/").unwrap();
        assert_eq!(provider.base_url, "https://auth.example.io");
    }
}
