use base64::Engine as _;
use chrono::{DateTime, Utc};

use labdesk_core::identity::AuthIdentity;

use crate::error::AuthError;

/// Parsed session claims from the auth provider's JWT.
///
/// Produced by payload decoding in [`decode_claims`], consumed by the
/// identity resolver. Signature verification is the provider's concern and
/// out of scope here.
#[derive(Debug, Clone)]
pub struct SessionClaims {
    /// Raw JWT string (for passing to the backend).
    pub raw_jwt: String,
    /// Provider user ID (`sub` claim).
    pub user_id: String,
    /// Display name (`name` claim). `None` for anonymous sessions.
    pub display_name: Option<String>,
    /// Token expiration time (from `exp` claim).
    pub expires_at: DateTime<Utc>,
}

impl SessionClaims {
    /// Convert to a lightweight `AuthIdentity` for cross-crate passing.
    #[must_use]
    pub fn to_identity(&self) -> AuthIdentity {
        AuthIdentity {
            user_id: self.user_id.clone(),
            display_name: self.display_name.clone(),
        }
    }

    /// Check if the token is expired or expires within `buffer_secs`.
    #[must_use]
    pub fn is_near_expiry(&self, buffer_secs: i64) -> bool {
        let threshold = Utc::now() + chrono::TimeDelta::seconds(buffer_secs);
        self.expires_at <= threshold
    }
}

/// Decode JWT payload claims without signature validation.
///
/// This is deliberate: the provider signs its own tokens and the backend
/// re-validates them; this client only needs the identity fields.
///
/// # Errors
///
/// Returns `AuthError::MalformedToken` if the JWT format is invalid or the
/// `sub`/`exp` claims are missing or cannot be parsed.
pub fn decode_claims(jwt: &str) -> Result<SessionClaims, AuthError> {
    let parts: Vec<&str> = jwt.split('.').collect();
    if parts.len() != 3 {
        return Err(AuthError::MalformedToken("invalid JWT format".into()));
    }
    let payload = base64::engine::general_purpose::URL_SAFE_NO_PAD
        .decode(parts[1])
        .map_err(|e| AuthError::MalformedToken(format!("base64 decode failed: {e}")))?;
    let value: serde_json::Value = serde_json::from_slice(&payload)
        .map_err(|e| AuthError::MalformedToken(format!("JSON parse failed: {e}")))?;

    let user_id = value["sub"]
        .as_str()
        .ok_or_else(|| AuthError::MalformedToken("missing sub claim".into()))?
        .to_string();
    let display_name = value["name"].as_str().map(String::from);
    let exp = value["exp"]
        .as_i64()
        .ok_or_else(|| AuthError::MalformedToken("missing exp claim".into()))?;
    let expires_at = DateTime::from_timestamp(exp, 0)
        .ok_or_else(|| AuthError::MalformedToken("invalid exp timestamp".into()))?;

    Ok(SessionClaims {
        raw_jwt: jwt.to_string(),
        user_id,
        display_name,
        expires_at,
    })
}
