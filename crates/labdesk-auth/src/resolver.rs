//! Identity resolver: sign-in at process start, auth-state re-emission.

use tokio::sync::watch;

use labdesk_core::identity::AuthIdentity;

use crate::claims::SessionClaims;
use crate::error::AuthError;
use crate::provider::IdentityProvider;

/// Session auth state, re-emitted on every change.
///
/// `Loading` is the initial state. A failed sign-in leaves the channel in
/// `Loading` indefinitely — there is no retry/backoff, so auth failure is
/// terminal for the session. Consumers treat `SignedOut` as the `student`
/// role fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthState {
    Loading,
    SignedIn(AuthIdentity),
    SignedOut,
}

impl AuthState {
    /// The identity, when signed in.
    #[must_use]
    pub const fn identity(&self) -> Option<&AuthIdentity> {
        match self {
            Self::SignedIn(identity) => Some(identity),
            Self::Loading | Self::SignedOut => None,
        }
    }
}

/// Obtains an identity from the external auth provider and publishes every
/// session-state change through a watch channel.
///
/// Constructed explicitly and injected where needed — there is no ambient
/// global session.
pub struct IdentityResolver<P> {
    provider: P,
    token: Option<String>,
    tx: watch::Sender<AuthState>,
}

impl<P: IdentityProvider> IdentityResolver<P> {
    /// Create a resolver in the `Loading` state.
    ///
    /// `token` selects the sign-in mode: `Some` → token-based, `None` →
    /// anonymous.
    pub fn new(provider: P, token: Option<String>) -> Self {
        let (tx, _rx) = watch::channel(AuthState::Loading);
        Self { provider, token, tx }
    }

    /// Subscribe to auth-state changes. The current state is observable
    /// immediately.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.tx.subscribe()
    }

    /// Attempt sign-in: token-based if a token is configured, else anonymous.
    ///
    /// On success the channel emits `SignedIn`. On failure the error is
    /// logged and the channel stays `Loading` — no retry is attempted and
    /// subscribers remain in their loading state.
    ///
    /// # Errors
    ///
    /// Returns the `AuthError` for callers that want to surface it; the
    /// channel state is unchanged in that case.
    pub async fn sign_in(&self) -> Result<AuthIdentity, AuthError> {
        let result = match &self.token {
            Some(token) => self.provider.sign_in_with_token(token).await,
            None => self.provider.sign_in_anonymous().await,
        };

        match result {
            Ok(claims) => Ok(self.emit_signed_in(&claims)),
            Err(error) => {
                tracing::error!(%error, "sign-in failed; session remains in loading state");
                Err(error)
            }
        }
    }

    /// Record a provider-side disconnect. Subscribers fall back to the
    /// `student` role via `resolve_role(None)`.
    pub fn disconnect(&self) {
        self.tx.send_replace(AuthState::SignedOut);
    }

    fn emit_signed_in(&self, claims: &SessionClaims) -> AuthIdentity {
        let identity = claims.to_identity();
        tracing::info!(user_id = %identity.user_id, "signed in");
        self.tx.send_replace(AuthState::SignedIn(identity.clone()));
        identity
    }
}
