//! Portal session: identity → role → live subscription wiring.

use std::sync::Arc;

use tokio::sync::watch;

use labdesk_auth::{AuthState, RoleRule};
use labdesk_core::entities::Report;
use labdesk_core::enums::Role;
use labdesk_core::identity::AuthIdentity;
use labdesk_store::{QueryScope, ReportStore, Subscription};

use crate::view::ViewRouter;

/// Explicitly constructed session context.
///
/// Owns the live report subscription and performs dependent re-subscription:
/// every identity or role change cancels the old subscription before opening
/// the new scoped one, so listeners never accumulate. Teardown is explicit
/// via [`Self::close`] (dropping the session also cancels).
///
/// All inputs are injected — the store, the auth-state channel, and the role
/// rule — so there is no ambient global state anywhere in the session.
pub struct PortalSession<R> {
    store: Arc<ReportStore>,
    rule: R,
    auth_rx: watch::Receiver<AuthState>,
    identity: Option<AuthIdentity>,
    role: Role,
    router: ViewRouter,
    subscription: Option<Subscription>,
    loading: bool,
}

impl<R: RoleRule> PortalSession<R> {
    /// Build a session over the current auth state.
    #[must_use]
    pub fn new(store: Arc<ReportStore>, auth_rx: watch::Receiver<AuthState>, rule: R) -> Self {
        let mut session = Self {
            store,
            rule,
            auth_rx,
            identity: None,
            role: Role::Student,
            router: ViewRouter::new(Role::Student),
            subscription: None,
            loading: true,
        };
        session.apply_current_state();
        session
    }

    /// Wait for the next auth-state change and re-wire the session.
    ///
    /// Returns `false` once the auth channel is closed (resolver gone);
    /// the session keeps its last state in that case.
    pub async fn auth_changed(&mut self) -> bool {
        if self.auth_rx.changed().await.is_err() {
            return false;
        }
        self.apply_current_state();
        true
    }

    /// Whether the session is still waiting for a first identity.
    ///
    /// A failed sign-in never leaves this state — that weakness is inherited
    /// from the resolver's no-retry contract.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    #[must_use]
    pub const fn identity(&self) -> Option<&AuthIdentity> {
        self.identity.as_ref()
    }

    #[must_use]
    pub const fn router(&self) -> &ViewRouter {
        &self.router
    }

    pub const fn router_mut(&mut self) -> &mut ViewRouter {
        &mut self.router
    }

    #[must_use]
    pub const fn store(&self) -> &Arc<ReportStore> {
        &self.store
    }

    /// The live subscription, when an identity is present.
    pub fn subscription_mut(&mut self) -> Option<&mut Subscription> {
        self.subscription.as_mut()
    }

    /// Most recently pushed report set (empty while loading/signed out).
    #[must_use]
    pub fn reports(&self) -> Vec<Report> {
        self.subscription
            .as_ref()
            .map(Subscription::current)
            .unwrap_or_default()
    }

    /// Explicit teardown: cancel the live subscription.
    pub fn close(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.cancel();
        }
    }

    fn apply_current_state(&mut self) {
        let state = self.auth_rx.borrow_and_update().clone();

        // Cancel before re-subscribing — a dangling listener from the
        // previous identity would double-feed the dashboards.
        self.close();

        match state {
            AuthState::Loading => {
                self.loading = true;
                self.identity = None;
                self.role = Role::Student;
            }
            AuthState::SignedOut => {
                self.loading = false;
                self.identity = None;
                self.role = self.rule.resolve_role(None);
                tracing::info!(role = %self.role, "signed out; role fell back");
            }
            AuthState::SignedIn(identity) => {
                self.loading = false;
                self.role = self.rule.resolve_role(Some(&identity));
                let scope = QueryScope::for_role(self.role, &identity.user_id);
                tracing::info!(
                    user_id = %identity.user_id,
                    role = %self.role,
                    "session wired; subscribing"
                );
                self.subscription = Some(self.store.subscribe(scope));
                self.identity = Some(identity);
            }
        }
        self.router = ViewRouter::new(self.role);
    }
}

impl<R> Drop for PortalSession<R> {
    fn drop(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.cancel();
        }
    }
}
