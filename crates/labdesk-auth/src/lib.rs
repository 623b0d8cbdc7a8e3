//! # labdesk-auth
//!
//! Identity resolution for Labdesk.
//!
//! Provides non-interactive sign-in against the external auth provider
//! (token-based when a token is configured, else anonymous), JWT payload
//! decoding into session claims, an auth-state watch channel that re-emits
//! on every session change, and the swappable role-assignment rule.
//!
//! Provider internals (token issuance, signature verification) are out of
//! scope — the provider is an external collaborator reached over HTTP.

pub mod claims;
pub mod error;
pub mod provider;
pub mod resolver;
pub mod role;

pub use claims::SessionClaims;
pub use error::AuthError;
pub use provider::{HttpIdentityProvider, IdentityProvider};
pub use resolver::{AuthState, IdentityResolver};
pub use role::{FacultyTable, RoleRule};
