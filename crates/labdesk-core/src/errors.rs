//! Cross-cutting error types for Labdesk.
//!
//! This module defines errors that can originate from any crate in the
//! system. Domain-specific errors (`StoreError`, `AuthError`) are defined in
//! their respective crates.

use thiserror::Error;

/// Errors that can be raised by any Labdesk crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Entity lookup returned no result.
    #[error("Entity not found: {entity_type} {id}")]
    NotFound { entity_type: String, id: String },

    /// Data failed validation (required fields, score range).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
