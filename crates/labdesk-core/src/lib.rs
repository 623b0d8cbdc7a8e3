//! # labdesk-core
//!
//! Core types, ID prefixes, and error types for Labdesk.
//!
//! This crate provides the foundational types shared across all Labdesk crates:
//! - Entity structs for the report domain (reports, evaluations, drafts)
//! - Role and view-state enums with transition helpers
//! - The authenticated identity passed between crates
//! - ID prefix constants
//! - Cross-cutting error types

pub mod entities;
pub mod enums;
pub mod errors;
pub mod identity;
pub mod ids;
