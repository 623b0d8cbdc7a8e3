//! Collection namespace.
//!
//! The backend partitions report collections under a four-segment path,
//! `tenant/{app_id}/public/data/lab_reports`. Every row carries the
//! `app_id` and every query filters on it, so one database can host many
//! tenants without cross-reads.

use std::fmt;

/// Collection name — the final path segment.
pub const COLLECTION_NAME: &str = "lab_reports";

/// Four-segment namespace of one tenant's report collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionPath {
    app_id: String,
}

impl CollectionPath {
    #[must_use]
    pub fn new(app_id: impl Into<String>) -> Self {
        Self {
            app_id: app_id.into(),
        }
    }

    /// The tenant application id (second segment).
    #[must_use]
    pub fn app_id(&self) -> &str {
        &self.app_id
    }

    /// The path segments, root first.
    #[must_use]
    pub fn segments(&self) -> [&str; 5] {
        ["tenant", &self.app_id, "public", "data", COLLECTION_NAME]
    }
}

impl fmt::Display for CollectionPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "tenant/{}/public/data/{COLLECTION_NAME}",
            self.app_id
        )
    }
}
