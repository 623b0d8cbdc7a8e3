//! # labdesk-store
//!
//! libSQL report store adapter for Labdesk.
//!
//! Wraps the external report collection: role-scoped queries, report
//! creation with store-assigned timestamps, the evaluation merge-write, and
//! cancelable live subscriptions that replace the whole result set on every
//! change.
//!
//! Uses the `libsql` crate — local file databases for tests and single-host
//! deployments, embedded replicas with cloud sync for the managed backend.

pub mod collection;
pub mod error;
pub mod helpers;
mod migrations;
pub mod store;
pub mod subscription;

pub use collection::CollectionPath;
pub use error::StoreError;
pub use store::{QueryScope, ReportStore, Revision};
pub use subscription::Subscription;

use libsql::Builder;

/// Central database handle for the report collection.
///
/// Wraps a libSQL database and connection, runs migrations on open, and
/// generates store-assigned report IDs.
pub struct LabDb {
    db: libsql::Database,
    conn: libsql::Connection,
    synced: bool,
}

impl LabDb {
    /// Open a local-only database at the given path (no cloud sync).
    ///
    /// Runs migrations automatically on first open.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the database cannot be opened or migrations
    /// fail.
    pub async fn open_local(path: &str) -> Result<Self, StoreError> {
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;

        // Must be per-connection in SQLite
        conn.execute("PRAGMA foreign_keys = ON", ())
            .await
            .map_err(|e| StoreError::Migration(format!("PRAGMA foreign_keys: {e}")))?;

        let lab_db = Self {
            db,
            conn,
            synced: false,
        };
        lab_db.run_migrations().await?;
        Ok(lab_db)
    }

    /// Open an embedded replica synced against the managed backend.
    ///
    /// Sync is manual — call [`Self::sync`] to pull remote state; writes are
    /// forwarded to the remote by libSQL.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the replica cannot be built or migrations
    /// fail.
    pub async fn open_synced(
        local_replica_path: &str,
        remote_url: &str,
        auth_token: &str,
    ) -> Result<Self, StoreError> {
        let db = Builder::new_remote_replica(
            local_replica_path,
            remote_url.to_string(),
            auth_token.to_string(),
        )
        .read_your_writes(true)
        .build()
        .await?;
        let conn = db.connect()?;

        let lab_db = Self {
            db,
            conn,
            synced: true,
        };
        lab_db.run_migrations().await?;
        Ok(lab_db)
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }

    /// Whether this handle is backed by a synced embedded replica.
    #[must_use]
    pub const fn is_synced_replica(&self) -> bool {
        self.synced
    }

    /// Pull remote state into the local replica. No-op for local databases.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the replica sync fails.
    pub async fn sync(&self) -> Result<(), StoreError> {
        if !self.synced {
            tracing::debug!("sync requested on local database — nothing to do");
            return Ok(());
        }
        self.db.sync().await?;
        Ok(())
    }

    /// Generate a prefixed ID via libSQL. Returns e.g., `"rpt-a3f8b2c1"`.
    ///
    /// Uses `randomblob(4)` in SQL to produce 8-char hex, then prepends the
    /// prefix.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the query fails or returns no rows.
    pub async fn generate_id(&self, prefix: &str) -> Result<String, StoreError> {
        let mut rows = self
            .conn
            .query(
                &format!("SELECT '{prefix}-' || lower(hex(randomblob(4)))"),
                (),
            )
            .await?;
        let row = rows.next().await?.ok_or(StoreError::NoResult)?;
        Ok(row.get::<String>(0)?)
    }
}
