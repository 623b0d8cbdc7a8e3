//! Report store service: role-scoped reads, report creation, the evaluation
//! merge-write, and live subscriptions.
//!
//! The store is the sole writer surface for the collection. Every confirmed
//! mutation (and every explicit [`ReportStore::sync`]) fires the change
//! signal that drives live subscriptions.

use tokio::sync::{broadcast, watch};

use labdesk_core::entities::{Evaluation, Report, ReportDraft, validate_marks};
use labdesk_core::enums::Role;
use labdesk_core::ids::PREFIX_REPORT;

use crate::LabDb;
use crate::collection::CollectionPath;
use crate::error::StoreError;
use crate::helpers::{get_opt_string, parse_datetime, parse_optional_datetime};
use crate::subscription::Subscription;

/// Capacity of the change-signal channel. Subscribers that lag simply
/// re-query, so a small buffer is enough.
const CHANGE_CHANNEL_CAPACITY: usize = 16;

const REPORT_COLUMNS: &str = "id, student_id, student_name, experiment_name, data_observations, \
     submission_date, eval_marked, eval_marks, eval_feedback, eval_faculty_id, \
     eval_date, eval_revision";

/// Which slice of the collection a reader sees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryScope {
    /// The full collection, newest first.
    Faculty,
    /// Only reports owned by this student id, newest first.
    Student(String),
}

impl QueryScope {
    /// Shape the scope from a session role.
    #[must_use]
    pub fn for_role(role: Role, user_id: &str) -> Self {
        match role {
            Role::Faculty => Self::Faculty,
            Role::Student => Self::Student(user_id.to_string()),
        }
    }
}

/// Concurrency expectation for the evaluation merge-write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Revision {
    /// Overwrite whatever is there (explicit last-write-wins).
    Any,
    /// Write only if the stored evaluation revision still matches.
    Exact(i64),
}

/// Report store adapter over one tenant's collection.
pub struct ReportStore {
    db: LabDb,
    collection: CollectionPath,
    changes: broadcast::Sender<()>,
}

fn row_to_report(row: &libsql::Row) -> Result<Report, StoreError> {
    Ok(Report {
        id: row.get::<String>(0)?,
        student_id: row.get::<String>(1)?,
        student_name: row.get::<String>(2)?,
        experiment_name: row.get::<String>(3)?,
        data_observations: row.get::<String>(4)?,
        submission_date: parse_datetime(&row.get::<String>(5)?)?,
        evaluation: Evaluation {
            marked: row.get::<i64>(6)? != 0,
            marks: row.get::<Option<i64>>(7)?,
            feedback: row.get::<String>(8)?,
            faculty_id: get_opt_string(row, 9)?,
            evaluation_date: parse_optional_datetime(
                row.get::<Option<String>>(10)?.as_deref(),
            )?,
            revision: row.get::<i64>(11)?,
        },
    })
}

impl ReportStore {
    /// Open a store over a local database file (or `":memory:"`).
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the database cannot be opened.
    pub async fn open_local(path: &str, app_id: &str) -> Result<Self, StoreError> {
        Ok(Self::from_db(LabDb::open_local(path).await?, app_id))
    }

    /// Open a store over a synced embedded replica of the managed backend.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the replica cannot be built.
    pub async fn open_synced(
        local_replica_path: &str,
        remote_url: &str,
        auth_token: &str,
        app_id: &str,
    ) -> Result<Self, StoreError> {
        Ok(Self::from_db(
            LabDb::open_synced(local_replica_path, remote_url, auth_token).await?,
            app_id,
        ))
    }

    /// Wrap an existing database handle (for tests).
    #[must_use]
    pub fn from_db(db: LabDb, app_id: &str) -> Self {
        let (changes, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
        Self {
            db,
            collection: CollectionPath::new(app_id),
            changes,
        }
    }

    /// The collection namespace this store reads and writes.
    #[must_use]
    pub const fn collection(&self) -> &CollectionPath {
        &self.collection
    }

    /// Access the underlying database handle.
    #[must_use]
    pub const fn db(&self) -> &LabDb {
        &self.db
    }

    /// Create one immutable report from a draft.
    ///
    /// `submission_date` is stamped inside the database, not from the client
    /// clock. Returns the stored report including its generated id.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Validation` if a required field is empty (the
    /// caller validates first; the store revalidates), or another
    /// `StoreError` on backend failure.
    pub async fn create_report(&self, draft: &ReportDraft) -> Result<Report, StoreError> {
        draft.validate()?;

        let id = self.db.generate_id(PREFIX_REPORT).await?;
        self.db
            .conn()
            .execute(
                "INSERT INTO lab_reports (id, app_id, student_id, student_name,
                 experiment_name, data_observations, submission_date)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6,
                 strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))",
                libsql::params![
                    id.as_str(),
                    self.collection.app_id(),
                    draft.student_id.as_str(),
                    draft.student_name.as_str(),
                    draft.experiment_name.as_str(),
                    draft.data_observations.as_str(),
                ],
            )
            .await?;

        let report = self.get_report(&id).await?;
        tracing::info!(report_id = %report.id, student_id = %report.student_id, "report created");
        self.notify_changed();
        Ok(report)
    }

    /// Write the evaluation sub-record for one report.
    ///
    /// This is a merge-write: only the `eval_*` columns change; the report
    /// body, owner, and submission date are untouched. `evaluation_date` is
    /// stamped inside the database and feedback is trimmed. The write is
    /// guarded by `expected`: a stale [`Revision::Exact`] fails with
    /// `StoreError::Conflict` and leaves the stored evaluation intact.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Validation` if `marks` is outside `[0, 100]`,
    /// `StoreError::NoResult` if the report does not exist,
    /// `StoreError::Conflict` on a revision mismatch, or another
    /// `StoreError` on backend failure.
    pub async fn mark_evaluation(
        &self,
        report_id: &str,
        marks: i64,
        feedback: &str,
        faculty_id: &str,
        expected: Revision,
    ) -> Result<Report, StoreError> {
        validate_marks(marks)?;
        let feedback = feedback.trim();

        let sql = "UPDATE lab_reports
             SET eval_marked = 1,
                 eval_marks = ?1,
                 eval_feedback = ?2,
                 eval_faculty_id = ?3,
                 eval_date = strftime('%Y-%m-%dT%H:%M:%fZ', 'now'),
                 eval_revision = eval_revision + 1
             WHERE id = ?4 AND app_id = ?5";

        let changed = match expected {
            Revision::Any => {
                self.db
                    .conn()
                    .execute(
                        sql,
                        libsql::params![
                            marks,
                            feedback,
                            faculty_id,
                            report_id,
                            self.collection.app_id(),
                        ],
                    )
                    .await?
            }
            Revision::Exact(revision) => {
                self.db
                    .conn()
                    .execute(
                        &format!("{sql} AND eval_revision = ?6"),
                        libsql::params![
                            marks,
                            feedback,
                            faculty_id,
                            report_id,
                            self.collection.app_id(),
                            revision,
                        ],
                    )
                    .await?
            }
        };

        if changed == 0 {
            // Distinguish a missing report from a lost race.
            let current = self.get_report(report_id).await?;
            return Err(StoreError::Conflict(format!(
                "evaluation of {report_id} changed concurrently (revision is now {})",
                current.evaluation.revision
            )));
        }

        let report = self.get_report(report_id).await?;
        tracing::info!(
            report_id = %report.id,
            faculty_id = %faculty_id,
            marks,
            "evaluation saved"
        );
        self.notify_changed();
        Ok(report)
    }

    /// Fetch one report by id.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NoResult` if no report matches.
    pub async fn get_report(&self, id: &str) -> Result<Report, StoreError> {
        let mut rows = self
            .db
            .conn()
            .query(
                &format!(
                    "SELECT {REPORT_COLUMNS} FROM lab_reports
                     WHERE id = ?1 AND app_id = ?2"
                ),
                libsql::params![id, self.collection.app_id()],
            )
            .await?;
        let row = rows.next().await?.ok_or(StoreError::NoResult)?;
        row_to_report(&row)
    }

    /// Snapshot the scoped report set, newest submission first.
    ///
    /// Ties on `submission_date` break by id so the order is deterministic.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the query fails.
    pub async fn list_reports(&self, scope: &QueryScope) -> Result<Vec<Report>, StoreError> {
        list_scoped(self.db.conn(), self.collection.app_id(), scope).await
    }

    /// Open a live subscription over the scoped report set.
    ///
    /// The subscription pushes the entire replacement set on every change
    /// signal — no incremental patching. It runs until canceled (explicit
    /// and idempotent), dropped, or the underlying query fails, in which
    /// case the error is logged and the sequence stops advancing.
    #[must_use]
    pub fn subscribe(&self, scope: QueryScope) -> Subscription {
        let conn = self.db.conn().clone();
        let app_id = self.collection.app_id().to_string();
        let mut changes = self.changes.subscribe();
        let (tx, rx) = watch::channel(Vec::new());

        let task = tokio::spawn(async move {
            loop {
                match list_scoped(&conn, &app_id, &scope).await {
                    Ok(reports) => {
                        if tx.send(reports).is_err() {
                            // Every receiver is gone — nothing left to feed.
                            break;
                        }
                    }
                    Err(error) => {
                        tracing::error!(
                            %error,
                            "live report query failed; subscription stops advancing"
                        );
                        break;
                    }
                }

                match changes.recv().await {
                    Ok(()) => {}
                    // Missed signals are fine: the next query reads the
                    // whole current set anyway.
                    Err(broadcast::error::RecvError::Lagged(_)) => {}
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        });

        Subscription::new(rx, task.abort_handle())
    }

    /// Pull remote state into the local replica and wake subscribers.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the replica sync fails.
    pub async fn sync(&self) -> Result<(), StoreError> {
        self.db.sync().await?;
        self.notify_changed();
        Ok(())
    }

    fn notify_changed(&self) {
        // No receivers is not an error — nobody is watching right now.
        let _ = self.changes.send(());
    }
}

async fn list_scoped(
    conn: &libsql::Connection,
    app_id: &str,
    scope: &QueryScope,
) -> Result<Vec<Report>, StoreError> {
    let mut rows = match scope {
        QueryScope::Faculty => {
            conn.query(
                &format!(
                    "SELECT {REPORT_COLUMNS} FROM lab_reports
                     WHERE app_id = ?1
                     ORDER BY submission_date DESC, id DESC"
                ),
                libsql::params![app_id],
            )
            .await?
        }
        QueryScope::Student(student_id) => {
            conn.query(
                &format!(
                    "SELECT {REPORT_COLUMNS} FROM lab_reports
                     WHERE app_id = ?1 AND student_id = ?2
                     ORDER BY submission_date DESC, id DESC"
                ),
                libsql::params![app_id, student_id.as_str()],
            )
            .await?
        }
    };

    let mut reports = Vec::new();
    while let Some(row) = rows.next().await? {
        reports.push(row_to_report(&row)?);
    }
    Ok(reports)
}
