//! Cancelable live subscription handle.

use tokio::sync::watch;
use tokio::task::AbortHandle;

use labdesk_core::entities::Report;

/// Handle to a standing scoped query.
///
/// Each update replaces the entire in-memory set. Cancellation is explicit
/// and idempotent; dropping the handle cancels too, so listeners can never
/// accumulate across re-subscription.
#[derive(Debug)]
pub struct Subscription {
    rx: watch::Receiver<Vec<Report>>,
    abort: AbortHandle,
}

impl Subscription {
    pub(crate) const fn new(rx: watch::Receiver<Vec<Report>>, abort: AbortHandle) -> Self {
        Self { rx, abort }
    }

    /// Wait for the next replacement set.
    ///
    /// The first call yields the initial snapshot. Returns `None` once the
    /// subscription has stopped (canceled, or its query failed).
    pub async fn next(&mut self) -> Option<Vec<Report>> {
        self.rx.changed().await.ok()?;
        Some(self.rx.borrow_and_update().clone())
    }

    /// The most recently pushed set, without waiting.
    #[must_use]
    pub fn current(&self) -> Vec<Report> {
        self.rx.borrow().clone()
    }

    /// A second receiver onto the same live sequence.
    #[must_use]
    pub fn watch(&self) -> watch::Receiver<Vec<Report>> {
        self.rx.clone()
    }

    /// Stop the subscription. Safe to call any number of times.
    pub fn cancel(&self) {
        self.abort.abort();
    }

    /// Whether the background task has stopped.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.abort.is_finished()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.abort.abort();
    }
}
