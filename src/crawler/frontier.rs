//! Frontier handle shared by the workers
//!
//! Wraps the durable frontier in storage with a wake-up signal: a worker
//! that finds the queue empty parks until a new URL is pushed or the idle
//! wait runs out, instead of spinning on the database.

use crate::storage::{lock, FrontierStore, SharedStorage, StorageResult};
use std::time::Duration;
use tokio::sync::Notify;

/// Shared, blocking view of the URL frontier
pub struct Frontier {
    storage: SharedStorage,
    notify: Notify,
    idle_wait: Duration,
}

impl Frontier {
    /// Creates a frontier handle over shared storage
    pub fn new(storage: SharedStorage, idle_wait: Duration) -> Self {
        Self {
            storage,
            notify: Notify::new(),
            idle_wait,
        }
    }

    /// Queues a URL and wakes idle workers if it is new
    ///
    /// Returns true if the URL was newly queued.
    pub fn push(&self, url: &str) -> StorageResult<bool> {
        let queued = lock(&self.storage).enqueue(url)?;
        if queued {
            self.notify.notify_waiters();
        }
        Ok(queued)
    }

    /// Claims the next URL without waiting
    pub fn try_pop(&self) -> StorageResult<Option<String>> {
        lock(&self.storage).dequeue()
    }

    /// Claims the next URL, waiting up to the idle wait if the queue is empty
    ///
    /// Returns `Ok(None)` if nothing arrived in time.
    pub async fn pop(&self) -> StorageResult<Option<String>> {
        let notified = self.notify.notified();
        tokio::pin!(notified);
        notified.as_mut().enable();

        if let Some(url) = self.try_pop()? {
            return Ok(Some(url));
        }

        if tokio::time::timeout(self.idle_wait, notified).await.is_err() {
            return Ok(None);
        }

        self.try_pop()
    }

    /// Moves a claimed URL into the visit history
    pub fn complete(&self, url: &str) -> StorageResult<()> {
        lock(&self.storage).mark_visited(url)
    }

    /// Number of queued URLs, claimed ones included
    pub fn queued_len(&self) -> StorageResult<u64> {
        lock(&self.storage).queued_len()
    }

    /// Wakes every idle worker (used on shutdown)
    pub fn wake_all(&self) {
        self.notify.notify_waiters();
    }
}
