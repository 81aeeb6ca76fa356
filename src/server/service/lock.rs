//! In-process per-record mutual exclusion.
//!
//! Operations that read-then-write a record hold that record's lock for the duration of
//! their transaction. Locks are keyed per record, so work on different bicycles or users
//! proceeds in parallel. When an operation needs several locks it acquires them in the
//! order user, bicycle, certificate.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// Identifies a lockable record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKey {
    User(i32),
    Bicycle(i32),
    Certificate(i32),
}

/// Registry of per-record locks shared across request handlers.
///
/// Cloning is cheap and every clone refers to the same registry.
#[derive(Clone, Default)]
pub struct RecordLocks {
    locks: Arc<Mutex<HashMap<RecordKey, Arc<Mutex<()>>>>>,
}

impl RecordLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits for exclusive access to `key`.
    ///
    /// The returned guard releases the lock when dropped, including when the owning task
    /// is cancelled.
    ///
    /// # Arguments
    /// - `key` - Record to lock
    ///
    /// # Returns
    /// - `OwnedMutexGuard<()>` - Guard held until the caller's transaction completes
    pub async fn lock(&self, key: RecordKey) -> OwnedMutexGuard<()> {
        let handle = {
            let mut locks = self.locks.lock().await;
            // Drop entries nobody holds or waits on.
            locks.retain(|_, handle| Arc::strong_count(handle) > 1);
            locks.entry(key).or_default().clone()
        };

        handle.lock_owned().await
    }

    #[cfg(test)]
    async fn tracked(&self) -> usize {
        self.locks.lock().await.len()
    }
}
