//! Application state shared across request handlers and background jobs.
//!
//! The state is initialized once during startup and cloned into each consumer. Every field
//! is cheap to clone: the database connection is a pool handle, the lock registry is
//! reference counted, and the lending policy is `Copy`.

use sea_orm::DatabaseConnection;

use crate::server::{model::policy::LendingPolicy, service::lock::RecordLocks};

#[derive(Clone)]
pub struct AppState {
    /// Database connection pool for accessing persistent storage.
    pub db: DatabaseConnection,

    /// Per-record locks serialising writes to the same user, bicycle or certificate.
    pub locks: RecordLocks,

    /// Loan period and borrowing limit loaded from configuration.
    pub policy: LendingPolicy,
}

impl AppState {
    pub fn new(db: DatabaseConnection, policy: LendingPolicy) -> Self {
        Self {
            db,
            locks: RecordLocks::new(),
            policy,
        }
    }
}
