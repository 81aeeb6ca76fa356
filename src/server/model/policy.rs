//! Lending policy knobs.
//!
//! Neither the loan period nor the per-user limit is fixed by the product; both are
//! loaded from configuration and default to a 14-day loan and one bicycle at a time.

use chrono::Duration;

pub const DEFAULT_LOAN_PERIOD_DAYS: i64 = 14;
pub const DEFAULT_MAX_ACTIVE_BORROWINGS: u64 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LendingPolicy {
    /// Added to the borrow time to produce the due time.
    pub loan_period: Duration,
    /// Open (active or overdue) borrowings a user may hold at once.
    pub max_active_borrowings: u64,
}

impl Default for LendingPolicy {
    fn default() -> Self {
        Self {
            loan_period: Duration::days(DEFAULT_LOAN_PERIOD_DAYS),
            max_active_borrowings: DEFAULT_MAX_ACTIVE_BORROWINGS,
        }
    }
}
