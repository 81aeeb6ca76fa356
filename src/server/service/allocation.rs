//! Allocation of bicycles to borrowers.
//!
//! This module provides the `AllocationService`, the only path that moves a bicycle from
//! `available` to `borrowed`. A request holds the borrower's lock and the bicycle's lock
//! while it re-checks eligibility, swaps the bicycle status and inserts the borrowing in
//! one transaction, so concurrent requests for the same bicycle produce exactly one
//! borrowing and concurrent requests by the same user cannot exceed the borrowing limit.

use chrono::{DateTime, Utc};
use sea_orm::DatabaseConnection;
use tracing::{debug, info};

use crate::server::{
    data::{
        begin_write, bicycle::BicycleRepository, borrowing::BorrowingRepository,
        user::UserRepository,
    },
    error::lending::BorrowError,
    model::{bicycle::BicycleStatus, borrowing::Borrowing, policy::LendingPolicy},
    service::{
        eligibility::EligibilityService,
        lock::{RecordKey, RecordLocks},
    },
    util::parse::require_id,
};

/// Service arbitrating borrow requests.
pub struct AllocationService<'a> {
    db: &'a DatabaseConnection,
    locks: &'a RecordLocks,
    policy: LendingPolicy,
}

impl<'a> AllocationService<'a> {
    /// Creates a new AllocationService instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    /// - `locks` - Shared per-record lock registry
    /// - `policy` - Loan period and borrowing limit
    ///
    /// # Returns
    /// - `AllocationService` - New service instance
    pub fn new(db: &'a DatabaseConnection, locks: &'a RecordLocks, policy: LendingPolicy) -> Self {
        Self { db, locks, policy }
    }

    /// Lends a bicycle to a user.
    ///
    /// Checks run in this order: user exists, bicycle exists, bicycle is available, user
    /// is eligible. The bicycle status swap is conditional on `available`, so a request
    /// that lost a race is reported as unavailable. Any early return drops the
    /// transaction, rolling back everything written so far.
    ///
    /// # Arguments
    /// - `user_id` - Borrower
    /// - `bicycle_id` - Requested bicycle
    /// - `now` - Borrow time; the due time is `now` plus the loan period
    ///
    /// # Returns
    /// - `Ok(Borrowing)` - New active borrowing
    /// - `Err(BorrowError::Validation)` - Non-positive id
    /// - `Err(BorrowError::UserNotFound)` - No such user
    /// - `Err(BorrowError::BicycleNotFound)` - No such bicycle
    /// - `Err(BorrowError::BicycleUnavailable)` - Bicycle borrowed or in maintenance
    /// - `Err(BorrowError::NotEligible)` - Eligibility rule failed, with its reason
    /// - `Err(BorrowError::Db)` - Database error
    pub async fn request_borrow(
        &self,
        user_id: i32,
        bicycle_id: i32,
        now: DateTime<Utc>,
    ) -> Result<Borrowing, BorrowError> {
        require_id("user_id", user_id).map_err(BorrowError::Validation)?;
        require_id("bicycle_id", bicycle_id).map_err(BorrowError::Validation)?;

        let _user_lock = self.locks.lock(RecordKey::User(user_id)).await;
        let _bicycle_lock = self.locks.lock(RecordKey::Bicycle(bicycle_id)).await;

        let txn = begin_write(self.db).await?;

        let Some(user) = UserRepository::new(&txn).find_by_id(user_id).await? else {
            return Err(BorrowError::UserNotFound(user_id));
        };

        let bicycle_repo = BicycleRepository::new(&txn);
        let Some(bicycle) = bicycle_repo.find_by_id(bicycle_id).await? else {
            return Err(BorrowError::BicycleNotFound(bicycle_id));
        };

        if bicycle.status != BicycleStatus::Available {
            debug!(
                "Borrow request by user {} refused: bicycle {} is {}",
                user_id,
                bicycle_id,
                bicycle.status.as_str()
            );
            return Err(BorrowError::BicycleUnavailable(bicycle_id));
        }

        let verdict = EligibilityService::new(&txn, self.policy)
            .evaluate_user(&user, now)
            .await?;
        if !verdict.eligible {
            debug!(
                "Borrow request by user {} refused: {}",
                user_id,
                verdict.reason.code()
            );
            return Err(BorrowError::NotEligible(verdict.reason));
        }

        let swapped = bicycle_repo
            .compare_and_set_status(bicycle_id, BicycleStatus::Available, BicycleStatus::Borrowed)
            .await?;
        if !swapped {
            return Err(BorrowError::BicycleUnavailable(bicycle_id));
        }

        let borrowing = BorrowingRepository::new(&txn)
            .create(user_id, bicycle_id, now, now + self.policy.loan_period)
            .await?;

        txn.commit().await?;

        info!(
            "Bicycle {} lent to user {} as borrowing {} (due {})",
            bicycle_id, user_id, borrowing.id, borrowing.due_at
        );

        Ok(borrowing)
    }
}
