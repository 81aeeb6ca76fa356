//! Borrowing lifecycle transitions.
//!
//! Returns move an open borrowing to `returned` and free its bicycle in one transaction.
//! The overdue sweep is a single conditional update and takes no lock; a return that
//! commits first simply removes its row from the sweep's match set.

use chrono::{DateTime, Utc};
use sea_orm::{DatabaseConnection, DbErr};
use tracing::{debug, info};

use crate::server::{
    data::{begin_write, bicycle::BicycleRepository, borrowing::BorrowingRepository},
    error::lending::ReturnError,
    middleware::auth::{AuthGuard, Permission},
    model::{bicycle::BicycleStatus, borrowing::Borrowing},
    service::lock::{RecordKey, RecordLocks},
    util::parse::require_id,
};

pub struct LifecycleService<'a> {
    db: &'a DatabaseConnection,
    locks: &'a RecordLocks,
}

impl<'a> LifecycleService<'a> {
    pub fn new(db: &'a DatabaseConnection, locks: &'a RecordLocks) -> Self {
        Self { db, locks }
    }

    /// Closes a borrowing and makes its bicycle available again.
    ///
    /// Only the borrower, or an admin checking the bicycle in at the desk, may return it.
    /// The borrowing update is conditional on an open status, so a retried or concurrent
    /// second return is reported as already returned.
    ///
    /// # Arguments
    /// - `borrowing_id` - Borrowing to close
    /// - `user_id` - Caller performing the return
    /// - `now` - Return timestamp
    ///
    /// # Returns
    /// - `Ok(Borrowing)` - The returned borrowing
    /// - `Err(ReturnError::Validation)` - Non-positive id
    /// - `Err(ReturnError::NotFound)` - No such borrowing
    /// - `Err(ReturnError::Forbidden)` - Caller is neither the borrower nor an admin
    /// - `Err(ReturnError::AlreadyReturned)` - Borrowing is already closed
    /// - `Err(ReturnError::Db)` - Database error, including a bicycle found out of sync
    pub async fn return_bicycle(
        &self,
        borrowing_id: i32,
        user_id: i32,
        now: DateTime<Utc>,
    ) -> Result<Borrowing, ReturnError> {
        require_id("borrowing_id", borrowing_id).map_err(ReturnError::Validation)?;
        require_id("user_id", user_id).map_err(ReturnError::Validation)?;

        let Some(borrowing) = BorrowingRepository::new(self.db)
            .find_by_id(borrowing_id)
            .await?
        else {
            return Err(ReturnError::NotFound(borrowing_id));
        };

        if borrowing.user_id != user_id {
            AuthGuard::new(self.db)
                .require(user_id, &[Permission::Admin])
                .await?;
        }

        let _bicycle_lock = self.locks.lock(RecordKey::Bicycle(borrowing.bicycle_id)).await;

        let txn = begin_write(self.db).await?;
        let borrowing_repo = BorrowingRepository::new(&txn);

        if !borrowing_repo.mark_returned(borrowing_id, now).await? {
            debug!("Borrowing {} was already returned", borrowing_id);
            return Err(ReturnError::AlreadyReturned(borrowing_id));
        }

        let freed = BicycleRepository::new(&txn)
            .compare_and_set_status(
                borrowing.bicycle_id,
                BicycleStatus::Borrowed,
                BicycleStatus::Available,
            )
            .await?;
        if !freed {
            return Err(DbErr::RecordNotUpdated.into());
        }

        let Some(returned) = borrowing_repo.find_by_id(borrowing_id).await? else {
            return Err(DbErr::RecordNotFound(format!("borrowing {borrowing_id}")).into());
        };

        txn.commit().await?;

        info!(
            "Borrowing {} returned by user {}; bicycle {} available",
            borrowing_id, user_id, borrowing.bicycle_id
        );

        Ok(returned)
    }

    /// Marks every active borrowing past its due time as overdue.
    ///
    /// # Arguments
    /// - `now` - Instant compared against each borrowing's due time
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of borrowings transitioned; zero on a repeated run
    /// - `Err(DbErr)` - Database error during update
    pub async fn sweep_overdue(&self, now: DateTime<Utc>) -> Result<u64, DbErr> {
        let count = BorrowingRepository::new(self.db).sweep_overdue(now).await?;

        if count > 0 {
            info!("Marked {} borrowing(s) overdue", count);
        } else {
            debug!("Overdue sweep found nothing to mark");
        }

        Ok(count)
    }
}
