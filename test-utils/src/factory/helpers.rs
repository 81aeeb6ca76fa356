//! Shared helper utilities for factory methods.

use chrono::{DateTime, Duration, Utc};
use sea_orm::{DatabaseConnection, DbErr};

use crate::factory::{bicycle::BicycleFactory, borrowing::BorrowingFactory};

/// Counter for generating unique values in tests.
static COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1);

/// Gets the next unique counter value for test data.
pub fn next_id() -> u64 {
    COUNTER.fetch_add(1, std::sync::atomic::Ordering::SeqCst)
}

/// Creates a bicycle in `borrowed` state together with the open borrowing that holds it.
///
/// Keeps the invariant "bicycle is borrowed iff one open borrowing references it" intact,
/// which raw factories do not.
///
/// # Arguments
/// - `db` - Database connection
/// - `user_id` - Borrower
/// - `borrowed_at` - Loan start; due time is 14 days later
/// - `status` - `active` or `overdue`
///
/// # Returns
/// - `Ok((bicycle, borrowing))` - Created entities
/// - `Err(DbErr)` - Database error during creation
pub async fn create_loan_with_status(
    db: &DatabaseConnection,
    user_id: i32,
    borrowed_at: DateTime<Utc>,
    status: &str,
) -> Result<(entity::bicycle::Model, entity::borrowing::Model), DbErr> {
    let bicycle = BicycleFactory::new(db).status("borrowed").build().await?;
    let borrowing = BorrowingFactory::new(db, user_id, bicycle.id)
        .status(status)
        .borrowed_at(borrowed_at)
        .due_at(borrowed_at + Duration::days(14))
        .build()
        .await?;

    Ok((bicycle, borrowing))
}

/// Creates an `active` loan that started now.
pub async fn create_open_loan(
    db: &DatabaseConnection,
    user_id: i32,
) -> Result<(entity::bicycle::Model, entity::borrowing::Model), DbErr> {
    create_loan_with_status(db, user_id, Utc::now(), "active").await
}

/// Creates a loan whose due time passed a day ago but which the sweep has not seen yet.
pub async fn create_lapsed_loan(
    db: &DatabaseConnection,
    user_id: i32,
) -> Result<(entity::bicycle::Model, entity::borrowing::Model), DbErr> {
    create_loan_with_status(db, user_id, Utc::now() - Duration::days(15), "active").await
}
