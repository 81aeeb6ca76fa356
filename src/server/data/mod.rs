//! Database repository layer for all domain entities.
//!
//! This module contains repository structs that handle database operations for users,
//! bicycles, medical certificates and borrowings. Repositories use SeaORM entity models
//! internally and return domain models to keep the data layer separate from business
//! logic. Each repository is generic over `ConnectionTrait`, so services can hand it the
//! pool for single reads or an open transaction for multi-step updates.

pub mod bicycle;
pub mod borrowing;
pub mod certificate;
pub mod user;

use sea_orm::{
    sea_query::LikeExpr, DatabaseConnection, DatabaseTransaction, DbErr, SqliteTransactionMode,
    TransactionOptions, TransactionTrait,
};

const LIKE_ESCAPE: char = '\\';

/// Opens a transaction for a read-then-write operation.
///
/// On SQLite the transaction starts with `BEGIN IMMEDIATE`, taking the write lock up
/// front. Concurrent writers then wait on the busy timeout at `BEGIN` instead of
/// failing with `database is locked` when a read would later upgrade to a write. Other
/// backends ignore the mode.
///
/// # Arguments
/// - `db` - Connection pool to start the transaction on
///
/// # Returns
/// - `Ok(DatabaseTransaction)` - Open transaction; rolled back if dropped uncommitted
/// - `Err(DbErr)` - Failed to begin the transaction
pub async fn begin_write(db: &DatabaseConnection) -> Result<DatabaseTransaction, DbErr> {
    db.begin_with_options(TransactionOptions {
        sqlite_transaction_mode: Some(SqliteTransactionMode::Immediate),
        ..Default::default()
    })
    .await
}

/// Builds a `LIKE` pattern matching `term` anywhere in a column.
///
/// `%` and `_` in the term match themselves rather than acting as wildcards.
pub(crate) fn substring_pattern(term: &str) -> LikeExpr {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | LIKE_ESCAPE) {
            pattern.push(LIKE_ESCAPE);
        }
        pattern.push(c);
    }
    pattern.push('%');

    LikeExpr::new(pattern).escape(LIKE_ESCAPE)
}
