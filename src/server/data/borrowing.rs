//! Borrowing data repository.
//!
//! This module provides the `BorrowingRepository` for loan records. Every lifecycle
//! transition is a conditional update that names the statuses it may leave, so a
//! transition that lost a race affects zero rows instead of overwriting a newer state.
//! Borrowings are never deleted.

use chrono::{DateTime, Utc};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, Condition, ConnectionTrait,
    DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::{
    data::substring_pattern,
    model::borrowing::{Borrowing, BorrowingFilter, BorrowingStatus},
};

/// Stored values of the open statuses, for `IN` filters.
fn open_statuses() -> [&'static str; 2] {
    BorrowingStatus::OPEN.map(|status| status.as_str())
}

/// Repository providing database operations for borrowings.
pub struct BorrowingRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> BorrowingRepository<'a, C> {
    /// Creates a new BorrowingRepository instance.
    ///
    /// # Arguments
    /// - `db` - Database connection or open transaction
    ///
    /// # Returns
    /// - `BorrowingRepository` - New repository instance
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts a new `active` borrowing.
    ///
    /// # Arguments
    /// - `user_id` - Borrower
    /// - `bicycle_id` - Bicycle being lent
    /// - `borrowed_at` - Loan start
    /// - `due_at` - Loan end
    ///
    /// # Returns
    /// - `Ok(Borrowing)` - The created borrowing
    /// - `Err(DbErr)` - Database error during insert
    pub async fn create(
        &self,
        user_id: i32,
        bicycle_id: i32,
        borrowed_at: DateTime<Utc>,
        due_at: DateTime<Utc>,
    ) -> Result<Borrowing, DbErr> {
        let entity = entity::borrowing::ActiveModel {
            user_id: ActiveValue::Set(user_id),
            bicycle_id: ActiveValue::Set(bicycle_id),
            status: ActiveValue::Set(BorrowingStatus::Active.as_str().to_string()),
            borrowed_at: ActiveValue::Set(borrowed_at),
            due_at: ActiveValue::Set(due_at),
            returned_at: ActiveValue::Set(None),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(Borrowing::from_entity(entity)?)
    }

    /// Finds a borrowing by id.
    ///
    /// # Returns
    /// - `Ok(Some(Borrowing))` - Borrowing found
    /// - `Ok(None)` - No borrowing with that id
    /// - `Err(DbErr)` - Database error during query
    pub async fn find_by_id(&self, borrowing_id: i32) -> Result<Option<Borrowing>, DbErr> {
        let entity = entity::prelude::Borrowing::find_by_id(borrowing_id)
            .one(self.db)
            .await?;

        Ok(entity.map(Borrowing::from_entity).transpose()?)
    }

    /// Counts the user's borrowings that still hold a bicycle (`active` or `overdue`).
    pub async fn count_open_for_user(&self, user_id: i32) -> Result<u64, DbErr> {
        entity::prelude::Borrowing::find()
            .filter(entity::borrowing::Column::UserId.eq(user_id))
            .filter(entity::borrowing::Column::Status.is_in(open_statuses()))
            .count(self.db)
            .await
    }

    /// Counts the user's lapsed borrowings at `now`.
    ///
    /// A borrowing is lapsed when it is marked `overdue`, or when it is still `active` with
    /// a due time before `now` because the sweep has not run since it fell due.
    pub async fn count_lapsed_for_user(
        &self,
        user_id: i32,
        now: DateTime<Utc>,
    ) -> Result<u64, DbErr> {
        entity::prelude::Borrowing::find()
            .filter(entity::borrowing::Column::UserId.eq(user_id))
            .filter(
                Condition::any()
                    .add(entity::borrowing::Column::Status.eq(BorrowingStatus::Overdue.as_str()))
                    .add(
                        Condition::all()
                            .add(
                                entity::borrowing::Column::Status
                                    .eq(BorrowingStatus::Active.as_str()),
                            )
                            .add(entity::borrowing::Column::DueAt.lt(now)),
                    ),
            )
            .count(self.db)
            .await
    }

    /// Moves an open borrowing to `returned` and stamps the return time.
    ///
    /// # Returns
    /// - `Ok(true)` - Borrowing was open and is now returned
    /// - `Ok(false)` - Borrowing missing or already returned
    /// - `Err(DbErr)` - Database error during update
    pub async fn mark_returned(&self, borrowing_id: i32, now: DateTime<Utc>) -> Result<bool, DbErr> {
        let result = entity::prelude::Borrowing::update_many()
            .col_expr(
                entity::borrowing::Column::Status,
                Expr::value(BorrowingStatus::Returned.as_str()),
            )
            .col_expr(entity::borrowing::Column::ReturnedAt, Expr::value(Some(now)))
            .filter(entity::borrowing::Column::Id.eq(borrowing_id))
            .filter(entity::borrowing::Column::Status.is_in(open_statuses()))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Marks every `active` borrowing whose due time is strictly before `now` as `overdue`.
    ///
    /// A single conditional statement; rows that were returned concurrently no longer
    /// match and are left alone. Running it twice with the same `now` affects zero rows
    /// the second time.
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of borrowings transitioned
    /// - `Err(DbErr)` - Database error during update
    pub async fn sweep_overdue(&self, now: DateTime<Utc>) -> Result<u64, DbErr> {
        let result = entity::prelude::Borrowing::update_many()
            .col_expr(
                entity::borrowing::Column::Status,
                Expr::value(BorrowingStatus::Overdue.as_str()),
            )
            .filter(entity::borrowing::Column::Status.eq(BorrowingStatus::Active.as_str()))
            .filter(entity::borrowing::Column::DueAt.lt(now))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Lists borrowings newest-first by `borrowed_at`, ties broken by id descending.
    ///
    /// Free text is matched as a substring of the borrower's name or email or the
    /// bicycle's name or code.
    ///
    /// # Arguments
    /// - `filter` - Optional status and normalised search term
    ///
    /// # Returns
    /// - `Ok(Vec<Borrowing>)` - Matching borrowings
    /// - `Err(DbErr)` - Database error during query
    pub async fn list(&self, filter: &BorrowingFilter) -> Result<Vec<Borrowing>, DbErr> {
        let mut query = entity::prelude::Borrowing::find()
            .inner_join(entity::prelude::User)
            .inner_join(entity::prelude::Bicycle);

        if let Some(status) = filter.status {
            query = query.filter(entity::borrowing::Column::Status.eq(status.as_str()));
        }
        if let Some(term) = filter.search.as_deref() {
            let pattern = substring_pattern(term);
            query = query.filter(
                Condition::any()
                    .add(entity::user::Column::Name.like(pattern.clone()))
                    .add(entity::user::Column::Email.like(pattern.clone()))
                    .add(entity::bicycle::Column::Name.like(pattern.clone()))
                    .add(entity::bicycle::Column::Code.like(pattern)),
            );
        }

        let entities = query
            .order_by_desc(entity::borrowing::Column::BorrowedAt)
            .order_by_desc(entity::borrowing::Column::Id)
            .all(self.db)
            .await?;

        Ok(entities
            .into_iter()
            .map(Borrowing::from_entity)
            .collect::<Result<Vec<_>, _>>()?)
    }
}
