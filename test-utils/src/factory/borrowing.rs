//! Borrowing factory for raw borrowing rows.
//!
//! Prefer `helpers::create_open_loan` when the bicycle's status must match.

use chrono::{DateTime, Duration, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

pub struct BorrowingFactory<'a> {
    db: &'a DatabaseConnection,
    user_id: i32,
    bicycle_id: i32,
    status: String,
    borrowed_at: DateTime<Utc>,
    due_at: DateTime<Utc>,
    returned_at: Option<DateTime<Utc>>,
}

impl<'a> BorrowingFactory<'a> {
    /// Creates a new BorrowingFactory with default values.
    ///
    /// Defaults:
    /// - status: `"active"`
    /// - borrowed_at: now
    /// - due_at: 14 days from now
    /// - returned_at: `None`
    pub fn new(db: &'a DatabaseConnection, user_id: i32, bicycle_id: i32) -> Self {
        let now = Utc::now();
        Self {
            db,
            user_id,
            bicycle_id,
            status: "active".to_string(),
            borrowed_at: now,
            due_at: now + Duration::days(14),
            returned_at: None,
        }
    }

    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    pub fn borrowed_at(mut self, borrowed_at: DateTime<Utc>) -> Self {
        self.borrowed_at = borrowed_at;
        self
    }

    pub fn due_at(mut self, due_at: DateTime<Utc>) -> Self {
        self.due_at = due_at;
        self
    }

    /// Marks the row returned at the given time.
    pub fn returned_at(mut self, returned_at: DateTime<Utc>) -> Self {
        self.status = "returned".to_string();
        self.returned_at = Some(returned_at);
        self
    }

    pub async fn build(self) -> Result<entity::borrowing::Model, DbErr> {
        entity::borrowing::ActiveModel {
            user_id: ActiveValue::Set(self.user_id),
            bicycle_id: ActiveValue::Set(self.bicycle_id),
            status: ActiveValue::Set(self.status),
            borrowed_at: ActiveValue::Set(self.borrowed_at),
            due_at: ActiveValue::Set(self.due_at),
            returned_at: ActiveValue::Set(self.returned_at),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}
