//! Borrowing domain models.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::str::FromStr;

use crate::server::error::internal::InternalError;

/// Lifecycle state of a borrowing.
///
/// Transitions only move forward: `Active -> Overdue` by the sweep and
/// `Active | Overdue -> Returned` by the return action. `Returned` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BorrowingStatus {
    Active,
    Overdue,
    Returned,
}

impl BorrowingStatus {
    /// Statuses that still hold a bicycle.
    pub const OPEN: [BorrowingStatus; 2] = [BorrowingStatus::Active, BorrowingStatus::Overdue];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Overdue => "overdue",
            Self::Returned => "returned",
        }
    }
}

impl FromStr for BorrowingStatus {
    type Err = InternalError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "active" => Ok(Self::Active),
            "overdue" => Ok(Self::Overdue),
            "returned" => Ok(Self::Returned),
            other => Err(InternalError::unknown_status("borrowing status", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Borrowing {
    pub id: i32,
    pub user_id: i32,
    pub bicycle_id: i32,
    pub status: BorrowingStatus,
    pub borrowed_at: DateTime<Utc>,
    /// `borrowed_at` plus the loan period in force when the loan started.
    pub due_at: DateTime<Utc>,
    /// Set exactly when `status` is `Returned`.
    pub returned_at: Option<DateTime<Utc>>,
}

impl Borrowing {
    /// Converts an entity model to a borrowing domain model at the repository boundary.
    pub fn from_entity(entity: entity::borrowing::Model) -> Result<Self, InternalError> {
        Ok(Self {
            id: entity.id,
            user_id: entity.user_id,
            bicycle_id: entity.bicycle_id,
            status: entity.status.parse()?,
            borrowed_at: entity.borrowed_at,
            due_at: entity.due_at,
            returned_at: entity.returned_at,
        })
    }
}

/// Filter for listing borrowings.
#[derive(Debug, Clone, Default)]
pub struct BorrowingFilter {
    pub status: Option<BorrowingStatus>,
    /// Substring matched against borrower name or email and bicycle name or code.
    pub search: Option<String>,
}
