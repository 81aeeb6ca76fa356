//! Errors for borrow and return operations.

use sea_orm::DbErr;
use thiserror::Error;

use crate::server::{
    error::{auth::AuthError, ErrorKind},
    model::eligibility::EligibilityReason,
};

/// Failure modes of `RequestBorrow`.
#[derive(Error, Debug)]
pub enum BorrowError {
    #[error("Invalid borrow request: {0}")]
    Validation(String),

    #[error("User {0} not found")]
    UserNotFound(i32),

    #[error("Bicycle {0} not found")]
    BicycleNotFound(i32),

    /// Bicycle is borrowed, in maintenance, or was taken by a concurrent request.
    #[error("Bicycle {0} is not available")]
    BicycleUnavailable(i32),

    #[error("User is not eligible to borrow: {}", .0.code())]
    NotEligible(EligibilityReason),

    #[error(transparent)]
    Db(#[from] DbErr),
}

impl BorrowError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::UserNotFound(_) => "user-not-found",
            Self::BicycleNotFound(_) => "bicycle-not-found",
            Self::BicycleUnavailable(_) => "bicycle-unavailable",
            Self::NotEligible(_) => "not-eligible",
            Self::Db(_) => "internal",
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::UserNotFound(_) | Self::BicycleNotFound(_) => ErrorKind::NotFound,
            Self::BicycleUnavailable(_) | Self::NotEligible(_) => ErrorKind::Conflict,
            Self::Db(_) => ErrorKind::Internal,
        }
    }
}

/// Failure modes of `ReturnBicycle`.
#[derive(Error, Debug)]
pub enum ReturnError {
    #[error("Invalid return request: {0}")]
    Validation(String),

    #[error("Borrowing {0} not found")]
    NotFound(i32),

    /// The borrowing is already terminal; retried returns land here.
    #[error("Borrowing {0} has already been returned")]
    AlreadyReturned(i32),

    #[error("User {0} may not return this borrowing")]
    Forbidden(i32),

    #[error(transparent)]
    Db(#[from] DbErr),
}

impl ReturnError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::NotFound(_) => "not-found",
            Self::AlreadyReturned(_) => "already-returned",
            Self::Forbidden(_) => "forbidden",
            Self::Db(_) => "internal",
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::AlreadyReturned(_) => ErrorKind::Conflict,
            Self::Forbidden(_) => ErrorKind::Authorization,
            Self::Db(_) => ErrorKind::Internal,
        }
    }
}

impl From<AuthError> for ReturnError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::DbErr(db) => Self::Db(db),
            AuthError::UserNotInDatabase(id) | AuthError::AccessDenied(id, _) => {
                Self::Forbidden(id)
            }
        }
    }
}
