//! Errors for bicycle catalogue management.

use sea_orm::DbErr;
use thiserror::Error;

use crate::server::error::{auth::AuthError, ErrorKind};

#[derive(Error, Debug)]
pub enum CatalogueError {
    #[error("Invalid bicycle request: {0}")]
    Validation(String),

    #[error("Bicycle code '{0}' is already registered")]
    DuplicateCode(String),

    #[error("Bicycle {0} not found")]
    NotFound(i32),

    /// Bicycle is out on loan and cannot change state.
    #[error("Bicycle {0} is currently borrowed")]
    BicycleUnavailable(i32),

    #[error("User {0} may not manage bicycles")]
    Forbidden(i32),

    #[error(transparent)]
    Db(#[from] DbErr),
}

impl CatalogueError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) | Self::DuplicateCode(_) => "validation",
            Self::NotFound(_) => "bicycle-not-found",
            Self::BicycleUnavailable(_) => "bicycle-unavailable",
            Self::Forbidden(_) => "forbidden",
            Self::Db(_) => "internal",
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) | Self::DuplicateCode(_) => ErrorKind::Validation,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::BicycleUnavailable(_) => ErrorKind::Conflict,
            Self::Forbidden(_) => ErrorKind::Authorization,
            Self::Db(_) => ErrorKind::Internal,
        }
    }
}

impl From<AuthError> for CatalogueError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::DbErr(db) => Self::Db(db),
            AuthError::UserNotInDatabase(id) | AuthError::AccessDenied(id, _) => {
                Self::Forbidden(id)
            }
        }
    }
}
