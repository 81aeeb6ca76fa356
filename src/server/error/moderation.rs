//! Errors for certificate submission and moderation.

use sea_orm::DbErr;
use thiserror::Error;

use crate::server::error::{auth::AuthError, ErrorKind};

#[derive(Error, Debug)]
pub enum ModerationError {
    #[error("Invalid certificate request: {0}")]
    Validation(String),

    #[error("Certificate {0} not found")]
    NotFound(i32),

    #[error("User {0} not found")]
    UserNotFound(i32),

    /// Certificate was already decided, possibly by a concurrent admin.
    #[error("Certificate {0} is not pending")]
    NotPending(i32),

    #[error("User {0} may not moderate certificates")]
    Forbidden(i32),

    #[error(transparent)]
    Db(#[from] DbErr),
}

impl ModerationError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::NotFound(_) => "not-found",
            Self::UserNotFound(_) => "user-not-found",
            Self::NotPending(_) => "not-pending",
            Self::Forbidden(_) => "forbidden",
            Self::Db(_) => "internal",
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::NotFound(_) | Self::UserNotFound(_) => ErrorKind::NotFound,
            Self::NotPending(_) => ErrorKind::Conflict,
            Self::Forbidden(_) => ErrorKind::Authorization,
            Self::Db(_) => ErrorKind::Internal,
        }
    }
}

impl From<AuthError> for ModerationError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::DbErr(db) => Self::Db(db),
            AuthError::UserNotInDatabase(id) | AuthError::AccessDenied(id, _) => {
                Self::Forbidden(id)
            }
        }
    }
}
