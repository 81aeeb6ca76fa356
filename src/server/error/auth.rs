use sea_orm::DbErr;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    /// Caller id does not match any mirrored user.
    #[error("User {0} not found")]
    UserNotInDatabase(i32),

    /// Caller exists but lacks a required permission.
    ///
    /// # Fields
    /// - Caller user id
    /// - Description of the attempted action
    #[error("Access denied for user {0}: {1}")]
    AccessDenied(i32, String),

    #[error(transparent)]
    DbErr(#[from] DbErr),
}
