//! Error types for the lending engine.
//!
//! Each exposed operation has its own closed error enum carrying a stable reason code
//! (`code()`) and a taxonomy bucket (`kind()`). Conflicts caused by racing requests are
//! ordinary variants of those enums, not failures of the system. `AppError` is the
//! top-level type for startup and background paths where errors are only logged or
//! propagated out of `main`.

pub mod auth;
pub mod catalogue;
pub mod config;
pub mod internal;
pub mod lending;
pub mod moderation;

use thiserror::Error;

use crate::server::error::{config::ConfigError, internal::InternalError};

/// Taxonomy bucket shared by all operation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed input rejected before touching state.
    Validation,
    /// State-machine or allocation rule prevented the transition.
    Conflict,
    /// Caller lacks the capability for the operation.
    Authorization,
    /// Referenced record does not exist.
    NotFound,
    /// Storage or data-integrity failure.
    Internal,
}

/// Top-level application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error during startup or environment variable loading.
    #[error(transparent)]
    ConfigErr(#[from] ConfigError),

    /// Database operation error from SeaORM.
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),

    /// Cron scheduler error.
    #[error(transparent)]
    SchedulerErr(#[from] tokio_cron_scheduler::JobSchedulerError),

    /// Stored data the domain layer cannot interpret.
    #[error(transparent)]
    InternalErr(#[from] InternalError),
}
