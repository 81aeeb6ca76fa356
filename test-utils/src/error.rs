use thiserror::Error;

/// Errors that can occur while preparing a test environment.
#[derive(Error, Debug)]
pub enum TestError {
    /// Failed to connect to the database or create a table.
    #[error(transparent)]
    Database(#[from] sea_orm::DbErr),
    /// Failed to create the temporary directory for a file-backed database.
    #[error(transparent)]
    TempDir(#[from] std::io::Error),
}
