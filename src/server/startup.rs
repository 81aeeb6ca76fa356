use sea_orm::DatabaseConnection;
use tracing_subscriber::EnvFilter;

use crate::server::{config::Config, error::AppError};

/// Installs the global tracing subscriber.
///
/// Log levels come from `RUST_LOG`; without it the lending engine logs at `info`.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Connects to the database and runs pending migrations.
///
/// Establishes a connection pool using the connection string from configuration, then
/// runs all pending SeaORM migrations so the schema is up to date before any service
/// touches it.
///
/// # Arguments
/// - `config` - Application configuration containing the database URL
///
/// # Returns
/// - `Ok(DatabaseConnection)` - Connected database with migrations applied
/// - `Err(AppError::DbErr)` - Failed to connect to database or run migrations
pub async fn connect_to_database(config: &Config) -> Result<DatabaseConnection, AppError> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}
