use sea_orm::{
    sea_query::TableCreateStatement, ConnectOptions, ConnectionTrait, Database,
    DatabaseConnection,
};
use tempfile::TempDir;

use crate::error::TestError;

/// Test context containing the database connection for a single test.
///
/// By default the database is in-memory SQLite. An in-memory database lives exactly as
/// long as its single pooled connection, so that pool is pinned to one connection. Tests
/// that need several connections contending for the same data ask for a file-backed
/// database instead, which lives in a temporary directory removed on drop.
pub struct TestContext {
    /// Database connection to the SQLite instance.
    ///
    /// Initialized lazily when `database()` is first called.
    pub db: Option<DatabaseConnection>,
    /// Pool size; anything above one selects a file-backed database.
    connections: u32,
    /// Directory holding the file-backed database, if any.
    dir: Option<TempDir>,
}

impl TestContext {
    /// Creates a new empty test context backed by in-memory SQLite.
    pub fn new() -> Self {
        Self::with_connections(1)
    }

    /// Creates a new empty test context whose pool holds `connections` connections.
    ///
    /// # Arguments
    /// - `connections` - Pool size; values above one use a temporary database file
    pub fn with_connections(connections: u32) -> Self {
        Self {
            db: None,
            connections: connections.max(1),
            dir: None,
        }
    }

    /// Gets or creates the SQLite database connection.
    ///
    /// # Returns
    /// - `Ok(&DatabaseConnection)` - Reference to the database connection
    /// - `Err(TestError::Database)` - Failed to connect to the database
    /// - `Err(TestError::TempDir)` - Failed to create the directory for a file-backed database
    pub async fn database(&mut self) -> Result<&DatabaseConnection, TestError> {
        match self.db {
            Some(ref db) => Ok(db),
            None => {
                let url = if self.connections > 1 {
                    let dir = tempfile::tempdir()?;
                    let url = format!("sqlite://{}?mode=rwc", dir.path().join("lending.db").display());
                    self.dir = Some(dir);
                    url
                } else {
                    "sqlite::memory:".to_string()
                };

                let mut opt = ConnectOptions::new(url);
                opt.max_connections(self.connections)
                    .min_connections(1)
                    .sqlx_logging(false);

                let db = Database::connect(opt).await?;

                let db_ref = self.db.insert(db);

                Ok(&*db_ref)
            }
        }
    }

    /// Creates database tables from the provided CREATE TABLE statements.
    ///
    /// # Arguments
    /// - `stmts` - CREATE TABLE statements to execute in order
    ///
    /// # Returns
    /// - `Ok(())` - All tables created successfully
    /// - `Err(TestError::Database)` - Failed to create one or more tables
    pub async fn with_tables(&mut self, stmts: Vec<TableCreateStatement>) -> Result<(), TestError> {
        let db = self.database().await?;

        for stmt in stmts {
            db.execute(&stmt).await?;
        }

        Ok(())
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}
