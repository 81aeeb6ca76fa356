use entity::prelude::*;
use sea_orm::{sea_query::TableCreateStatement, EntityTrait, Schema};

use crate::{context::TestContext, error::TestError};

/// Builder for creating test contexts with customizable database schemas.
///
/// Provides a fluent interface for configuring test environments with in-memory SQLite
/// databases. Add entity tables, then call `build()` to create the configured context.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::builder::TestBuilder;
/// use entity::prelude::{Bicycle, User};
///
/// let test = TestBuilder::new()
///     .with_table(User)
///     .with_table(Bicycle)
///     .build()
///     .await?;
/// ```
pub struct TestBuilder {
    /// CREATE TABLE statements executed, in insertion order, during `build()`.
    tables: Vec<TableCreateStatement>,
    /// Connection pool size; above one the database is file-backed.
    connections: u32,
}

impl TestBuilder {
    /// Creates a new test builder with no tables configured.
    pub fn new() -> Self {
        Self {
            tables: Vec::new(),
            connections: 1,
        }
    }

    /// Adds an entity table to the test database schema.
    ///
    /// Generates a CREATE TABLE statement from the provided SeaORM entity using SQLite
    /// backend syntax. Tables with foreign keys should be added after the tables they
    /// reference.
    ///
    /// # Arguments
    /// - `entity` - SeaORM entity implementing `EntityTrait` to create a table for
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
    pub fn with_table<E: EntityTrait>(mut self, entity: E) -> Self {
        let schema = Schema::new(sea_orm::DbBackend::Sqlite);
        self.tables.push(schema.create_table_from_entity(entity));
        self
    }

    /// Adds every table the lending engine touches, in dependency order:
    /// User, Bicycle, MedicalCertificate, Borrowing.
    pub fn with_lending_tables(self) -> Self {
        self.with_table(User)
            .with_table(Bicycle)
            .with_table(MedicalCertificate)
            .with_table(Borrowing)
    }

    /// Backs the test database with a temporary file shared by `connections` pooled
    /// connections, so concurrent tasks really hold separate connections.
    ///
    /// # Arguments
    /// - `connections` - Pool size
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
    pub fn with_connections(mut self, connections: u32) -> Self {
        self.connections = connections;
        self
    }

    /// Builds and initializes the test context with configured tables.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Test context with database and tables ready
    /// - `Err(TestError::Database)` - Failed to connect to database or create tables
    /// - `Err(TestError::TempDir)` - Failed to create the database file's directory
    pub async fn build(self) -> Result<TestContext, TestError> {
        let mut setup = TestContext::with_connections(self.connections);

        setup.with_tables(self.tables).await?;

        Ok(setup)
    }
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}
