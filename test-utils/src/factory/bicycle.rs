//! Bicycle factory for creating test bicycle entities.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test bicycles with customizable fields.
pub struct BicycleFactory<'a> {
    db: &'a DatabaseConnection,
    name: String,
    code: String,
    status: String,
}

impl<'a> BicycleFactory<'a> {
    /// Creates a new BicycleFactory with default values.
    ///
    /// Defaults:
    /// - name: `"Bicycle {id}"`
    /// - code: `"BK-{id}"`
    /// - status: `"available"`
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            name: format!("Bicycle {}", id),
            code: format!("BK-{}", id),
            status: "available".to_string(),
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }

    /// Sets the availability status (`available`, `borrowed` or `maintenance`).
    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    /// Builds and inserts the bicycle entity into the database.
    pub async fn build(self) -> Result<entity::bicycle::Model, DbErr> {
        entity::bicycle::ActiveModel {
            name: ActiveValue::Set(self.name),
            code: ActiveValue::Set(self.code),
            status: ActiveValue::Set(self.status),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates an available bicycle with default values.
pub async fn create_bicycle(db: &DatabaseConnection) -> Result<entity::bicycle::Model, DbErr> {
    BicycleFactory::new(db).build().await
}
