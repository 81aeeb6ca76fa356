//! Bicycle catalogue management.
//!
//! This module provides the `CatalogueService` for registering bicycles and moving them
//! in and out of maintenance. It never moves a bicycle into or out of `borrowed`; only
//! the allocation and return paths do that.

use chrono::{DateTime, Utc};
use sea_orm::{DatabaseConnection, DbErr, SqlErr};
use tracing::{debug, info};

use crate::server::{
    data::{begin_write, bicycle::BicycleRepository},
    error::catalogue::CatalogueError,
    middleware::auth::{AuthGuard, Permission},
    model::bicycle::{Bicycle, BicycleStatus, RegisterBicycleParam},
    service::lock::{RecordKey, RecordLocks},
    util::parse::{require_id, require_text},
};

pub struct CatalogueService<'a> {
    db: &'a DatabaseConnection,
    locks: &'a RecordLocks,
}

impl<'a> CatalogueService<'a> {
    /// Creates a new CatalogueService instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    /// - `locks` - Shared per-record lock registry
    ///
    /// # Returns
    /// - `CatalogueService` - New service instance
    pub fn new(db: &'a DatabaseConnection, locks: &'a RecordLocks) -> Self {
        Self { db, locks }
    }

    /// Adds a bicycle to the fleet in `available` state.
    ///
    /// # Arguments
    /// - `param` - Display name and unique frame code
    /// - `now` - Registration timestamp
    ///
    /// # Returns
    /// - `Ok(Bicycle)` - The registered bicycle
    /// - `Err(CatalogueError::Validation)` - Blank name or code
    /// - `Err(CatalogueError::DuplicateCode)` - Code already registered
    /// - `Err(CatalogueError::Db)` - Database error
    pub async fn register_bicycle(
        &self,
        param: RegisterBicycleParam,
        now: DateTime<Utc>,
    ) -> Result<Bicycle, CatalogueError> {
        let name = require_text("name", &param.name).map_err(CatalogueError::Validation)?;
        let code = require_text("code", &param.code).map_err(CatalogueError::Validation)?;

        let txn = begin_write(self.db).await?;
        let bicycle_repo = BicycleRepository::new(&txn);

        if bicycle_repo.find_by_code(&code).await?.is_some() {
            return Err(CatalogueError::DuplicateCode(code));
        }

        // A concurrent registration of the same code can still hit the unique index.
        let bicycle = match bicycle_repo
            .create(RegisterBicycleParam { name, code: code.clone() }, now)
            .await
        {
            Ok(bicycle) => bicycle,
            Err(err) if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                return Err(CatalogueError::DuplicateCode(code));
            }
            Err(err) => return Err(err.into()),
        };

        txn.commit().await?;

        info!("Registered bicycle {} ({})", bicycle.id, bicycle.code);

        Ok(bicycle)
    }

    /// Moves a bicycle into or out of maintenance.
    ///
    /// Requesting the state the bicycle is already in succeeds without writing.
    ///
    /// # Arguments
    /// - `bicycle_id` - Bicycle to update
    /// - `admin_id` - Caller; must be an admin
    /// - `in_maintenance` - Target state
    ///
    /// # Returns
    /// - `Ok(Bicycle)` - Bicycle in its new state
    /// - `Err(CatalogueError::Forbidden)` - Caller is not an admin
    /// - `Err(CatalogueError::NotFound)` - No such bicycle
    /// - `Err(CatalogueError::BicycleUnavailable)` - Bicycle is out on loan
    /// - `Err(CatalogueError::Db)` - Database error
    pub async fn set_maintenance(
        &self,
        bicycle_id: i32,
        admin_id: i32,
        in_maintenance: bool,
    ) -> Result<Bicycle, CatalogueError> {
        require_id("bicycle_id", bicycle_id).map_err(CatalogueError::Validation)?;
        require_id("admin_id", admin_id).map_err(CatalogueError::Validation)?;

        AuthGuard::new(self.db)
            .require(admin_id, &[Permission::Admin])
            .await?;

        let _bicycle_lock = self.locks.lock(RecordKey::Bicycle(bicycle_id)).await;

        let txn = begin_write(self.db).await?;
        let bicycle_repo = BicycleRepository::new(&txn);

        let Some(bicycle) = bicycle_repo.find_by_id(bicycle_id).await? else {
            return Err(CatalogueError::NotFound(bicycle_id));
        };

        let (from, to) = if in_maintenance {
            (BicycleStatus::Available, BicycleStatus::Maintenance)
        } else {
            (BicycleStatus::Maintenance, BicycleStatus::Available)
        };

        if bicycle.status == to {
            debug!("Bicycle {} already {}", bicycle_id, to.as_str());
            return Ok(bicycle);
        }
        if bicycle.status == BicycleStatus::Borrowed {
            return Err(CatalogueError::BicycleUnavailable(bicycle_id));
        }

        if !bicycle_repo.compare_and_set_status(bicycle_id, from, to).await? {
            return Err(CatalogueError::BicycleUnavailable(bicycle_id));
        }

        let Some(updated) = bicycle_repo.find_by_id(bicycle_id).await? else {
            return Err(DbErr::RecordNotFound(format!("bicycle {bicycle_id}")).into());
        };

        txn.commit().await?;

        info!(
            "Bicycle {} moved to {} by admin {}",
            bicycle_id,
            to.as_str(),
            admin_id
        );

        Ok(updated)
    }

    /// Lists bicycles ordered by name, optionally restricted to one status.
    pub async fn list_bicycles(&self, status: Option<BicycleStatus>) -> Result<Vec<Bicycle>, DbErr> {
        BicycleRepository::new(self.db).list(status).await
    }
}
