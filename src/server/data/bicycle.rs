//! Bicycle data repository.
//!
//! Status changes go through [`BicycleRepository::compare_and_set_status`], a conditional
//! update that only succeeds when the row is still in the expected state. Callers treat a
//! failed swap as losing a race.

use chrono::{DateTime, Utc};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr,
    EntityTrait, QueryFilter, QueryOrder,
};

use crate::server::model::bicycle::{Bicycle, BicycleStatus, RegisterBicycleParam};

pub struct BicycleRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> BicycleRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts a new bicycle in `available` state.
    ///
    /// # Returns
    /// - `Ok(Bicycle)` - The created bicycle
    /// - `Err(DbErr)` - Database error, including a unique violation on `code`
    pub async fn create(
        &self,
        param: RegisterBicycleParam,
        now: DateTime<Utc>,
    ) -> Result<Bicycle, DbErr> {
        let entity = entity::bicycle::ActiveModel {
            name: ActiveValue::Set(param.name),
            code: ActiveValue::Set(param.code),
            status: ActiveValue::Set(BicycleStatus::Available.as_str().to_string()),
            created_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(Bicycle::from_entity(entity)?)
    }

    pub async fn find_by_id(&self, bicycle_id: i32) -> Result<Option<Bicycle>, DbErr> {
        let entity = entity::prelude::Bicycle::find_by_id(bicycle_id)
            .one(self.db)
            .await?;

        Ok(entity.map(Bicycle::from_entity).transpose()?)
    }

    pub async fn find_by_code(&self, code: &str) -> Result<Option<Bicycle>, DbErr> {
        let entity = entity::prelude::Bicycle::find()
            .filter(entity::bicycle::Column::Code.eq(code))
            .one(self.db)
            .await?;

        Ok(entity.map(Bicycle::from_entity).transpose()?)
    }

    /// Moves a bicycle from `expected` to `next` if it is still in `expected`.
    ///
    /// # Arguments
    /// - `bicycle_id` - Bicycle to update
    /// - `expected` - Status the row must currently hold
    /// - `next` - Status to write
    ///
    /// # Returns
    /// - `Ok(true)` - Row updated
    /// - `Ok(false)` - Bicycle missing or not in `expected`
    /// - `Err(DbErr)` - Database error during update
    pub async fn compare_and_set_status(
        &self,
        bicycle_id: i32,
        expected: BicycleStatus,
        next: BicycleStatus,
    ) -> Result<bool, DbErr> {
        let result = entity::prelude::Bicycle::update_many()
            .col_expr(entity::bicycle::Column::Status, Expr::value(next.as_str()))
            .filter(entity::bicycle::Column::Id.eq(bicycle_id))
            .filter(entity::bicycle::Column::Status.eq(expected.as_str()))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Lists bicycles ordered by name, optionally restricted to one status.
    pub async fn list(&self, status: Option<BicycleStatus>) -> Result<Vec<Bicycle>, DbErr> {
        let mut query = entity::prelude::Bicycle::find();
        if let Some(status) = status {
            query = query.filter(entity::bicycle::Column::Status.eq(status.as_str()));
        }

        let entities = query
            .order_by_asc(entity::bicycle::Column::Name)
            .order_by_asc(entity::bicycle::Column::Id)
            .all(self.db)
            .await?;

        Ok(entities
            .into_iter()
            .map(Bicycle::from_entity)
            .collect::<Result<Vec<_>, _>>()?)
    }
}
