//! User data repository for database operations.
//!
//! This module provides the `UserRepository` for the local mirror of identity-service
//! users. It handles upserts keyed by email, lookups, and maintenance of the cached
//! `certificate_approved` flag, converting entity models to domain models at the boundary.

use chrono::{DateTime, Utc};
use migration::OnConflict;
use sea_orm::{
    sea_query::Expr, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter,
};

use crate::server::model::user::{UpsertUserParam, User};

/// Repository providing database operations for user management.
///
/// Generic over the connection so the same queries run against the pool or inside an
/// open transaction.
pub struct UserRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> UserRepository<'a, C> {
    /// Creates a new UserRepository instance.
    ///
    /// # Arguments
    /// - `db` - Database connection or open transaction
    ///
    /// # Returns
    /// - `UserRepository` - New repository instance
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Upserts a user mirrored from the identity service.
    ///
    /// Inserts a new user or, when the email already exists, refreshes the name, role and
    /// account status. The cached certificate flag and creation time are left untouched on
    /// update.
    ///
    /// # Arguments
    /// - `param` - Identity record to mirror
    /// - `now` - Creation timestamp for new users
    ///
    /// # Returns
    /// - `Ok(User)` - The created or updated user
    /// - `Err(DbErr)` - Database error during insert or update
    pub async fn upsert(&self, param: UpsertUserParam, now: DateTime<Utc>) -> Result<User, DbErr> {
        let entity = entity::prelude::User::insert(entity::user::ActiveModel {
            email: ActiveValue::Set(param.email),
            name: ActiveValue::Set(param.name),
            role: ActiveValue::Set(param.role.as_str().to_string()),
            account_status: ActiveValue::Set(param.account_status.as_str().to_string()),
            certificate_approved: ActiveValue::Set(false),
            created_at: ActiveValue::Set(now),
            ..Default::default()
        })
        .on_conflict(
            OnConflict::column(entity::user::Column::Email)
                .update_columns([
                    entity::user::Column::Name,
                    entity::user::Column::Role,
                    entity::user::Column::AccountStatus,
                ])
                .to_owned(),
        )
        .exec_with_returning(self.db)
        .await?;

        Ok(User::from_entity(entity)?)
    }

    /// Finds a user by id.
    ///
    /// # Returns
    /// - `Ok(Some(User))` - User found
    /// - `Ok(None)` - No user with that id
    /// - `Err(DbErr)` - Database error, or a stored role/status that cannot be parsed
    pub async fn find_by_id(&self, user_id: i32) -> Result<Option<User>, DbErr> {
        let entity = entity::prelude::User::find_by_id(user_id).one(self.db).await?;

        Ok(entity.map(User::from_entity).transpose()?)
    }

    /// Overwrites the cached certificate flag for a user.
    ///
    /// # Arguments
    /// - `user_id` - User whose flag to set
    /// - `approved` - Whether the user's latest certificate is approved
    ///
    /// # Returns
    /// - `Ok(())` - Flag written (or no matching user found)
    /// - `Err(DbErr)` - Database error during update
    pub async fn set_certificate_approved(&self, user_id: i32, approved: bool) -> Result<(), DbErr> {
        entity::prelude::User::update_many()
            .filter(entity::user::Column::Id.eq(user_id))
            .col_expr(
                entity::user::Column::CertificateApproved,
                Expr::value(approved),
            )
            .exec(self.db)
            .await?;

        Ok(())
    }
}
