//! User service for the local identity mirror.
//!
//! This module provides the `UserService` for keeping the local user table in step with
//! the identity service and for answering eligibility questions about a user.

use chrono::{DateTime, Utc};
use sea_orm::{DatabaseConnection, DbErr};
use tracing::info;

use crate::server::{
    data::user::UserRepository,
    model::{
        eligibility::EligibilityVerdict,
        policy::LendingPolicy,
        user::{UpsertUserParam, User},
    },
    service::eligibility::EligibilityService,
};

/// Service providing business logic for user management.
pub struct UserService<'a> {
    pub db: &'a DatabaseConnection,
    policy: LendingPolicy,
}

impl<'a> UserService<'a> {
    /// Creates a new UserService instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    /// - `policy` - Lending policy used for eligibility checks
    ///
    /// # Returns
    /// - `UserService` - New service instance
    pub fn new(db: &'a DatabaseConnection, policy: LendingPolicy) -> Self {
        Self { db, policy }
    }

    /// Mirrors an identity-service user record locally, keyed by email.
    ///
    /// # Arguments
    /// - `param` - Name, email, role and account status from the identity service
    /// - `now` - Creation timestamp for first-time users
    ///
    /// # Returns
    /// - `Ok(User)` - The created or refreshed user
    /// - `Err(DbErr)` - Database error during upsert
    pub async fn upsert_user(
        &self,
        param: UpsertUserParam,
        now: DateTime<Utc>,
    ) -> Result<User, DbErr> {
        let user = UserRepository::new(self.db).upsert(param, now).await?;

        info!(
            "Synced user {} ({}, {})",
            user.id,
            user.role.as_str(),
            user.account_status.as_str()
        );

        Ok(user)
    }

    /// Retrieves a user by id.
    pub async fn get_user(&self, user_id: i32) -> Result<Option<User>, DbErr> {
        UserRepository::new(self.db).find_by_id(user_id).await
    }

    /// Decides whether the user may start a new borrowing at `now`.
    ///
    /// # Returns
    /// - `Ok(Some(EligibilityVerdict))` - Verdict with reason code
    /// - `Ok(None)` - No user with that id
    /// - `Err(DbErr)` - Database error while loading state
    pub async fn can_borrow(
        &self,
        user_id: i32,
        now: DateTime<Utc>,
    ) -> Result<Option<EligibilityVerdict>, DbErr> {
        EligibilityService::new(self.db, self.policy)
            .can_borrow(user_id, now)
            .await
    }
}
