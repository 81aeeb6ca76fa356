//! User domain models and parameters.
//!
//! Users are mirrored from the identity service. The lending engine only reads role and
//! account status; the `certificate_approved` flag is a display cache maintained by the
//! moderation workflow and is never consulted for eligibility.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::str::FromStr;

use crate::server::error::internal::InternalError;

/// Role supplied by the identity service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Admin => "admin",
        }
    }
}

impl FromStr for Role {
    type Err = InternalError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "student" => Ok(Self::Student),
            "admin" => Ok(Self::Admin),
            other => Err(InternalError::unknown_status("role", other)),
        }
    }
}

/// Account standing supplied by the identity service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountStatus {
    Active,
    Suspended,
    Pending,
}

impl AccountStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Suspended => "suspended",
            Self::Pending => "pending",
        }
    }
}

impl FromStr for AccountStatus {
    type Err = InternalError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "active" => Ok(Self::Active),
            "suspended" => Ok(Self::Suspended),
            "pending" => Ok(Self::Pending),
            other => Err(InternalError::unknown_status("account status", other)),
        }
    }
}

/// Portal user with role, account standing and cached certificate flag.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct User {
    pub id: i32,
    pub email: String,
    pub name: String,
    pub role: Role,
    pub account_status: AccountStatus,
    /// Display cache of "latest certificate is approved".
    pub certificate_approved: bool,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Converts an entity model to a user domain model at the repository boundary.
    ///
    /// # Returns
    /// - `Ok(User)` - The converted user
    /// - `Err(InternalError::UnknownStatus)` - Stored role or account status is not recognised
    pub fn from_entity(entity: entity::user::Model) -> Result<Self, InternalError> {
        Ok(Self {
            id: entity.id,
            email: entity.email,
            name: entity.name,
            role: entity.role.parse()?,
            account_status: entity.account_status.parse()?,
            certificate_approved: entity.certificate_approved,
            created_at: entity.created_at,
        })
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Identity-service record to mirror locally, keyed by email.
#[derive(Debug, Clone)]
pub struct UpsertUserParam {
    pub email: String,
    pub name: String,
    pub role: Role,
    pub account_status: AccountStatus,
}
