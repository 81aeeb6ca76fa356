//! Bicycle domain models and parameters.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::str::FromStr;

use crate::server::error::internal::InternalError;

/// Availability of a bicycle.
///
/// `Borrowed` holds exactly when one open borrowing references the bicycle; only the
/// allocation and return paths move a bicycle into or out of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BicycleStatus {
    Available,
    Borrowed,
    Maintenance,
}

impl BicycleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Borrowed => "borrowed",
            Self::Maintenance => "maintenance",
        }
    }
}

impl FromStr for BicycleStatus {
    type Err = InternalError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "available" => Ok(Self::Available),
            "borrowed" => Ok(Self::Borrowed),
            "maintenance" => Ok(Self::Maintenance),
            other => Err(InternalError::unknown_status("bicycle status", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bicycle {
    pub id: i32,
    pub name: String,
    /// Frame tag painted on the bicycle.
    pub code: String,
    pub status: BicycleStatus,
    pub created_at: DateTime<Utc>,
}

impl Bicycle {
    /// Converts an entity model to a bicycle domain model at the repository boundary.
    pub fn from_entity(entity: entity::bicycle::Model) -> Result<Self, InternalError> {
        Ok(Self {
            id: entity.id,
            name: entity.name,
            code: entity.code,
            status: entity.status.parse()?,
            created_at: entity.created_at,
        })
    }
}

/// Parameters for adding a bicycle to the fleet.
#[derive(Debug, Clone)]
pub struct RegisterBicycleParam {
    pub name: String,
    pub code: String,
}
