//! Medical certificate domain models and parameters.
//!
//! A user may accumulate several certificates over time; only the most recently submitted
//! one is authoritative. Its status is the user's *effective* certificate status, or
//! `None` when the user never submitted one.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::str::FromStr;

use crate::server::error::internal::InternalError;

/// Stored moderation state of a single certificate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CertificateStatus {
    Pending,
    Approved,
    Rejected,
}

impl CertificateStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

impl FromStr for CertificateStatus {
    type Err = InternalError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            other => Err(InternalError::unknown_status("certificate status", other)),
        }
    }
}

/// Status of a user's latest certificate, or `None` when there is no certificate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EffectiveCertificateStatus {
    None,
    Pending,
    Approved,
    Rejected,
}

impl EffectiveCertificateStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

impl From<Option<CertificateStatus>> for EffectiveCertificateStatus {
    fn from(latest: Option<CertificateStatus>) -> Self {
        match latest {
            None => Self::None,
            Some(CertificateStatus::Pending) => Self::Pending,
            Some(CertificateStatus::Approved) => Self::Approved,
            Some(CertificateStatus::Rejected) => Self::Rejected,
        }
    }
}

/// Outcome an admin may record for a pending certificate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CertificateDecision {
    Approved,
    Rejected,
}

impl From<CertificateDecision> for CertificateStatus {
    fn from(decision: CertificateDecision) -> Self {
        match decision {
            CertificateDecision::Approved => Self::Approved,
            CertificateDecision::Rejected => Self::Rejected,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MedicalCertificate {
    pub id: i32,
    pub user_id: i32,
    pub status: CertificateStatus,
    /// Opaque reference into document storage; never dereferenced here.
    pub document_ref: String,
    pub submitted_at: DateTime<Utc>,
    pub decided_at: Option<DateTime<Utc>>,
    /// Admin who recorded the decision.
    pub decided_by: Option<i32>,
}

impl MedicalCertificate {
    /// Converts an entity model to a certificate domain model at the repository boundary.
    pub fn from_entity(
        entity: entity::medical_certificate::Model,
    ) -> Result<Self, InternalError> {
        Ok(Self {
            id: entity.id,
            user_id: entity.user_id,
            status: entity.status.parse()?,
            document_ref: entity.document_ref,
            submitted_at: entity.submitted_at,
            decided_at: entity.decided_at,
            decided_by: entity.decided_by,
        })
    }
}

/// Parameters for submitting a new certificate for review.
#[derive(Debug, Clone)]
pub struct SubmitCertificateParam {
    pub user_id: i32,
    /// Reference returned by document storage after upload.
    pub document_ref: String,
}

/// Filter for listing certificates in the moderation queue.
#[derive(Debug, Clone, Default)]
pub struct CertificateFilter {
    pub status: Option<CertificateStatus>,
    /// Substring matched against the owner's name or email.
    pub search: Option<String>,
}
