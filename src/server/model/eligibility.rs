//! Eligibility verdict types.

use serde::{Serialize, Serializer};

use crate::server::model::{certificate::EffectiveCertificateStatus, user::AccountStatus};

/// Why a user may or may not start a new borrowing.
///
/// Serialises as its reason code, e.g. `"certificate-not-approved"`; the certificate
/// sub-reason is available separately through [`EligibilityReason::certificate_status`]
/// for user-facing messaging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EligibilityReason {
    Eligible,
    AccountSuspendedOrPending,
    CertificateNotApproved(EffectiveCertificateStatus),
    HasOverdueBorrowing,
    BorrowingLimitReached,
}

impl EligibilityReason {
    /// Stable reason code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Eligible => "eligible",
            Self::AccountSuspendedOrPending => "account-suspended-or-pending",
            Self::CertificateNotApproved(_) => "certificate-not-approved",
            Self::HasOverdueBorrowing => "has-overdue-borrowing",
            Self::BorrowingLimitReached => "borrowing-limit-reached",
        }
    }

    /// Effective certificate status behind a `CertificateNotApproved` verdict.
    pub fn certificate_status(&self) -> Option<EffectiveCertificateStatus> {
        match self {
            Self::CertificateNotApproved(status) => Some(*status),
            _ => None,
        }
    }
}

impl Serialize for EligibilityReason {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EligibilityVerdict {
    pub eligible: bool,
    pub reason: EligibilityReason,
}

impl EligibilityVerdict {
    pub fn eligible() -> Self {
        Self {
            eligible: true,
            reason: EligibilityReason::Eligible,
        }
    }

    pub fn denied(reason: EligibilityReason) -> Self {
        Self {
            eligible: false,
            reason,
        }
    }
}

/// Snapshot of the authoritative state the evaluator decides over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EligibilityInput {
    pub account_status: AccountStatus,
    pub certificate: EffectiveCertificateStatus,
    /// Borrowings marked overdue, plus active ones already past due.
    pub lapsed_borrowings: u64,
    /// Borrowings still holding a bicycle (active or overdue).
    pub open_borrowings: u64,
}
