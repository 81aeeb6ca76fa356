//! Eligibility evaluation.
//!
//! [`evaluate`] is the pure rule set. [`EligibilityService`] gathers its input from the
//! authoritative records (user row, latest certificate, borrowing counts) and never reads
//! the cached `certificate_approved` flag.

use chrono::{DateTime, Utc};
use sea_orm::{ConnectionTrait, DbErr};

use crate::server::{
    data::{
        borrowing::BorrowingRepository, certificate::CertificateRepository, user::UserRepository,
    },
    model::{
        certificate::EffectiveCertificateStatus,
        eligibility::{EligibilityInput, EligibilityReason, EligibilityVerdict},
        policy::LendingPolicy,
        user::{AccountStatus, User},
    },
};

/// Applies the eligibility rules in order; the first failing rule decides the reason.
///
/// 1. account must be active
/// 2. effective certificate must be approved
/// 3. no lapsed borrowings
/// 4. open borrowings below the policy limit
pub fn evaluate(input: &EligibilityInput, policy: &LendingPolicy) -> EligibilityVerdict {
    if input.account_status != AccountStatus::Active {
        return EligibilityVerdict::denied(EligibilityReason::AccountSuspendedOrPending);
    }
    if input.certificate != EffectiveCertificateStatus::Approved {
        return EligibilityVerdict::denied(EligibilityReason::CertificateNotApproved(
            input.certificate,
        ));
    }
    if input.lapsed_borrowings > 0 {
        return EligibilityVerdict::denied(EligibilityReason::HasOverdueBorrowing);
    }
    if input.open_borrowings >= policy.max_active_borrowings {
        return EligibilityVerdict::denied(EligibilityReason::BorrowingLimitReached);
    }

    EligibilityVerdict::eligible()
}

/// Service computing eligibility from stored state.
///
/// Generic over the connection so the allocation path can re-check eligibility inside
/// its own transaction.
pub struct EligibilityService<'a, C: ConnectionTrait> {
    db: &'a C,
    policy: LendingPolicy,
}

impl<'a, C: ConnectionTrait> EligibilityService<'a, C> {
    /// Creates a new EligibilityService instance.
    ///
    /// # Arguments
    /// - `db` - Database connection or open transaction
    /// - `policy` - Lending policy supplying the borrowing limit
    ///
    /// # Returns
    /// - `EligibilityService` - New service instance
    pub fn new(db: &'a C, policy: LendingPolicy) -> Self {
        Self { db, policy }
    }

    /// Decides whether a user may start a new borrowing at `now`.
    ///
    /// # Arguments
    /// - `user_id` - User to evaluate
    /// - `now` - Evaluation instant; active loans due before it count as overdue
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
        let user_repo = UserRepository::new(self.db);

        let Some(user) = user_repo.find_by_id(user_id).await? else {
            return Ok(None);
        };

        Ok(Some(self.evaluate_user(&user, now).await?))
    }

    /// Evaluates an already loaded user.
    pub async fn evaluate_user(
        &self,
        user: &User,
        now: DateTime<Utc>,
    ) -> Result<EligibilityVerdict, DbErr> {
        let input = self.load_input(user, now).await?;

        Ok(evaluate(&input, &self.policy))
    }

    async fn load_input(&self, user: &User, now: DateTime<Utc>) -> Result<EligibilityInput, DbErr> {
        let certificate_repo = CertificateRepository::new(self.db);
        let borrowing_repo = BorrowingRepository::new(self.db);

        let latest = certificate_repo.find_latest_for_user(user.id).await?;
        let lapsed_borrowings = borrowing_repo.count_lapsed_for_user(user.id, now).await?;
        let open_borrowings = borrowing_repo.count_open_for_user(user.id).await?;

        Ok(EligibilityInput {
            account_status: user.account_status,
            certificate: latest.map(|certificate| certificate.status).into(),
            lapsed_borrowings,
            open_borrowings,
        })
    }
}
