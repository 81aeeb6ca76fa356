//! Medical certificate submission and moderation.
//!
//! This module provides the `ModerationService`. Every write that can change a user's
//! effective certificate status also recomputes the user's cached `certificate_approved`
//! flag inside the same transaction, so the cache never lags the certificate rows.
//! Decisions never touch existing borrowings.

use chrono::{DateTime, Utc};
use sea_orm::{ConnectionTrait, DatabaseConnection, DbErr};
use tracing::{debug, info};

use crate::server::{
    data::{begin_write, certificate::CertificateRepository, user::UserRepository},
    error::moderation::ModerationError,
    middleware::auth::{AuthGuard, Permission},
    model::certificate::{
        CertificateDecision, CertificateStatus, MedicalCertificate, SubmitCertificateParam,
    },
    service::lock::{RecordKey, RecordLocks},
    util::parse::{require_id, require_text},
};

/// Service for the certificate review workflow.
pub struct ModerationService<'a> {
    db: &'a DatabaseConnection,
    locks: &'a RecordLocks,
}

impl<'a> ModerationService<'a> {
    /// Creates a new ModerationService instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    /// - `locks` - Shared per-record lock registry
    ///
    /// # Returns
    /// - `ModerationService` - New service instance
    pub fn new(db: &'a DatabaseConnection, locks: &'a RecordLocks) -> Self {
        Self { db, locks }
    }

    /// Records a newly uploaded certificate as pending review.
    ///
    /// The new certificate becomes the user's latest, so a previously approved user drops
    /// back to `pending` until an admin decides.
    ///
    /// # Arguments
    /// - `param` - Owner and document storage reference
    /// - `now` - Submission timestamp
    ///
    /// # Returns
    /// - `Ok(MedicalCertificate)` - The pending certificate
    /// - `Err(ModerationError::Validation)` - Non-positive id or blank document reference
    /// - `Err(ModerationError::UserNotFound)` - No such user
    /// - `Err(ModerationError::Db)` - Database error
    pub async fn submit_certificate(
        &self,
        param: SubmitCertificateParam,
        now: DateTime<Utc>,
    ) -> Result<MedicalCertificate, ModerationError> {
        let user_id = require_id("user_id", param.user_id).map_err(ModerationError::Validation)?;
        let document_ref =
            require_text("document_ref", &param.document_ref).map_err(ModerationError::Validation)?;

        let _user_lock = self.locks.lock(RecordKey::User(user_id)).await;

        let txn = begin_write(self.db).await?;

        if UserRepository::new(&txn).find_by_id(user_id).await?.is_none() {
            return Err(ModerationError::UserNotFound(user_id));
        }

        let certificate = CertificateRepository::new(&txn)
            .create(user_id, document_ref, now)
            .await?;
        refresh_certificate_flag(&txn, user_id).await?;

        txn.commit().await?;

        info!(
            "Certificate {} submitted by user {} for review",
            certificate.id, user_id
        );

        Ok(certificate)
    }

    /// Approves or rejects a pending certificate.
    ///
    /// The caller must be an admin. The status update is conditional on `pending`, so
    /// when two admins decide the same certificate at once only the first decision is
    /// kept and the second gets `NotPending`.
    ///
    /// # Arguments
    /// - `certificate_id` - Certificate to decide
    /// - `admin_id` - Deciding admin
    /// - `decision` - Approve or reject
    /// - `now` - Decision timestamp
    ///
    /// # Returns
    /// - `Ok(MedicalCertificate)` - The decided certificate
    /// - `Err(ModerationError::Validation)` - Non-positive id
    /// - `Err(ModerationError::Forbidden)` - Caller is not an admin
    /// - `Err(ModerationError::NotFound)` - No such certificate
    /// - `Err(ModerationError::NotPending)` - Certificate already decided
    /// - `Err(ModerationError::Db)` - Database error
    pub async fn decide_certificate(
        &self,
        certificate_id: i32,
        admin_id: i32,
        decision: CertificateDecision,
        now: DateTime<Utc>,
    ) -> Result<MedicalCertificate, ModerationError> {
        require_id("certificate_id", certificate_id).map_err(ModerationError::Validation)?;
        require_id("admin_id", admin_id).map_err(ModerationError::Validation)?;

        AuthGuard::new(self.db)
            .require(admin_id, &[Permission::Admin])
            .await?;

        let Some(certificate) = CertificateRepository::new(self.db)
            .find_by_id(certificate_id)
            .await?
        else {
            return Err(ModerationError::NotFound(certificate_id));
        };

        let _user_lock = self.locks.lock(RecordKey::User(certificate.user_id)).await;
        let _certificate_lock = self.locks.lock(RecordKey::Certificate(certificate_id)).await;

        let txn = begin_write(self.db).await?;
        let certificate_repo = CertificateRepository::new(&txn);

        let status = CertificateStatus::from(decision);
        if !certificate_repo
            .decide(certificate_id, status, admin_id, now)
            .await?
        {
            debug!("Certificate {} is no longer pending", certificate_id);
            return Err(ModerationError::NotPending(certificate_id));
        }

        refresh_certificate_flag(&txn, certificate.user_id).await?;

        let Some(decided) = certificate_repo.find_by_id(certificate_id).await? else {
            return Err(DbErr::RecordNotFound(format!("certificate {certificate_id}")).into());
        };

        txn.commit().await?;

        info!(
            "Certificate {} of user {} {} by admin {}",
            certificate_id,
            certificate.user_id,
            status.as_str(),
            admin_id
        );

        Ok(decided)
    }
}

/// Rewrites the user's cached flag from their latest certificate.
async fn refresh_certificate_flag<C: ConnectionTrait>(db: &C, user_id: i32) -> Result<(), DbErr> {
    let approved = CertificateRepository::new(db)
        .find_latest_for_user(user_id)
        .await?
        .is_some_and(|latest| latest.status == CertificateStatus::Approved);

    UserRepository::new(db)
        .set_certificate_approved(user_id, approved)
        .await
}
