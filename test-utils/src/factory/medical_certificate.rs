//! Medical certificate factory.

use crate::factory::helpers::next_id;
use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating certificates in any moderation state.
///
/// Does not touch the owner's cached `certificate_approved` flag.
pub struct CertificateFactory<'a> {
    db: &'a DatabaseConnection,
    user_id: i32,
    status: String,
    document_ref: String,
    submitted_at: DateTime<Utc>,
    decided_by: Option<i32>,
}

impl<'a> CertificateFactory<'a> {
    /// Creates a new CertificateFactory with default values.
    ///
    /// Defaults:
    /// - status: `"pending"`
    /// - document_ref: `"certificates/{id}.pdf"`
    /// - submitted_at: now
    pub fn new(db: &'a DatabaseConnection, user_id: i32) -> Self {
        let id = next_id();
        Self {
            db,
            user_id,
            status: "pending".to_string(),
            document_ref: format!("certificates/{}.pdf", id),
            submitted_at: Utc::now(),
            decided_by: None,
        }
    }

    /// Sets the status (`pending`, `approved` or `rejected`).
    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    pub fn submitted_at(mut self, submitted_at: DateTime<Utc>) -> Self {
        self.submitted_at = submitted_at;
        self
    }

    pub fn decided_by(mut self, admin_id: i32) -> Self {
        self.decided_by = Some(admin_id);
        self
    }

    /// Builds and inserts the certificate. Decided certificates get a decision timestamp.
    pub async fn build(self) -> Result<entity::medical_certificate::Model, DbErr> {
        let decided_at = (self.status != "pending").then(Utc::now);

        entity::medical_certificate::ActiveModel {
            user_id: ActiveValue::Set(self.user_id),
            status: ActiveValue::Set(self.status),
            document_ref: ActiveValue::Set(self.document_ref),
            submitted_at: ActiveValue::Set(self.submitted_at),
            decided_at: ActiveValue::Set(decided_at),
            decided_by: ActiveValue::Set(self.decided_by),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a pending certificate for a user.
pub async fn create_certificate(
    db: &DatabaseConnection,
    user_id: i32,
) -> Result<entity::medical_certificate::Model, DbErr> {
    CertificateFactory::new(db, user_id).build().await
}
