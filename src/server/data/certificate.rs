//! Medical certificate data repository.
//!
//! Certificates are append-only apart from the single `pending -> approved | rejected`
//! decision, which is written with a conditional update on `status = pending`.

use chrono::{DateTime, Utc};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, Condition, ConnectionTrait,
    DbErr, EntityTrait, QueryFilter, QueryOrder,
};

use crate::server::{
    data::substring_pattern,
    model::certificate::{CertificateFilter, CertificateStatus, MedicalCertificate},
};

pub struct CertificateRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> CertificateRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts a new `pending` certificate.
    ///
    /// # Arguments
    /// - `user_id` - Owner of the certificate
    /// - `document_ref` - Opaque document storage reference
    /// - `now` - Submission timestamp
    ///
    /// # Returns
    /// - `Ok(MedicalCertificate)` - The created certificate
    /// - `Err(DbErr)` - Database error during insert
    pub async fn create(
        &self,
        user_id: i32,
        document_ref: String,
        now: DateTime<Utc>,
    ) -> Result<MedicalCertificate, DbErr> {
        let entity = entity::medical_certificate::ActiveModel {
            user_id: ActiveValue::Set(user_id),
            status: ActiveValue::Set(CertificateStatus::Pending.as_str().to_string()),
            document_ref: ActiveValue::Set(document_ref),
            submitted_at: ActiveValue::Set(now),
            decided_at: ActiveValue::Set(None),
            decided_by: ActiveValue::Set(None),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(MedicalCertificate::from_entity(entity)?)
    }

    pub async fn find_by_id(&self, certificate_id: i32) -> Result<Option<MedicalCertificate>, DbErr> {
        let entity = entity::prelude::MedicalCertificate::find_by_id(certificate_id)
            .one(self.db)
            .await?;

        Ok(entity.map(MedicalCertificate::from_entity).transpose()?)
    }

    /// Finds the user's most recently submitted certificate.
    ///
    /// Ties on `submitted_at` are broken by the higher id. The status of this row is the
    /// user's effective certificate status.
    ///
    /// # Returns
    /// - `Ok(Some(MedicalCertificate))` - Latest certificate
    /// - `Ok(None)` - User never submitted a certificate
    /// - `Err(DbErr)` - Database error during query
    pub async fn find_latest_for_user(
        &self,
        user_id: i32,
    ) -> Result<Option<MedicalCertificate>, DbErr> {
        let entity = entity::prelude::MedicalCertificate::find()
            .filter(entity::medical_certificate::Column::UserId.eq(user_id))
            .order_by_desc(entity::medical_certificate::Column::SubmittedAt)
            .order_by_desc(entity::medical_certificate::Column::Id)
            .one(self.db)
            .await?;

        Ok(entity.map(MedicalCertificate::from_entity).transpose()?)
    }

    /// Records a decision on a certificate that is still pending.
    ///
    /// # Arguments
    /// - `certificate_id` - Certificate to decide
    /// - `status` - `Approved` or `Rejected`
    /// - `admin_id` - Deciding admin
    /// - `now` - Decision timestamp
    ///
    /// # Returns
    /// - `Ok(true)` - Decision written
    /// - `Ok(false)` - Certificate missing or no longer pending
    /// - `Err(DbErr)` - Database error during update
    pub async fn decide(
        &self,
        certificate_id: i32,
        status: CertificateStatus,
        admin_id: i32,
        now: DateTime<Utc>,
    ) -> Result<bool, DbErr> {
        let result = entity::prelude::MedicalCertificate::update_many()
            .col_expr(
                entity::medical_certificate::Column::Status,
                Expr::value(status.as_str()),
            )
            .col_expr(
                entity::medical_certificate::Column::DecidedAt,
                Expr::value(Some(now)),
            )
            .col_expr(
                entity::medical_certificate::Column::DecidedBy,
                Expr::value(Some(admin_id)),
            )
            .filter(entity::medical_certificate::Column::Id.eq(certificate_id))
            .filter(
                entity::medical_certificate::Column::Status
                    .eq(CertificateStatus::Pending.as_str()),
            )
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Lists certificates newest-first by submission time.
    ///
    /// Free text is matched as a substring of the owner's name or email.
    pub async fn list(&self, filter: &CertificateFilter) -> Result<Vec<MedicalCertificate>, DbErr> {
        let mut query = entity::prelude::MedicalCertificate::find()
            .inner_join(entity::prelude::User);

        if let Some(status) = filter.status {
            query = query.filter(entity::medical_certificate::Column::Status.eq(status.as_str()));
        }
        if let Some(term) = filter.search.as_deref() {
            let pattern = substring_pattern(term);
            query = query.filter(
                Condition::any()
                    .add(entity::user::Column::Name.like(pattern.clone()))
                    .add(entity::user::Column::Email.like(pattern)),
            );
        }

        let entities = query
            .order_by_desc(entity::medical_certificate::Column::SubmittedAt)
            .order_by_desc(entity::medical_certificate::Column::Id)
            .all(self.db)
            .await?;

        Ok(entities
            .into_iter()
            .map(MedicalCertificate::from_entity)
            .collect::<Result<Vec<_>, _>>()?)
    }
}
