use sea_orm_migration::{prelude::*, schema::*};

use super::m20260105_000001_create_user_table::User;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(MedicalCertificate::Table)
                    .if_not_exists()
                    .col(pk_auto(MedicalCertificate::Id))
                    .col(integer(MedicalCertificate::UserId))
                    .col(string(MedicalCertificate::Status).default("pending"))
                    .col(text(MedicalCertificate::DocumentRef))
                    .col(timestamp_with_time_zone(MedicalCertificate::SubmittedAt))
                    .col(timestamp_with_time_zone_null(MedicalCertificate::DecidedAt))
                    .col(integer_null(MedicalCertificate::DecidedBy))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_medical_certificate_user_id")
                            .from(MedicalCertificate::Table, MedicalCertificate::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_medical_certificate_decided_by")
                            .from(MedicalCertificate::Table, MedicalCertificate::DecidedBy)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Effective status lookups read the newest certificate per user.
        manager
            .create_index(
                Index::create()
                    .name("idx_medical_certificate_user_submitted_at")
                    .table(MedicalCertificate::Table)
                    .col(MedicalCertificate::UserId)
                    .col(MedicalCertificate::SubmittedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(MedicalCertificate::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum MedicalCertificate {
    Table,
    Id,
    UserId,
    Status,
    DocumentRef,
    SubmittedAt,
    DecidedAt,
    DecidedBy,
}
