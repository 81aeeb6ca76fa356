use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20260105_000001_create_user_table::User, m20260105_000002_create_bicycle_table::Bicycle,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Borrowing::Table)
                    .if_not_exists()
                    .col(pk_auto(Borrowing::Id))
                    .col(integer(Borrowing::UserId))
                    .col(integer(Borrowing::BicycleId))
                    .col(string(Borrowing::Status).default("active"))
                    .col(timestamp_with_time_zone(Borrowing::BorrowedAt))
                    .col(timestamp_with_time_zone(Borrowing::DueAt))
                    .col(timestamp_with_time_zone_null(Borrowing::ReturnedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_borrowing_user_id")
                            .from(Borrowing::Table, Borrowing::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_borrowing_bicycle_id")
                            .from(Borrowing::Table, Borrowing::BicycleId)
                            .to(Bicycle::Table, Bicycle::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // The overdue sweep scans by status and due time.
        manager
            .create_index(
                Index::create()
                    .name("idx_borrowing_status_due_at")
                    .table(Borrowing::Table)
                    .col(Borrowing::Status)
                    .col(Borrowing::DueAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_borrowing_bicycle_id")
                    .table(Borrowing::Table)
                    .col(Borrowing::BicycleId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_borrowing_user_id")
                    .table(Borrowing::Table)
                    .col(Borrowing::UserId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Borrowing::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Borrowing {
    Table,
    Id,
    UserId,
    BicycleId,
    Status,
    BorrowedAt,
    DueAt,
    ReturnedAt,
}
