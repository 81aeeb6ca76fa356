use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Bicycle::Table)
                    .if_not_exists()
                    .col(pk_auto(Bicycle::Id))
                    .col(string(Bicycle::Name))
                    .col(string_uniq(Bicycle::Code))
                    .col(string(Bicycle::Status).default("available"))
                    .col(
                        timestamp_with_time_zone(Bicycle::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Bicycle::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Bicycle {
    Table,
    Id,
    Name,
    Code,
    Status,
    CreatedAt,
}
