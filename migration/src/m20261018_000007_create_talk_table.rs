use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Talk::Table)
                    .if_not_exists()
                    .col(pk_auto(Talk::Id))
                    .col(string(Talk::Title))
                    .col(integer(Talk::DurationInMinutes))
                    .col(string(Talk::Language))
                    .col(string_len(Talk::Level, 16))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Talk::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Talk {
    Table,
    Id,
    Title,
    DurationInMinutes,
    Language,
    Level,
}
