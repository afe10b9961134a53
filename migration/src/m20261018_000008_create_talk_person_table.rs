use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20261018_000007_create_talk_table::Talk, m20261018_000003_create_person_table::Person,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(TalkPerson::Table)
                    .if_not_exists()
                    .col(integer(TalkPerson::TalkId))
                    .col(integer(TalkPerson::PersonId))
                    .primary_key(
                        Index::create()
                            .col(TalkPerson::TalkId)
                            .col(TalkPerson::PersonId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_talk_person_talk_id")
                            .from(TalkPerson::Table, TalkPerson::TalkId)
                            .to(Talk::Table, Talk::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_talk_person_person_id")
                            .from(TalkPerson::Table, TalkPerson::PersonId)
                            .to(Person::Table, Person::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TalkPerson::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum TalkPerson {
    Table,
    TalkId,
    PersonId,
}
