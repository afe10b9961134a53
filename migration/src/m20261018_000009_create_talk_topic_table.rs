use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20261018_000007_create_talk_table::Talk, m20261018_000005_create_topic_table::Topic,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(TalkTopic::Table)
                    .if_not_exists()
                    .col(integer(TalkTopic::TalkId))
                    .col(integer(TalkTopic::TopicId))
                    .primary_key(
                        Index::create()
                            .col(TalkTopic::TalkId)
                            .col(TalkTopic::TopicId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_talk_topic_talk_id")
                            .from(TalkTopic::Table, TalkTopic::TalkId)
                            .to(Talk::Table, Talk::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_talk_topic_topic_id")
                            .from(TalkTopic::Table, TalkTopic::TopicId)
                            .to(Topic::Table, Topic::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TalkTopic::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum TalkTopic {
    Table,
    TalkId,
    TopicId,
}
