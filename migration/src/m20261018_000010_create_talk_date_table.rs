use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20261018_000004_create_room_table::Room, m20261018_000006_create_event_table::Event,
    m20261018_000007_create_talk_table::Talk,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(TalkDate::Table)
                    .if_not_exists()
                    .col(pk_auto(TalkDate::Id))
                    .col(integer(TalkDate::TalkId))
                    .col(integer(TalkDate::EventId))
                    .col(integer(TalkDate::RoomId))
                    .col(timestamp_with_time_zone_null(TalkDate::BeginsAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_talk_date_talk_id")
                            .from(TalkDate::Table, TalkDate::TalkId)
                            .to(Talk::Table, Talk::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_talk_date_event_id")
                            .from(TalkDate::Table, TalkDate::EventId)
                            .to(Event::Table, Event::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_talk_date_room_id")
                            .from(TalkDate::Table, TalkDate::RoomId)
                            .to(Room::Table, Room::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TalkDate::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum TalkDate {
    Table,
    Id,
    TalkId,
    EventId,
    RoomId,
    BeginsAt,
}
