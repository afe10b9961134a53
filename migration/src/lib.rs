pub use sea_orm_migration::prelude::*;

mod m20261018_000001_create_location_table;
mod m20261018_000002_create_organization_table;
mod m20261018_000003_create_person_table;
mod m20261018_000004_create_room_table;
mod m20261018_000005_create_topic_table;
mod m20261018_000006_create_event_table;
mod m20261018_000007_create_talk_table;
mod m20261018_000008_create_talk_person_table;
mod m20261018_000009_create_talk_topic_table;
mod m20261018_000010_create_talk_date_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20261018_000001_create_location_table::Migration),
            Box::new(m20261018_000002_create_organization_table::Migration),
            Box::new(m20261018_000003_create_person_table::Migration),
            Box::new(m20261018_000004_create_room_table::Migration),
            Box::new(m20261018_000005_create_topic_table::Migration),
            Box::new(m20261018_000006_create_event_table::Migration),
            Box::new(m20261018_000007_create_talk_table::Migration),
            Box::new(m20261018_000008_create_talk_person_table::Migration),
            Box::new(m20261018_000009_create_talk_topic_table::Migration),
            Box::new(m20261018_000010_create_talk_date_table::Migration),
        ]
    }
}
