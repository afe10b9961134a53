//! Talk factory for creating test talks and their relation rows.

use crate::factory::helpers::next_id;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test talks with customizable fields.
///
/// Only the talk row is inserted; use `add_person`, `add_topic` and `add_talk_date` to
/// attach relations.
pub struct TalkFactory<'a> {
    db: &'a DatabaseConnection,
    title: String,
    duration_in_minutes: i32,
    language: String,
    level: String,
}

impl<'a> TalkFactory<'a> {
    /// Creates a new TalkFactory for a 45 minute beginner talk in English.
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self {
            db,
            title: format!("Talk {}", next_id()),
            duration_in_minutes: 45,
            language: "en".to_string(),
            level: "beginner".to_string(),
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn duration_in_minutes(mut self, minutes: i32) -> Self {
        self.duration_in_minutes = minutes;
        self
    }

    pub fn level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }

    /// Inserts the talk into the database.
    pub async fn build(self) -> Result<entity::talk::Model, DbErr> {
        entity::talk::ActiveModel {
            title: ActiveValue::Set(self.title),
            duration_in_minutes: ActiveValue::Set(self.duration_in_minutes),
            language: ActiveValue::Set(self.language),
            level: ActiveValue::Set(self.level),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a talk with default values.
pub async fn create_talk(db: &DatabaseConnection) -> Result<entity::talk::Model, DbErr> {
    TalkFactory::new(db).build().await
}

/// Links a person to a talk.
pub async fn add_person(
    db: &DatabaseConnection,
    talk_id: i32,
    person_id: i32,
) -> Result<entity::talk_person::Model, DbErr> {
    entity::talk_person::ActiveModel {
        talk_id: ActiveValue::Set(talk_id),
        person_id: ActiveValue::Set(person_id),
    }
    .insert(db)
    .await
}

/// Links a topic to a talk.
pub async fn add_topic(
    db: &DatabaseConnection,
    talk_id: i32,
    topic_id: i32,
) -> Result<entity::talk_topic::Model, DbErr> {
    entity::talk_topic::ActiveModel {
        talk_id: ActiveValue::Set(talk_id),
        topic_id: ActiveValue::Set(topic_id),
    }
    .insert(db)
    .await
}

/// Schedules a talk at an event in a room, without a start time.
pub async fn add_talk_date(
    db: &DatabaseConnection,
    talk_id: i32,
    event_id: i32,
    room_id: i32,
) -> Result<entity::talk_date::Model, DbErr> {
    entity::talk_date::ActiveModel {
        talk_id: ActiveValue::Set(talk_id),
        event_id: ActiveValue::Set(event_id),
        room_id: ActiveValue::Set(room_id),
        begins_at: ActiveValue::Set(None),
        ..Default::default()
    }
    .insert(db)
    .await
}
