//! Event factory for creating test event entities.

use crate::factory::helpers::next_id;
use chrono::NaiveDate;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Default first day of factory-created events.
pub const DEFAULT_START_DATE: (i32, u32, u32) = (2026, 5, 4);

/// Factory for creating test events with customizable fields.
pub struct EventFactory<'a> {
    db: &'a DatabaseConnection,
    name: String,
    start_date: NaiveDate,
    end_date: NaiveDate,
    location_id: Option<i32>,
}

impl<'a> EventFactory<'a> {
    /// Creates a new EventFactory for a two-day event without a location.
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let (year, month, day) = DEFAULT_START_DATE;
        let start_date =
            NaiveDate::from_ymd_opt(year, month, day).expect("default event date is valid");
        Self {
            db,
            name: format!("Event {}", next_id()),
            start_date,
            end_date: start_date + chrono::Duration::days(1),
            location_id: None,
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn dates(mut self, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        self.start_date = start_date;
        self.end_date = end_date;
        self
    }

    pub fn location_id(mut self, location_id: Option<i32>) -> Self {
        self.location_id = location_id;
        self
    }

    /// Inserts the event into the database.
    pub async fn build(self) -> Result<entity::event::Model, DbErr> {
        entity::event::ActiveModel {
            name: ActiveValue::Set(self.name),
            start_date: ActiveValue::Set(self.start_date),
            end_date: ActiveValue::Set(self.end_date),
            location_id: ActiveValue::Set(self.location_id),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates an event with default values.
pub async fn create_event(db: &DatabaseConnection) -> Result<entity::event::Model, DbErr> {
    EventFactory::new(db).build().await
}
