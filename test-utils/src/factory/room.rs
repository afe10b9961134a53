//! Room factory for creating test room entities.

use crate::factory::helpers::next_id;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test rooms. The location must already exist.
pub struct RoomFactory<'a> {
    db: &'a DatabaseConnection,
    name: String,
    location_id: i32,
}

impl<'a> RoomFactory<'a> {
    pub fn new(db: &'a DatabaseConnection, location_id: i32) -> Self {
        Self {
            db,
            name: format!("Room {}", next_id()),
            location_id,
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Inserts the room into the database.
    pub async fn build(self) -> Result<entity::room::Model, DbErr> {
        entity::room::ActiveModel {
            name: ActiveValue::Set(self.name),
            location_id: ActiveValue::Set(self.location_id),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a room with default values at the given location.
pub async fn create_room(
    db: &DatabaseConnection,
    location_id: i32,
) -> Result<entity::room::Model, DbErr> {
    RoomFactory::new(db, location_id).build().await
}
