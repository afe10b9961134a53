//! Location factory for creating test location entities.

use crate::factory::helpers::next_id;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test locations with customizable fields.
pub struct LocationFactory<'a> {
    db: &'a DatabaseConnection,
    name: String,
    lat: f64,
    lon: f64,
}

impl<'a> LocationFactory<'a> {
    /// Creates a new LocationFactory with a unique name and coordinates of 0/0.
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self {
            db,
            name: format!("Location {}", next_id()),
            lat: 0.0,
            lon: 0.0,
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn coordinates(mut self, lat: f64, lon: f64) -> Self {
        self.lat = lat;
        self.lon = lon;
        self
    }

    /// Inserts the location into the database.
    pub async fn build(self) -> Result<entity::location::Model, DbErr> {
        entity::location::ActiveModel {
            name: ActiveValue::Set(self.name),
            lat: ActiveValue::Set(self.lat),
            lon: ActiveValue::Set(self.lon),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a location with default values.
pub async fn create_location(db: &DatabaseConnection) -> Result<entity::location::Model, DbErr> {
    LocationFactory::new(db).build().await
}
