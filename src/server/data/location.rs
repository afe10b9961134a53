use sea_orm::{
    ActiveModelTrait, ActiveValue, DatabaseConnection, EntityTrait, QueryOrder, TransactionTrait,
};

use crate::server::{
    data::Store,
    error::store::StoreError,
    model::{
        location::{Location, LocationParams},
        validate::Validate,
    },
};

const ENTITY: &str = "Location";

pub struct LocationRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> LocationRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }
}

impl Store for LocationRepository<'_> {
    type Record = Location;
    type Params = LocationParams;

    async fn get_all(&self) -> Result<Vec<Location>, StoreError> {
        let locations = entity::prelude::Location::find()
            .order_by_asc(entity::location::Column::Id)
            .all(self.db)
            .await?;

        Ok(locations.into_iter().map(Location::from_entity).collect())
    }

    async fn get_by_id(&self, id: i32) -> Result<Location, StoreError> {
        entity::prelude::Location::find_by_id(id)
            .one(self.db)
            .await?
            .map(Location::from_entity)
            .ok_or_else(|| StoreError::not_found(ENTITY, id))
    }

    async fn create(&self, params: LocationParams) -> Result<Location, StoreError> {
        params.validate()?;
        tracing::debug!("Creating location '{}'", params.name);

        let location = entity::location::ActiveModel {
            name: ActiveValue::Set(params.name),
            lat: ActiveValue::Set(params.lat),
            lon: ActiveValue::Set(params.lon),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        self.get_by_id(location.id).await
    }

    async fn update(&self, id: i32, params: LocationParams) -> Result<Location, StoreError> {
        params.validate()?;
        tracing::debug!("Updating location {}", id);

        let txn = self.db.begin().await?;

        entity::prelude::Location::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| StoreError::not_found(ENTITY, id))?;

        entity::location::ActiveModel {
            id: ActiveValue::Unchanged(id),
            name: ActiveValue::Set(params.name),
            lat: ActiveValue::Set(params.lat),
            lon: ActiveValue::Set(params.lon),
        }
        .update(&txn)
        .await?;

        txn.commit().await?;

        self.get_by_id(id).await
    }

    /// Deletes a location. Rooms at the location are deleted with it and events held there
    /// lose their location.
    async fn delete(&self, id: i32) -> Result<(), StoreError> {
        tracing::debug!("Deleting location {}", id);

        let result = entity::prelude::Location::delete_by_id(id)
            .exec(self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(StoreError::not_found(ENTITY, id));
        }

        Ok(())
    }
}
