use std::collections::HashMap;

use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr,
    EntityTrait, QueryFilter, QueryOrder, TransactionTrait,
};

use crate::server::{
    data::{ReferenceCheck, Store},
    error::store::StoreError,
    model::{
        room::{Room, RoomParams},
        validate::{present, Validate},
    },
};

const ENTITY: &str = "Room";

pub struct RoomRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> RoomRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    async fn check_references<C: ConnectionTrait>(
        conn: &C,
        location_id: i32,
    ) -> Result<(), StoreError> {
        let mut check = ReferenceCheck::new();
        check
            .require::<entity::prelude::Location, _>(
                conn,
                "locationId",
                entity::location::Column::Id,
                &[location_id],
            )
            .await?;

        Ok(check.finish()?)
    }
}

impl Store for RoomRepository<'_> {
    type Record = Room;
    type Params = RoomParams;

    async fn get_all(&self) -> Result<Vec<Room>, StoreError> {
        let rooms = entity::prelude::Room::find()
            .order_by_asc(entity::room::Column::Id)
            .all(self.db)
            .await?;

        Ok(rooms.into_iter().map(Room::from_entity).collect())
    }

    async fn get_by_id(&self, id: i32) -> Result<Room, StoreError> {
        entity::prelude::Room::find_by_id(id)
            .one(self.db)
            .await?
            .map(Room::from_entity)
            .ok_or_else(|| StoreError::not_found(ENTITY, id))
    }

    async fn create(&self, params: RoomParams) -> Result<Room, StoreError> {
        params.validate()?;
        let location_id = present("locationId", params.location_id)?;
        tracing::debug!("Creating room '{}' at location {}", params.name, location_id);

        let txn = self.db.begin().await?;
        Self::check_references(&txn, location_id).await?;

        let room = entity::room::ActiveModel {
            name: ActiveValue::Set(params.name),
            location_id: ActiveValue::Set(location_id),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;

        self.get_by_id(room.id).await
    }

    async fn update(&self, id: i32, params: RoomParams) -> Result<Room, StoreError> {
        params.validate()?;
        let location_id = present("locationId", params.location_id)?;
        tracing::debug!("Updating room {}", id);

        let txn = self.db.begin().await?;

        entity::prelude::Room::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| StoreError::not_found(ENTITY, id))?;
        Self::check_references(&txn, location_id).await?;

        entity::room::ActiveModel {
            id: ActiveValue::Unchanged(id),
            name: ActiveValue::Set(params.name),
            location_id: ActiveValue::Set(location_id),
        }
        .update(&txn)
        .await?;

        txn.commit().await?;

        self.get_by_id(id).await
    }

    /// Deletes a room together with the talk dates scheduled in it.
    async fn delete(&self, id: i32) -> Result<(), StoreError> {
        tracing::debug!("Deleting room {}", id);

        let result = entity::prelude::Room::delete_by_id(id)
            .exec(self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(StoreError::not_found(ENTITY, id));
        }

        Ok(())
    }
}

/// Loads rooms keyed by id.
pub(crate) async fn load_rooms_by_id<C: ConnectionTrait>(
    conn: &C,
    ids: Vec<i32>,
) -> Result<HashMap<i32, Room>, DbErr> {
    if ids.is_empty() {
        return Ok(HashMap::new());
    }

    let rooms = entity::prelude::Room::find()
        .filter(entity::room::Column::Id.is_in(ids))
        .all(conn)
        .await?;

    Ok(rooms
        .into_iter()
        .map(|room| (room.id, Room::from_entity(room)))
        .collect())
}
