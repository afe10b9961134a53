use std::collections::HashMap;

use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr,
    EntityTrait, QueryFilter, QueryOrder, TransactionTrait,
};

use crate::server::{
    data::{ReferenceCheck, Store},
    error::store::StoreError,
    model::{
        event::{Event, EventParams},
        validate::Validate,
    },
};

const ENTITY: &str = "Event";

pub struct EventRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> EventRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    async fn check_references<C: ConnectionTrait>(
        conn: &C,
        params: &EventParams,
    ) -> Result<(), StoreError> {
        let mut check = ReferenceCheck::new();
        if let Some(location_id) = params.location_id {
            check
                .require::<entity::prelude::Location, _>(
                    conn,
                    "locationId",
                    entity::location::Column::Id,
                    &[location_id],
                )
                .await?;
        }

        Ok(check.finish()?)
    }
}

impl Store for EventRepository<'_> {
    type Record = Event;
    type Params = EventParams;

    async fn get_all(&self) -> Result<Vec<Event>, StoreError> {
        let events = entity::prelude::Event::find()
            .find_also_related(entity::prelude::Location)
            .order_by_asc(entity::event::Column::Id)
            .all(self.db)
            .await?;

        Ok(events
            .into_iter()
            .map(|(event, location)| Event::from_entity(event, location))
            .collect())
    }

    async fn get_by_id(&self, id: i32) -> Result<Event, StoreError> {
        entity::prelude::Event::find_by_id(id)
            .find_also_related(entity::prelude::Location)
            .one(self.db)
            .await?
            .map(|(event, location)| Event::from_entity(event, location))
            .ok_or_else(|| StoreError::not_found(ENTITY, id))
    }

    async fn create(&self, params: EventParams) -> Result<Event, StoreError> {
        params.validate()?;
        let (start_date, end_date) = params.dates()?;
        tracing::debug!("Creating event '{}'", params.name);

        let txn = self.db.begin().await?;
        Self::check_references(&txn, &params).await?;

        let event = entity::event::ActiveModel {
            name: ActiveValue::Set(params.name),
            start_date: ActiveValue::Set(start_date),
            end_date: ActiveValue::Set(end_date),
            location_id: ActiveValue::Set(params.location_id),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;

        self.get_by_id(event.id).await
    }

    async fn update(&self, id: i32, params: EventParams) -> Result<Event, StoreError> {
        params.validate()?;
        let (start_date, end_date) = params.dates()?;
        tracing::debug!("Updating event {}", id);

        let txn = self.db.begin().await?;

        entity::prelude::Event::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| StoreError::not_found(ENTITY, id))?;
        Self::check_references(&txn, &params).await?;

        entity::event::ActiveModel {
            id: ActiveValue::Unchanged(id),
            name: ActiveValue::Set(params.name),
            start_date: ActiveValue::Set(start_date),
            end_date: ActiveValue::Set(end_date),
            location_id: ActiveValue::Set(params.location_id),
        }
        .update(&txn)
        .await?;

        txn.commit().await?;

        self.get_by_id(id).await
    }

    /// Deletes an event together with the talk dates scheduled at it.
    async fn delete(&self, id: i32) -> Result<(), StoreError> {
        tracing::debug!("Deleting event {}", id);

        let result = entity::prelude::Event::delete_by_id(id)
            .exec(self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(StoreError::not_found(ENTITY, id));
        }

        Ok(())
    }
}

/// Loads events keyed by id, with their locations.
pub(crate) async fn load_events_by_id<C: ConnectionTrait>(
    conn: &C,
    ids: Vec<i32>,
) -> Result<HashMap<i32, Event>, DbErr> {
    if ids.is_empty() {
        return Ok(HashMap::new());
    }

    let events = entity::prelude::Event::find()
        .find_also_related(entity::prelude::Location)
        .filter(entity::event::Column::Id.is_in(ids))
        .all(conn)
        .await?;

    Ok(events
        .into_iter()
        .map(|(event, location)| (event.id, Event::from_entity(event, location)))
        .collect())
}
