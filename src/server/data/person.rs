use std::collections::HashMap;

use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr,
    EntityTrait, QueryFilter, QueryOrder, TransactionTrait,
};

use crate::server::{
    data::{ReferenceCheck, Store},
    error::store::StoreError,
    model::{
        person::{Person, PersonParams},
        validate::Validate,
    },
};

const ENTITY: &str = "Person";

pub struct PersonRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> PersonRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    async fn check_references<C: ConnectionTrait>(
        conn: &C,
        params: &PersonParams,
    ) -> Result<(), StoreError> {
        let mut check = ReferenceCheck::new();
        if let Some(organization_id) = params.organization_id {
            check
                .require::<entity::prelude::Organization, _>(
                    conn,
                    "organizationId",
                    entity::organization::Column::Id,
                    &[organization_id],
                )
                .await?;
        }

        Ok(check.finish()?)
    }
}

impl Store for PersonRepository<'_> {
    type Record = Person;
    type Params = PersonParams;

    async fn get_all(&self) -> Result<Vec<Person>, StoreError> {
        let persons = entity::prelude::Person::find()
            .find_also_related(entity::prelude::Organization)
            .order_by_asc(entity::person::Column::Id)
            .all(self.db)
            .await?;

        Ok(persons
            .into_iter()
            .map(|(person, organization)| Person::from_entity(person, organization))
            .collect())
    }

    async fn get_by_id(&self, id: i32) -> Result<Person, StoreError> {
        entity::prelude::Person::find_by_id(id)
            .find_also_related(entity::prelude::Organization)
            .one(self.db)
            .await?
            .map(|(person, organization)| Person::from_entity(person, organization))
            .ok_or_else(|| StoreError::not_found(ENTITY, id))
    }

    async fn create(&self, params: PersonParams) -> Result<Person, StoreError> {
        params.validate()?;
        tracing::debug!("Creating person '{}'", params.name);

        let txn = self.db.begin().await?;
        Self::check_references(&txn, &params).await?;

        let person = entity::person::ActiveModel {
            name: ActiveValue::Set(params.name),
            email: ActiveValue::Set(params.email),
            organization_id: ActiveValue::Set(params.organization_id),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;

        self.get_by_id(person.id).await
    }

    async fn update(&self, id: i32, params: PersonParams) -> Result<Person, StoreError> {
        params.validate()?;
        tracing::debug!("Updating person {}", id);

        let txn = self.db.begin().await?;

        entity::prelude::Person::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| StoreError::not_found(ENTITY, id))?;
        Self::check_references(&txn, &params).await?;

        entity::person::ActiveModel {
            id: ActiveValue::Unchanged(id),
            name: ActiveValue::Set(params.name),
            email: ActiveValue::Set(params.email),
            organization_id: ActiveValue::Set(params.organization_id),
        }
        .update(&txn)
        .await?;

        txn.commit().await?;

        self.get_by_id(id).await
    }

    /// Deletes a person and unlinks them from every talk.
    async fn delete(&self, id: i32) -> Result<(), StoreError> {
        tracing::debug!("Deleting person {}", id);

        let result = entity::prelude::Person::delete_by_id(id)
            .exec(self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(StoreError::not_found(ENTITY, id));
        }

        Ok(())
    }
}

/// Loads persons with their organizations, keyed by person id.
pub(crate) async fn load_persons_by_id<C: ConnectionTrait>(
    conn: &C,
    ids: Vec<i32>,
) -> Result<HashMap<i32, Person>, DbErr> {
    if ids.is_empty() {
        return Ok(HashMap::new());
    }

    let persons = entity::prelude::Person::find()
        .filter(entity::person::Column::Id.is_in(ids))
        .find_also_related(entity::prelude::Organization)
        .all(conn)
        .await?;

    Ok(persons
        .into_iter()
        .map(|(person, organization)| (person.id, Person::from_entity(person, organization)))
        .collect())
}
