use sea_orm::{
    ActiveModelTrait, ActiveValue, DatabaseConnection, EntityTrait, QueryOrder, TransactionTrait,
};

use crate::server::{
    data::Store,
    error::store::StoreError,
    model::{
        organization::{Organization, OrganizationParams},
        validate::Validate,
    },
};

const ENTITY: &str = "Organization";

pub struct OrganizationRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> OrganizationRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }
}

impl Store for OrganizationRepository<'_> {
    type Record = Organization;
    type Params = OrganizationParams;

    async fn get_all(&self) -> Result<Vec<Organization>, StoreError> {
        let organizations = entity::prelude::Organization::find()
            .order_by_asc(entity::organization::Column::Id)
            .all(self.db)
            .await?;

        Ok(organizations
            .into_iter()
            .map(Organization::from_entity)
            .collect())
    }

    async fn get_by_id(&self, id: i32) -> Result<Organization, StoreError> {
        entity::prelude::Organization::find_by_id(id)
            .one(self.db)
            .await?
            .map(Organization::from_entity)
            .ok_or_else(|| StoreError::not_found(ENTITY, id))
    }

    async fn create(&self, params: OrganizationParams) -> Result<Organization, StoreError> {
        params.validate()?;
        tracing::debug!("Creating organization '{}'", params.name);

        let organization = entity::organization::ActiveModel {
            name: ActiveValue::Set(params.name),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        self.get_by_id(organization.id).await
    }

    async fn update(
        &self,
        id: i32,
        params: OrganizationParams,
    ) -> Result<Organization, StoreError> {
        params.validate()?;
        tracing::debug!("Updating organization {}", id);

        let txn = self.db.begin().await?;

        entity::prelude::Organization::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| StoreError::not_found(ENTITY, id))?;

        entity::organization::ActiveModel {
            id: ActiveValue::Unchanged(id),
            name: ActiveValue::Set(params.name),
        }
        .update(&txn)
        .await?;

        txn.commit().await?;

        self.get_by_id(id).await
    }

    /// Deletes an organization; its members are kept without an organization.
    async fn delete(&self, id: i32) -> Result<(), StoreError> {
        tracing::debug!("Deleting organization {}", id);

        let result = entity::prelude::Organization::delete_by_id(id)
            .exec(self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(StoreError::not_found(ENTITY, id));
        }

        Ok(())
    }
}
