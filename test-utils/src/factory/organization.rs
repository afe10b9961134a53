//! Organization factory for creating test organization entities.

use crate::factory::helpers::next_id;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Creates an organization with a unique default name.
pub async fn create_organization(
    db: &DatabaseConnection,
) -> Result<entity::organization::Model, DbErr> {
    create_organization_named(db, format!("Organization {}", next_id())).await
}

/// Creates an organization with the given name.
pub async fn create_organization_named(
    db: &DatabaseConnection,
    name: impl Into<String>,
) -> Result<entity::organization::Model, DbErr> {
    entity::organization::ActiveModel {
        name: ActiveValue::Set(name.into()),
        ..Default::default()
    }
    .insert(db)
    .await
}
