//! Topic factory for creating test topic entities.

use crate::factory::helpers::next_id;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Creates a root topic with a unique default name.
pub async fn create_topic(db: &DatabaseConnection) -> Result<entity::topic::Model, DbErr> {
    create_child_topic(db, None).await
}

/// Creates a topic below `parent_id`, or a root topic when `None`.
pub async fn create_child_topic(
    db: &DatabaseConnection,
    parent_id: Option<i32>,
) -> Result<entity::topic::Model, DbErr> {
    entity::topic::ActiveModel {
        name: ActiveValue::Set(format!("Topic {}", next_id())),
        parent_id: ActiveValue::Set(parent_id),
        ..Default::default()
    }
    .insert(db)
    .await
}
