use sea_orm::{DatabaseConnection, DbErr, EntityTrait, PaginatorTrait};
use test_utils::{builder::TestBuilder, context::TestContext, factory};

use crate::server::{data::Store, error::store::StoreError};

mod event;
mod person;
mod talk;
mod topic;

/// Builds a test context with the full schema.
async fn setup() -> TestContext {
    TestBuilder::new().with_all_tables().build().await.unwrap()
}

/// Counts rows of an entity table.
async fn count<E>(db: &DatabaseConnection) -> Result<u64, DbErr>
where
    E: EntityTrait,
    E::Model: Sync,
{
    E::find().count(db).await
}

fn assert_not_found<T: std::fmt::Debug>(result: Result<T, StoreError>, expected_id: i32) {
    match result {
        Err(StoreError::NotFound { id, .. }) => assert_eq!(id, expected_id),
        other => panic!("expected NotFound for id {}, got {:?}", expected_id, other),
    }
}

fn assert_violation<T: std::fmt::Debug>(result: Result<T, StoreError>, field: &str) {
    match result {
        Err(StoreError::ValidationFailed(err)) => assert!(
            err.has_field(field),
            "expected violation on {}, got {:?}",
            field,
            err.violations
        ),
        other => panic!("expected ValidationFailed on {}, got {:?}", field, other),
    }
}
