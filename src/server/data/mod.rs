//! Database repository layer for all domain entities.
//!
//! Each entity has a repository implementing [`Store`]. Repositories use SeaORM entity models
//! internally and return domain models with their declared relations eagerly loaded. Input is
//! validated and references are checked before anything is written, and every multi-row write
//! happens inside a transaction.

pub mod event;
pub mod location;
pub mod organization;
pub mod person;
pub mod room;
pub mod talk;
pub mod topic;

#[cfg(test)]
mod test;

use std::{collections::HashSet, future::Future};

use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QuerySelect};

use crate::server::{
    error::{
        store::StoreError,
        validation::{FieldViolation, ValidationError},
    },
    model::{validate::Validate, IntoDto},
};

/// CRUD contract shared by every entity repository.
pub trait Store {
    /// Domain model returned with its relations loaded.
    type Record: IntoDto;
    /// Input of create and full-replace update.
    type Params: Validate;

    /// Returns every record in ascending id order.
    fn get_all(&self) -> impl Future<Output = Result<Vec<Self::Record>, StoreError>> + Send;

    /// Returns the record with `id`, or `StoreError::NotFound`.
    fn get_by_id(&self, id: i32) -> impl Future<Output = Result<Self::Record, StoreError>> + Send;

    /// Validates `params`, inserts a new record and returns it as stored.
    fn create(
        &self,
        params: Self::Params,
    ) -> impl Future<Output = Result<Self::Record, StoreError>> + Send;

    /// Validates `params` and replaces every mutable field and relation of record `id`.
    fn update(
        &self,
        id: i32,
        params: Self::Params,
    ) -> impl Future<Output = Result<Self::Record, StoreError>> + Send;

    /// Deletes record `id`, or fails with `StoreError::NotFound` if nothing was deleted.
    fn delete(&self, id: i32) -> impl Future<Output = Result<(), StoreError>> + Send;
}

/// Returns the ids in `ids` with no matching row in `E`, sorted and deduplicated.
pub(crate) async fn find_missing_ids<E, C>(
    conn: &C,
    id_column: E::Column,
    ids: &[i32],
) -> Result<Vec<i32>, DbErr>
where
    E: EntityTrait,
    C: ConnectionTrait,
{
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    let found: HashSet<i32> = E::find()
        .select_only()
        .column(id_column)
        .filter(id_column.is_in(ids.iter().copied()))
        .into_tuple::<i32>()
        .all(conn)
        .await?
        .into_iter()
        .collect();

    let mut missing: Vec<i32> = ids.iter().copied().filter(|id| !found.contains(id)).collect();
    missing.sort_unstable();
    missing.dedup();

    Ok(missing)
}

/// Collects violations for references to rows that do not exist.
#[derive(Default)]
pub(crate) struct ReferenceCheck {
    violations: Vec<FieldViolation>,
}

impl ReferenceCheck {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a violation on `field` if any id in `ids` is missing from `E`.
    pub async fn require<E, C>(
        &mut self,
        conn: &C,
        field: &str,
        id_column: E::Column,
        ids: &[i32],
    ) -> Result<(), DbErr>
    where
        E: EntityTrait,
        C: ConnectionTrait,
    {
        let missing = find_missing_ids::<E, C>(conn, id_column, ids).await?;
        if !missing.is_empty() {
            self.violations
                .push(FieldViolation::new(field, describe_missing(&missing)));
        }

        Ok(())
    }

    pub fn violation(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.violations.push(FieldViolation::new(field, message));
    }

    pub fn finish(self) -> Result<(), ValidationError> {
        if self.violations.is_empty() {
            Ok(())
        } else {
            Err(ValidationError {
                violations: self.violations,
            })
        }
    }
}

pub(crate) fn describe_missing(ids: &[i32]) -> String {
    match ids {
        [id] => format!("references unknown id {}", id),
        ids => format!(
            "references unknown ids [{}]",
            ids.iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        ),
    }
}
