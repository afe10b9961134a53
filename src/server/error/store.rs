use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

use crate::{
    model::api::ErrorDto,
    server::error::{validation::ValidationError, InternalServerError},
};

/// Errors returned by every store operation.
///
/// Storage failures are classified once, here, so handlers match on the variant instead of
/// inspecting database error text.
#[derive(Error, Debug)]
pub enum StoreError {
    /// No row with the requested id exists.
    ///
    /// Results in 404 Not Found.
    #[error("{entity} with id {id} not found")]
    NotFound {
        /// Entity kind, e.g. `Talk`.
        entity: &'static str,
        id: i32,
        #[source]
        source: DbErr,
    },

    /// Input violates one or more field constraints or references missing rows.
    ///
    /// Results in 422 Unprocessable Entity listing every violation.
    #[error(transparent)]
    ValidationFailed(#[from] ValidationError),

    /// Any other storage failure.
    ///
    /// Results in 500 Internal Server Error; the cause is only logged.
    #[error(transparent)]
    Unexpected(DbErr),
}

impl StoreError {
    pub fn not_found(entity: &'static str, id: i32) -> Self {
        Self::NotFound {
            entity,
            id,
            source: DbErr::RecordNotFound(format!("{} with id {} not found", entity, id)),
        }
    }
}

/// Classifies a database error at the store boundary.
///
/// Foreign-key violations mean the input referenced a row that does not exist (or stopped
/// existing between the reference check and the write) and are reported as validation
/// failures. Everything else is unexpected.
impl From<DbErr> for StoreError {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::ForeignKeyConstraintViolation(_)) => StoreError::ValidationFailed(
                ValidationError::single("references", "references a row that does not exist"),
            ),
            _ => StoreError::Unexpected(err),
        }
    }
}

impl IntoResponse for StoreError {
    fn into_response(self) -> Response {
        match self {
            Self::NotFound { entity, id, .. } => {
                tracing::debug!("{} {} not found", entity, id);
                (
                    StatusCode::NOT_FOUND,
                    Json(ErrorDto::new(format!("{} not found", entity))),
                )
                    .into_response()
            }
            Self::ValidationFailed(err) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ErrorDto {
                    error: "Validation failed".to_string(),
                    violations: err
                        .violations
                        .into_iter()
                        .map(|v| v.into_dto())
                        .collect(),
                }),
            )
                .into_response(),
            Self::Unexpected(err) => InternalServerError(err).into_response(),
        }
    }
}
