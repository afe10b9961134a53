use axum::{http::StatusCode, Json};

use crate::server::{
    data::Store,
    error::AppError,
    model::IntoDto,
    util::parse::parse_id,
};

type Dto<S> = <<S as Store>::Record as IntoDto>::Dto;

/// Lists every record.
///
/// # Returns
/// - `200 OK` - JSON array in ascending id order
pub async fn list<S: Store>(store: S) -> Result<Json<Vec<Dto<S>>>, AppError> {
    let records = store.get_all().await?;

    Ok(Json(records.into_iter().map(IntoDto::into_dto).collect()))
}

/// Fetches one record by its raw path id.
///
/// # Returns
/// - `200 OK` - The record
/// - `400 Bad Request` - Id is not a positive integer
/// - `404 Not Found` - No record with this id
pub async fn get<S: Store>(store: S, raw_id: &str) -> Result<Json<Dto<S>>, AppError> {
    let id = parse_id(raw_id)?;
    let record = store.get_by_id(id).await?;

    Ok(Json(record.into_dto()))
}

/// Creates a record.
///
/// # Returns
/// - `201 Created` - The stored record, including its new id
/// - `422 Unprocessable Entity` - Validation failed
pub async fn create<S: Store>(
    store: S,
    params: S::Params,
) -> Result<(StatusCode, Json<Dto<S>>), AppError> {
    let record = store.create(params).await?;

    Ok((StatusCode::CREATED, Json(record.into_dto())))
}

/// Replaces a record.
///
/// # Returns
/// - `200 OK` - The stored record
/// - `400 Bad Request` - Id is not a positive integer
/// - `404 Not Found` - No record with this id
/// - `422 Unprocessable Entity` - Validation failed
pub async fn update<S: Store>(
    store: S,
    raw_id: &str,
    params: S::Params,
) -> Result<Json<Dto<S>>, AppError> {
    let id = parse_id(raw_id)?;
    let record = store.update(id, params).await?;

    Ok(Json(record.into_dto()))
}

/// Deletes a record.
///
/// # Returns
/// - `204 No Content` - Record deleted
/// - `400 Bad Request` - Id is not a positive integer
/// - `404 Not Found` - No record with this id
pub async fn delete<S: Store>(store: S, raw_id: &str) -> Result<StatusCode, AppError> {
    let id = parse_id(raw_id)?;
    store.delete(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
