use axum::{
    extract::{rejection::JsonRejection, Path, State},
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::ErrorDto,
        location::{LocationDto, SaveLocationDto},
    },
    server::{
        controller::crud, data::location::LocationRepository, error::AppError, state::AppState,
    },
};

/// Tag for grouping location endpoints in OpenAPI documentation
pub static LOCATION_TAG: &str = "locations";

/// List all locations.
///
/// # Returns
/// - `200 OK` - All locations ordered by id
/// - `401 Unauthorized` - Missing or invalid bearer token
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    get,
    path = "/locations",
    tag = LOCATION_TAG,
    responses(
        (status = 200, description = "All locations", body = Vec<LocationDto>),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn list_locations(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    crud::list(LocationRepository::new(&state.db)).await
}

/// Get a location by id.
///
/// # Arguments
/// - `state` - Application state containing the database connection
/// - `id` - Raw location id from the path
///
/// # Returns
/// - `200 OK` - The location
/// - `400 Bad Request` - Id is not a positive integer
/// - `404 Not Found` - No location with this id
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    get,
    path = "/locations/{id}",
    tag = LOCATION_TAG,
    params(
        ("id" = i32, Path, description = "Location id")
    ),
    responses(
        (status = 200, description = "The location", body = LocationDto),
        (status = 400, description = "Malformed id", body = ErrorDto),
        (status = 404, description = "Location not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_location(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    crud::get(LocationRepository::new(&state.db), &id).await
}

/// Create a location.
///
/// # Arguments
/// - `state` - Application state containing the database connection
/// - `payload` - Name and coordinates of the new location
///
/// # Returns
/// - `201 Created` - The stored location with its new id
/// - `400 Bad Request` - Body is not valid JSON
/// - `401 Unauthorized` - Missing or invalid bearer token
/// - `415 Unsupported Media Type` - Body is not declared as JSON
/// - `422 Unprocessable Entity` - Empty name or coordinates out of range
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    post,
    path = "/locations",
    tag = LOCATION_TAG,
    request_body = SaveLocationDto,
    responses(
        (status = 201, description = "Location created", body = LocationDto),
        (status = 400, description = "Malformed JSON", body = ErrorDto),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorDto),
        (status = 415, description = "Body is not JSON", body = ErrorDto),
        (status = 422, description = "Validation failed", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn create_location(
    State(state): State<AppState>,
    payload: Result<Json<SaveLocationDto>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(payload) = payload?;

    crud::create(LocationRepository::new(&state.db), payload.into()).await
}

/// Replace a location.
///
/// # Returns
/// - `200 OK` - The updated location
/// - `400 Bad Request` - Malformed id or JSON
/// - `401 Unauthorized` - Missing or invalid bearer token
/// - `404 Not Found` - No location with this id
/// - `415 Unsupported Media Type` - Body is not declared as JSON
/// - `422 Unprocessable Entity` - Validation failed
#[utoipa::path(
    put,
    path = "/locations/{id}",
    tag = LOCATION_TAG,
    params(
        ("id" = i32, Path, description = "Location id")
    ),
    request_body = SaveLocationDto,
    responses(
        (status = 200, description = "Location updated", body = LocationDto),
        (status = 400, description = "Malformed id or JSON", body = ErrorDto),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorDto),
        (status = 404, description = "Location not found", body = ErrorDto),
        (status = 415, description = "Body is not JSON", body = ErrorDto),
        (status = 422, description = "Validation failed", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn update_location(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<SaveLocationDto>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(payload) = payload?;

    crud::update(LocationRepository::new(&state.db), &id, payload.into()).await
}

/// Delete a location.
///
/// Rooms at the location are deleted with it; events held there keep existing without a
/// location.
///
/// # Returns
/// - `204 No Content` - Location deleted
/// - `400 Bad Request` - Malformed id
/// - `404 Not Found` - No location with this id
#[utoipa::path(
    delete,
    path = "/locations/{id}",
    tag = LOCATION_TAG,
    params(
        ("id" = i32, Path, description = "Location id")
    ),
    responses(
        (status = 204, description = "Location deleted"),
        (status = 400, description = "Malformed id", body = ErrorDto),
        (status = 404, description = "Location not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_location(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    crud::delete(LocationRepository::new(&state.db), &id).await
}
