use axum::{
    extract::{rejection::JsonRejection, Path, State},
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::ErrorDto,
        person::{PersonDto, SavePersonDto},
    },
    server::{
        controller::crud, data::person::PersonRepository, error::AppError, state::AppState,
    },
};

/// Tag for grouping person endpoints in OpenAPI documentation
pub static PERSON_TAG: &str = "persons";

/// List all persons with their organizations.
#[utoipa::path(
    get,
    path = "/persons",
    tag = PERSON_TAG,
    responses(
        (status = 200, description = "All persons", body = Vec<PersonDto>),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn list_persons(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    crud::list(PersonRepository::new(&state.db)).await
}

/// Get a person by id.
#[utoipa::path(
    get,
    path = "/persons/{id}",
    tag = PERSON_TAG,
    params(
        ("id" = i32, Path, description = "Person id")
    ),
    responses(
        (status = 200, description = "The person", body = PersonDto),
        (status = 400, description = "Malformed id", body = ErrorDto),
        (status = 404, description = "Person not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_person(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    crud::get(PersonRepository::new(&state.db), &id).await
}

/// Create a person.
///
/// # Returns
/// - `201 Created` - The stored person with its organization loaded
/// - `422 Unprocessable Entity` - Empty name, malformed e-mail or unknown organization
#[utoipa::path(
    post,
    path = "/persons",
    tag = PERSON_TAG,
    request_body = SavePersonDto,
    responses(
        (status = 201, description = "Person created", body = PersonDto),
        (status = 400, description = "Malformed JSON", body = ErrorDto),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorDto),
        (status = 415, description = "Body is not JSON", body = ErrorDto),
        (status = 422, description = "Validation failed", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn create_person(
    State(state): State<AppState>,
    payload: Result<Json<SavePersonDto>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(payload) = payload?;

    crud::create(PersonRepository::new(&state.db), payload.into()).await
}

/// Replace a person.
///
/// Omitting `organizationId` removes the person from their organization.
#[utoipa::path(
    put,
    path = "/persons/{id}",
    tag = PERSON_TAG,
    params(
        ("id" = i32, Path, description = "Person id")
    ),
    request_body = SavePersonDto,
    responses(
        (status = 200, description = "Person updated", body = PersonDto),
        (status = 400, description = "Malformed id or JSON", body = ErrorDto),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorDto),
        (status = 404, description = "Person not found", body = ErrorDto),
        (status = 415, description = "Body is not JSON", body = ErrorDto),
        (status = 422, description = "Validation failed", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn update_person(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<SavePersonDto>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(payload) = payload?;

    crud::update(PersonRepository::new(&state.db), &id, payload.into()).await
}

/// Delete a person and unlink them from their talks.
#[utoipa::path(
    delete,
    path = "/persons/{id}",
    tag = PERSON_TAG,
    params(
        ("id" = i32, Path, description = "Person id")
    ),
    responses(
        (status = 204, description = "Person deleted"),
        (status = 400, description = "Malformed id", body = ErrorDto),
        (status = 404, description = "Person not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_person(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    crud::delete(PersonRepository::new(&state.db), &id).await
}
