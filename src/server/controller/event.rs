use axum::{
    extract::{rejection::JsonRejection, Path, State},
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::ErrorDto,
        event::{EventDto, SaveEventDto},
    },
    server::{
        controller::crud, data::event::EventRepository, error::AppError, state::AppState,
    },
};

/// Tag for grouping event endpoints in OpenAPI documentation
pub static EVENT_TAG: &str = "events";

/// List all events with their locations.
#[utoipa::path(
    get,
    path = "/events",
    tag = EVENT_TAG,
    responses(
        (status = 200, description = "All events", body = Vec<EventDto>),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn list_events(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    crud::list(EventRepository::new(&state.db)).await
}

/// Get an event by id.
#[utoipa::path(
    get,
    path = "/events/{id}",
    tag = EVENT_TAG,
    params(
        ("id" = i32, Path, description = "Event id")
    ),
    responses(
        (status = 200, description = "The event", body = EventDto),
        (status = 400, description = "Malformed id", body = ErrorDto),
        (status = 404, description = "Event not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    crud::get(EventRepository::new(&state.db), &id).await
}

/// Create an event.
///
/// # Returns
/// - `201 Created` - The stored event with its location loaded
/// - `422 Unprocessable Entity` - Missing dates, end before start, or unknown location
#[utoipa::path(
    post,
    path = "/events",
    tag = EVENT_TAG,
    request_body = SaveEventDto,
    responses(
        (status = 201, description = "Event created", body = EventDto),
        (status = 400, description = "Malformed JSON", body = ErrorDto),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorDto),
        (status = 415, description = "Body is not JSON", body = ErrorDto),
        (status = 422, description = "Validation failed", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn create_event(
    State(state): State<AppState>,
    payload: Result<Json<SaveEventDto>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(payload) = payload?;

    crud::create(EventRepository::new(&state.db), payload.into()).await
}

/// Replace an event.
#[utoipa::path(
    put,
    path = "/events/{id}",
    tag = EVENT_TAG,
    params(
        ("id" = i32, Path, description = "Event id")
    ),
    request_body = SaveEventDto,
    responses(
        (status = 200, description = "Event updated", body = EventDto),
        (status = 400, description = "Malformed id or JSON", body = ErrorDto),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorDto),
        (status = 404, description = "Event not found", body = ErrorDto),
        (status = 415, description = "Body is not JSON", body = ErrorDto),
        (status = 422, description = "Validation failed", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn update_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<SaveEventDto>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(payload) = payload?;

    crud::update(EventRepository::new(&state.db), &id, payload.into()).await
}

/// Delete an event together with the talk dates scheduled at it.
#[utoipa::path(
    delete,
    path = "/events/{id}",
    tag = EVENT_TAG,
    params(
        ("id" = i32, Path, description = "Event id")
    ),
    responses(
        (status = 204, description = "Event deleted"),
        (status = 400, description = "Malformed id", body = ErrorDto),
        (status = 404, description = "Event not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    crud::delete(EventRepository::new(&state.db), &id).await
}
