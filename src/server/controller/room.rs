use axum::{
    extract::{rejection::JsonRejection, Path, State},
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::ErrorDto,
        room::{RoomDto, SaveRoomDto},
    },
    server::{
        controller::crud, data::room::RoomRepository, error::AppError, state::AppState,
    },
};

/// Tag for grouping room endpoints in OpenAPI documentation
pub static ROOM_TAG: &str = "rooms";

/// List all rooms.
#[utoipa::path(
    get,
    path = "/rooms",
    tag = ROOM_TAG,
    responses(
        (status = 200, description = "All rooms", body = Vec<RoomDto>),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn list_rooms(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    crud::list(RoomRepository::new(&state.db)).await
}

/// Get a room by id.
#[utoipa::path(
    get,
    path = "/rooms/{id}",
    tag = ROOM_TAG,
    params(
        ("id" = i32, Path, description = "Room id")
    ),
    responses(
        (status = 200, description = "The room", body = RoomDto),
        (status = 400, description = "Malformed id", body = ErrorDto),
        (status = 404, description = "Room not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_room(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    crud::get(RoomRepository::new(&state.db), &id).await
}

/// Create a room at an existing location.
#[utoipa::path(
    post,
    path = "/rooms",
    tag = ROOM_TAG,
    request_body = SaveRoomDto,
    responses(
        (status = 201, description = "Room created", body = RoomDto),
        (status = 400, description = "Malformed JSON", body = ErrorDto),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorDto),
        (status = 415, description = "Body is not JSON", body = ErrorDto),
        (status = 422, description = "Validation failed", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn create_room(
    State(state): State<AppState>,
    payload: Result<Json<SaveRoomDto>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(payload) = payload?;

    crud::create(RoomRepository::new(&state.db), payload.into()).await
}

/// Replace a room.
#[utoipa::path(
    put,
    path = "/rooms/{id}",
    tag = ROOM_TAG,
    params(
        ("id" = i32, Path, description = "Room id")
    ),
    request_body = SaveRoomDto,
    responses(
        (status = 200, description = "Room updated", body = RoomDto),
        (status = 400, description = "Malformed id or JSON", body = ErrorDto),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorDto),
        (status = 404, description = "Room not found", body = ErrorDto),
        (status = 415, description = "Body is not JSON", body = ErrorDto),
        (status = 422, description = "Validation failed", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn update_room(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<SaveRoomDto>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(payload) = payload?;

    crud::update(RoomRepository::new(&state.db), &id, payload.into()).await
}

/// Delete a room together with the talk dates scheduled in it.
#[utoipa::path(
    delete,
    path = "/rooms/{id}",
    tag = ROOM_TAG,
    params(
        ("id" = i32, Path, description = "Room id")
    ),
    responses(
        (status = 204, description = "Room deleted"),
        (status = 400, description = "Malformed id", body = ErrorDto),
        (status = 404, description = "Room not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_room(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    crud::delete(RoomRepository::new(&state.db), &id).await
}
