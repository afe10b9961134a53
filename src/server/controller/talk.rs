use axum::{
    extract::{rejection::JsonRejection, Path, State},
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::ErrorDto,
        talk::{SaveTalkDto, TalkDto},
    },
    server::{
        controller::crud, data::talk::TalkRepository, error::AppError, model::IntoDto,
        state::AppState, util::parse::parse_id,
    },
};

/// Tag for grouping talk endpoints in OpenAPI documentation
pub static TALK_TAG: &str = "talks";

/// List all talks.
///
/// Each talk carries its speakers, topics and talk dates.
#[utoipa::path(
    get,
    path = "/talks",
    tag = TALK_TAG,
    responses(
        (status = 200, description = "All talks", body = Vec<TalkDto>),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn list_talks(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    crud::list(TalkRepository::new(&state.db)).await
}

/// Get a talk by id.
#[utoipa::path(
    get,
    path = "/talks/{id}",
    tag = TALK_TAG,
    params(
        ("id" = i32, Path, description = "Talk id")
    ),
    responses(
        (status = 200, description = "The talk", body = TalkDto),
        (status = 400, description = "Malformed id", body = ErrorDto),
        (status = 404, description = "Talk not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_talk(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    crud::get(TalkRepository::new(&state.db), &id).await
}

/// Create a talk together with its speakers, topics and talk dates.
///
/// # Returns
/// - `201 Created` - The stored talk with all relations loaded
/// - `422 Unprocessable Entity` - Invalid fields or unknown persons, topics, events or rooms
#[utoipa::path(
    post,
    path = "/talks",
    tag = TALK_TAG,
    request_body = SaveTalkDto,
    responses(
        (status = 201, description = "Talk created", body = TalkDto),
        (status = 400, description = "Malformed JSON", body = ErrorDto),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorDto),
        (status = 415, description = "Body is not JSON", body = ErrorDto),
        (status = 422, description = "Validation failed", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn create_talk(
    State(state): State<AppState>,
    payload: Result<Json<SaveTalkDto>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(payload) = payload?;

    crud::create(TalkRepository::new(&state.db), payload.into()).await
}

/// Replace a talk.
///
/// Speakers, topics and talk dates are replaced as a whole.
#[utoipa::path(
    put,
    path = "/talks/{id}",
    tag = TALK_TAG,
    params(
        ("id" = i32, Path, description = "Talk id")
    ),
    request_body = SaveTalkDto,
    responses(
        (status = 200, description = "Talk updated", body = TalkDto),
        (status = 400, description = "Malformed id or JSON", body = ErrorDto),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorDto),
        (status = 404, description = "Talk not found", body = ErrorDto),
        (status = 415, description = "Body is not JSON", body = ErrorDto),
        (status = 422, description = "Validation failed", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn update_talk(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<SaveTalkDto>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(payload) = payload?;

    crud::update(TalkRepository::new(&state.db), &id, payload.into()).await
}

/// Delete a talk together with its talk dates.
#[utoipa::path(
    delete,
    path = "/talks/{id}",
    tag = TALK_TAG,
    params(
        ("id" = i32, Path, description = "Talk id")
    ),
    responses(
        (status = 204, description = "Talk deleted"),
        (status = 400, description = "Malformed id", body = ErrorDto),
        (status = 404, description = "Talk not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_talk(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    crud::delete(TalkRepository::new(&state.db), &id).await
}

/// List the talks scheduled at an event.
///
/// An event without talks, or an id no event has, yields an empty list.
#[utoipa::path(
    get,
    path = "/events/{id}/talks",
    tag = TALK_TAG,
    params(
        ("id" = i32, Path, description = "Event id")
    ),
    responses(
        (status = 200, description = "Talks scheduled at the event", body = Vec<TalkDto>),
        (status = 400, description = "Malformed id", body = ErrorDto),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn list_talks_by_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let event_id = parse_id(&id)?;
    let talks = TalkRepository::new(&state.db)
        .get_by_event_id(event_id)
        .await?;

    Ok(Json(
        talks.into_iter().map(IntoDto::into_dto).collect::<Vec<_>>(),
    ))
}

/// List the talks a person speaks at.
#[utoipa::path(
    get,
    path = "/persons/{id}/talks",
    tag = TALK_TAG,
    params(
        ("id" = i32, Path, description = "Person id")
    ),
    responses(
        (status = 200, description = "Talks of the person", body = Vec<TalkDto>),
        (status = 400, description = "Malformed id", body = ErrorDto),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn list_talks_by_person(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let person_id = parse_id(&id)?;
    let talks = TalkRepository::new(&state.db)
        .get_by_person_id(person_id)
        .await?;

    Ok(Json(
        talks.into_iter().map(IntoDto::into_dto).collect::<Vec<_>>(),
    ))
}
