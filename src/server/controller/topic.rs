use axum::{
    extract::{rejection::JsonRejection, Path, State},
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::ErrorDto,
        topic::{TopicDto, SaveTopicDto},
    },
    server::{
        controller::crud, data::topic::TopicRepository, error::AppError, state::AppState,
    },
};

/// Tag for grouping topic endpoints in OpenAPI documentation
pub static TOPIC_TAG: &str = "topics";

/// List all topics, each with its direct children.
#[utoipa::path(
    get,
    path = "/topics",
    tag = TOPIC_TAG,
    responses(
        (status = 200, description = "All topics", body = Vec<TopicDto>),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn list_topics(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    crud::list(TopicRepository::new(&state.db)).await
}

/// Get a topic by id.
#[utoipa::path(
    get,
    path = "/topics/{id}",
    tag = TOPIC_TAG,
    params(
        ("id" = i32, Path, description = "Topic id")
    ),
    responses(
        (status = 200, description = "The topic", body = TopicDto),
        (status = 400, description = "Malformed id", body = ErrorDto),
        (status = 404, description = "Topic not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_topic(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    crud::get(TopicRepository::new(&state.db), &id).await
}

/// Create a topic, optionally below a parent topic.
#[utoipa::path(
    post,
    path = "/topics",
    tag = TOPIC_TAG,
    request_body = SaveTopicDto,
    responses(
        (status = 201, description = "Topic created", body = TopicDto),
        (status = 400, description = "Malformed JSON", body = ErrorDto),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorDto),
        (status = 415, description = "Body is not JSON", body = ErrorDto),
        (status = 422, description = "Validation failed", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn create_topic(
    State(state): State<AppState>,
    payload: Result<Json<SaveTopicDto>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(payload) = payload?;

    crud::create(TopicRepository::new(&state.db), payload.into()).await
}

/// Replace a topic.
///
/// # Returns
/// - `200 OK` - The updated topic
/// - `404 Not Found` - No topic with this id
/// - `422 Unprocessable Entity` - Empty name, unknown parent, or a parent that would create a cycle
#[utoipa::path(
    put,
    path = "/topics/{id}",
    tag = TOPIC_TAG,
    params(
        ("id" = i32, Path, description = "Topic id")
    ),
    request_body = SaveTopicDto,
    responses(
        (status = 200, description = "Topic updated", body = TopicDto),
        (status = 400, description = "Malformed id or JSON", body = ErrorDto),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorDto),
        (status = 404, description = "Topic not found", body = ErrorDto),
        (status = 415, description = "Body is not JSON", body = ErrorDto),
        (status = 422, description = "Validation failed", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn update_topic(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<SaveTopicDto>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(payload) = payload?;

    crud::update(TopicRepository::new(&state.db), &id, payload.into()).await
}

/// Delete a topic.
///
/// Child topics become root topics.
#[utoipa::path(
    delete,
    path = "/topics/{id}",
    tag = TOPIC_TAG,
    params(
        ("id" = i32, Path, description = "Topic id")
    ),
    responses(
        (status = 204, description = "Topic deleted"),
        (status = 400, description = "Malformed id", body = ErrorDto),
        (status = 404, description = "Topic not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_topic(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    crud::delete(TopicRepository::new(&state.db), &id).await
}
