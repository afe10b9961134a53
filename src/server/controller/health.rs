use axum::http::StatusCode;

/// Tag for grouping operational endpoints in OpenAPI documentation
pub static HEALTH_TAG: &str = "health";

/// Liveness probe.
#[utoipa::path(
    get,
    path = "/",
    tag = HEALTH_TAG,
    responses(
        (status = 204, description = "Server is running")
    ),
)]
pub async fn liveness() -> StatusCode {
    StatusCode::NO_CONTENT
}
