use axum::{extract::Request, http::header, middleware::Next, response::Response};

use crate::server::error::AppError;

/// Rejects requests whose `Content-Type` is not `application/json` with 415.
///
/// Media type parameters such as `charset` are ignored.
pub async fn require_json(req: Request, next: Next) -> Result<Response, AppError> {
    let is_json = req
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .is_some_and(|mime| mime.trim().eq_ignore_ascii_case("application/json"));

    if !is_json {
        return Err(AppError::UnsupportedMediaType(
            "Expected request with `Content-Type: application/json`".to_string(),
        ));
    }

    Ok(next.run(req).await)
}
