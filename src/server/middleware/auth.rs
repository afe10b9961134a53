use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::server::{
    error::{auth::AuthError, AppError},
    state::AppState,
};

/// Rejects requests without a valid bearer token.
///
/// On success the verified [`Claims`](crate::server::service::oidc::Claims) are inserted into
/// the request extensions and the request is forwarded unchanged.
///
/// # Returns
/// - `Ok(Response)` - Response of the wrapped handler
/// - `Err(AppError::AuthErr)` - Missing, malformed or unverifiable token (401)
pub async fn require_bearer(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = extract_bearer(req.headers())?;
    let claims = state.verifier.verify(token).await?;

    tracing::debug!("Authenticated request from subject {}", claims.sub);
    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}

/// Extracts the token from an `Authorization: Bearer <token>` header.
///
/// The scheme is matched case-insensitively.
pub fn extract_bearer(headers: &HeaderMap) -> Result<&str, AuthError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::MissingBearerToken)?
        .to_str()
        .map_err(|_| AuthError::MalformedAuthorizationHeader)?;

    let (scheme, token) = value
        .trim()
        .split_once(' ')
        .ok_or(AuthError::MalformedAuthorizationHeader)?;

    let token = token.trim();
    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return Err(AuthError::MalformedAuthorizationHeader);
    }

    Ok(token)
}
