use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect},
};

use crate::server::{service::auth::AuthService, state::AppState};

/// Tag for grouping login endpoints in OpenAPI documentation
pub static AUTH_TAG: &str = "auth";

/// Redirects to the OpenID provider's login page.
#[utoipa::path(
    get,
    path = "/auth/login",
    tag = AUTH_TAG,
    responses(
        (status = 307, description = "Redirect to the provider's authorization endpoint")
    ),
)]
pub async fn login(State(state): State<AppState>) -> impl IntoResponse {
    let (url, _csrf_token) = AuthService::new(&state.oauth_client).login_url();

    Redirect::temporary(url.as_str())
}

/// Landing point of the provider redirect after login.
///
/// Acknowledges the redirect without exchanging the authorization code; clients obtain their
/// bearer tokens from the provider directly.
#[utoipa::path(
    get,
    path = "/demo/callback",
    tag = AUTH_TAG,
    responses(
        (status = 204, description = "Redirect acknowledged")
    ),
)]
pub async fn callback() -> StatusCode {
    StatusCode::NO_CONTENT
}
