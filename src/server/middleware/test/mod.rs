use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    middleware,
    routing::{get, post},
    Extension, Router,
};
use tower::ServiceExt;

use crate::server::{
    error::auth::AuthError,
    middleware::{
        auth::{extract_bearer, require_bearer},
        content_type::require_json,
    },
    service::oidc::{testing::MockProvider, Claims},
};
