//! Error types and HTTP response handling.
//!
//! This module provides the application's error hierarchy and the conversion of errors into
//! HTTP responses. `AppError` is the top-level error returned by handlers and middleware; it
//! wraps the domain-specific errors, which map themselves to responses:
//!
//! - `StoreError` - classified persistence failures (404 / 422 / 500)
//! - `AuthError` - bearer token and OpenID provider failures (401 / 500)
//! - `ConfigError` - startup configuration failures

pub mod auth;
pub mod config;
pub mod store;
pub mod validation;

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::{
    model::api::ErrorDto,
    server::error::{auth::AuthError, config::ConfigError, store::StoreError},
};

/// Top-level application error type.
///
/// Most variants use `#[from]` for automatic conversion. Domain-specific errors handle their
/// own response mapping, while the generic variants provide standard HTTP status codes.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error during startup.
    #[error(transparent)]
    ConfigErr(#[from] ConfigError),

    /// Authentication error, delegated to `AuthError::into_response()`.
    #[error(transparent)]
    AuthErr(#[from] AuthError),

    /// Classified store error, delegated to `StoreError::into_response()`.
    #[error(transparent)]
    StoreErr(#[from] StoreError),

    /// Database error outside of a store operation (connecting, migrating).
    ///
    /// Results in 500 Internal Server Error with error details logged server-side.
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),

    /// I/O error while binding or serving the listener.
    #[error(transparent)]
    IoErr(#[from] std::io::Error),

    /// Malformed request: undecodable JSON body or unparsable path id.
    ///
    /// Results in 400 Bad Request with the provided error message.
    #[error("{0}")]
    BadRequest(String),

    /// Request body is not declared as `application/json`.
    ///
    /// Results in 415 Unsupported Media Type.
    #[error("{0}")]
    UnsupportedMediaType(String),

    /// Internal server error with custom message.
    ///
    /// The message is logged but a generic message is returned to the client.
    #[error("{0}")]
    InternalError(String),
}

/// Classifies axum's JSON extractor rejections.
///
/// A missing or wrong `Content-Type` becomes `UnsupportedMediaType`; every other rejection
/// (syntax errors, type mismatches, unreadable body) becomes `BadRequest`.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::MissingJsonContentType(err) => {
                AppError::UnsupportedMediaType(err.body_text())
            }
            err => AppError::BadRequest(err.body_text()),
        }
    }
}

/// Converts application errors into HTTP responses.
///
/// # Returns
/// - 400 Bad Request - For `BadRequest`
/// - 415 Unsupported Media Type - For `UnsupportedMediaType`
/// - Variable - For `AuthErr` and `StoreErr`, delegated to the wrapped error
/// - 500 Internal Server Error - For everything else
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            Self::AuthErr(err) => err.into_response(),
            Self::StoreErr(err) => err.into_response(),
            Self::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, Json(ErrorDto::new(msg))).into_response()
            }
            Self::UnsupportedMediaType(msg) => {
                (StatusCode::UNSUPPORTED_MEDIA_TYPE, Json(ErrorDto::new(msg))).into_response()
            }
            Self::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                InternalServerError("internal error").into_response()
            }
            err => InternalServerError(err).into_response(),
        }
    }
}

/// Wrapper type for converting any displayable error into a 500 Internal Server Error response.
///
/// Logs the error message and returns a generic "Internal server error" body so that
/// implementation details never reach the client.
pub struct InternalServerError<E>(pub E);

impl<E: std::fmt::Display> IntoResponse for InternalServerError<E> {
    fn into_response(self) -> Response {
        tracing::error!("{}", self.0);

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorDto::new("Internal server error")),
        )
            .into_response()
    }
}
