use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::{model::api::ErrorDto, server::error::InternalServerError};

#[derive(Error, Debug)]
pub enum AuthError {
    /// Request carries no `Authorization` header.
    #[error("Missing Authorization header")]
    MissingBearerToken,

    /// `Authorization` header is present but is not of the form `Bearer <token>`.
    #[error("Authorization header is not a bearer token")]
    MalformedAuthorizationHeader,

    /// Token failed to decode or its signature, issuer, audience or expiry did not verify.
    #[error("Token verification failed: {0}")]
    InvalidToken(#[from] jsonwebtoken::errors::Error),

    /// Token header names a key id that is absent from the provider's key set, even after
    /// refreshing it.
    #[error("No signing key matches key id {0:?}")]
    UnknownSigningKey(Option<String>),

    /// Token is signed with an algorithm the provider does not advertise.
    #[error("Signing algorithm {0:?} is not accepted")]
    UnsupportedAlgorithm(jsonwebtoken::Algorithm),

    /// Re-fetching the provider's key set while verifying a request failed.
    #[error("Failed to refresh provider signing keys: {0}")]
    KeySetRefresh(#[source] reqwest::Error),

    /// Fetching provider metadata or signing keys during discovery failed.
    #[error("Failed to fetch OpenID provider document from {url}: {source}")]
    Discovery {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The discovered issuer differs from the configured one.
    #[error("Provider issuer '{found}' does not match configured issuer '{expected}'")]
    IssuerMismatch { expected: String, found: String },

    /// A discovered or configured endpoint is not a valid URL.
    #[error("Invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

/// Converts authentication errors into HTTP responses.
///
/// Every failure to authenticate a request yields the same 401 body; the actual cause is only
/// logged so that clients learn nothing about which check failed. Provider discovery failures
/// only occur at startup and map to 500.
///
/// # Returns
/// - 401 Unauthorized - For missing, malformed, or unverifiable tokens
/// - 500 Internal Server Error - For discovery failures
impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match self {
            Self::Discovery { .. } | Self::IssuerMismatch { .. } | Self::InvalidUrl { .. } => {
                InternalServerError(self).into_response()
            }
            err => {
                tracing::warn!("Rejected request: {}", err);

                (
                    StatusCode::UNAUTHORIZED,
                    [(header::WWW_AUTHENTICATE, "Bearer")],
                    Json(ErrorDto::new("Unauthorized")),
                )
                    .into_response()
            }
        }
    }
}
