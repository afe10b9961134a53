//! Application state shared across all request handlers.
//!
//! `AppState` is built once in `main` after every dependency has been initialized and is
//! then cloned for each request through Axum's state extraction. No module keeps its own
//! global: the database pool, token verifier and OAuth2 client all travel through here.

use std::sync::Arc;

use oauth2::basic::{BasicErrorResponseType, BasicTokenType};
use oauth2::{
    Client, EmptyExtraTokenFields, EndpointNotSet, EndpointSet, RevocationErrorResponseType,
    StandardErrorResponse, StandardRevocableToken, StandardTokenIntrospectionResponse,
    StandardTokenResponse,
};
use sea_orm::DatabaseConnection;

use crate::server::service::oidc::verifier::OidcVerifier;

/// Type alias for the OAuth2 client configured with the provider's authorization and token
/// endpoints.
pub(crate) type OAuth2Client = Client<
    StandardErrorResponse<BasicErrorResponseType>,
    StandardTokenResponse<EmptyExtraTokenFields, BasicTokenType>,
    StandardTokenIntrospectionResponse<EmptyExtraTokenFields, BasicTokenType>,
    StandardRevocableToken,
    StandardErrorResponse<RevocationErrorResponseType>,
    EndpointSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointSet,
>;

/// Application state containing shared resources and dependencies.
///
/// All fields are cheap to clone:
/// - `DatabaseConnection` is a connection pool (clones share the pool)
/// - `Arc<OidcVerifier>` shares one key cache between all requests
/// - `OAuth2Client` is designed to be cloned
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool for accessing persistent storage.
    pub db: DatabaseConnection,

    /// Bearer token verifier for the configured OpenID provider.
    pub verifier: Arc<OidcVerifier>,

    /// OAuth2 client used to build the login redirect.
    pub oauth_client: OAuth2Client,
}

impl AppState {
    pub fn new(db: DatabaseConnection, verifier: OidcVerifier, oauth_client: OAuth2Client) -> Self {
        Self {
            db,
            verifier: Arc::new(verifier),
            oauth_client,
        }
    }
}
