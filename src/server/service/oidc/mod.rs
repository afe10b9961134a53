//! OpenID Connect support.
//!
//! At startup the provider's metadata document and signing keys are fetched once
//! ([`discovery`]). The resulting [`verifier::OidcVerifier`] then checks bearer tokens on every
//! protected request, refreshing the cached keys when a token names an unknown key id.

pub mod discovery;
pub mod verifier;

#[cfg(test)]
pub mod testing;

use serde::{Deserialize, Serialize};

/// Verified identity claims of a bearer token.
///
/// Inserted into request extensions by the auth middleware.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub iss: String,
    pub sub: String,
    pub exp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_username: Option<String>,
}
