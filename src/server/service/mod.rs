//! Services wrapping external collaborators.
//!
//! - `oidc` - OpenID provider discovery and bearer token verification
//! - `auth` - OAuth2 login redirect built from the discovered provider endpoints

pub mod auth;
pub mod oidc;
