use oauth2::{CsrfToken, Scope};
use url::Url;

use crate::server::state::OAuth2Client;

/// Scopes requested on login.
const LOGIN_SCOPES: &[&str] = &["openid", "profile", "email"];

/// Service for the OAuth2 authorization code login flow.
///
/// Only the redirect to the provider is served; the provider redirects back to the
/// configured callback, which merely acknowledges the request.
pub struct AuthService<'a> {
    /// OAuth2 client built from the discovered provider endpoints.
    pub oauth_client: &'a OAuth2Client,
}

impl<'a> AuthService<'a> {
    pub fn new(oauth_client: &'a OAuth2Client) -> Self {
        Self { oauth_client }
    }

    /// Generates the provider login URL.
    ///
    /// # Returns
    /// - `(Url, CsrfToken)` - Authorization URL requesting the `openid profile email` scopes
    ///   and the CSRF state embedded in it
    pub fn login_url(&self) -> (Url, CsrfToken) {
        self.oauth_client
            .authorize_url(CsrfToken::new_random)
            .add_scopes(
                LOGIN_SCOPES
                    .iter()
                    .map(|scope| Scope::new(scope.to_string())),
            )
            .url()
    }
}
