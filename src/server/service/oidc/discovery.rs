use jsonwebtoken::jwk::JwkSet;
use serde::{de::DeserializeOwned, Deserialize};

use crate::server::error::auth::AuthError;

const DISCOVERY_PATH: &str = "/.well-known/openid-configuration";

/// The subset of the provider metadata document used by the server.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProviderMetadata {
    pub issuer: String,
    pub jwks_uri: String,
    pub authorization_endpoint: String,
    pub token_endpoint: String,
    /// Empty when the provider does not advertise any.
    #[serde(default)]
    pub id_token_signing_alg_values_supported: Vec<String>,
}

/// Fetches the provider metadata from `{issuer_url}/.well-known/openid-configuration`.
///
/// # Arguments
/// - `http` - HTTP client used for the request
/// - `issuer_url` - Configured issuer; must equal the `issuer` the provider reports
///
/// # Returns
/// - `Ok(ProviderMetadata)` - Metadata whose issuer matches the configured one
/// - `Err(AuthError::Discovery)` - Request failed or the document is malformed
/// - `Err(AuthError::IssuerMismatch)` - Provider reports a different issuer
pub async fn discover(
    http: &reqwest::Client,
    issuer_url: &str,
) -> Result<ProviderMetadata, AuthError> {
    let url = format!("{}{}", issuer_url.trim_end_matches('/'), DISCOVERY_PATH);
    let metadata: ProviderMetadata = fetch_json(http, &url).await?;

    if metadata.issuer != issuer_url {
        return Err(AuthError::IssuerMismatch {
            expected: issuer_url.to_string(),
            found: metadata.issuer,
        });
    }

    tracing::debug!(
        "Discovered OpenID provider {} with key set at {}",
        metadata.issuer,
        metadata.jwks_uri
    );

    Ok(metadata)
}

/// Fetches the provider's JSON Web Key Set.
pub async fn fetch_key_set(http: &reqwest::Client, jwks_uri: &str) -> Result<JwkSet, AuthError> {
    fetch_json(http, jwks_uri).await
}

async fn fetch_json<T: DeserializeOwned>(http: &reqwest::Client, url: &str) -> Result<T, AuthError> {
    let fetch = async {
        http.get(url)
            .send()
            .await?
            .error_for_status()?
            .json::<T>()
            .await
    };

    fetch.await.map_err(|source| AuthError::Discovery {
        url: url.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::service::oidc::testing::MockProvider;

    /// Tests discovering a provider whose issuer matches.
    ///
    /// Expected: Ok with the advertised endpoints
    #[tokio::test]
    async fn test_discover_provider() {
        let provider = MockProvider::start().await;

        let metadata = discover(&reqwest::Client::new(), &provider.issuer)
            .await
            .unwrap();

        assert_eq!(metadata.issuer, provider.issuer);
        assert_eq!(metadata.jwks_uri, format!("{}/jwks", provider.issuer));
        assert_eq!(metadata.id_token_signing_alg_values_supported, vec!["HS256"]);
    }

    /// Tests that a provider reporting another issuer is rejected.
    ///
    /// Expected: Err(IssuerMismatch)
    #[tokio::test]
    async fn test_discover_rejects_issuer_mismatch() {
        let provider =
            MockProvider::start_reporting_issuer("https://login.example.org".to_string()).await;

        let result = discover(&reqwest::Client::new(), &provider.issuer).await;

        assert!(matches!(
            result,
            Err(AuthError::IssuerMismatch { found, .. }) if found == "https://login.example.org"
        ));
    }

    /// Tests that an unreachable provider fails discovery.
    ///
    /// Expected: Err(Discovery)
    #[tokio::test]
    async fn test_discover_unreachable_provider() {
        let result = discover(&reqwest::Client::new(), "http://127.0.0.1:9").await;

        assert!(matches!(result, Err(AuthError::Discovery { .. })));
    }
}
