use std::{
    str::FromStr,
    time::{Duration, Instant},
};

use jsonwebtoken::{
    decode, decode_header,
    jwk::{Jwk, JwkSet},
    Algorithm, DecodingKey, Validation,
};
use tokio::sync::{Mutex, RwLock};

use crate::server::{
    error::auth::AuthError,
    service::oidc::{
        discovery::{self, ProviderMetadata},
        Claims,
    },
};

/// Minimum time between two key set refetches triggered by unknown key ids.
const MIN_REFRESH_INTERVAL: Duration = Duration::from_secs(30);

/// Verifies bearer tokens issued by the configured OpenID provider.
///
/// Holds the provider's signing keys behind a read/write lock. Keys are only written when a
/// token names a key id that is not cached, which is how provider key rotation is followed.
/// Such refetches happen at most once per [`MIN_REFRESH_INTERVAL`]; in between, unknown key
/// ids are rejected without contacting the provider.
pub struct OidcVerifier {
    http: reqwest::Client,
    issuer: String,
    client_id: String,
    jwks_uri: String,
    algorithms: Vec<Algorithm>,
    keys: RwLock<JwkSet>,
    /// Time of the last refetch. Held across the fetch so concurrent refreshes collapse.
    last_refresh: Mutex<Option<Instant>>,
    min_refresh_interval: Duration,
}

impl OidcVerifier {
    /// Discovers the provider and fetches its signing keys.
    ///
    /// # Arguments
    /// - `http` - HTTP client kept for key refreshes
    /// - `issuer_url` - Configured issuer
    /// - `client_id` - Expected `aud` of every token
    ///
    /// # Returns
    /// - `Ok((OidcVerifier, ProviderMetadata))` - Ready verifier and the discovered metadata
    /// - `Err(AuthError)` - Discovery or key retrieval failed
    pub async fn discover(
        http: reqwest::Client,
        issuer_url: &str,
        client_id: &str,
    ) -> Result<(Self, ProviderMetadata), AuthError> {
        let metadata = discovery::discover(&http, issuer_url).await?;
        let keys = discovery::fetch_key_set(&http, &metadata.jwks_uri).await?;

        tracing::info!(
            "Loaded {} signing key(s) from OpenID provider {}",
            keys.keys.len(),
            metadata.issuer
        );

        let verifier = Self::new(http, &metadata, client_id, keys);

        Ok((verifier, metadata))
    }

    pub fn new(
        http: reqwest::Client,
        metadata: &ProviderMetadata,
        client_id: &str,
        keys: JwkSet,
    ) -> Self {
        Self {
            http,
            issuer: metadata.issuer.clone(),
            client_id: client_id.to_string(),
            jwks_uri: metadata.jwks_uri.clone(),
            algorithms: accepted_algorithms(&metadata.id_token_signing_alg_values_supported),
            keys: RwLock::new(keys),
            last_refresh: Mutex::new(None),
            min_refresh_interval: MIN_REFRESH_INTERVAL,
        }
    }

    /// Verifies a token's signature, issuer, audience and expiry.
    ///
    /// # Returns
    /// - `Ok(Claims)` - Token is valid
    /// - `Err(AuthError)` - Token is rejected; the variant records why
    pub async fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let header = decode_header(token)?;
        if !self.algorithms.contains(&header.alg) {
            return Err(AuthError::UnsupportedAlgorithm(header.alg));
        }

        let mut candidates = self.candidate_keys(header.kid.as_deref()).await;
        if candidates.is_empty() {
            self.refresh_keys().await?;
            candidates = self.candidate_keys(header.kid.as_deref()).await;
        }
        if candidates.is_empty() {
            return Err(AuthError::UnknownSigningKey(header.kid));
        }

        let mut validation = Validation::new(header.alg);
        validation.set_issuer(&[&self.issuer]);
        validation.set_audience(&[&self.client_id]);
        validation.set_required_spec_claims(&["exp", "iss", "aud"]);

        let mut last_error = None;
        for jwk in candidates {
            let key = DecodingKey::from_jwk(&jwk)?;
            match decode::<Claims>(token, &key, &validation) {
                Ok(data) => return Ok(data.claims),
                Err(err) => last_error = Some(err),
            }
        }

        match last_error {
            Some(err) => Err(err.into()),
            None => Err(AuthError::UnknownSigningKey(header.kid)),
        }
    }

    /// Keys that may have signed a token: the key named by `kid`, or every key if the token
    /// names none.
    async fn candidate_keys(&self, kid: Option<&str>) -> Vec<Jwk> {
        let keys = self.keys.read().await;

        match kid {
            Some(kid) => keys.find(kid).cloned().into_iter().collect(),
            None => keys.keys.clone(),
        }
    }

    /// Refetches the key set unless that already happened within the minimum interval.
    async fn refresh_keys(&self) -> Result<(), AuthError> {
        let mut last_refresh = self.last_refresh.lock().await;
        if let Some(at) = *last_refresh {
            if at.elapsed() < self.min_refresh_interval {
                tracing::debug!("Skipping signing key refresh, last one {:?} ago", at.elapsed());
                return Ok(());
            }
        }
        *last_refresh = Some(Instant::now());

        tracing::debug!("Refreshing signing keys from {}", self.jwks_uri);

        let keys = discovery::fetch_key_set(&self.http, &self.jwks_uri)
            .await
            .map_err(|err| match err {
                AuthError::Discovery { source, .. } => AuthError::KeySetRefresh(source),
                other => other,
            })?;

        *self.keys.write().await = keys;

        Ok(())
    }
}

/// Parses the advertised signing algorithms, ignoring ones that cannot be verified.
///
/// Falls back to RS256 when the provider advertises nothing usable.
fn accepted_algorithms(advertised: &[String]) -> Vec<Algorithm> {
    let algorithms: Vec<Algorithm> = advertised
        .iter()
        .filter_map(|name| Algorithm::from_str(name).ok())
        .collect();

    if algorithms.is_empty() {
        vec![Algorithm::RS256]
    } else {
        algorithms
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::server::service::oidc::testing::{
        self, key_set, rotated_key, sign, MockProvider, CLIENT_ID, KEY_ID, ROTATED_KEY_ID,
        ROTATED_SECRET, SECRET,
    };

    /// Tests verifying a valid token.
    ///
    /// Expected: Ok with the token's claims
    #[tokio::test]
    async fn test_verify_valid_token() {
        let provider = MockProvider::start().await;
        let verifier = provider.verifier().await;

        let claims = verifier.verify(&provider.token()).await.unwrap();

        assert_eq!(claims.sub, "user-1");
        assert_eq!(claims.iss, provider.issuer);
        assert_eq!(claims.email.as_deref(), Some("ada@example.org"));
    }

    /// Tests that expired tokens are rejected.
    ///
    /// Expected: Err(InvalidToken)
    #[tokio::test]
    async fn test_reject_expired_token() {
        let provider = MockProvider::start().await;
        let verifier = provider.verifier().await;
        let mut claims = provider.claims();
        claims["exp"] = json!(jsonwebtoken::get_current_timestamp() - 3600);

        let result = verifier.verify(&sign(&claims, KEY_ID, SECRET)).await;

        assert!(matches!(result, Err(AuthError::InvalidToken(_))));
    }

    /// Tests that tokens for another audience or issuer are rejected.
    ///
    /// Expected: Err(InvalidToken) for both
    #[tokio::test]
    async fn test_reject_wrong_audience_and_issuer() {
        let provider = MockProvider::start().await;
        let verifier = provider.verifier().await;

        let mut wrong_audience = provider.claims();
        wrong_audience["aud"] = json!("another-client");
        let mut wrong_issuer = provider.claims();
        wrong_issuer["iss"] = json!("https://evil.example.org");

        for claims in [wrong_audience, wrong_issuer] {
            let result = verifier.verify(&sign(&claims, KEY_ID, SECRET)).await;
            assert!(matches!(result, Err(AuthError::InvalidToken(_))));
        }
    }

    /// Tests that a token signed with a different secret is rejected.
    ///
    /// Expected: Err(InvalidToken)
    #[tokio::test]
    async fn test_reject_bad_signature() {
        let provider = MockProvider::start().await;
        let verifier = provider.verifier().await;

        let token = sign(&provider.claims(), KEY_ID, b"not-the-provider-secret");
        let result = verifier.verify(&token).await;

        assert!(matches!(result, Err(AuthError::InvalidToken(_))));
    }

    /// Tests that garbage is rejected before any key lookup.
    ///
    /// Expected: Err(InvalidToken)
    #[tokio::test]
    async fn test_reject_malformed_token() {
        let provider = MockProvider::start().await;
        let verifier = provider.verifier().await;

        let result = verifier.verify("definitely.not.a-jwt").await;

        assert!(matches!(result, Err(AuthError::InvalidToken(_))));
    }

    /// Tests following a provider key rotation.
    ///
    /// Verifies that a token signed with a key published after startup is accepted once the
    /// verifier refreshes its cached key set.
    ///
    /// Expected: Ok after refresh
    #[tokio::test]
    async fn test_refresh_keys_on_unknown_kid() {
        let provider = MockProvider::start().await;
        let verifier = provider.verifier().await;
        provider.publish(key_set(vec![testing::initial_key(), rotated_key()]));

        let token = sign(&provider.claims(), ROTATED_KEY_ID, ROTATED_SECRET);
        let claims = verifier.verify(&token).await.unwrap();

        assert_eq!(claims.sub, "user-1");
    }

    /// Tests a key id the provider never publishes.
    ///
    /// Expected: Err(UnknownSigningKey) after one refresh
    #[tokio::test]
    async fn test_reject_unknown_kid() {
        let provider = MockProvider::start().await;
        let verifier = provider.verifier().await;

        let token = sign(&provider.claims(), "retired-key", SECRET);
        let result = verifier.verify(&token).await;

        assert!(matches!(
            result,
            Err(AuthError::UnknownSigningKey(Some(kid))) if kid == "retired-key"
        ));
    }

    /// Tests that tokens with unknown key ids cannot force repeated key set fetches.
    ///
    /// Expected: 50 tokens with distinct unknown key ids cause a single refetch
    #[tokio::test]
    async fn test_unknown_kids_refetch_at_most_once() {
        let provider = MockProvider::start().await;
        let verifier = provider.verifier().await;
        let after_discovery = provider.key_requests();

        for i in 0..50 {
            let token = sign(&provider.claims(), &format!("unknown-{}", i), SECRET);
            let result = verifier.verify(&token).await;
            assert!(matches!(result, Err(AuthError::UnknownSigningKey(_))));
        }

        assert_eq!(provider.key_requests(), after_discovery + 1);
    }

    /// Tests that a rotated key is picked up once the refresh interval has passed.
    ///
    /// Expected: rejected while a recent refresh is in effect, accepted afterwards
    #[tokio::test]
    async fn test_refresh_allowed_after_interval() {
        let provider = MockProvider::start().await;
        let mut verifier = provider.verifier().await;

        let stale = sign(&provider.claims(), "unknown", SECRET);
        assert!(verifier.verify(&stale).await.is_err());

        provider.publish(key_set(vec![testing::initial_key(), rotated_key()]));
        let rotated = sign(&provider.claims(), ROTATED_KEY_ID, ROTATED_SECRET);
        assert!(matches!(
            verifier.verify(&rotated).await,
            Err(AuthError::UnknownSigningKey(_))
        ));

        verifier.min_refresh_interval = Duration::ZERO;
        let claims = verifier.verify(&rotated).await.unwrap();

        assert_eq!(claims.sub, "user-1");
    }

    /// Tests that algorithms the provider does not advertise are refused.
    ///
    /// Expected: Err(UnsupportedAlgorithm) for an HS384 token against an HS256 provider
    #[tokio::test]
    async fn test_reject_unadvertised_algorithm() {
        let metadata = testing::offline_metadata("https://login.example.org");
        let verifier = OidcVerifier::new(
            reqwest::Client::new(),
            &metadata,
            CLIENT_ID,
            key_set(vec![testing::initial_key()]),
        );

        let mut header = jsonwebtoken::Header::new(Algorithm::HS384);
        header.kid = Some(KEY_ID.to_string());
        let token = jsonwebtoken::encode(
            &header,
            &json!({ "sub": "user-1" }),
            &jsonwebtoken::EncodingKey::from_secret(SECRET),
        )
        .unwrap();

        let result = verifier.verify(&token).await;

        assert!(matches!(
            result,
            Err(AuthError::UnsupportedAlgorithm(Algorithm::HS384))
        ));
    }

    /// Tests the default algorithm when none is advertised.
    ///
    /// Expected: RS256 only; unknown names are ignored
    #[test]
    fn test_accepted_algorithms() {
        assert_eq!(accepted_algorithms(&[]), vec![Algorithm::RS256]);
        assert_eq!(
            accepted_algorithms(&["none".to_string(), "ES256".to_string()]),
            vec![Algorithm::ES256]
        );
    }
}
