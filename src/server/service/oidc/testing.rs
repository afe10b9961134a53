//! In-process OpenID provider for tests.
//!
//! Serves a discovery document and a key set of symmetric (`oct`) keys from a local axum
//! listener, and signs HS256 tokens with the same secrets.

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, RwLock,
};

use axum::{extract::State, routing::get, Json, Router};
use jsonwebtoken::{
    encode,
    jwk::{Jwk, JwkSet},
    Algorithm, EncodingKey, Header,
};
use serde_json::{json, Value};
use tokio::task::JoinHandle;

use crate::server::{
    config::Config,
    service::oidc::{discovery::ProviderMetadata, verifier::OidcVerifier},
    startup::setup_oauth_client,
    state::AppState,
};

pub const CLIENT_ID: &str = "pac-backend";

pub const KEY_ID: &str = "signing-key-1";
pub const SECRET: &[u8] = b"pac-backend-test-signing-secret-0123456789";
const SECRET_B64: &str = "cGFjLWJhY2tlbmQtdGVzdC1zaWduaW5nLXNlY3JldC0wMTIzNDU2Nzg5";

pub const ROTATED_KEY_ID: &str = "signing-key-2";
pub const ROTATED_SECRET: &[u8] = b"rotated-signing-secret-for-pac-backend-tests";
const ROTATED_SECRET_B64: &str = "cm90YXRlZC1zaWduaW5nLXNlY3JldC1mb3ItcGFjLWJhY2tlbmQtdGVzdHM";

#[derive(Clone)]
struct ProviderState {
    metadata: Value,
    keys: Arc<RwLock<JwkSet>>,
    key_requests: Arc<AtomicUsize>,
}

/// A running mock provider. The listener task stops when the provider is dropped.
pub struct MockProvider {
    pub issuer: String,
    keys: Arc<RwLock<JwkSet>>,
    key_requests: Arc<AtomicUsize>,
    task: JoinHandle<()>,
}

impl MockProvider {
    /// Starts a provider publishing the initial signing key.
    pub async fn start() -> Self {
        Self::spawn(None).await
    }

    /// Starts a provider whose discovery document reports `issuer` instead of its own URL.
    pub async fn start_reporting_issuer(issuer: String) -> Self {
        Self::spawn(Some(issuer)).await
    }

    async fn spawn(reported_issuer: Option<String>) -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let issuer = format!("http://{}", listener.local_addr().unwrap());
        let keys = Arc::new(RwLock::new(key_set(vec![initial_key()])));
        let key_requests = Arc::new(AtomicUsize::new(0));

        let state = ProviderState {
            metadata: json!({
                "issuer": reported_issuer.unwrap_or_else(|| issuer.clone()),
                "jwks_uri": format!("{}/jwks", issuer),
                "authorization_endpoint": format!("{}/authorize", issuer),
                "token_endpoint": format!("{}/token", issuer),
                "id_token_signing_alg_values_supported": ["HS256"],
            }),
            keys: keys.clone(),
            key_requests: key_requests.clone(),
        };

        let router = Router::new()
            .route("/.well-known/openid-configuration", get(serve_metadata))
            .route("/jwks", get(serve_keys))
            .with_state(state);

        let task = tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        Self {
            issuer,
            keys,
            key_requests,
            task,
        }
    }

    /// Replaces the published key set.
    pub fn publish(&self, keys: JwkSet) {
        *self.keys.write().unwrap() = keys;
    }

    /// Number of key set requests served so far.
    pub fn key_requests(&self) -> usize {
        self.key_requests.load(Ordering::SeqCst)
    }

    /// Discovers this provider and builds a verifier for [`CLIENT_ID`].
    pub async fn verifier(&self) -> OidcVerifier {
        OidcVerifier::discover(reqwest::Client::new(), &self.issuer, CLIENT_ID)
            .await
            .unwrap()
            .0
    }

    /// Application state wired to this provider and `db`.
    pub async fn app_state(&self, db: sea_orm::DatabaseConnection) -> AppState {
        let (verifier, metadata) =
            OidcVerifier::discover(reqwest::Client::new(), &self.issuer, CLIENT_ID)
                .await
                .unwrap();
        let oauth_client = setup_oauth_client(&self.config(), &metadata).unwrap();

        AppState::new(db, verifier, oauth_client)
    }

    /// Configuration pointing at this provider.
    pub fn config(&self) -> Config {
        Config {
            database_url: "sqlite::memory:".to_string(),
            bind_address: "127.0.0.1:0".to_string(),
            log_level: "debug".to_string(),
            log_persistence: false,
            oidc_issuer_url: self.issuer.clone(),
            oidc_client_id: CLIENT_ID.to_string(),
            oidc_client_secret: "test-client-secret".to_string(),
            oidc_redirect_url: "http://localhost:9090/demo/callback".to_string(),
            oidc_protect_all_routes: false,
        }
    }

    /// A valid token for the initial key.
    pub fn token(&self) -> String {
        sign(&self.claims(), KEY_ID, SECRET)
    }

    /// Claims accepted by a verifier for this provider, expiring in one hour.
    pub fn claims(&self) -> Value {
        let now = jsonwebtoken::get_current_timestamp();
        json!({
            "iss": self.issuer,
            "sub": "user-1",
            "aud": CLIENT_ID,
            "exp": now + 3600,
            "iat": now,
            "email": "ada@example.org",
        })
    }
}

impl Drop for MockProvider {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn serve_metadata(State(state): State<ProviderState>) -> Json<Value> {
    Json(state.metadata)
}

async fn serve_keys(State(state): State<ProviderState>) -> Json<JwkSet> {
    state.key_requests.fetch_add(1, Ordering::SeqCst);
    Json(state.keys.read().unwrap().clone())
}

pub fn initial_key() -> Jwk {
    oct_key(KEY_ID, SECRET_B64)
}

pub fn rotated_key() -> Jwk {
    oct_key(ROTATED_KEY_ID, ROTATED_SECRET_B64)
}

pub fn key_set(keys: Vec<Jwk>) -> JwkSet {
    JwkSet { keys }
}

fn oct_key(kid: &str, secret_b64: &str) -> Jwk {
    serde_json::from_value(json!({
        "kty": "oct",
        "kid": kid,
        "alg": "HS256",
        "use": "sig",
        "k": secret_b64,
    }))
    .unwrap()
}

/// Signs `claims` with HS256 under key id `kid`.
pub fn sign(claims: &Value, kid: &str, secret: &[u8]) -> String {
    let mut header = Header::new(Algorithm::HS256);
    header.kid = Some(kid.to_string());

    encode(&header, claims, &EncodingKey::from_secret(secret)).unwrap()
}

/// Metadata for a provider that is never contacted.
pub fn offline_metadata(issuer: &str) -> ProviderMetadata {
    ProviderMetadata {
        issuer: issuer.to_string(),
        jwks_uri: format!("{}/jwks", issuer),
        authorization_endpoint: format!("{}/authorize", issuer),
        token_endpoint: format!("{}/token", issuer),
        id_token_signing_alg_values_supported: vec!["HS256".to_string()],
    }
}
