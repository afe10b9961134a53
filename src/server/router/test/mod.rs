use axum::{
    body::Body,
    http::{header, Request, Response, StatusCode},
};
use sea_orm::DatabaseConnection;
use serde_json::{json, Value};
use test_utils::{builder::TestBuilder, factory};
use tower::ServiceExt;

use crate::server::{router::router, service::oidc::testing::MockProvider, state::AppState};

mod guards;

/// Application wired to an in-memory database and a mock OpenID provider.
struct TestApp {
    provider: MockProvider,
    state: AppState,
    protect_all_routes: bool,
}

impl TestApp {
    async fn start() -> Self {
        Self::with_protection(false).await
    }

    async fn with_protection(protect_all_routes: bool) -> Self {
        let test = TestBuilder::new().with_all_tables().build().await.unwrap();
        let provider = MockProvider::start().await;
        let state = provider.app_state(test.db.unwrap()).await;

        Self {
            provider,
            state,
            protect_all_routes,
        }
    }

    fn db(&self) -> &DatabaseConnection {
        &self.state.db
    }

    fn bearer(&self) -> String {
        format!("Bearer {}", self.provider.token())
    }

    async fn send(&self, request: Request<Body>) -> Response<Body> {
        router(self.state.clone(), self.protect_all_routes)
            .oneshot(request)
            .await
            .unwrap()
    }

    /// Authenticated GET.
    async fn get(&self, uri: &str) -> Response<Body> {
        self.send(
            Request::get(uri)
                .header(header::AUTHORIZATION, self.bearer())
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }

    /// Authenticated JSON request.
    async fn send_json(&self, method: &str, uri: &str, body: Value) -> Response<Body> {
        self.send(
            Request::builder()
                .method(method)
                .uri(uri)
                .header(header::AUTHORIZATION, self.bearer())
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }
}

async fn json_body(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn violation_fields(body: &Value) -> Vec<&str> {
    body["violations"]
        .as_array()
        .unwrap()
        .iter()
        .map(|violation| violation["field"].as_str().unwrap())
        .collect()
}
