use super::*;

/// Tests that a mutating request without a JSON content type is refused before auth.
///
/// Expected: 415 even though no token is sent
#[tokio::test]
async fn rejects_body_without_content_type() {
    let app = TestApp::start().await;

    let response = app
        .send(Request::post("/locations").body(Body::empty()).unwrap())
        .await;

    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
}

/// Tests that a JSON content type with parameters is accepted.
///
/// Expected: 201 for `application/json; charset=utf-8`
#[tokio::test]
async fn accepts_json_with_charset() {
    let app = TestApp::start().await;

    let response = app
        .send(
            Request::post("/locations")
                .header(header::AUTHORIZATION, app.bearer())
                .header(header::CONTENT_TYPE, "application/json; charset=utf-8")
                .body(Body::from(r#"{"name":"HQ","lat":1.0,"lon":2.0}"#))
                .unwrap(),
        )
        .await;

    assert_eq!(response.status(), StatusCode::CREATED);
}

/// Tests listing without a bearer token.
///
/// Expected: 401 with a challenge header and no entity data
#[tokio::test]
async fn rejects_list_without_token() {
    let app = TestApp::start().await;
    factory::location::create_location(app.db()).await.unwrap();

    let response = app
        .send(Request::get("/locations").body(Body::empty()).unwrap())
        .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
        "Bearer"
    );
    assert_eq!(json_body(response).await, json!({ "error": "Unauthorized" }));
}

/// Tests listing with a token signed by an unknown key.
///
/// Expected: 401
#[tokio::test]
async fn rejects_list_with_forged_token() {
    let app = TestApp::start().await;
    let forged = crate::server::service::oidc::testing::sign(
        &app.provider.claims(),
        crate::server::service::oidc::testing::KEY_ID,
        b"not-the-provider-secret-at-all-000000",
    );

    let response = app
        .send(
            Request::get("/locations")
                .header(header::AUTHORIZATION, format!("Bearer {}", forged))
                .body(Body::empty())
                .unwrap(),
        )
        .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// Tests that create requires a token once the content type is acceptable.
///
/// Expected: 401 and nothing stored
#[tokio::test]
async fn rejects_create_without_token() {
    let app = TestApp::start().await;

    let response = app
        .send(
            Request::post("/organizations")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"name":"ACME"}"#))
                .unwrap(),
        )
        .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let listed = json_body(app.get("/organizations").await).await;
    assert_eq!(listed, json!([]));
}

/// Tests the default exposure of get-by-id and delete.
///
/// Expected: both succeed without a token
#[tokio::test]
async fn lookups_are_public_by_default() {
    let app = TestApp::start().await;
    let location = factory::location::create_location(app.db()).await.unwrap();
    let uri = format!("/locations/{}", location.id);

    let fetched = app
        .send(Request::get(&uri).body(Body::empty()).unwrap())
        .await;
    assert_eq!(fetched.status(), StatusCode::OK);

    let deleted = app
        .send(Request::delete(&uri).body(Body::empty()).unwrap())
        .await;
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);
}

/// Tests get-by-id and delete when every route is protected.
///
/// Expected: 401 without a token, success with one
#[tokio::test]
async fn lookups_require_token_when_protected() {
    let app = TestApp::with_protection(true).await;
    let location = factory::location::create_location(app.db()).await.unwrap();
    let uri = format!("/locations/{}", location.id);

    let anonymous = app
        .send(Request::get(&uri).body(Body::empty()).unwrap())
        .await;
    assert_eq!(anonymous.status(), StatusCode::UNAUTHORIZED);

    let anonymous_delete = app
        .send(Request::delete(&uri).body(Body::empty()).unwrap())
        .await;
    assert_eq!(anonymous_delete.status(), StatusCode::UNAUTHORIZED);

    assert_eq!(app.get(&uri).await.status(), StatusCode::OK);
}

/// Tests ids that are not positive integers.
///
/// Expected: 400 for each
#[tokio::test]
async fn rejects_malformed_ids() {
    let app = TestApp::start().await;

    for id in ["abc", "0", "-1", "1.5"] {
        let response = app.get(&format!("/locations/{}", id)).await;
        assert_eq!(
            response.status(),
            StatusCode::BAD_REQUEST,
            "expected '{}' to be rejected",
            id
        );
    }
}

/// Tests a body that is not valid JSON.
///
/// Expected: 400
#[tokio::test]
async fn rejects_malformed_json() {
    let app = TestApp::start().await;

    let response = app
        .send(
            Request::post("/locations")
                .header(header::AUTHORIZATION, app.bearer())
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"name": "HQ""#))
                .unwrap(),
        )
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(json_body(response).await["error"].is_string());
}
