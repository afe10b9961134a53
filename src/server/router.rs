use std::time::Duration;

use axum::{
    http::StatusCode,
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::server::{
    controller::{auth, event, health, location, organization, person, room, talk, topic},
    docs,
    middleware::{auth::require_bearer, content_type::require_json},
    state::AppState,
};

/// Upper bound on handler time before a request is answered with 408.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Builds the application router.
///
/// Routes fall into three groups:
/// - public: liveness probe, login redirect, OpenAPI document, plus get-by-id and delete
///   unless `protect_all_routes` is set
/// - bearer: lists, relation queries, plus get-by-id and delete when `protect_all_routes`
///   is set
/// - mutating: create and update, which check the content type before the bearer token
pub fn router(state: AppState, protect_all_routes: bool) -> Router {
    let (public_lookups, protected_lookups) = if protect_all_routes {
        (Router::new(), lookup_routes())
    } else {
        (lookup_routes(), Router::new())
    };

    let public = Router::new()
        .route("/", get(health::liveness))
        .route("/auth/login", get(auth::login))
        .route("/demo/callback", get(auth::callback))
        .route("/api-docs/openapi.json", get(docs::openapi_json))
        .merge(public_lookups);

    let protected = Router::new()
        .route("/locations", get(location::list_locations))
        .route("/organizations", get(organization::list_organizations))
        .route("/persons", get(person::list_persons))
        .route("/rooms", get(room::list_rooms))
        .route("/topics", get(topic::list_topics))
        .route("/events", get(event::list_events))
        .route("/talks", get(talk::list_talks))
        .route("/events/{id}/talks", get(talk::list_talks_by_event))
        .route("/persons/{id}/talks", get(talk::list_talks_by_person))
        .merge(protected_lookups)
        .route_layer(middleware::from_fn_with_state(state.clone(), require_bearer));

    let mutating = Router::new()
        .route("/locations", post(location::create_location))
        .route("/locations/{id}", put(location::update_location))
        .route("/organizations", post(organization::create_organization))
        .route("/organizations/{id}", put(organization::update_organization))
        .route("/persons", post(person::create_person))
        .route("/persons/{id}", put(person::update_person))
        .route("/rooms", post(room::create_room))
        .route("/rooms/{id}", put(room::update_room))
        .route("/topics", post(topic::create_topic))
        .route("/topics/{id}", put(topic::update_topic))
        .route("/events", post(event::create_event))
        .route("/events/{id}", put(event::update_event))
        .route("/talks", post(talk::create_talk))
        .route("/talks/{id}", put(talk::update_talk))
        .route_layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(require_json))
                .layer(middleware::from_fn_with_state(state.clone(), require_bearer)),
        );

    Router::new()
        .merge(public)
        .merge(protected)
        .merge(mutating)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(TimeoutLayer::with_status_code(
                    StatusCode::REQUEST_TIMEOUT,
                    REQUEST_TIMEOUT,
                )),
        )
        .with_state(state)
}

/// Get-by-id and delete routes, whose protection depends on configuration.
fn lookup_routes() -> Router<AppState> {
    Router::new()
        .route("/locations/{id}", get(location::get_location))
        .route("/locations/{id}", delete(location::delete_location))
        .route("/organizations/{id}", get(organization::get_organization))
        .route("/organizations/{id}", delete(organization::delete_organization))
        .route("/persons/{id}", get(person::get_person))
        .route("/persons/{id}", delete(person::delete_person))
        .route("/rooms/{id}", get(room::get_room))
        .route("/rooms/{id}", delete(room::delete_room))
        .route("/topics/{id}", get(topic::get_topic))
        .route("/topics/{id}", delete(topic::delete_topic))
        .route("/events/{id}", get(event::get_event))
        .route("/events/{id}", delete(event::delete_event))
        .route("/talks/{id}", get(talk::get_talk))
        .route("/talks/{id}", delete(talk::delete_talk))
}

#[cfg(test)]
mod test;
