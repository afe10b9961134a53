//! OpenAPI document assembled from the handler annotations.

use axum::Json;
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};

use crate::{
    model::{
        api::{ErrorDto, FieldViolationDto},
        event::{EventDto, SaveEventDto},
        location::{LocationDto, SaveLocationDto},
        organization::{OrganizationDto, SaveOrganizationDto},
        person::{PersonDto, SavePersonDto},
        room::{RoomDto, SaveRoomDto},
        talk::{SaveTalkDateDto, SaveTalkDto, TalkDateDto, TalkDto},
        topic::{SaveTopicDto, TopicDto, TopicSummaryDto},
    },
    server::controller::{auth, event, health, location, organization, person, room, talk, topic},
};

#[derive(OpenApi)]
#[openapi(
    info(title = "Program and conference backend"),
    paths(
        health::liveness,
        auth::login,
        auth::callback,
        location::list_locations,
        location::get_location,
        location::create_location,
        location::update_location,
        location::delete_location,
        organization::list_organizations,
        organization::get_organization,
        organization::create_organization,
        organization::update_organization,
        organization::delete_organization,
        person::list_persons,
        person::get_person,
        person::create_person,
        person::update_person,
        person::delete_person,
        room::list_rooms,
        room::get_room,
        room::create_room,
        room::update_room,
        room::delete_room,
        topic::list_topics,
        topic::get_topic,
        topic::create_topic,
        topic::update_topic,
        topic::delete_topic,
        event::list_events,
        event::get_event,
        event::create_event,
        event::update_event,
        event::delete_event,
        talk::list_talks,
        talk::get_talk,
        talk::create_talk,
        talk::update_talk,
        talk::delete_talk,
        talk::list_talks_by_event,
        talk::list_talks_by_person,
    ),
    components(schemas(
        ErrorDto,
        FieldViolationDto,
        LocationDto,
        SaveLocationDto,
        OrganizationDto,
        SaveOrganizationDto,
        PersonDto,
        SavePersonDto,
        RoomDto,
        SaveRoomDto,
        TopicDto,
        TopicSummaryDto,
        SaveTopicDto,
        EventDto,
        SaveEventDto,
        TalkDto,
        TalkDateDto,
        SaveTalkDto,
        SaveTalkDateDto,
    )),
    modifiers(&BearerAuth),
    tags(
        (name = "health", description = "Liveness probe"),
        (name = "auth", description = "OpenID Connect login redirect"),
        (name = "locations", description = "Venues and their coordinates"),
        (name = "organizations", description = "Organizations persons belong to"),
        (name = "persons", description = "Speakers"),
        (name = "rooms", description = "Rooms at a location"),
        (name = "topics", description = "Hierarchical talk topics"),
        (name = "events", description = "Events held at a location"),
        (name = "talks", description = "Talks with speakers, topics and talk dates"),
    )
)]
pub struct ApiDoc;

/// Registers the `bearer` scheme referenced by protected operations.
struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

/// Serves the OpenAPI document as JSON.
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
