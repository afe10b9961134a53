use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::{event::EventDto, person::PersonDto, room::RoomDto, topic::TopicDto};

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TalkDto {
    pub id: i32,
    pub title: String,
    pub duration_in_minutes: i32,
    pub language: String,
    /// One of `beginner`, `advanced`, `expert`.
    pub level: String,
    pub persons: Vec<PersonDto>,
    pub topics: Vec<TopicDto>,
    pub talk_dates: Vec<TalkDateDto>,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TalkDateDto {
    pub id: i32,
    pub event_id: i32,
    pub room_id: i32,
    pub begins_at: Option<DateTime<Utc>>,
    pub event: Option<EventDto>,
    pub room: Option<RoomDto>,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, Default, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct SaveTalkDto {
    pub title: String,
    pub duration_in_minutes: i32,
    pub language: String,
    pub level: String,
    pub person_ids: Vec<i32>,
    pub topic_ids: Vec<i32>,
    pub talk_dates: Vec<SaveTalkDateDto>,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, Default, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct SaveTalkDateDto {
    pub event_id: Option<i32>,
    pub room_id: Option<i32>,
    pub begins_at: Option<DateTime<Utc>>,
}
