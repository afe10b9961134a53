//! Talk domain model and parameters.
//!
//! A talk is the richest entity: it links to persons and topics through junction tables and
//! owns a list of talk dates, each placing the talk in a room at an event.

use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use sea_orm::DbErr;

use crate::{
    model::talk::{SaveTalkDateDto, SaveTalkDto, TalkDateDto, TalkDto},
    server::{
        error::validation::FieldViolation,
        model::{
            event::Event,
            person::Person,
            room::Room,
            topic::Topic,
            validate::{FieldRule, Rule, Validate},
            IntoDto,
        },
    },
};

/// Audience level of a talk, stored by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TalkLevel {
    Beginner,
    Advanced,
    Expert,
}

impl TalkLevel {
    pub const NAMES: &'static [&'static str] = &["beginner", "advanced", "expert"];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Advanced => "advanced",
            Self::Expert => "expert",
        }
    }
}

impl fmt::Display for TalkLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TalkLevel {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "beginner" => Ok(Self::Beginner),
            "advanced" => Ok(Self::Advanced),
            "expert" => Ok(Self::Expert),
            other => Err(format!("unknown talk level '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Talk {
    pub id: i32,
    pub title: String,
    pub duration_in_minutes: i32,
    pub language: String,
    pub level: TalkLevel,
    /// Speakers ordered by id, each with their organization.
    pub persons: Vec<Person>,
    /// Topics ordered by id, each with its children.
    pub topics: Vec<Topic>,
    pub talk_dates: Vec<TalkDate>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TalkDate {
    pub id: i32,
    pub event_id: i32,
    pub room_id: i32,
    pub begins_at: Option<DateTime<Utc>>,
    pub event: Option<Event>,
    pub room: Option<Room>,
}

impl Talk {
    /// Converts entity models to a domain model at the repository boundary.
    ///
    /// # Arguments
    /// - `entity` - The talk entity from the database
    /// - `persons` - Loaded persons linked through `talk_person`
    /// - `topics` - Loaded topics linked through `talk_topic`
    /// - `talk_dates` - Loaded talk dates owned by the talk
    ///
    /// # Returns
    /// - `Ok(Talk)` - Successfully converted domain model
    /// - `Err(DbErr::Custom)` - Stored level is not a known talk level
    pub fn from_entity(
        entity: entity::talk::Model,
        persons: Vec<Person>,
        topics: Vec<Topic>,
        talk_dates: Vec<TalkDate>,
    ) -> Result<Self, DbErr> {
        let level = entity
            .level
            .parse::<TalkLevel>()
            .map_err(|e| DbErr::Custom(format!("Failed to parse level of talk {}: {}", entity.id, e)))?;

        Ok(Self {
            id: entity.id,
            title: entity.title,
            duration_in_minutes: entity.duration_in_minutes,
            language: entity.language,
            level,
            persons,
            topics,
            talk_dates,
        })
    }
}

impl TalkDate {
    pub fn from_entity(
        entity: entity::talk_date::Model,
        event: Option<Event>,
        room: Option<Room>,
    ) -> Self {
        Self {
            id: entity.id,
            event_id: entity.event_id,
            room_id: entity.room_id,
            begins_at: entity.begins_at,
            event,
            room,
        }
    }
}

impl IntoDto for Talk {
    type Dto = TalkDto;

    fn into_dto(self) -> TalkDto {
        TalkDto {
            id: self.id,
            title: self.title,
            duration_in_minutes: self.duration_in_minutes,
            language: self.language,
            level: self.level.to_string(),
            persons: self.persons.into_iter().map(IntoDto::into_dto).collect(),
            topics: self.topics.into_iter().map(IntoDto::into_dto).collect(),
            talk_dates: self.talk_dates.into_iter().map(IntoDto::into_dto).collect(),
        }
    }
}

impl IntoDto for TalkDate {
    type Dto = TalkDateDto;

    fn into_dto(self) -> TalkDateDto {
        TalkDateDto {
            id: self.id,
            event_id: self.event_id,
            room_id: self.room_id,
            begins_at: self.begins_at,
            event: self.event.map(IntoDto::into_dto),
            room: self.room.map(IntoDto::into_dto),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TalkParams {
    pub title: String,
    pub duration_in_minutes: i32,
    pub language: String,
    pub level: String,
    /// Distinct person ids, in input order.
    pub person_ids: Vec<i32>,
    /// Distinct topic ids, in input order.
    pub topic_ids: Vec<i32>,
    pub talk_dates: Vec<TalkDateParams>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TalkDateParams {
    pub event_id: Option<i32>,
    pub room_id: Option<i32>,
    pub begins_at: Option<DateTime<Utc>>,
}

impl Validate for TalkParams {
    const RULES: &'static [FieldRule<Self>] = &[
        FieldRule {
            field: "title",
            rule: Rule::NonEmpty(|p| p.title.as_str()),
        },
        FieldRule {
            field: "durationInMinutes",
            rule: Rule::Positive(|p| i64::from(p.duration_in_minutes)),
        },
        FieldRule {
            field: "language",
            rule: Rule::NonEmpty(|p| p.language.as_str()),
        },
        FieldRule {
            field: "level",
            rule: Rule::OneOf {
                value: |p| p.level.as_str(),
                allowed: TalkLevel::NAMES,
            },
        },
    ];

    fn check_nested(&self, violations: &mut Vec<FieldViolation>) {
        for (index, talk_date) in self.talk_dates.iter().enumerate() {
            if talk_date.event_id.is_none() {
                violations.push(FieldViolation::new(
                    format!("talkDates[{}].eventId", index),
                    "is required",
                ));
            }
            if talk_date.room_id.is_none() {
                violations.push(FieldViolation::new(
                    format!("talkDates[{}].roomId", index),
                    "is required",
                ));
            }
        }
    }
}

impl From<SaveTalkDto> for TalkParams {
    fn from(dto: SaveTalkDto) -> Self {
        Self {
            title: dto.title,
            duration_in_minutes: dto.duration_in_minutes,
            language: dto.language,
            level: dto.level,
            person_ids: distinct(dto.person_ids),
            topic_ids: distinct(dto.topic_ids),
            talk_dates: dto.talk_dates.into_iter().map(TalkDateParams::from).collect(),
        }
    }
}

impl From<SaveTalkDateDto> for TalkDateParams {
    fn from(dto: SaveTalkDateDto) -> Self {
        Self {
            event_id: dto.event_id,
            room_id: dto.room_id,
            begins_at: dto.begins_at,
        }
    }
}

fn distinct(ids: Vec<i32>) -> Vec<i32> {
    let mut seen = std::collections::HashSet::new();
    ids.into_iter().filter(|id| seen.insert(*id)).collect()
}
