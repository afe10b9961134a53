//! Event domain model and parameters.

use chrono::NaiveDate;

use crate::{
    model::event::{EventDto, SaveEventDto},
    server::{
        error::validation::{FieldViolation, ValidationError},
        model::{
            location::Location,
            validate::{present, FieldRule, Rule, Validate},
            IntoDto,
        },
    },
};

#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub id: i32,
    pub name: String,
    pub start_date: NaiveDate,
    /// Never before `start_date`.
    pub end_date: NaiveDate,
    pub location_id: Option<i32>,
    /// Loaded location, `None` when `location_id` is.
    pub location: Option<Location>,
}

impl Event {
    pub fn from_entity(
        entity: entity::event::Model,
        location: Option<entity::location::Model>,
    ) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            start_date: entity.start_date,
            end_date: entity.end_date,
            location_id: entity.location_id,
            location: location.map(Location::from_entity),
        }
    }
}

impl IntoDto for Event {
    type Dto = EventDto;

    fn into_dto(self) -> EventDto {
        EventDto {
            id: self.id,
            name: self.name,
            start_date: self.start_date,
            end_date: self.end_date,
            location_id: self.location_id,
            location: self.location.map(IntoDto::into_dto),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct EventParams {
    pub name: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub location_id: Option<i32>,
}

impl EventParams {
    /// Returns `(start_date, end_date)` of validated parameters.
    pub fn dates(&self) -> Result<(NaiveDate, NaiveDate), ValidationError> {
        Ok((
            present("startDate", self.start_date)?,
            present("endDate", self.end_date)?,
        ))
    }
}

impl Validate for EventParams {
    const RULES: &'static [FieldRule<Self>] = &[
        FieldRule {
            field: "name",
            rule: Rule::NonEmpty(|p| p.name.as_str()),
        },
        FieldRule {
            field: "startDate",
            rule: Rule::Required(|p| p.start_date.is_some()),
        },
        FieldRule {
            field: "endDate",
            rule: Rule::Required(|p| p.end_date.is_some()),
        },
    ];

    fn check_nested(&self, violations: &mut Vec<FieldViolation>) {
        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            if end < start {
                violations.push(FieldViolation::new(
                    "endDate",
                    "must not be before startDate",
                ));
            }
        }
    }
}

impl From<SaveEventDto> for EventParams {
    fn from(dto: SaveEventDto) -> Self {
        Self {
            name: dto.name,
            start_date: dto.start_date,
            end_date: dto.end_date,
            location_id: dto.location_id,
        }
    }
}
