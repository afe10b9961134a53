//! Location domain model and parameters.

use crate::{
    model::location::{LocationDto, SaveLocationDto},
    server::model::{
        validate::{FieldRule, Rule, Validate},
        IntoDto,
    },
};

/// A venue identified by its coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub id: i32,
    pub name: String,
    /// Latitude in degrees, -90 to 90.
    pub lat: f64,
    /// Longitude in degrees, -180 to 180.
    pub lon: f64,
}

impl Location {
    pub fn from_entity(entity: entity::location::Model) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            lat: entity.lat,
            lon: entity.lon,
        }
    }
}

impl IntoDto for Location {
    type Dto = LocationDto;

    fn into_dto(self) -> LocationDto {
        LocationDto {
            id: self.id,
            name: self.name,
            lat: self.lat,
            lon: self.lon,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct LocationParams {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
}

impl Validate for LocationParams {
    const RULES: &'static [FieldRule<Self>] = &[
        FieldRule {
            field: "name",
            rule: Rule::NonEmpty(|p| p.name.as_str()),
        },
        FieldRule {
            field: "lat",
            rule: Rule::Range {
                value: |p| p.lat,
                min: -90.0,
                max: 90.0,
            },
        },
        FieldRule {
            field: "lon",
            rule: Rule::Range {
                value: |p| p.lon,
                min: -180.0,
                max: 180.0,
            },
        },
    ];
}

impl From<SaveLocationDto> for LocationParams {
    fn from(dto: SaveLocationDto) -> Self {
        Self {
            name: dto.name,
            lat: dto.lat,
            lon: dto.lon,
        }
    }
}
