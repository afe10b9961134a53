use crate::{
    model::room::{RoomDto, SaveRoomDto},
    server::model::{
        validate::{FieldRule, Rule, Validate},
        IntoDto,
    },
};

/// A room inside a location.
#[derive(Debug, Clone, PartialEq)]
pub struct Room {
    pub id: i32,
    pub name: String,
    pub location_id: i32,
}

impl Room {
    pub fn from_entity(entity: entity::room::Model) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            location_id: entity.location_id,
        }
    }
}

impl IntoDto for Room {
    type Dto = RoomDto;

    fn into_dto(self) -> RoomDto {
        RoomDto {
            id: self.id,
            name: self.name,
            location_id: self.location_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct RoomParams {
    pub name: String,
    pub location_id: Option<i32>,
}

impl Validate for RoomParams {
    const RULES: &'static [FieldRule<Self>] = &[
        FieldRule {
            field: "name",
            rule: Rule::NonEmpty(|p| p.name.as_str()),
        },
        FieldRule {
            field: "locationId",
            rule: Rule::Required(|p| p.location_id.is_some()),
        },
    ];
}

impl From<SaveRoomDto> for RoomParams {
    fn from(dto: SaveRoomDto) -> Self {
        Self {
            name: dto.name,
            location_id: dto.location_id,
        }
    }
}
