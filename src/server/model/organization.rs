use crate::{
    model::organization::{OrganizationDto, SaveOrganizationDto},
    server::model::{
        validate::{FieldRule, Rule, Validate},
        IntoDto,
    },
};

#[derive(Debug, Clone, PartialEq)]
pub struct Organization {
    pub id: i32,
    pub name: String,
}

impl Organization {
    pub fn from_entity(entity: entity::organization::Model) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
        }
    }
}

impl IntoDto for Organization {
    type Dto = OrganizationDto;

    fn into_dto(self) -> OrganizationDto {
        OrganizationDto {
            id: self.id,
            name: self.name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct OrganizationParams {
    pub name: String,
}

impl Validate for OrganizationParams {
    const RULES: &'static [FieldRule<Self>] = &[FieldRule {
        field: "name",
        rule: Rule::NonEmpty(|p| p.name.as_str()),
    }];
}

impl From<SaveOrganizationDto> for OrganizationParams {
    fn from(dto: SaveOrganizationDto) -> Self {
        Self { name: dto.name }
    }
}
