//! Person domain model and parameters.
//!
//! A person optionally belongs to an organization, which is eagerly loaded alongside it.

use crate::{
    model::person::{PersonDto, SavePersonDto},
    server::model::{
        organization::Organization,
        validate::{FieldRule, Rule, Validate},
        IntoDto,
    },
};

#[derive(Debug, Clone, PartialEq)]
pub struct Person {
    pub id: i32,
    pub name: String,
    pub email: Option<String>,
    pub organization_id: Option<i32>,
    /// Loaded organization, `None` when the person has none.
    pub organization: Option<Organization>,
}

impl Person {
    /// Converts entity models to a domain model at the repository boundary.
    ///
    /// # Arguments
    /// - `entity` - The person entity from the database
    /// - `organization` - The organization referenced by `organization_id`, if loaded
    pub fn from_entity(
        entity: entity::person::Model,
        organization: Option<entity::organization::Model>,
    ) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            email: entity.email,
            organization_id: entity.organization_id,
            organization: organization.map(Organization::from_entity),
        }
    }
}

impl IntoDto for Person {
    type Dto = PersonDto;

    fn into_dto(self) -> PersonDto {
        PersonDto {
            id: self.id,
            name: self.name,
            email: self.email,
            organization_id: self.organization_id,
            organization: self.organization.map(IntoDto::into_dto),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PersonParams {
    pub name: String,
    pub email: Option<String>,
    pub organization_id: Option<i32>,
}

impl Validate for PersonParams {
    const RULES: &'static [FieldRule<Self>] = &[
        FieldRule {
            field: "name",
            rule: Rule::NonEmpty(|p| p.name.as_str()),
        },
        FieldRule {
            field: "email",
            rule: Rule::Email(|p| p.email.as_deref()),
        },
    ];
}

impl From<SavePersonDto> for PersonParams {
    /// An empty e-mail is treated as absent.
    fn from(dto: SavePersonDto) -> Self {
        Self {
            name: dto.name,
            email: dto.email.filter(|email| !email.trim().is_empty()),
            organization_id: dto.organization_id,
        }
    }
}
