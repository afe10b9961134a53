//! Topic domain model and parameters.
//!
//! Topics form a tree through `parent_id`. A loaded topic carries its direct children as
//! summaries so that responses never recurse.

use crate::{
    model::topic::{SaveTopicDto, TopicDto, TopicSummaryDto},
    server::model::{
        validate::{FieldRule, Rule, Validate},
        IntoDto,
    },
};

#[derive(Debug, Clone, PartialEq)]
pub struct Topic {
    pub id: i32,
    pub name: String,
    pub parent_id: Option<i32>,
    /// Direct children, ordered by id.
    pub children: Vec<TopicSummary>,
}

/// Topic without its children.
#[derive(Debug, Clone, PartialEq)]
pub struct TopicSummary {
    pub id: i32,
    pub name: String,
    pub parent_id: Option<i32>,
}

impl Topic {
    /// Converts entity models to a domain model at the repository boundary.
    ///
    /// # Arguments
    /// - `entity` - The topic entity from the database
    /// - `children` - Topic entities whose `parent_id` is `entity.id`
    pub fn from_entity(
        entity: entity::topic::Model,
        children: Vec<entity::topic::Model>,
    ) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            parent_id: entity.parent_id,
            children: children.into_iter().map(TopicSummary::from_entity).collect(),
        }
    }
}

impl TopicSummary {
    pub fn from_entity(entity: entity::topic::Model) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            parent_id: entity.parent_id,
        }
    }
}

impl IntoDto for Topic {
    type Dto = TopicDto;

    fn into_dto(self) -> TopicDto {
        TopicDto {
            id: self.id,
            name: self.name,
            parent_id: self.parent_id,
            children: self.children.into_iter().map(IntoDto::into_dto).collect(),
        }
    }
}

impl IntoDto for TopicSummary {
    type Dto = TopicSummaryDto;

    fn into_dto(self) -> TopicSummaryDto {
        TopicSummaryDto {
            id: self.id,
            name: self.name,
            parent_id: self.parent_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TopicParams {
    pub name: String,
    pub parent_id: Option<i32>,
}

impl Validate for TopicParams {
    const RULES: &'static [FieldRule<Self>] = &[FieldRule {
        field: "name",
        rule: Rule::NonEmpty(|p| p.name.as_str()),
    }];
}

impl From<SaveTopicDto> for TopicParams {
    fn from(dto: SaveTopicDto) -> Self {
        Self {
            name: dto.name,
            parent_id: dto.parent_id,
        }
    }
}
