use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TopicDto {
    pub id: i32,
    pub name: String,
    pub parent_id: Option<i32>,
    /// Direct children only.
    pub children: Vec<TopicSummaryDto>,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TopicSummaryDto {
    pub id: i32,
    pub name: String,
    pub parent_id: Option<i32>,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, Default, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct SaveTopicDto {
    pub name: String,
    pub parent_id: Option<i32>,
}
