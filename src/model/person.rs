use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::organization::OrganizationDto;

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PersonDto {
    pub id: i32,
    pub name: String,
    pub email: Option<String>,
    pub organization_id: Option<i32>,
    pub organization: Option<OrganizationDto>,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, Default, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct SavePersonDto {
    pub name: String,
    pub email: Option<String>,
    pub organization_id: Option<i32>,
}
