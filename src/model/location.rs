use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LocationDto {
    pub id: i32,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, Default, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct SaveLocationDto {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
}
