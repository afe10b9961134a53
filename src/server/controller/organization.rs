use axum::{
    extract::{rejection::JsonRejection, Path, State},
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::ErrorDto,
        organization::{OrganizationDto, SaveOrganizationDto},
    },
    server::{
        controller::crud, data::organization::OrganizationRepository, error::AppError, state::AppState,
    },
};

/// Tag for grouping organization endpoints in OpenAPI documentation
pub static ORGANIZATION_TAG: &str = "organizations";

/// List all organizations.
#[utoipa::path(
    get,
    path = "/organizations",
    tag = ORGANIZATION_TAG,
    responses(
        (status = 200, description = "All organizations", body = Vec<OrganizationDto>),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn list_organizations(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    crud::list(OrganizationRepository::new(&state.db)).await
}

/// Get an organization by id.
#[utoipa::path(
    get,
    path = "/organizations/{id}",
    tag = ORGANIZATION_TAG,
    params(
        ("id" = i32, Path, description = "Organization id")
    ),
    responses(
        (status = 200, description = "The organization", body = OrganizationDto),
        (status = 400, description = "Malformed id", body = ErrorDto),
        (status = 404, description = "Organization not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_organization(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    crud::get(OrganizationRepository::new(&state.db), &id).await
}

/// Create an organization.
#[utoipa::path(
    post,
    path = "/organizations",
    tag = ORGANIZATION_TAG,
    request_body = SaveOrganizationDto,
    responses(
        (status = 201, description = "Organization created", body = OrganizationDto),
        (status = 400, description = "Malformed JSON", body = ErrorDto),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorDto),
        (status = 415, description = "Body is not JSON", body = ErrorDto),
        (status = 422, description = "Validation failed", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn create_organization(
    State(state): State<AppState>,
    payload: Result<Json<SaveOrganizationDto>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(payload) = payload?;

    crud::create(OrganizationRepository::new(&state.db), payload.into()).await
}

/// Rename an organization.
#[utoipa::path(
    put,
    path = "/organizations/{id}",
    tag = ORGANIZATION_TAG,
    params(
        ("id" = i32, Path, description = "Organization id")
    ),
    request_body = SaveOrganizationDto,
    responses(
        (status = 200, description = "Organization updated", body = OrganizationDto),
        (status = 400, description = "Malformed id or JSON", body = ErrorDto),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorDto),
        (status = 404, description = "Organization not found", body = ErrorDto),
        (status = 415, description = "Body is not JSON", body = ErrorDto),
        (status = 422, description = "Validation failed", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn update_organization(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<SaveOrganizationDto>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(payload) = payload?;

    crud::update(OrganizationRepository::new(&state.db), &id, payload.into()).await
}

/// Delete an organization.
///
/// Members of the organization are kept without one.
#[utoipa::path(
    delete,
    path = "/organizations/{id}",
    tag = ORGANIZATION_TAG,
    params(
        ("id" = i32, Path, description = "Organization id")
    ),
    responses(
        (status = 204, description = "Organization deleted"),
        (status = 400, description = "Malformed id", body = ErrorDto),
        (status = 404, description = "Organization not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_organization(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    crud::delete(OrganizationRepository::new(&state.db), &id).await
}
