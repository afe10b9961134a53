//! Server-side domain models and parameter types.
//!
//! Domain models are converted from entity models at the repository boundary and transformed
//! to DTOs at the controller boundary. Each entity also has a `*Params` type holding the input
//! of create and full-replace update, declaring its field constraints through [`validate`].

pub mod event;
pub mod location;
pub mod organization;
pub mod person;
pub mod room;
pub mod talk;
pub mod topic;
pub mod validate;

use serde::Serialize;

/// Conversion of a domain model into the DTO returned by the API.
pub trait IntoDto {
    type Dto: Serialize;

    fn into_dto(self) -> Self::Dto;
}
