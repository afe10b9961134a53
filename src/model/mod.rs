//! Data transfer objects exchanged over the HTTP API.
//!
//! Request DTOs (`Save*Dto`) are used for both create and full-replace update. Every field
//! falls back to its empty/zero value when absent so that missing input is reported by the
//! validator as a field violation instead of failing JSON decoding.

pub mod api;
pub mod event;
pub mod location;
pub mod organization;
pub mod person;
pub mod room;
pub mod talk;
pub mod topic;
