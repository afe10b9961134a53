//! HTTP request handlers.
//!
//! Every entity exposes the same five operations, implemented once in [`crud`] against the
//! [`Store`](crate::server::data::Store) trait. The per-entity modules bind them to concrete
//! repositories and DTOs and carry the OpenAPI annotations.

pub mod auth;
pub mod crud;
pub mod event;
pub mod health;
pub mod location;
pub mod organization;
pub mod person;
pub mod room;
pub mod talk;
pub mod topic;
