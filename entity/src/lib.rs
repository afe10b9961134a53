//! SeaORM entity definitions for the conference schema.
//!
//! Only `belongs_to` relations are declared. They carry the foreign-key delete
//! rules used when a schema is generated straight from the entities (tests) and
//! mirror the constraints created by the `migration` crate.

pub mod prelude;

pub mod event;
pub mod location;
pub mod organization;
pub mod person;
pub mod room;
pub mod talk;
pub mod talk_date;
pub mod talk_person;
pub mod talk_topic;
pub mod topic;
