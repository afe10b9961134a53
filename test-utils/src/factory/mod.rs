//! Factory methods for creating test data.
//!
//! Each entity has a `Factory` struct for customization and a `create_*` convenience
//! function for quick default creation. Factories insert directly through SeaORM active
//! models and bypass the application's validation, which makes them suitable for arranging
//! state the code under test only reads.
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! let location = factory::location::create_location(&db).await?;
//! let room = factory::room::RoomFactory::new(&db, location.id)
//!     .name("Main Hall")
//!     .build()
//!     .await?;
//! ```

pub mod event;
pub mod helpers;
pub mod location;
pub mod organization;
pub mod person;
pub mod room;
pub mod talk;
pub mod topic;

pub use event::create_event;
pub use location::create_location;
pub use organization::create_organization;
pub use person::create_person;
pub use room::create_room;
pub use talk::create_talk;
pub use topic::create_topic;
