//! PAC Backend Test Utils
//!
//! Shared testing utilities for the backend. Provides a builder for test contexts backed by
//! in-memory SQLite databases with schemas generated from the `entity` crate, plus factories
//! that insert entities with sensible defaults.
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::{builder::TestBuilder, factory};
//!
//! #[tokio::test]
//! async fn test_person_operations() -> Result<(), TestError> {
//!     let test = TestBuilder::new()
//!         .with_table(entity::prelude::Organization)
//!         .with_table(entity::prelude::Person)
//!         .build()
//!         .await?;
//!
//!     let db = test.db.as_ref().unwrap();
//!     let person = factory::person::create_person(db).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod context;
pub mod error;
pub mod factory;
