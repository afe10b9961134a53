//! HTTP backend for locations, organizations, persons, rooms, topics, events and talks.
//!
//! # Architecture
//!
//! - **Controller Layer** (`controller/`) - HTTP handlers, path parsing and DTO conversion
//! - **Data Layer** (`data/`) - Repositories that validate, check references and persist
//! - **Model Layer** (`model/`) - Domain models, parameters and their validation rules
//! - **Error Layer** (`error/`) - Error types and their HTTP response mapping
//! - **Middleware** (`middleware/`) - Content-type and bearer token guards
//! - **Service Layer** (`service/`) - OpenID Connect discovery, token verification and login
//!
//! # Infrastructure
//!
//! - **Configuration** (`config`) - Environment-based application configuration
//! - **State** (`state`) - Shared application state (database, verifier, OAuth2 client)
//! - **Startup** (`startup`) - Tracing, database, HTTP client setup and graceful shutdown
//! - **Router** (`router`) - Route table and middleware composition
//! - **Docs** (`docs`) - OpenAPI document
//!
//! # Request Flow
//!
//! 1. **Router** matches method and path
//! 2. **Middleware** checks the content type of mutating requests, then the bearer token
//! 3. **Controller** parses the id and body, calls the repository
//! 4. **Data** validates parameters, checks references and runs the queries
//! 5. **Controller** converts the domain model to a DTO and responds

pub mod config;
pub mod controller;
pub mod data;
pub mod docs;
pub mod error;
pub mod middleware;
pub mod model;
pub mod router;
pub mod service;
pub mod startup;
pub mod state;
pub mod util;
