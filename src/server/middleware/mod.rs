//! Request guards applied in front of handlers.
//!
//! - `content_type` - rejects mutating requests whose body is not declared as JSON
//! - `auth` - requires a verified bearer token

pub mod auth;
pub mod content_type;

#[cfg(test)]
mod test;
