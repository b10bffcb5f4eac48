//! Data Transfer Objects for API requests and responses.
//!
//! All DTOs use Serde for JSON serialization/deserialization and validator
//! for input validation. Link payloads are camelCase; click records keep the
//! snake_case column names.

pub mod analytics;
pub mod health;
pub mod link;
