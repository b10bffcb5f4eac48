//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer.
//!
//! # Modules
//!
//! - [`geo`] - IP geolocation (MaxMind database and no-op implementations)
//! - [`persistence`] - PostgreSQL repository implementations

pub mod geo;
pub mod persistence;
