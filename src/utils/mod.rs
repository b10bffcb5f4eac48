//! Helpers shared by the service and HTTP layers.
//!
//! - [`code_generator`] - Short code generation and validation
//! - [`user_agent`] - User-agent parsing and device classification
//! - [`client_ip`] - Client address and referrer extraction
//! - [`timestamp`] - Lenient timestamp parsing for query and body fields
//! - [`db_error`] - Database error classification

pub mod client_ip;
pub mod code_generator;
pub mod db_error;
pub mod timestamp;
pub mod user_agent;
