//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx runtime
//! queries mapped through `FromRow` rows.
//!
//! # Repositories
//!
//! - [`PgLinkRepository`] - Link storage with atomic short-code insert
//! - [`PgClickRepository`] - Click recording and paginated retrieval

pub mod pg_click_repository;
pub mod pg_link_repository;

pub use pg_click_repository::PgClickRepository;
pub use pg_link_repository::PgLinkRepository;
