//! Repository trait definitions for the domain layer.
//!
//! Traits define the contract for data operations; implementations live in
//! `crate::infrastructure::persistence`. Mock implementations are generated by
//! `mockall` for unit tests.
//!
//! - [`LinkRepository`] - Short link storage with atomic short-code insert
//! - [`ClickRepository`] - Click event recording and paginated retrieval

pub mod click_repository;
pub mod link_repository;

pub use click_repository::{ClickFilter, ClickRepository, DEFAULT_CLICK_LIMIT, MAX_CLICK_LIMIT};
pub use link_repository::LinkRepository;

#[cfg(test)]
pub use click_repository::MockClickRepository;
#[cfg(test)]
pub use link_repository::MockLinkRepository;
