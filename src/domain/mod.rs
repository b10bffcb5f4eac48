//! Domain layer: entities, repository contracts and the click pipeline.
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//! - [`raw_visit`] - Un-enriched visit captured on the redirect path
//! - [`click_worker`] - Bounded queue and background click worker
//!
//! # Click Processing Flow
//!
//! 1. The redirect resolver builds a [`raw_visit::RawVisit`]
//! 2. It is pushed onto the queue with [`click_worker::ClickSender::dispatch`] (never blocks)
//! 3. [`click_worker::run_click_worker`] hands it to the click recorder
//! 4. The enriched click is persisted via [`repositories::ClickRepository`]

pub mod click_worker;
pub mod entities;
pub mod raw_visit;
pub mod repositories;
