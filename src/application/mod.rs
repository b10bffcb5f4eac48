//! Application layer services implementing business logic.
//!
//! Services consume repository traits and give HTTP handlers, the click worker
//! and the admin CLI a narrow API.
//!
//! # Available Services
//!
//! - [`services::link_service::LinkService`] - Short link creation and retrieval
//! - [`services::redirect_service::RedirectService`] - Short code resolution
//! - [`services::click_recorder::ClickRecorder`] - Click enrichment and persistence
//! - [`services::analytics_service::AnalyticsService`] - Owner-scoped click analytics
//! - [`services::auth_service::AuthService`] - Bearer token issuing and verification

pub mod services;
