//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /{shortCode}`            - Short link redirect (public)
//! - `GET  /links/{shortCode}`      - Same redirect under the links prefix (public)
//! - `GET  /health`                 - Health check: DB, click queue (public)
//! - `POST /links`, `GET /links/mine` and aliases - Owner API (Bearer token)
//! - `GET  /links/{id}/analytics`   - Owner analytics (Bearer token, rate limited)
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-client quota on analytics (proxy-aware)
//! - **Authentication** - Bearer token for owner routes
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{health_handler, redirect_handler};
use crate::api::middleware::{auth, tracing};
use crate::state::AppState;
use axum::routing::get;
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
///
/// The analytics rate limiter and client address resolution follow
/// `state.analytics_rate_limit` and `state.behind_proxy`. Handlers read the
/// peer address from `ConnectInfo<SocketAddr>`, so the router must be served
/// with `into_make_service_with_connect_info`.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(build_router(state))
}

/// Builds the routes without path normalization.
///
/// `/links/{link}` and `/links/{link}/analytics` share a parameter name because
/// the router requires one name per path position; the redirect reads it as a
/// short code and analytics as a numeric link id.
pub fn build_router(state: AppState) -> Router {
    let owner_router = api::routes::link_routes()
        .merge(api::routes::analytics_routes(&state))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));

    Router::new()
        .route("/health", get(health_handler))
        .route("/{short_code}", get(redirect_handler))
        .route("/links/{link}", get(redirect_handler))
        .merge(owner_router)
        .with_state(state)
        .layer(tracing::layer())
}
