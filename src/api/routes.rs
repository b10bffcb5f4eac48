//! Owner API route configuration.
//!
//! Every endpoint here requires Bearer token authentication via
//! [`crate::api::middleware::auth`]; the caller's identity reaches handlers as
//! an `Extension<OwnerId>`.

use crate::api::handlers::{analytics_handler, create_link_handler, my_links_handler};
use crate::api::middleware::rate_limit;
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Link management routes.
///
/// # Endpoints
///
/// - `POST /links`          - Create a short link
/// - `POST /links/create`   - Alias of `POST /links`
/// - `GET  /links/mine`     - List the caller's links
/// - `GET  /links/my-links` - Alias of `GET /links/mine`
pub fn link_routes() -> Router<AppState> {
    Router::new()
        .route("/links", post(create_link_handler))
        .route("/links/create", post(create_link_handler))
        .route("/links/mine", get(my_links_handler))
        .route("/links/my-links", get(my_links_handler))
}

/// Analytics routes, rate limited per client address.
///
/// # Endpoints
///
/// - `GET /links/{id}/analytics` - Paginated clicks for an owned link
pub fn analytics_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/links/{link}/analytics", get(analytics_handler))
        .layer(rate_limit::analytics_layer(
            state.analytics_rate_limit,
            state.behind_proxy,
        ))
}
