//! Handler for short URL redirect.

use axum::{
    extract::{ConnectInfo, Path, State},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::net::SocketAddr;

use crate::application::services::{RedirectOutcome, RequestContext};
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::client_ip::{client_ip, referrer};

/// Redirects a short code to its destination.
///
/// # Endpoint
///
/// `GET /{shortCode}` (also `GET /links/{shortCode}`)
///
/// # Request Flow
///
/// 1. Resolve the code (lookup, expiry check, device targeting)
/// 2. Hand the visit to the click queue without waiting
/// 3. Return `302 Found` with the target in `Location`
///
/// # Errors
///
/// - 404 if the short code does not exist
/// - 410 if the link has expired
/// - 500 if the link has no destination or the store fails
pub async fn redirect_handler(
    Path(short_code): Path<String>,
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let ctx = RequestContext {
        ip_address: client_ip(&headers, addr, state.behind_proxy),
        user_agent: headers
            .get(header::USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        referrer: referrer(&headers),
    };

    match state.redirect_service.resolve(&short_code, ctx).await? {
        RedirectOutcome::Redirect(target) => {
            Ok((StatusCode::FOUND, [(header::LOCATION, target)]).into_response())
        }
        RedirectOutcome::NotFound => Err(AppError::not_found(
            "Link not found",
            json!({ "short_code": short_code }),
        )),
        RedirectOutcome::Expired => Err(AppError::gone(
            "Link has expired",
            json!({ "short_code": short_code }),
        )),
        RedirectOutcome::Misconfigured => Err(AppError::internal(
            "Link has no destination URL",
            json!({ "short_code": short_code }),
        )),
    }
}
