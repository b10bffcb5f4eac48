//! Bearer token authentication middleware.

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::Response,
};
use axum_auth::AuthBearer;

use crate::{error::AppError, state::AppState};

/// Authenticates requests using Bearer tokens from Authorization header.
///
/// # Header Format
///
/// ```text
/// Authorization: Bearer <token>
/// ```
///
/// On success the verified [`crate::application::services::OwnerId`] is stored in
/// the request extensions for handlers to pick up with `Extension<OwnerId>`.
///
/// # Errors
///
/// Returns `401 Unauthorized` if the header is missing or malformed, or if the
/// token signature or expiry is invalid. 401 responses carry
/// `WWW-Authenticate: Bearer` per RFC 6750.
pub async fn layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let AuthBearer(token) = AuthBearer::from_request_parts(&mut parts, &())
        .await
        .map_err(|_| {
            AppError::unauthorized(
                "Unauthorized",
                serde_json::json!({"reason": "Authorization header is missing or invalid"}),
            )
        })?;

    let owner = st.auth_service.authenticate(&token)?;
    parts.extensions.insert(owner);

    Ok(next.run(Request::from_parts(parts, body)).await)
}
