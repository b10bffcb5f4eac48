//! Handlers for link management endpoints.

use axum::{Extension, Json, extract::State, http::StatusCode};
use validator::Validate;

use crate::api::dto::link::{
    CreateLinkRequest, CreateLinkResponse, LinkListResponse, LinkResponse,
};
use crate::application::services::OwnerId;
use crate::domain::entities::Link;
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short link owned by the caller.
///
/// # Endpoint
///
/// `POST /links` (also `POST /links/create`)
///
/// # Request Body
///
/// ```json
/// {
///   "longUrlDesktop": "https://example.com/landing",
///   "longUrlMobile": "https://m.example.com/landing",
///   "name": "Spring campaign",
///   "expiry": "2030-01-01T00:00:00Z",
///   "imageUrl": "https://example.com/og.png",
///   "shortCode": "spring30"
/// }
/// ```
///
/// Only `longUrlDesktop` is required. Without `shortCode` a random 6-character
/// code is generated.
///
/// # Errors
///
/// - 400 on validation failure or when `shortCode` is already in use
/// - 401 without a valid bearer token
pub async fn create_link_handler(
    State(state): State<AppState>,
    Extension(OwnerId(owner_id)): Extension<OwnerId>,
    Json(payload): Json<CreateLinkRequest>,
) -> Result<(StatusCode, Json<CreateLinkResponse>), AppError> {
    payload.validate()?;

    let link = state
        .link_service
        .create_link(owner_id, payload.into_fields()?)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateLinkResponse {
            message: "Short link created successfully".to_string(),
            link: to_response(&state, link),
        }),
    ))
}

/// Lists the caller's links, newest first.
///
/// # Endpoint
///
/// `GET /links/mine` (also `GET /links/my-links`)
pub async fn my_links_handler(
    State(state): State<AppState>,
    Extension(OwnerId(owner_id)): Extension<OwnerId>,
) -> Result<Json<LinkListResponse>, AppError> {
    let links: Vec<LinkResponse> = state
        .link_service
        .list_by_owner(owner_id)
        .await?
        .into_iter()
        .map(|link| to_response(&state, link))
        .collect();

    Ok(Json(LinkListResponse {
        total_links: links.len(),
        links,
    }))
}

fn to_response(state: &AppState, link: Link) -> LinkResponse {
    let short_url = state
        .link_service
        .get_short_url(&state.base_url, &link.short_code);
    LinkResponse::new(link, short_url)
}
