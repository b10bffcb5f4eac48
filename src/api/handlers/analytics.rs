//! Handler for per-link click analytics.

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};

use crate::api::dto::analytics::{AnalyticsParams, AnalyticsResponse};
use crate::application::services::OwnerId;
use crate::error::AppError;
use crate::state::AppState;

/// Returns a page of clicks for one of the caller's links.
///
/// # Endpoint
///
/// `GET /links/{id}/analytics?startDate=&endDate=&limit=&offset=`
///
/// `limit` defaults to 100 (max 1000) and `offset` to 0. Clicks are ordered
/// newest first; `totalClicks` counts every click in the date range.
///
/// # Errors
///
/// - 400 if a date is malformed
/// - 401 without a valid bearer token
/// - 403 if the link does not exist or belongs to someone else
/// - 429 when the per-client quota is exhausted
pub async fn analytics_handler(
    State(state): State<AppState>,
    Path(link_id): Path<i64>,
    Query(params): Query<AnalyticsParams>,
    Extension(OwnerId(owner_id)): Extension<OwnerId>,
) -> Result<Json<AnalyticsResponse>, AppError> {
    let filter = params.to_filter()?;

    let page = state
        .analytics_service
        .get_analytics(link_id, owner_id, filter)
        .await?;

    Ok(Json(AnalyticsResponse {
        total_clicks: page.total,
        clicks: page.clicks.into_iter().map(Into::into).collect(),
    }))
}
