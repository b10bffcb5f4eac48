//! DTOs for the link analytics endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use serde_with::{DisplayFromStr, serde_as};

use crate::domain::entities::ClickEvent;
use crate::domain::repositories::ClickFilter;
use crate::error::AppError;
use crate::utils::timestamp::parse_timestamp;

/// Query parameters for `GET /links/{id}/analytics`.
#[serde_as]
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsParams {
    pub start_date: Option<String>,
    pub end_date: Option<String>,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub limit: Option<i64>,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub offset: Option<i64>,
}

impl AnalyticsParams {
    /// Builds the click filter. `limit` and `offset` are clamped, never rejected.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if a date cannot be parsed.
    pub fn to_filter(&self) -> Result<ClickFilter, AppError> {
        let start = parse_date("startDate", self.start_date.as_deref())?;
        let end = parse_date("endDate", self.end_date.as_deref())?;

        Ok(ClickFilter::new(self.limit, self.offset).with_date_range(start, end))
    }
}

fn parse_date(field: &'static str, raw: Option<&str>) -> Result<Option<DateTime<Utc>>, AppError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => parse_timestamp(raw).map(Some).ok_or_else(|| {
            AppError::bad_request(
                format!("{field} must be a valid ISO 8601 date"),
                json!({ "field": field, "value": raw }),
            )
        }),
    }
}

/// One click as returned by the API, keyed by `link_analytics` column names.
#[derive(Debug, Serialize)]
pub struct ClickInfo {
    pub id: i64,
    pub link_id: i64,
    pub ip_address: String,
    pub user_agent: String,
    pub referrer: Option<String>,
    pub country: Option<String>,
    pub region: Option<String>,
    pub city: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub device_type: String,
    pub browser: String,
    pub os: String,
    pub clicked_at: DateTime<Utc>,
}

impl From<ClickEvent> for ClickInfo {
    fn from(c: ClickEvent) -> Self {
        Self {
            id: c.id,
            link_id: c.link_id,
            ip_address: c.ip_address,
            user_agent: c.user_agent,
            referrer: c.referrer,
            country: c.country,
            region: c.region,
            city: c.city,
            latitude: c.latitude,
            longitude: c.longitude,
            device_type: c.device_type,
            browser: c.browser,
            os: c.os,
            clicked_at: c.clicked_at,
        }
    }
}

/// Response body for `GET /links/{id}/analytics`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsResponse {
    pub total_clicks: i64,
    pub clicks: Vec<ClickInfo>,
}
