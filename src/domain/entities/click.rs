//! Click event entity representing a single recorded redirect.

use chrono::{DateTime, Utc};

/// Device type stored when the user-agent parser gives no classification.
pub const DEFAULT_DEVICE_TYPE: &str = "desktop";

/// Browser/OS label stored when the parser cannot name them.
pub const UNKNOWN_LABEL: &str = "Unknown";

/// A click recorded when a short link is resolved.
///
/// Geographic fields are derived from the visitor IP and may be absent;
/// device, browser and OS are derived from the user-agent and always carry a value.
#[derive(Debug, Clone, PartialEq)]
pub struct ClickEvent {
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

/// Enriched click ready to be persisted. The timestamp is set by the database.
#[derive(Debug, Clone, PartialEq)]
pub struct NewClickEvent {
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
}
