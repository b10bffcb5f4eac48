//! Click enrichment and recording.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::entities::{DEFAULT_DEVICE_TYPE, NewClickEvent, UNKNOWN_LABEL};
use crate::domain::raw_visit::RawVisit;
use crate::domain::repositories::ClickRepository;
use crate::infrastructure::geo::GeoLookup;
use crate::utils::user_agent::UserAgentParser;

/// Turns raw visits into enriched click events and persists them.
///
/// Called from the background click worker. Nothing here is allowed to fail
/// outward: missing geo or user-agent data becomes null or default fields, and
/// insert failures are logged and dropped.
pub struct ClickRecorder<C: ClickRepository + ?Sized> {
    repository: Arc<C>,
    geo: Arc<dyn GeoLookup>,
    user_agents: UserAgentParser,
}

impl<C: ClickRepository + ?Sized> ClickRecorder<C> {
    pub fn new(repository: Arc<C>, geo: Arc<dyn GeoLookup>) -> Self {
        Self {
            repository,
            geo,
            user_agents: UserAgentParser::new(),
        }
    }

    /// Derives geo, device, browser and OS fields for a visit.
    pub fn enrich(&self, visit: &RawVisit) -> NewClickEvent {
        let location = self.geo.lookup(&visit.ip_address);
        let agent = self.user_agents.parse(&visit.user_agent);

        NewClickEvent {
            link_id: visit.link_id,
            ip_address: visit.ip_address.clone(),
            user_agent: visit.user_agent.clone(),
            referrer: visit.referrer.clone(),
            country: location.country,
            region: location.region,
            city: location.city,
            latitude: location.latitude,
            longitude: location.longitude,
            device_type: agent
                .device_type
                .map(|d| d.as_str())
                .unwrap_or(DEFAULT_DEVICE_TYPE)
                .to_string(),
            browser: label(
                agent.browser_name.as_deref(),
                agent.browser_version.as_deref(),
            ),
            os: label(agent.os_name.as_deref(), agent.os_version.as_deref()),
        }
    }

    /// Enriches and stores one visit. Returns true if the click was persisted.
    pub async fn record_click(&self, visit: RawVisit) -> bool {
        let click = self.enrich(&visit);

        match self.repository.insert(click).await {
            Ok(saved) => {
                debug!(link_id = saved.link_id, click_id = saved.id, "Click recorded");
                metrics::counter!("click_events_recorded_total").increment(1);
                true
            }
            Err(e) => {
                warn!(link_id = visit.link_id, error = %e, "Failed to record click");
                metrics::counter!("click_events_failed_total").increment(1);
                false
            }
        }
    }
}

/// `"{name} {version}"` trimmed, or `Unknown` when there is no name.
fn label(name: Option<&str>, version: Option<&str>) -> String {
    match name {
        Some(name) => format!("{} {}", name, version.unwrap_or_default())
            .trim()
            .to_string(),
        None => UNKNOWN_LABEL.to_string(),
    }
}
