//! Raw visit captured on the redirect path, before enrichment.

/// An un-enriched visit, handed from the redirect path to the click worker.
///
/// The IP is already normalized (see [`crate::utils::client_ip::normalize_ip`]).
/// Enrichment into a [`crate::domain::entities::NewClickEvent`] happens in the
/// background so the redirect never waits on geo or user-agent parsing.
#[derive(Debug, Clone, PartialEq)]
pub struct RawVisit {
    pub link_id: i64,
    pub ip_address: String,
    pub user_agent: String,
    pub referrer: Option<String>,
}

impl RawVisit {
    pub fn new(
        link_id: i64,
        ip_address: String,
        user_agent: Option<&str>,
        referrer: Option<&str>,
    ) -> Self {
        Self {
            link_id,
            ip_address,
            user_agent: user_agent.unwrap_or("Unknown").to_string(),
            referrer: referrer.map(|s| s.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_visit_full() {
        let visit = RawVisit::new(
            5,
            "192.168.1.1".to_string(),
            Some("Mozilla/5.0"),
            Some("https://google.com"),
        );

        assert_eq!(visit.link_id, 5);
        assert_eq!(visit.ip_address, "192.168.1.1");
        assert_eq!(visit.user_agent, "Mozilla/5.0");
        assert_eq!(visit.referrer.as_deref(), Some("https://google.com"));
    }

    #[test]
    fn test_raw_visit_missing_user_agent() {
        let visit = RawVisit::new(1, "127.0.0.1".to_string(), None, None);

        assert_eq!(visit.user_agent, "Unknown");
        assert!(visit.referrer.is_none());
    }
}
