//! Shared application state injected into every handler.

use std::sync::Arc;
use std::time::Duration;

use crate::application::services::{AnalyticsService, AuthService, LinkService, RedirectService};
use crate::domain::click_worker::ClickSender;
use crate::domain::repositories::{ClickRepository, LinkRepository};

pub type DynLinkService = LinkService<dyn LinkRepository>;
pub type DynRedirectService = RedirectService<dyn LinkRepository>;
pub type DynAnalyticsService = AnalyticsService<dyn LinkRepository, dyn ClickRepository>;

/// Per-client quota for the analytics endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitSettings {
    pub max_requests: u32,
    pub window: Duration,
}

impl Default for RateLimitSettings {
    fn default() -> Self {
        Self {
            max_requests: 1000,
            window: Duration::from_secs(30 * 60),
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<DynLinkService>,
    pub redirect_service: Arc<DynRedirectService>,
    pub analytics_service: Arc<DynAnalyticsService>,
    pub auth_service: Arc<AuthService>,
    pub click_sender: ClickSender,
    /// Prefix for `shortUrl` in link responses.
    pub base_url: String,
    /// Trust `X-Forwarded-For` / `X-Real-IP` for the client address.
    pub behind_proxy: bool,
    pub analytics_rate_limit: RateLimitSettings,
}

impl AppState {
    /// Wires services over the given repositories.
    pub fn new(
        links: Arc<dyn LinkRepository>,
        clicks: Arc<dyn ClickRepository>,
        auth_service: AuthService,
        click_sender: ClickSender,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            link_service: Arc::new(LinkService::new(links.clone())),
            redirect_service: Arc::new(RedirectService::new(links.clone(), click_sender.clone())),
            analytics_service: Arc::new(AnalyticsService::new(links, clicks)),
            auth_service: Arc::new(auth_service),
            click_sender,
            base_url: base_url.into(),
            behind_proxy: false,
            analytics_rate_limit: RateLimitSettings::default(),
        }
    }

    pub fn with_behind_proxy(mut self, behind_proxy: bool) -> Self {
        self.behind_proxy = behind_proxy;
        self
    }

    pub fn with_analytics_rate_limit(mut self, settings: RateLimitSettings) -> Self {
        self.analytics_rate_limit = settings;
        self
    }
}
