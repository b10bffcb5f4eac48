//! Per-client rate limiting for the analytics endpoint.

use axum::extract::ConnectInfo;
use axum::http::Request;
use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_governor::{
    GovernorError, GovernorLayer, governor::GovernorConfigBuilder, key_extractor::KeyExtractor,
};

use crate::state::RateLimitSettings;
use crate::utils::client_ip::client_ip;

/// Keys requests by client address.
///
/// Uses the socket peer address, or the proxy headers when `behind_proxy` is
/// set (see [`client_ip`]).
#[derive(Debug, Clone, Copy)]
pub struct ClientIpKeyExtractor {
    behind_proxy: bool,
}

impl ClientIpKeyExtractor {
    pub fn new(behind_proxy: bool) -> Self {
        Self { behind_proxy }
    }
}

impl KeyExtractor for ClientIpKeyExtractor {
    type Key = String;

    fn extract<T>(&self, req: &Request<T>) -> Result<Self::Key, GovernorError> {
        let peer = req
            .extensions()
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| *addr)
            .ok_or(GovernorError::UnableToExtractKey)?;

        Ok(client_ip(req.headers(), peer, self.behind_proxy))
    }
}

/// Creates the analytics rate limiter.
///
/// The quota is `max_requests` per `window`, enforced as a token bucket with a
/// burst of `max_requests` that refills one request every `window / max_requests`.
/// Requests exceeding the limit receive `429 Too Many Requests`.
///
/// # Example
///
/// ```rust,ignore
/// let analytics = Router::new()
///     .route("/links/{id}/analytics", get(analytics_handler))
///     .layer(rate_limit::analytics_layer(settings, behind_proxy));
/// ```
pub fn analytics_layer(
    settings: RateLimitSettings,
    behind_proxy: bool,
) -> GovernorLayer<ClientIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body> {
    let burst = settings.max_requests.max(1);
    let period = replenish_period(settings);

    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .key_extractor(ClientIpKeyExtractor::new(behind_proxy))
            .period(period)
            .burst_size(burst)
            .finish()
            .expect("period and burst size are non-zero"),
    );

    GovernorLayer::new(governor_conf)
}

fn replenish_period(settings: RateLimitSettings) -> Duration {
    (settings.window / settings.max_requests.max(1)).max(Duration::from_millis(1))
}
