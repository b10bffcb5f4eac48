//! Short code resolution for visitor redirects.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, error};

use crate::domain::click_worker::ClickSender;
use crate::domain::raw_visit::RawVisit;
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::user_agent::UserAgentParser;

/// Visitor metadata captured from the incoming request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestContext {
    /// Client address, already normalized.
    pub ip_address: String,
    pub user_agent: Option<String>,
    pub referrer: Option<String>,
}

/// Terminal result of resolving a short code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RedirectOutcome {
    NotFound,
    Expired,
    /// The link has neither a desktop nor a mobile URL.
    Misconfigured,
    Redirect(String),
}

impl RedirectOutcome {
    fn label(&self) -> &'static str {
        match self {
            RedirectOutcome::NotFound => "not_found",
            RedirectOutcome::Expired => "expired",
            RedirectOutcome::Misconfigured => "misconfigured",
            RedirectOutcome::Redirect(_) => "redirect",
        }
    }
}

/// Resolves short codes and schedules click recording.
///
/// Click recording goes through [`ClickSender::dispatch`], which never waits,
/// so the outcome is returned without depending on the analytics path.
pub struct RedirectService<L: LinkRepository + ?Sized> {
    repository: Arc<L>,
    clicks: ClickSender,
    user_agents: UserAgentParser,
}

impl<L: LinkRepository + ?Sized> RedirectService<L> {
    pub fn new(repository: Arc<L>, clicks: ClickSender) -> Self {
        Self {
            repository,
            clicks,
            user_agents: UserAgentParser::new(),
        }
    }

    /// Resolves `short_code` at the current time.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the link store fails. Every other
    /// result is a [`RedirectOutcome`].
    pub async fn resolve(
        &self,
        short_code: &str,
        ctx: RequestContext,
    ) -> Result<RedirectOutcome, AppError> {
        self.resolve_at(short_code, ctx, Utc::now()).await
    }

    /// Resolves `short_code` as of `now`.
    pub async fn resolve_at(
        &self,
        short_code: &str,
        ctx: RequestContext,
        now: DateTime<Utc>,
    ) -> Result<RedirectOutcome, AppError> {
        let outcome = match self.repository.find_by_code(short_code).await? {
            None => RedirectOutcome::NotFound,
            Some(link) if link.is_expired_at(now) => RedirectOutcome::Expired,
            Some(link) => {
                let device = self.user_agents.classify(ctx.user_agent.as_deref());

                match link.target_for(device) {
                    None => {
                        error!(link_id = link.id, short_code, "Link has no destination URL");
                        RedirectOutcome::Misconfigured
                    }
                    Some(target) => {
                        let target = target.to_string();
                        let visit = RawVisit::new(
                            link.id,
                            ctx.ip_address,
                            ctx.user_agent.as_deref(),
                            ctx.referrer.as_deref(),
                        );
                        self.clicks.dispatch(visit);

                        debug!(short_code, device = device.as_str(), %target, "Redirecting");
                        RedirectOutcome::Redirect(target)
                    }
                }
            }
        };

        metrics::counter!("redirects_total", "outcome" => outcome.label()).increment(1);
        Ok(outcome)
    }
}
