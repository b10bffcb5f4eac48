//! Owner-scoped click analytics.

use std::sync::Arc;

use serde_json::json;
use tracing::debug;

use crate::domain::entities::ClickEvent;
use crate::domain::repositories::{ClickFilter, ClickRepository, LinkRepository};
use crate::error::AppError;

/// One page of clicks plus the total number of matching clicks.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyticsPage {
    pub total: i64,
    pub clicks: Vec<ClickEvent>,
}

/// Service for retrieving click analytics for a link's owner.
pub struct AnalyticsService<L, C>
where
    L: LinkRepository + ?Sized,
    C: ClickRepository + ?Sized,
{
    links: Arc<L>,
    clicks: Arc<C>,
}

impl<L, C> AnalyticsService<L, C>
where
    L: LinkRepository + ?Sized,
    C: ClickRepository + ?Sized,
{
    pub fn new(links: Arc<L>, clicks: Arc<C>) -> Self {
        Self { links, clicks }
    }

    /// Returns a page of clicks for `link_id`, newest first.
    ///
    /// `total` counts every click inside the filter's date bounds and ignores
    /// `limit`/`offset`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Forbidden`] if the link does not exist or is not owned
    /// by `requester_id`. Both cases look the same to the caller.
    pub async fn get_analytics(
        &self,
        link_id: i64,
        requester_id: i64,
        filter: ClickFilter,
    ) -> Result<AnalyticsPage, AppError> {
        let owned = self
            .links
            .find_by_id(link_id)
            .await?
            .is_some_and(|link| link.is_owned_by(requester_id));

        if !owned {
            debug!(link_id, requester_id, "Analytics access denied");
            return Err(AppError::forbidden(
                "Access denied",
                json!({ "link_id": link_id }),
            ));
        }

        let total = self.clicks.count(link_id, filter.clone()).await?;
        let clicks = self.clicks.find_page(link_id, filter).await?;

        Ok(AnalyticsPage { total, clicks })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Link;
    use crate::domain::repositories::{MockClickRepository, MockLinkRepository};
    use chrono::{Duration, Utc};

    fn link(owner: i64) -> Link {
        Link {
            id: 3,
            short_code: "abc123".to_string(),
            long_url_desktop: "https://d.example".to_string(),
            long_url_mobile: None,
            name: None,
            expiry: None,
            image_url: None,
            created_by: owner,
            created_at: Utc::now(),
        }
    }

    fn links_returning(found: Option<Link>) -> Arc<MockLinkRepository> {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo
            .expect_find_by_id()
            .returning(move |_| Ok(found.clone()));
        Arc::new(mock_repo)
    }

    #[tokio::test]
    async fn test_owner_gets_page_and_total() {
        let mut clicks = MockClickRepository::new();
        clicks
            .expect_count()
            .withf(|link_id, _| *link_id == 3)
            .times(1)
            .returning(|_, _| Ok(5));
        clicks
            .expect_find_page()
            .withf(|link_id, filter| *link_id == 3 && filter.limit == 2 && filter.offset == 2)
            .times(1)
            .returning(|_, _| Ok(Vec::new()));

        let service = AnalyticsService::new(links_returning(Some(link(9))), Arc::new(clicks));

        let page = service
            .get_analytics(3, 9, ClickFilter::new(Some(2), Some(2)))
            .await
            .unwrap();

        assert_eq!(page.total, 5);
        assert!(page.clicks.is_empty());
    }

    #[tokio::test]
    async fn test_non_owner_is_forbidden_regardless_of_filter() {
        let start = Utc::now() - Duration::days(7);

        for filter in [
            ClickFilter::default(),
            ClickFilter::new(Some(1), Some(100)).with_date_range(Some(start), None),
        ] {
            let mut clicks = MockClickRepository::new();
            clicks.expect_count().times(0);
            clicks.expect_find_page().times(0);

            let service = AnalyticsService::new(links_returning(Some(link(9))), Arc::new(clicks));

            let err = service.get_analytics(3, 10, filter).await.unwrap_err();
            assert!(matches!(err, AppError::Forbidden { .. }));
        }
    }

    #[tokio::test]
    async fn test_missing_link_is_forbidden() {
        let service = AnalyticsService::new(links_returning(None), Arc::new(MockClickRepository::new()));

        let err = service
            .get_analytics(404, 1, ClickFilter::default())
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Forbidden { .. }));
        assert_eq!(err.to_string(), "Access denied");
    }
}
