//! Repository trait for click events.

use crate::domain::entities::{ClickEvent, NewClickEvent};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Default page size for click queries.
pub const DEFAULT_CLICK_LIMIT: i64 = 100;

/// Largest page size a caller may request.
pub const MAX_CLICK_LIMIT: i64 = 1000;

/// Filter criteria for click queries.
///
/// Date bounds are inclusive. `limit` and `offset` only affect the page of
/// records, never the total count.
#[derive(Debug, Clone, PartialEq)]
pub struct ClickFilter {
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub limit: i64,
    pub offset: i64,
}

impl ClickFilter {
    /// Creates a filter from caller-supplied pagination.
    ///
    /// `limit` defaults to 100 and is clamped to `1..=1000`; `offset` defaults to 0
    /// and negative values are raised to 0.
    pub fn new(limit: Option<i64>, offset: Option<i64>) -> Self {
        Self {
            start_date: None,
            end_date: None,
            limit: limit
                .unwrap_or(DEFAULT_CLICK_LIMIT)
                .clamp(1, MAX_CLICK_LIMIT),
            offset: offset.unwrap_or(0).max(0),
        }
    }

    /// Adds date range filtering to the query.
    pub fn with_date_range(
        mut self,
        start_date: Option<DateTime<Utc>>,
        end_date: Option<DateTime<Utc>>,
    ) -> Self {
        self.start_date = start_date;
        self.end_date = end_date;
        self
    }

    /// Returns true if `clicked_at` falls inside the date bounds.
    pub fn matches(&self, clicked_at: DateTime<Utc>) -> bool {
        self.start_date.is_none_or(|start| clicked_at >= start)
            && self.end_date.is_none_or(|end| clicked_at <= end)
    }
}

impl Default for ClickFilter {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// Repository interface for click recording and retrieval.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgClickRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClickRepository: Send + Sync {
    /// Appends a click event.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors, including a dangling `link_id`.
    async fn insert(&self, new_click: NewClickEvent) -> Result<ClickEvent, AppError>;

    /// Returns one page of clicks for a link, newest first.
    async fn find_page(&self, link_id: i64, filter: ClickFilter)
    -> Result<Vec<ClickEvent>, AppError>;

    /// Counts clicks for a link matching the filter's date bounds.
    async fn count(&self, link_id: i64, filter: ClickFilter) -> Result<i64, AppError>;
}
