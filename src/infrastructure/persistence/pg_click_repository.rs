//! PostgreSQL implementation of click repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use std::sync::Arc;

use crate::domain::entities::{ClickEvent, NewClickEvent};
use crate::domain::repositories::{ClickFilter, ClickRepository};
use crate::error::AppError;

const CLICK_COLUMNS: &str = "id, link_id, ip_address, user_agent, referrer, country, region, city, \
                             latitude, longitude, device_type, browser, os, clicked_at";

#[derive(Debug, FromRow)]
struct ClickRow {
    id: i64,
    link_id: i64,
    ip_address: String,
    user_agent: String,
    referrer: Option<String>,
    country: Option<String>,
    region: Option<String>,
    city: Option<String>,
    latitude: Option<f64>,
    longitude: Option<f64>,
    device_type: String,
    browser: String,
    os: String,
    clicked_at: DateTime<Utc>,
}

impl From<ClickRow> for ClickEvent {
    fn from(r: ClickRow) -> Self {
        ClickEvent {
            id: r.id,
            link_id: r.link_id,
            ip_address: r.ip_address,
            user_agent: r.user_agent,
            referrer: r.referrer,
            country: r.country,
            region: r.region,
            city: r.city,
            latitude: r.latitude,
            longitude: r.longitude,
            device_type: r.device_type,
            browser: r.browser,
            os: r.os,
            clicked_at: r.clicked_at,
        }
    }
}

/// PostgreSQL repository for the append-only `link_analytics` table.
pub struct PgClickRepository {
    pool: Arc<PgPool>,
}

impl PgClickRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ClickRepository for PgClickRepository {
    async fn insert(&self, new_click: NewClickEvent) -> Result<ClickEvent, AppError> {
        let sql = format!(
            r#"
            INSERT INTO link_analytics
                (link_id, ip_address, user_agent, referrer, country, region, city,
                 latitude, longitude, device_type, browser, os)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING {CLICK_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, ClickRow>(&sql)
            .bind(new_click.link_id)
            .bind(&new_click.ip_address)
            .bind(&new_click.user_agent)
            .bind(&new_click.referrer)
            .bind(&new_click.country)
            .bind(&new_click.region)
            .bind(&new_click.city)
            .bind(new_click.latitude)
            .bind(new_click.longitude)
            .bind(&new_click.device_type)
            .bind(&new_click.browser)
            .bind(&new_click.os)
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(row.into())
    }

    async fn find_page(
        &self,
        link_id: i64,
        filter: ClickFilter,
    ) -> Result<Vec<ClickEvent>, AppError> {
        let sql = format!(
            r#"
            SELECT {CLICK_COLUMNS}
            FROM link_analytics
            WHERE link_id = $1
              AND ($2::timestamptz IS NULL OR clicked_at >= $2)
              AND ($3::timestamptz IS NULL OR clicked_at <= $3)
            ORDER BY clicked_at DESC, id DESC
            LIMIT $4 OFFSET $5
            "#
        );

        let rows = sqlx::query_as::<_, ClickRow>(&sql)
            .bind(link_id)
            .bind(filter.start_date)
            .bind(filter.end_date)
            .bind(filter.limit)
            .bind(filter.offset)
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(rows.into_iter().map(ClickEvent::from).collect())
    }

    async fn count(&self, link_id: i64, filter: ClickFilter) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM link_analytics
            WHERE link_id = $1
              AND ($2::timestamptz IS NULL OR clicked_at >= $2)
              AND ($3::timestamptz IS NULL OR clicked_at <= $3)
            "#,
        )
        .bind(link_id)
        .bind(filter.start_date)
        .bind(filter.end_date)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(count)
    }
}
