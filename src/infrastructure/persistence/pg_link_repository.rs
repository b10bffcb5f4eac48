//! PostgreSQL implementation of link repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use std::sync::Arc;
use tracing::debug;

use crate::domain::entities::{InsertOutcome, Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::db_error::is_unique_violation_on_code;

const LINK_COLUMNS: &str = "id, short_code, long_url_desktop, long_url_mobile, name, expiry, \
                            image_url, created_by, created_at";

#[derive(Debug, FromRow)]
struct LinkRow {
    id: i64,
    short_code: String,
    long_url_desktop: String,
    long_url_mobile: Option<String>,
    name: Option<String>,
    expiry: Option<DateTime<Utc>>,
    image_url: Option<String>,
    created_by: i64,
    created_at: DateTime<Utc>,
}

impl From<LinkRow> for Link {
    fn from(r: LinkRow) -> Self {
        Link {
            id: r.id,
            short_code: r.short_code,
            long_url_desktop: r.long_url_desktop,
            long_url_mobile: r.long_url_mobile,
            name: r.name,
            expiry: r.expiry,
            image_url: r.image_url,
            created_by: r.created_by,
            created_at: r.created_at,
        }
    }
}

/// PostgreSQL repository for link storage and retrieval.
///
/// Short code uniqueness is enforced by the `links_short_code_key` constraint,
/// so concurrent inserts of the same code cannot both succeed.
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
}

impl PgLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn insert(&self, new_link: NewLink) -> Result<InsertOutcome, AppError> {
        let sql = format!(
            r#"
            INSERT INTO links
                (short_code, long_url_desktop, long_url_mobile, name, expiry, image_url, created_by)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {LINK_COLUMNS}
            "#
        );

        let result = sqlx::query_as::<_, LinkRow>(&sql)
            .bind(&new_link.short_code)
            .bind(&new_link.long_url_desktop)
            .bind(&new_link.long_url_mobile)
            .bind(&new_link.name)
            .bind(new_link.expiry)
            .bind(&new_link.image_url)
            .bind(new_link.created_by)
            .fetch_one(self.pool.as_ref())
            .await;

        match result {
            Ok(row) => Ok(InsertOutcome::Created(row.into())),
            Err(e) if is_unique_violation_on_code(&e) => {
                debug!(short_code = %new_link.short_code, "Short code already taken");
                Ok(InsertOutcome::CodeTaken)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn exists_by_code(&self, short_code: &str) -> Result<bool, AppError> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM links WHERE short_code = $1)")
                .bind(short_code)
                .fetch_one(self.pool.as_ref())
                .await?;

        Ok(exists)
    }

    async fn find_by_code(&self, short_code: &str) -> Result<Option<Link>, AppError> {
        let sql = format!("SELECT {LINK_COLUMNS} FROM links WHERE short_code = $1");

        let row = sqlx::query_as::<_, LinkRow>(&sql)
            .bind(short_code)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(Link::from))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Link>, AppError> {
        let sql = format!("SELECT {LINK_COLUMNS} FROM links WHERE id = $1");

        let row = sqlx::query_as::<_, LinkRow>(&sql)
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(Link::from))
    }

    async fn list_by_owner(&self, owner_id: i64) -> Result<Vec<Link>, AppError> {
        let sql = format!(
            "SELECT {LINK_COLUMNS} FROM links WHERE created_by = $1 ORDER BY created_at DESC, id DESC"
        );

        let rows = sqlx::query_as::<_, LinkRow>(&sql)
            .bind(owner_id)
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(rows.into_iter().map(Link::from).collect())
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(self.pool.as_ref()).await?;
        Ok(())
    }
}
