//! PostgreSQL implementation of link repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

/// PostgreSQL repository backed by the `urls` table.
///
/// Uniqueness of codes comes from the `urls_short_code_key` constraint;
/// inserts use `ON CONFLICT DO NOTHING` so a collision is reported as
/// "not inserted" instead of an error.
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
}

impl PgLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct LinkRow {
    short_code: String,
    target_url: String,
    clicks: i64,
    created_at: DateTime<Utc>,
}

impl From<LinkRow> for Link {
    fn from(row: LinkRow) -> Self {
        Link::new(row.short_code, row.target_url, row.clicks, row.created_at)
    }
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn insert_if_absent(&self, new_link: NewLink) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            INSERT INTO urls (short_code, target_url)
            VALUES ($1, $2)
            ON CONFLICT (short_code) DO NOTHING
            "#,
        )
        .bind(&new_link.code)
        .bind(&new_link.target_url)
        .execute(self.pool.as_ref())
        .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn find_target_url(&self, code: &str) -> Result<Option<String>, AppError> {
        let target = sqlx::query_scalar::<_, String>(
            "SELECT target_url FROM urls WHERE short_code = $1 LIMIT 1",
        )
        .bind(code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(target)
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            SELECT short_code, target_url, clicks, created_at
            FROM urls
            WHERE short_code = $1
            LIMIT 1
            "#,
        )
        .bind(code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Link::from))
    }

    async fn increment_clicks(&self, code: &str) -> Result<(), AppError> {
        sqlx::query("UPDATE urls SET clicks = clicks + 1 WHERE short_code = $1")
            .bind(code)
            .execute(self.pool.as_ref())
            .await?;

        Ok(())
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(self.pool.as_ref()).await?;
        Ok(())
    }
}
