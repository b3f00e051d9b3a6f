//! PostgreSQL implementation of the link repository.

use async_trait::async_trait;
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{NewShortLink, ShortLink, ShortLinkPatch};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

/// PostgreSQL repository for short link storage.
///
/// Uses SQLx prepared statements with runtime binding; unique index
/// violations surface as [`AppError::StoreConflict`] through the shared
/// error mapping.
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
    async fn insert(&self, new_link: NewShortLink) -> Result<ShortLink, AppError> {
        let link = sqlx::query_as::<_, ShortLink>(
            r#"
            INSERT INTO short_links (short_code, long_url, edit_id, expires_at, qr_code)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, short_code, long_url, edit_id, expires_at, qr_code, created_at
            "#,
        )
        .bind(&new_link.short_code)
        .bind(&new_link.long_url)
        .bind(&new_link.edit_id)
        .bind(new_link.expires_at)
        .bind(&new_link.qr_code)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(link)
    }

    async fn find_by_code(&self, short_code: &str) -> Result<Option<ShortLink>, AppError> {
        let link = sqlx::query_as::<_, ShortLink>(
            r#"
            SELECT id, short_code, long_url, edit_id, expires_at, qr_code, created_at
            FROM short_links
            WHERE short_code = $1
            "#,
        )
        .bind(short_code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(link)
    }

    async fn find_by_long_url(&self, long_url: &str) -> Result<Option<ShortLink>, AppError> {
        // Creation deduplicates, so at most one row matches; ordering keeps
        // the lookup deterministic regardless.
        let link = sqlx::query_as::<_, ShortLink>(
            r#"
            SELECT id, short_code, long_url, edit_id, expires_at, qr_code, created_at
            FROM short_links
            WHERE long_url = $1
            ORDER BY id
            LIMIT 1
            "#,
        )
        .bind(long_url)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(link)
    }

    async fn find_by_edit_id(&self, edit_id: &str) -> Result<Option<ShortLink>, AppError> {
        let link = sqlx::query_as::<_, ShortLink>(
            r#"
            SELECT id, short_code, long_url, edit_id, expires_at, qr_code, created_at
            FROM short_links
            WHERE edit_id = $1
            "#,
        )
        .bind(edit_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(link)
    }

    async fn update(&self, edit_id: &str, patch: ShortLinkPatch) -> Result<ShortLink, AppError> {
        let link = sqlx::query_as::<_, ShortLink>(
            r#"
            UPDATE short_links
            SET short_code = COALESCE($2, short_code),
                qr_code    = COALESCE($3, qr_code),
                expires_at = $4
            WHERE edit_id = $1
            RETURNING id, short_code, long_url, edit_id, expires_at, qr_code, created_at
            "#,
        )
        .bind(edit_id)
        .bind(patch.short_code)
        .bind(patch.qr_code)
        .bind(patch.expires_at)
        .fetch_optional(self.pool.as_ref())
        .await?;

        link.ok_or_else(|| AppError::not_found("Short link not found", json!({})))
    }

    async fn delete_by_code(&self, short_code: &str) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM short_links WHERE short_code = $1")
            .bind(short_code)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(self.pool.as_ref()).await?;
        Ok(())
    }
}
