//! In-memory implementation of the link repository.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;

use crate::domain::entities::{NewShortLink, ShortLink, ShortLinkPatch};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

/// In-memory [`LinkRepository`] mirroring the PostgreSQL schema semantics.
///
/// Backs the integration test suite so handlers and services can be
/// exercised without a running database. The unique indexes on `short_code`
/// and `edit_id` are enforced like their SQL counterparts, surfacing
/// [`AppError::StoreConflict`] with the matching constraint name. Like the
/// real store, it never interprets expirations; reaping is the service's
/// job.
pub struct MemoryLinkRepository {
    table: Mutex<MemoryTable>,
}

#[derive(Default)]
struct MemoryTable {
    rows: Vec<ShortLink>,
    next_id: i64,
}

impl MemoryLinkRepository {
    pub fn new() -> Self {
        Self {
            table: Mutex::new(MemoryTable::default()),
        }
    }
}

impl Default for MemoryLinkRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LinkRepository for MemoryLinkRepository {
    async fn insert(&self, new_link: NewShortLink) -> Result<ShortLink, AppError> {
        let mut table = self.table.lock().expect("repository mutex poisoned");

        if table
            .rows
            .iter()
            .any(|row| row.short_code == new_link.short_code)
        {
            return Err(AppError::store_conflict(Some("short_links_short_code_key")));
        }
        if table.rows.iter().any(|row| row.edit_id == new_link.edit_id) {
            return Err(AppError::store_conflict(Some("short_links_edit_id_key")));
        }

        table.next_id += 1;
        let link = ShortLink {
            id: table.next_id,
            short_code: new_link.short_code,
            long_url: new_link.long_url,
            edit_id: new_link.edit_id,
            expires_at: new_link.expires_at,
            qr_code: new_link.qr_code,
            created_at: Utc::now(),
        };

        table.rows.push(link.clone());
        Ok(link)
    }

    async fn find_by_code(&self, short_code: &str) -> Result<Option<ShortLink>, AppError> {
        let table = self.table.lock().expect("repository mutex poisoned");
        Ok(table
            .rows
            .iter()
            .find(|row| row.short_code == short_code)
            .cloned())
    }

    async fn find_by_long_url(&self, long_url: &str) -> Result<Option<ShortLink>, AppError> {
        let table = self.table.lock().expect("repository mutex poisoned");
        Ok(table
            .rows
            .iter()
            .find(|row| row.long_url == long_url)
            .cloned())
    }

    async fn find_by_edit_id(&self, edit_id: &str) -> Result<Option<ShortLink>, AppError> {
        let table = self.table.lock().expect("repository mutex poisoned");
        Ok(table
            .rows
            .iter()
            .find(|row| row.edit_id == edit_id)
            .cloned())
    }

    async fn update(&self, edit_id: &str, patch: ShortLinkPatch) -> Result<ShortLink, AppError> {
        let mut table = self.table.lock().expect("repository mutex poisoned");

        if let Some(code) = &patch.short_code {
            let taken = table
                .rows
                .iter()
                .any(|row| row.short_code == *code && row.edit_id != edit_id);
            if taken {
                return Err(AppError::store_conflict(Some("short_links_short_code_key")));
            }
        }

        let row = table
            .rows
            .iter_mut()
            .find(|row| row.edit_id == edit_id)
            .ok_or_else(|| AppError::not_found("Short link not found", json!({})))?;

        if let Some(code) = patch.short_code {
            row.short_code = code;
        }
        if let Some(qr_code) = patch.qr_code {
            row.qr_code = qr_code;
        }
        row.expires_at = patch.expires_at;

        Ok(row.clone())
    }

    async fn delete_by_code(&self, short_code: &str) -> Result<bool, AppError> {
        let mut table = self.table.lock().expect("repository mutex poisoned");

        let before = table.rows.len();
        table.rows.retain(|row| row.short_code != short_code);
        Ok(table.rows.len() < before)
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}
