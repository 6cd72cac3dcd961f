//! # Item Repository
//!
//! Database operations for catalog items.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use tally_core::{Item, ItemDraft, Page};
use tally_engine::{ItemStore, StoreResult};

use crate::error::DbResult;
use crate::repository::bounds;

const COLUMNS: &str = "id, name, cost_cents, price_cents, sort, created_at, updated_at, deleted_at";

/// Repository for item database operations.
#[derive(Debug, Clone)]
pub struct ItemRepository {
    pool: SqlitePool,
}

impl ItemRepository {
    pub fn new(pool: SqlitePool) -> Self {
        ItemRepository { pool }
    }

    /// Inserts an item and returns the generated id.
    pub async fn insert(&self, draft: &ItemDraft) -> DbResult<i64> {
        let now = Utc::now();

        let result = sqlx::query(
            "INSERT INTO items (name, cost_cents, price_cents, sort, created_at, updated_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?5)",
        )
        .bind(&draft.name)
        .bind(draft.cost_cents)
        .bind(draft.price_cents)
        .bind(draft.sort)
        .bind(now)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        debug!(id, name = %draft.name, "Inserted item");
        Ok(id)
    }

    pub async fn exists(&self, id: i64) -> DbResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM items WHERE id = ?1 AND deleted_at IS NULL)",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    pub async fn find_id_by_name(&self, name: &str) -> DbResult<Option<i64>> {
        let id = sqlx::query_scalar("SELECT id FROM items WHERE name = ?1 AND deleted_at IS NULL")
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;

        Ok(id)
    }

    pub async fn find_by_id(&self, id: i64) -> DbResult<Option<Item>> {
        let item = sqlx::query_as::<_, Item>(&format!(
            "SELECT {COLUMNS} FROM items WHERE id = ?1 AND deleted_at IS NULL"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(item)
    }

    pub async fn list(&self, page: Page) -> DbResult<Vec<Item>> {
        let (limit, offset) = bounds(page);

        let items = sqlx::query_as::<_, Item>(&format!(
            "SELECT {COLUMNS} FROM items WHERE deleted_at IS NULL \
             ORDER BY id LIMIT ?1 OFFSET ?2"
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        debug!(count = items.len(), "Listed items");
        Ok(items)
    }

    /// Replaces every editable field. Existing transactions keep the price
    /// they were written with.
    pub async fn replace(&self, id: i64, draft: &ItemDraft) -> DbResult<Option<Item>> {
        let item = sqlx::query_as::<_, Item>(&format!(
            "UPDATE items SET name = ?1, cost_cents = ?2, price_cents = ?3, sort = ?4, \
             updated_at = ?5 \
             WHERE id = ?6 AND deleted_at IS NULL \
             RETURNING {COLUMNS}"
        ))
        .bind(&draft.name)
        .bind(draft.cost_cents)
        .bind(draft.price_cents)
        .bind(draft.sort)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        debug!(id, updated = item.is_some(), "Replaced item");
        Ok(item)
    }

    pub async fn soft_delete(&self, id: i64) -> DbResult<bool> {
        let now = Utc::now();

        let result = sqlx::query(
            "UPDATE items SET deleted_at = ?1, updated_at = ?1 \
             WHERE id = ?2 AND deleted_at IS NULL",
        )
        .bind(now)
        .bind(id)
        .execute(&self.pool)
        .await?;

        debug!(id, rows = result.rows_affected(), "Soft-deleted item");
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl ItemStore for ItemRepository {
    async fn create(&self, draft: &ItemDraft) -> StoreResult<i64> {
        Ok(self.insert(draft).await?)
    }

    async fn id_exists(&self, id: i64) -> StoreResult<bool> {
        Ok(self.exists(id).await?)
    }

    async fn id_by_name(&self, name: &str) -> StoreResult<Option<i64>> {
        Ok(self.find_id_by_name(name).await?)
    }

    async fn get_by_id(&self, id: i64) -> StoreResult<Option<Item>> {
        Ok(self.find_by_id(id).await?)
    }

    async fn get_all(&self, page: Page) -> StoreResult<Vec<Item>> {
        Ok(self.list(page).await?)
    }

    async fn update(&self, id: i64, draft: &ItemDraft) -> StoreResult<Option<Item>> {
        Ok(self.replace(id, draft).await?)
    }

    async fn delete(&self, id: i64) -> StoreResult<bool> {
        Ok(self.soft_delete(id).await?)
    }
}
