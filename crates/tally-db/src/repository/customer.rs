//! # Customer Repository
//!
//! Database operations for customers.
//!
//! Balance is written here only by a full customer update; every
//! transaction-driven balance change goes through
//! [`TransactionRepository`](super::transaction::TransactionRepository).

use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use tally_core::{Customer, CustomerDraft, Money, Page};
use tally_engine::{CustomerStore, StoreResult};

use crate::error::DbResult;
use crate::repository::bounds;

const COLUMNS: &str = "id, name, balance_cents, created_at, updated_at, deleted_at";

/// Repository for customer database operations.
#[derive(Debug, Clone)]
pub struct CustomerRepository {
    pool: SqlitePool,
}

impl CustomerRepository {
    pub fn new(pool: SqlitePool) -> Self {
        CustomerRepository { pool }
    }

    /// Inserts a customer and returns the generated id.
    pub async fn insert(&self, draft: &CustomerDraft) -> DbResult<i64> {
        let now = Utc::now();

        let result = sqlx::query(
            "INSERT INTO customers (name, balance_cents, created_at, updated_at) \
             VALUES (?1, ?2, ?3, ?3)",
        )
        .bind(&draft.name)
        .bind(draft.balance_cents)
        .bind(now)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        debug!(id, name = %draft.name, "Inserted customer");
        Ok(id)
    }

    pub async fn exists(&self, id: i64) -> DbResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM customers WHERE id = ?1 AND deleted_at IS NULL)",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    pub async fn find_id_by_name(&self, name: &str) -> DbResult<Option<i64>> {
        let id = sqlx::query_scalar(
            "SELECT id FROM customers WHERE name = ?1 AND deleted_at IS NULL",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(id)
    }

    pub async fn find_balance(&self, id: i64) -> DbResult<Option<Money>> {
        let cents: Option<i64> = sqlx::query_scalar(
            "SELECT balance_cents FROM customers WHERE id = ?1 AND deleted_at IS NULL",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(cents.map(Money::from_cents))
    }

    pub async fn find_by_id(&self, id: i64) -> DbResult<Option<Customer>> {
        let customer = sqlx::query_as::<_, Customer>(&format!(
            "SELECT {COLUMNS} FROM customers WHERE id = ?1 AND deleted_at IS NULL"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(customer)
    }

    pub async fn list(&self, page: Page) -> DbResult<Vec<Customer>> {
        let (limit, offset) = bounds(page);

        let customers = sqlx::query_as::<_, Customer>(&format!(
            "SELECT {COLUMNS} FROM customers WHERE deleted_at IS NULL \
             ORDER BY id LIMIT ?1 OFFSET ?2"
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        debug!(count = customers.len(), "Listed customers");
        Ok(customers)
    }

    /// Replaces name and balance; `None` if the customer is not active.
    pub async fn replace(&self, id: i64, draft: &CustomerDraft) -> DbResult<Option<Customer>> {
        let customer = sqlx::query_as::<_, Customer>(&format!(
            "UPDATE customers SET name = ?1, balance_cents = ?2, updated_at = ?3 \
             WHERE id = ?4 AND deleted_at IS NULL \
             RETURNING {COLUMNS}"
        ))
        .bind(&draft.name)
        .bind(draft.balance_cents)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        debug!(id, updated = customer.is_some(), "Replaced customer");
        Ok(customer)
    }

    /// Soft-deletes; `false` if the customer was not active.
    pub async fn soft_delete(&self, id: i64) -> DbResult<bool> {
        let now = Utc::now();

        let result = sqlx::query(
            "UPDATE customers SET deleted_at = ?1, updated_at = ?1 \
             WHERE id = ?2 AND deleted_at IS NULL",
        )
        .bind(now)
        .bind(id)
        .execute(&self.pool)
        .await?;

        debug!(id, rows = result.rows_affected(), "Soft-deleted customer");
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl CustomerStore for CustomerRepository {
    async fn create(&self, draft: &CustomerDraft) -> StoreResult<i64> {
        Ok(self.insert(draft).await?)
    }

    async fn id_exists(&self, id: i64) -> StoreResult<bool> {
        Ok(self.exists(id).await?)
    }

    async fn id_by_name(&self, name: &str) -> StoreResult<Option<i64>> {
        Ok(self.find_id_by_name(name).await?)
    }

    async fn balance(&self, id: i64) -> StoreResult<Option<Money>> {
        Ok(self.find_balance(id).await?)
    }

    async fn get_by_id(&self, id: i64) -> StoreResult<Option<Customer>> {
        Ok(self.find_by_id(id).await?)
    }

    async fn get_all(&self, page: Page) -> StoreResult<Vec<Customer>> {
        Ok(self.list(page).await?)
    }

    async fn update(&self, id: i64, draft: &CustomerDraft) -> StoreResult<Option<Customer>> {
        Ok(self.replace(id, draft).await?)
    }

    async fn delete(&self, id: i64) -> StoreResult<bool> {
        Ok(self.soft_delete(id).await?)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
