//! # Store Ports
//!
//! The capability set the engine needs from persistence, one trait per
//! entity. The SQLite implementations live in `tally-db`; the service tests
//! use an in-memory one.
//!
//! ## Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Stores report plain outcomes, never classified failures:              │
//! │                                                                         │
//! │   missing row        → Ok(None) / Ok(false) / LedgerWrite::*Missing    │
//! │   guard rejected     → LedgerWrite::InsufficientBalance                │
//! │   refund won't fit   → LedgerWrite::BalanceOverflow                    │
//! │   unique index hit   → Err(StoreError::Duplicate)                      │
//! │   anything else      → Err(StoreError::Backend)                        │
//! │                                                                         │
//! │  Soft-deleted rows are invisible to every read and every write.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use async_trait::async_trait;
use thiserror::Error;

use tally_core::{
    Customer, CustomerDraft, Item, ItemDraft, Money, Page, Transaction, TransactionFilter,
    TransactionView, TransactionWrite,
};

// =============================================================================
// Store Error
// =============================================================================

/// Persistence failure crossing the port boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// A uniqueness constraint rejected the write.
    #[error("duplicate value for {field}")]
    Duplicate { field: String },

    /// Any other storage failure.
    #[error("{0}")]
    Backend(String),
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

// =============================================================================
// Ledger Outcome
// =============================================================================

/// Outcome of a write that moves money.
///
/// When anything but `Applied` comes back, nothing was changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerWrite<T> {
    Applied(T),
    /// The transaction being changed does not exist (or is deleted).
    TransactionMissing,
    /// The customer to charge does not exist (or is deleted).
    CustomerMissing,
    /// The customer's balance would go below zero.
    InsufficientBalance,
    /// Giving the stored amount back would push the customer's balance
    /// past `i64::MAX` cents.
    BalanceOverflow,
}

// =============================================================================
// Customer Store
// =============================================================================

#[async_trait]
pub trait CustomerStore: Send + Sync {
    /// Inserts a customer and returns its id.
    async fn create(&self, draft: &CustomerDraft) -> StoreResult<i64>;

    async fn id_exists(&self, id: i64) -> StoreResult<bool>;

    /// Id of the active customer with exactly this name.
    async fn id_by_name(&self, name: &str) -> StoreResult<Option<i64>>;

    /// Current balance, `None` if the customer does not exist.
    async fn balance(&self, id: i64) -> StoreResult<Option<Money>>;

    async fn get_by_id(&self, id: i64) -> StoreResult<Option<Customer>>;

    /// Active customers ordered by id.
    async fn get_all(&self, page: Page) -> StoreResult<Vec<Customer>>;

    /// Replaces name and balance, returning the updated row.
    async fn update(&self, id: i64, draft: &CustomerDraft) -> StoreResult<Option<Customer>>;

    /// Soft-deletes; `false` when nothing was deleted.
    async fn delete(&self, id: i64) -> StoreResult<bool>;
}

// =============================================================================
// Item Store
// =============================================================================

#[async_trait]
pub trait ItemStore: Send + Sync {
    async fn create(&self, draft: &ItemDraft) -> StoreResult<i64>;

    async fn id_exists(&self, id: i64) -> StoreResult<bool>;

    async fn id_by_name(&self, name: &str) -> StoreResult<Option<i64>>;

    async fn get_by_id(&self, id: i64) -> StoreResult<Option<Item>>;

    async fn get_all(&self, page: Page) -> StoreResult<Vec<Item>>;

    async fn update(&self, id: i64, draft: &ItemDraft) -> StoreResult<Option<Item>>;

    async fn delete(&self, id: i64) -> StoreResult<bool>;
}

// =============================================================================
// Transaction Store
// =============================================================================

/// Owns every write that touches a customer balance.
///
/// `create`, `update` and `delete` each run as one atomic unit: the balance
/// adjustment and the row change become visible together or not at all.
#[async_trait]
pub trait TransactionStore: Send + Sync {
    /// Deducts `write.amount` from the customer (refusing to go negative)
    /// and inserts the row. Returns the new id.
    async fn create(&self, write: &TransactionWrite) -> StoreResult<LedgerWrite<i64>>;

    async fn id_exists(&self, id: i64) -> StoreResult<bool>;

    async fn get_by_id(&self, id: i64) -> StoreResult<Option<Transaction>>;

    async fn get_all(&self, page: Page) -> StoreResult<Vec<Transaction>>;

    /// Restores the stored amount to the stored customer, deducts the new
    /// amount from the new customer, then rewrites the row.
    async fn update(&self, id: i64, write: &TransactionWrite)
        -> StoreResult<LedgerWrite<Transaction>>;

    /// Restores the amount to the customer and soft-deletes the row.
    async fn delete(&self, id: i64) -> StoreResult<LedgerWrite<()>>;

    async fn views(&self, page: Page) -> StoreResult<Vec<TransactionView>>;

    async fn view_by_id(&self, id: i64) -> StoreResult<Option<TransactionView>>;

    /// Views matching every populated field of `filter`.
    async fn views_by_filter(
        &self,
        filter: &TransactionFilter,
        page: Page,
    ) -> StoreResult<Vec<TransactionView>>;
}
