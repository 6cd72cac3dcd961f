//! # Transaction Repository
//!
//! The only writer of customer balances during normal operation, and the
//! source of the joined transaction views.
//!
//! ## Ledger Writes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                  One SQLite transaction per write                       │
//! │                                                                         │
//! │  CREATE                                                                │
//! │     1. customers.balance -= amount  WHERE balance >= amount            │
//! │        (0 rows → CustomerMissing | InsufficientBalance, rollback)      │
//! │     2. INSERT transactions                                             │
//! │                                                                         │
//! │  UPDATE                                                                │
//! │     1. old customer balance += stored amount  WHERE it fits in i64     │
//! │        (0 rows → TransactionMissing | BalanceOverflow, rollback)       │
//! │     2. new customer balance -= new amount  WHERE balance >= amount     │
//! │        (0 rows → CustomerMissing | InsufficientBalance, rollback)      │
//! │     3. UPDATE transactions ... RETURNING                               │
//! │                                                                         │
//! │  DELETE                                                                │
//! │     1. customer balance += stored amount  WHERE it fits in i64         │
//! │        (0 rows → TransactionMissing | BalanceOverflow, rollback)       │
//! │     2. transactions.deleted_at = now                                   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Step 1 of every write is itself a write, so each unit takes SQLite's
//! writer lock before reading any balance. Concurrent writers queue on
//! that lock (bounded by the pool's busy timeout) and each one sees the
//! balance its predecessor committed.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{QueryBuilder, Sqlite, SqliteConnection, SqlitePool};
use tracing::debug;

use tally_core::{Money, Page, Transaction, TransactionFilter, TransactionView, TransactionWrite};
use tally_engine::{LedgerWrite, StoreResult, TransactionStore};

use crate::error::{DbError, DbResult};
use crate::repository::bounds;

const COLUMNS: &str =
    "id, customer_id, item_id, qty, price_cents, amount_cents, created_at, updated_at, deleted_at";

/// Active transactions joined with their active customer and item.
const VIEW_SELECT: &str = "\
SELECT t.id, t.customer_id, c.name AS customer_name, t.item_id, i.name AS item_name, \
       t.qty, t.price_cents, t.amount_cents, t.created_at, t.updated_at \
FROM transactions t \
INNER JOIN customers c ON c.id = t.customer_id AND c.deleted_at IS NULL \
INNER JOIN items i ON i.id = t.item_id AND i.deleted_at IS NULL \
WHERE t.deleted_at IS NULL";

/// Puts a transaction's stored amount back on its stored customer.
/// Matches nothing when the transaction is missing or deleted, or when the
/// sum would pass `?3` (`i64::MAX`). SQLite would otherwise store it as REAL.
const RESTORE_AMOUNT: &str = "\
UPDATE customers \
SET balance_cents = balance_cents + \
        (SELECT amount_cents FROM transactions WHERE id = ?1 AND deleted_at IS NULL), \
    updated_at = ?2 \
WHERE id = (SELECT customer_id FROM transactions WHERE id = ?1 AND deleted_at IS NULL) \
  AND balance_cents <= \
        ?3 - (SELECT amount_cents FROM transactions WHERE id = ?1 AND deleted_at IS NULL)";

/// Repository for transaction database operations.
#[derive(Debug, Clone)]
pub struct TransactionRepository {
    pool: SqlitePool,
}

impl TransactionRepository {
    pub fn new(pool: SqlitePool) -> Self {
        TransactionRepository { pool }
    }

    // =========================================================================
    // Ledger Writes
    // =========================================================================

    /// Charges the customer and records the transaction atomically.
    pub async fn record(&self, write: &TransactionWrite) -> DbResult<LedgerWrite<i64>> {
        let now = Utc::now();
        let mut tx = self.begin().await?;

        if !deduct(&mut tx, write.customer_id, write.amount, now).await? {
            let outcome = rejected_charge(&mut tx, write.customer_id).await?;
            tx.rollback().await?;
            debug!(customer_id = write.customer_id, ?outcome, "Charge rejected");
            return Ok(outcome);
        }

        let result = sqlx::query(
            "INSERT INTO transactions \
             (customer_id, item_id, qty, price_cents, amount_cents, created_at, updated_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)",
        )
        .bind(write.customer_id)
        .bind(write.item_id)
        .bind(write.qty)
        .bind(write.price.cents())
        .bind(write.amount.cents())
        .bind(now)
        .execute(&mut *tx)
        .await?;

        let id = result.last_insert_rowid();
        commit(tx).await?;

        debug!(
            id,
            customer_id = write.customer_id,
            amount = %write.amount,
            "Recorded transaction"
        );
        Ok(LedgerWrite::Applied(id))
    }

    /// Reverses the stored amount, charges the new one and rewrites the row.
    pub async fn amend(
        &self,
        id: i64,
        write: &TransactionWrite,
    ) -> DbResult<LedgerWrite<Transaction>> {
        let now = Utc::now();
        let mut tx = self.begin().await?;

        if !restore(&mut tx, id, now).await? {
            let outcome = rejected_refund(&mut tx, id).await?;
            tx.rollback().await?;
            debug!(id, ?outcome, "Amend refund rejected");
            return Ok(outcome);
        }

        if !deduct(&mut tx, write.customer_id, write.amount, now).await? {
            let outcome = rejected_charge(&mut tx, write.customer_id).await?;
            tx.rollback().await?;
            debug!(id, customer_id = write.customer_id, ?outcome, "Amend rejected");
            return Ok(outcome);
        }

        let row = sqlx::query_as::<_, Transaction>(&format!(
            "UPDATE transactions \
             SET customer_id = ?1, item_id = ?2, qty = ?3, price_cents = ?4, \
                 amount_cents = ?5, updated_at = ?6 \
             WHERE id = ?7 AND deleted_at IS NULL \
             RETURNING {COLUMNS}"
        ))
        .bind(write.customer_id)
        .bind(write.item_id)
        .bind(write.qty)
        .bind(write.price.cents())
        .bind(write.amount.cents())
        .bind(now)
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(row) = row else {
            tx.rollback().await?;
            return Ok(LedgerWrite::TransactionMissing);
        };

        commit(tx).await?;
        debug!(id, amount = %write.amount, "Amended transaction");
        Ok(LedgerWrite::Applied(row))
    }

    /// Refunds the stored amount and soft-deletes the row.
    pub async fn void(&self, id: i64) -> DbResult<LedgerWrite<()>> {
        let now = Utc::now();
        let mut tx = self.begin().await?;

        if !restore(&mut tx, id, now).await? {
            let outcome = rejected_refund(&mut tx, id).await?;
            tx.rollback().await?;
            debug!(id, ?outcome, "Void refund rejected");
            return Ok(outcome);
        }

        sqlx::query(
            "UPDATE transactions SET deleted_at = ?1, updated_at = ?1 \
             WHERE id = ?2 AND deleted_at IS NULL",
        )
        .bind(now)
        .bind(id)
        .execute(&mut *tx)
        .await?;

        commit(tx).await?;
        debug!(id, "Voided transaction");
        Ok(LedgerWrite::Applied(()))
    }

    async fn begin(&self) -> DbResult<sqlx::Transaction<'static, Sqlite>> {
        self.pool
            .begin()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))
    }

    // =========================================================================
    // Row Reads
    // =========================================================================

    pub async fn exists(&self, id: i64) -> DbResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM transactions WHERE id = ?1 AND deleted_at IS NULL)",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    pub async fn find_by_id(&self, id: i64) -> DbResult<Option<Transaction>> {
        let row = sqlx::query_as::<_, Transaction>(&format!(
            "SELECT {COLUMNS} FROM transactions WHERE id = ?1 AND deleted_at IS NULL"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn list(&self, page: Page) -> DbResult<Vec<Transaction>> {
        let (limit, offset) = bounds(page);

        let rows = sqlx::query_as::<_, Transaction>(&format!(
            "SELECT {COLUMNS} FROM transactions WHERE deleted_at IS NULL \
             ORDER BY id LIMIT ?1 OFFSET ?2"
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        debug!(count = rows.len(), "Listed transactions");
        Ok(rows)
    }

    // =========================================================================
    // Views
    // =========================================================================

    pub async fn list_views(&self, page: Page) -> DbResult<Vec<TransactionView>> {
        self.search_views(&TransactionFilter::default(), page).await
    }

    pub async fn find_view(&self, id: i64) -> DbResult<Option<TransactionView>> {
        let view = sqlx::query_as::<_, TransactionView>(&format!("{VIEW_SELECT} AND t.id = ?1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(view)
    }

    /// Views matching every populated field of `filter`. Names match
    /// exactly, after trimming.
    pub async fn search_views(
        &self,
        filter: &TransactionFilter,
        page: Page,
    ) -> DbResult<Vec<TransactionView>> {
        let (limit, offset) = bounds(page);
        let mut query = QueryBuilder::<Sqlite>::new(VIEW_SELECT);

        if let Some(id) = filter.id() {
            query.push(" AND t.id = ").push_bind(id);
        }
        if let Some(name) = filter.customer_name() {
            query.push(" AND c.name = ").push_bind(name.to_string());
        }
        if let Some(name) = filter.item_name() {
            query.push(" AND i.name = ").push_bind(name.to_string());
        }

        query
            .push(" ORDER BY t.id LIMIT ")
            .push_bind(limit)
            .push(" OFFSET ")
            .push_bind(offset);

        let views = query
            .build_query_as::<TransactionView>()
            .fetch_all(&self.pool)
            .await?;

        debug!(count = views.len(), "Listed transaction views");
        Ok(views)
    }
}

// =============================================================================
// Statement Helpers
// =============================================================================

/// Guarded charge. `false` when the customer is missing or can't cover it.
async fn deduct(
    conn: &mut SqliteConnection,
    customer_id: i64,
    amount: Money,
    now: DateTime<Utc>,
) -> DbResult<bool> {
    let result = sqlx::query(
        "UPDATE customers SET balance_cents = balance_cents - ?1, updated_at = ?2 \
         WHERE id = ?3 AND deleted_at IS NULL AND balance_cents >= ?1",
    )
    .bind(amount.cents())
    .bind(now)
    .bind(customer_id)
    .execute(conn)
    .await?;

    Ok(result.rows_affected() > 0)
}

async fn restore(conn: &mut SqliteConnection, id: i64, now: DateTime<Utc>) -> DbResult<bool> {
    let result = sqlx::query(RESTORE_AMOUNT)
        .bind(id)
        .bind(now)
        .bind(i64::MAX)
        .execute(conn)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Why a guarded charge matched nothing.
async fn rejected_charge<T>(
    conn: &mut SqliteConnection,
    customer_id: i64,
) -> DbResult<LedgerWrite<T>> {
    let active: bool = sqlx::query_scalar(
        "SELECT EXISTS (SELECT 1 FROM customers WHERE id = ?1 AND deleted_at IS NULL)",
    )
    .bind(customer_id)
    .fetch_one(conn)
    .await?;

    Ok(if active {
        LedgerWrite::InsufficientBalance
    } else {
        LedgerWrite::CustomerMissing
    })
}

/// Why a restore matched nothing: the row is gone, or the refund won't fit.
async fn rejected_refund<T>(conn: &mut SqliteConnection, id: i64) -> DbResult<LedgerWrite<T>> {
    let active: bool = sqlx::query_scalar(
        "SELECT EXISTS (SELECT 1 FROM transactions WHERE id = ?1 AND deleted_at IS NULL)",
    )
    .bind(id)
    .fetch_one(conn)
    .await?;

    Ok(if active {
        LedgerWrite::BalanceOverflow
    } else {
        LedgerWrite::TransactionMissing
    })
}

async fn commit(tx: sqlx::Transaction<'static, Sqlite>) -> DbResult<()> {
    tx.commit()
        .await
        .map_err(|e| DbError::TransactionFailed(e.to_string()))
}

// =============================================================================
// Port
// =============================================================================

#[async_trait]
impl TransactionStore for TransactionRepository {
    async fn create(&self, write: &TransactionWrite) -> StoreResult<LedgerWrite<i64>> {
        Ok(self.record(write).await?)
    }

    async fn id_exists(&self, id: i64) -> StoreResult<bool> {
        Ok(self.exists(id).await?)
    }

    async fn get_by_id(&self, id: i64) -> StoreResult<Option<Transaction>> {
        Ok(self.find_by_id(id).await?)
    }

    async fn get_all(&self, page: Page) -> StoreResult<Vec<Transaction>> {
        Ok(self.list(page).await?)
    }

    async fn update(
        &self,
        id: i64,
        write: &TransactionWrite,
    ) -> StoreResult<LedgerWrite<Transaction>> {
        Ok(self.amend(id, write).await?)
    }

    async fn delete(&self, id: i64) -> StoreResult<LedgerWrite<()>> {
        Ok(self.void(id).await?)
    }

    async fn views(&self, page: Page) -> StoreResult<Vec<TransactionView>> {
        Ok(self.list_views(page).await?)
    }

    async fn view_by_id(&self, id: i64) -> StoreResult<Option<TransactionView>> {
        Ok(self.find_view(id).await?)
    }

    async fn views_by_filter(
        &self,
        filter: &TransactionFilter,
        page: Page,
    ) -> StoreResult<Vec<TransactionView>> {
        Ok(self.search_views(filter, page).await?)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use tally_core::{CustomerDraft, ItemDraft};

    struct Fixture {
        db: Database,
        repo: TransactionRepository,
        alice: i64,
        widget: i64,
    }

    impl Fixture {
        async fn new() -> Self {
            let db = Database::new(DbConfig::in_memory()).await.unwrap();
            let alice = add_customer(&db, "Alice", 10_000).await;
            let widget = add_item(&db, "Widget", 1_000).await;
            let repo = db.transactions();
            Fixture {
                db,
                repo,
                alice,
                widget,
            }
        }

        async fn balance(&self, customer_id: i64) -> i64 {
            self.db
                .customers()
                .find_balance(customer_id)
                .await
                .unwrap()
                .unwrap()
                .cents()
        }

        fn write(&self, customer_id: i64, qty: i64) -> TransactionWrite {
            let price = Money::from_cents(1_000);
            TransactionWrite {
                customer_id,
                item_id: self.widget,
                qty,
                price,
                amount: price.checked_mul_qty(qty).unwrap(),
            }
        }
    }

    async fn add_customer(db: &Database, name: &str, balance_cents: i64) -> i64 {
        db.customers()
            .insert(&CustomerDraft {
                name: name.to_string(),
                balance_cents,
            })
            .await
            .unwrap()
    }

    async fn add_item(db: &Database, name: &str, price_cents: i64) -> i64 {
        db.items()
            .insert(&ItemDraft {
                name: name.to_string(),
                cost_cents: price_cents / 2,
                price_cents,
                sort: 1,
            })
            .await
            .unwrap()
    }

    fn applied<T: std::fmt::Debug>(outcome: LedgerWrite<T>) -> T {
        match outcome {
            LedgerWrite::Applied(value) => value,
            other => panic!("expected Applied, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_record_charges_customer() {
        let f = Fixture::new().await;

        let id = applied(f.repo.record(&f.write(f.alice, 3)).await.unwrap());

        let row = f.repo.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(row.amount_cents, 3_000);
        assert_eq!(row.price_cents, 1_000);
        assert_eq!(row.qty, 3);
        assert_eq!(f.balance(f.alice).await, 7_000);
    }

    #[tokio::test]
    async fn test_record_rejects_overdraw_without_side_effects() {
        let f = Fixture::new().await;

        let outcome = f.repo.record(&f.write(f.alice, 11)).await.unwrap();
        assert_eq!(outcome, LedgerWrite::InsufficientBalance);
        assert_eq!(f.balance(f.alice).await, 10_000);
        assert!(f.repo.list(Page::all()).await.unwrap().is_empty());

        // spending the exact balance is allowed
        applied(f.repo.record(&f.write(f.alice, 10)).await.unwrap());
        assert_eq!(f.balance(f.alice).await, 0);
    }

    #[tokio::test]
    async fn test_record_for_missing_customer() {
        let f = Fixture::new().await;

        let outcome = f.repo.record(&f.write(999, 1)).await.unwrap();
        assert_eq!(outcome, LedgerWrite::CustomerMissing);

        f.db.customers().soft_delete(f.alice).await.unwrap();
        let outcome = f.repo.record(&f.write(f.alice, 1)).await.unwrap();
        assert_eq!(outcome, LedgerWrite::CustomerMissing);
    }

    #[tokio::test]
    async fn test_amend_moves_balance_by_difference() {
        let f = Fixture::new().await;
        let id = applied(f.repo.record(&f.write(f.alice, 3)).await.unwrap());

        let row = applied(f.repo.amend(id, &f.write(f.alice, 5)).await.unwrap());
        assert_eq!(row.id, id);
        assert_eq!(row.amount_cents, 5_000);
        assert_eq!(f.balance(f.alice).await, 5_000);

        // restoring first lets an amend spend the old amount again
        applied(f.repo.amend(id, &f.write(f.alice, 10)).await.unwrap());
        assert_eq!(f.balance(f.alice).await, 0);
    }

    #[tokio::test]
    async fn test_amend_to_other_customer() {
        let f = Fixture::new().await;
        let bobby = add_customer(&f.db, "Bobby", 2_000).await;
        let id = applied(f.repo.record(&f.write(f.alice, 3)).await.unwrap());

        let row = applied(f.repo.amend(id, &f.write(bobby, 2)).await.unwrap());
        assert_eq!(row.customer_id, bobby);
        assert_eq!(f.balance(f.alice).await, 10_000);
        assert_eq!(f.balance(bobby).await, 0);
    }

    #[tokio::test]
    async fn test_rejected_amend_rolls_back_restore() {
        let f = Fixture::new().await;
        let id = applied(f.repo.record(&f.write(f.alice, 3)).await.unwrap());

        let outcome = f.repo.amend(id, &f.write(f.alice, 11)).await.unwrap();
        assert_eq!(outcome, LedgerWrite::InsufficientBalance);
        assert_eq!(f.balance(f.alice).await, 7_000);

        let outcome = f.repo.amend(id, &f.write(999, 1)).await.unwrap();
        assert_eq!(outcome, LedgerWrite::CustomerMissing);
        assert_eq!(f.balance(f.alice).await, 7_000);
        assert_eq!(f.repo.find_by_id(id).await.unwrap().unwrap().qty, 3);
    }

    #[tokio::test]
    async fn test_amend_missing_transaction() {
        let f = Fixture::new().await;
        let outcome = f.repo.amend(42, &f.write(f.alice, 1)).await.unwrap();
        assert_eq!(outcome, LedgerWrite::TransactionMissing);
        assert_eq!(f.balance(f.alice).await, 10_000);
    }

    #[tokio::test]
    async fn test_void_refunds_once() {
        let f = Fixture::new().await;
        let id = applied(f.repo.record(&f.write(f.alice, 3)).await.unwrap());

        applied(f.repo.void(id).await.unwrap());
        assert_eq!(f.balance(f.alice).await, 10_000);
        assert!(!f.repo.exists(id).await.unwrap());

        let outcome = f.repo.void(id).await.unwrap();
        assert_eq!(outcome, LedgerWrite::TransactionMissing);
        assert_eq!(f.balance(f.alice).await, 10_000);
    }

    /// Writes a balance straight to the table, past any field rule.
    async fn force_balance(f: &Fixture, cents: i64) {
        sqlx::query("UPDATE customers SET balance_cents = ?1 WHERE id = ?2")
            .bind(cents)
            .bind(f.alice)
            .execute(f.db.pool())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_refund_past_i64_max_is_rejected() {
        let f = Fixture::new().await;
        let id = applied(f.repo.record(&f.write(f.alice, 1)).await.unwrap());
        let nearly_full = i64::MAX - 500;
        force_balance(&f, nearly_full).await;

        let outcome = f.repo.void(id).await.unwrap();
        assert_eq!(outcome, LedgerWrite::BalanceOverflow);
        assert!(f.repo.exists(id).await.unwrap());

        let outcome = f.repo.amend(id, &f.write(f.alice, 1)).await.unwrap();
        assert_eq!(outcome, LedgerWrite::BalanceOverflow);
        assert_eq!(f.repo.find_by_id(id).await.unwrap().unwrap().qty, 1);

        // still an INTEGER, and every customer row still decodes
        let kind: String =
            sqlx::query_scalar("SELECT typeof(balance_cents) FROM customers WHERE id = ?1")
                .bind(f.alice)
                .fetch_one(f.db.pool())
                .await
                .unwrap();
        assert_eq!(kind, "integer");
        assert_eq!(f.balance(f.alice).await, nearly_full);
        assert_eq!(f.db.customers().list(Page::all()).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_refund_up_to_i64_max_fits() {
        let f = Fixture::new().await;
        let id = applied(f.repo.record(&f.write(f.alice, 1)).await.unwrap());
        force_balance(&f, i64::MAX - 1_000).await;

        applied(f.repo.void(id).await.unwrap());
        assert_eq!(f.balance(f.alice).await, i64::MAX);
    }

    #[tokio::test]
    async fn test_record_unknown_item_is_foreign_key_violation() {
        let f = Fixture::new().await;
        let write = TransactionWrite {
            item_id: 404,
            ..f.write(f.alice, 1)
        };

        let err = f.repo.record(&write).await.unwrap_err();
        assert!(matches!(err, DbError::ForeignKeyViolation { .. }), "{err:?}");
        assert_eq!(f.balance(f.alice).await, 10_000);
        assert!(f.repo.list(Page::all()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_views_join_names_and_hide_deleted() {
        let f = Fixture::new().await;
        let bobby = add_customer(&f.db, "Bobby", 10_000).await;
        let first = applied(f.repo.record(&f.write(f.alice, 1)).await.unwrap());
        let second = applied(f.repo.record(&f.write(bobby, 2)).await.unwrap());
        let third = applied(f.repo.record(&f.write(bobby, 1)).await.unwrap());

        let view = f.repo.find_view(first).await.unwrap().unwrap();
        assert_eq!(view.customer_name, "Alice");
        assert_eq!(view.item_name, "Widget");
        assert_eq!(view.amount_cents, 1_000);

        f.repo.void(third).await.unwrap();
        let ids: Vec<i64> = f
            .repo
            .list_views(Page::all())
            .await
            .unwrap()
            .iter()
            .map(|v| v.id)
            .collect();
        assert_eq!(ids, vec![first, second]);

        f.db.customers().soft_delete(bobby).await.unwrap();
        assert_eq!(f.repo.list_views(Page::all()).await.unwrap().len(), 1);
        assert!(f.repo.find_view(second).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_search_views_combines_fields() {
        let f = Fixture::new().await;
        let gadget = add_item(&f.db, "Gadget", 500).await;
        let first = applied(f.repo.record(&f.write(f.alice, 1)).await.unwrap());
        let mut other = f.write(f.alice, 1);
        other.item_id = gadget;
        let second = applied(f.repo.record(&other).await.unwrap());

        let by_item = TransactionFilter {
            item_name: Some(" Gadget ".to_string()),
            ..Default::default()
        };
        let views = f.repo.search_views(&by_item, Page::all()).await.unwrap();
        assert_eq!(views.len(), 1);
        assert_eq!(views[0].id, second);

        let by_customer = TransactionFilter {
            customer_name: Some("Alice".to_string()),
            ..Default::default()
        };
        assert_eq!(
            f.repo.search_views(&by_customer, Page::all()).await.unwrap().len(),
            2
        );
        assert_eq!(
            f.repo.search_views(&by_customer, Page::new(1, 1)).await.unwrap()[0].id,
            second
        );

        let mismatch = TransactionFilter {
            id: Some(first),
            item_name: Some("Gadget".to_string()),
            ..Default::default()
        };
        assert!(f.repo.search_views(&mismatch, Page::all()).await.unwrap().is_empty());
    }
}
