//! # Transaction Service
//!
//! Cross-entity rules for sale transactions, applied before the store's
//! atomic balance-and-row write.
//!
//! ## Create
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  TransactionDraft { customer_id, item_id, qty, price_cents? }          │
//! │       │                                                                 │
//! │       ├── field rules fail?            → Invalid                       │
//! │       ├── item missing?                → NotFound                      │
//! │       │   (price defaults to the item's catalog price)                  │
//! │       ├── amount = price × qty overflows? → Invalid                    │
//! │       ├── customer missing?            → NotFound                      │
//! │       ├── balance < amount?            → Invalid                       │
//! │       ▼                                                                 │
//! │  TransactionStore::create (deduct + insert, one atomic unit)           │
//! │       │                                                                 │
//! │       ├── guard lost a race?           → Invalid / NotFound            │
//! │       └── Applied(id)                  → Created                       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Balance policy
//! - create deducts the amount
//! - update restores the old amount and deducts the new one, so a single
//!   customer's balance moves by exactly `old − new`
//! - delete restores the amount
//! - a restore that would overflow the balance is refused as Invalid and
//!   changes nothing

use std::sync::Arc;

use tracing::debug;

use tally_core::validation::{line_amount, validate_transaction_draft};
use tally_core::{
    Money, Page, Transaction, TransactionDraft, TransactionFilter, TransactionView,
    TransactionWrite,
};

use crate::error::ServiceError;
use crate::ports::{CustomerStore, ItemStore, LedgerWrite, TransactionStore};
use crate::service::{require, respond};
use crate::status::{ServiceResult, Status};

const ENTITY: &str = "transaction";

#[derive(Clone)]
pub struct TransactionService {
    customers: Arc<dyn CustomerStore>,
    items: Arc<dyn ItemStore>,
    transactions: Arc<dyn TransactionStore>,
}

impl TransactionService {
    pub fn new(
        customers: Arc<dyn CustomerStore>,
        items: Arc<dyn ItemStore>,
        transactions: Arc<dyn TransactionStore>,
    ) -> Self {
        TransactionService {
            customers,
            items,
            transactions,
        }
    }

    // =========================================================================
    // Writes
    // =========================================================================

    /// Charges the customer and records the sale.
    pub async fn create(&self, draft: TransactionDraft) -> ServiceResult<i64> {
        let outcome = self.try_create(draft).await;
        respond("transaction.create", outcome, || {
            Status::created("transaction created")
        })
    }

    async fn try_create(&self, draft: TransactionDraft) -> Result<i64, ServiceError> {
        validate_transaction_draft(&draft)?;

        let write = self.resolve(&draft).await?;
        self.ensure_covered(&write).await?;

        let id = settle(self.transactions.create(&write).await?, 0, &write)?;

        debug!(
            id,
            customer_id = write.customer_id,
            amount = write.amount.cents(),
            "Transaction created"
        );
        Ok(id)
    }

    /// Re-prices the transaction and reconciles the balance for the
    /// difference between the stored and the new amount.
    pub async fn update(&self, id: i64, draft: TransactionDraft) -> ServiceResult<Transaction> {
        let outcome = self.try_update(id, draft).await;
        respond("transaction.update", outcome, || {
            Status::success("transaction updated")
        })
    }

    async fn try_update(
        &self,
        id: i64,
        draft: TransactionDraft,
    ) -> Result<Transaction, ServiceError> {
        validate_transaction_draft(&draft)?;

        if !self.transactions.id_exists(id).await? {
            return Err(ServiceError::not_found(ENTITY, id));
        }

        let write = self.resolve(&draft).await?;
        self.ensure_covered(&write).await?;

        let updated = settle(self.transactions.update(id, &write).await?, id, &write)?;

        debug!(
            id,
            customer_id = write.customer_id,
            amount = write.amount.cents(),
            "Transaction updated"
        );
        Ok(updated)
    }

    /// Soft-deletes the transaction and gives its amount back to the
    /// customer.
    pub async fn delete(&self, id: i64) -> ServiceResult<()> {
        let outcome = match self.transactions.delete(id).await {
            Ok(LedgerWrite::Applied(())) => Ok(()),
            Ok(LedgerWrite::BalanceOverflow) => {
                Err(ServiceError::BalanceOverflow { transaction_id: id })
            }
            Ok(_) => Err(ServiceError::not_found(ENTITY, id)),
            Err(e) => Err(e.into()),
        };
        respond("transaction.delete", outcome, || {
            Status::success("transaction deleted")
        })
    }

    // =========================================================================
    // Reads
    // =========================================================================

    pub async fn get_by_id(&self, id: i64) -> ServiceResult<Transaction> {
        let outcome = require(ENTITY, id, self.transactions.get_by_id(id).await);
        respond("transaction.get_by_id", outcome, || {
            Status::success("transaction found")
        })
    }

    pub async fn get_all(&self, page: Page) -> ServiceResult<Vec<Transaction>> {
        let outcome = self
            .transactions
            .get_all(page)
            .await
            .map_err(ServiceError::from);
        respond("transaction.get_all", outcome, || {
            Status::success("transactions listed")
        })
    }

    pub async fn views(&self, page: Page) -> ServiceResult<Vec<TransactionView>> {
        let outcome = self
            .transactions
            .views(page)
            .await
            .map_err(ServiceError::from);
        respond("transaction.views", outcome, || {
            Status::success("transaction views listed")
        })
    }

    pub async fn view_by_id(&self, id: i64) -> ServiceResult<TransactionView> {
        let outcome = require(ENTITY, id, self.transactions.view_by_id(id).await);
        respond("transaction.view_by_id", outcome, || {
            Status::success("transaction view found")
        })
    }

    /// Views matching every populated filter field. An all-empty filter is
    /// rejected rather than treated as "everything".
    pub async fn views_by_filter(
        &self,
        filter: TransactionFilter,
        page: Page,
    ) -> ServiceResult<Vec<TransactionView>> {
        let outcome = if filter.is_empty() {
            Err(ServiceError::EmptyFilter)
        } else {
            self.transactions
                .views_by_filter(&filter, page)
                .await
                .map_err(ServiceError::from)
        };
        respond("transaction.views_by_filter", outcome, || {
            Status::success("transaction views listed")
        })
    }

    // =========================================================================
    // Checks
    // =========================================================================

    /// Looks up the item and computes the amount.
    async fn resolve(&self, draft: &TransactionDraft) -> Result<TransactionWrite, ServiceError> {
        let item = require("item", draft.item_id, self.items.get_by_id(draft.item_id).await)?;
        let price = draft
            .price_cents
            .map(Money::from_cents)
            .unwrap_or_else(|| item.price());
        let amount = line_amount(price, draft.qty)?;

        Ok(TransactionWrite {
            customer_id: draft.customer_id,
            item_id: draft.item_id,
            qty: draft.qty,
            price,
            amount,
        })
    }

    /// Customer exists and its current balance covers the amount.
    async fn ensure_covered(&self, write: &TransactionWrite) -> Result<(), ServiceError> {
        let customer_id = write.customer_id;

        if !self.customers.id_exists(customer_id).await? {
            return Err(ServiceError::not_found("customer", customer_id));
        }

        let balance = require(
            "customer",
            customer_id,
            self.customers.balance(customer_id).await,
        )?;

        if balance < write.amount {
            return Err(ServiceError::InsufficientBalance {
                customer_id,
                amount: write.amount,
            });
        }

        Ok(())
    }
}

/// Turns a store ledger outcome into the service's classification.
fn settle<T>(
    outcome: LedgerWrite<T>,
    transaction_id: i64,
    write: &TransactionWrite,
) -> Result<T, ServiceError> {
    match outcome {
        LedgerWrite::Applied(value) => Ok(value),
        LedgerWrite::TransactionMissing => Err(ServiceError::not_found(ENTITY, transaction_id)),
        LedgerWrite::CustomerMissing => Err(ServiceError::not_found("customer", write.customer_id)),
        LedgerWrite::InsufficientBalance => Err(ServiceError::InsufficientBalance {
            customer_id: write.customer_id,
            amount: write.amount,
        }),
        LedgerWrite::BalanceOverflow => Err(ServiceError::BalanceOverflow { transaction_id }),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fake::FakeLedger;
    use crate::status::StatusKind;
    use crate::Engine;
    use tally_core::{CustomerDraft, ItemDraft};

    struct Fixture {
        ledger: FakeLedger,
        engine: Engine,
        alice: i64,
        widget: i64,
    }

    /// Alice with 100.00, Widget priced at 10.00.
    async fn fixture() -> Fixture {
        let ledger = FakeLedger::new();
        let store = Arc::new(ledger.clone());
        let engine = Engine::new(store.clone(), store.clone(), store);

        let alice = engine
            .customers
            .create(CustomerDraft {
                name: "Alice".to_string(),
                balance_cents: 10_000,
            })
            .await
            .unwrap()
            .value;
        let widget = engine
            .items
            .create(ItemDraft {
                name: "Widget".to_string(),
                cost_cents: 500,
                price_cents: 1_000,
                sort: 1,
            })
            .await
            .unwrap()
            .value;

        Fixture {
            ledger,
            engine,
            alice,
            widget,
        }
    }

    fn buy(customer_id: i64, item_id: i64, qty: i64) -> TransactionDraft {
        TransactionDraft {
            customer_id,
            item_id,
            qty,
            price_cents: None,
        }
    }

    #[tokio::test]
    async fn test_create_deducts_amount() {
        let f = fixture().await;
        let txs = &f.engine.transactions;

        let reply = txs.create(buy(f.alice, f.widget, 3)).await.unwrap();
        assert_eq!(reply.status.kind(), StatusKind::Created);

        let stored = txs.get_by_id(reply.value).await.unwrap().value;
        assert_eq!(stored.price_cents, 1_000);
        assert_eq!(stored.amount_cents, 3_000);
        assert_eq!(f.ledger.balance_of(f.alice).await, 7_000);
    }

    #[tokio::test]
    async fn test_insufficient_balance_changes_nothing() {
        let f = fixture().await;
        let txs = &f.engine.transactions;
        txs.create(buy(f.alice, f.widget, 3)).await.unwrap();

        let err = txs.create(buy(f.alice, f.widget, 10)).await.unwrap_err();
        assert_eq!(err.kind(), StatusKind::Invalid);
        assert!(matches!(
            err.cause(),
            Some(ServiceError::InsufficientBalance { .. })
        ));
        assert_eq!(f.ledger.balance_of(f.alice).await, 7_000);
        assert_eq!(txs.get_all(Page::all()).await.unwrap().value.len(), 1);
    }

    #[tokio::test]
    async fn test_explicit_price_overrides_catalog() {
        let f = fixture().await;
        let draft = TransactionDraft {
            price_cents: Some(250),
            ..buy(f.alice, f.widget, 4)
        };

        let id = f.engine.transactions.create(draft).await.unwrap().value;
        let stored = f.engine.transactions.get_by_id(id).await.unwrap().value;
        assert_eq!(stored.amount_cents, 1_000);
        assert_eq!(f.ledger.balance_of(f.alice).await, 9_000);
    }

    #[tokio::test]
    async fn test_missing_references_are_not_found() {
        let f = fixture().await;
        let txs = &f.engine.transactions;

        let err = txs.create(buy(f.alice, 99, 1)).await.unwrap_err();
        assert_eq!(err.kind(), StatusKind::NotFound);
        assert_eq!(err.message(), "item 99 not found");

        let err = txs.create(buy(99, f.widget, 1)).await.unwrap_err();
        assert_eq!(err.kind(), StatusKind::NotFound);
        assert_eq!(err.message(), "customer 99 not found");

        f.engine.items.delete(f.widget).await.unwrap();
        let err = txs.create(buy(f.alice, f.widget, 1)).await.unwrap_err();
        assert_eq!(err.kind(), StatusKind::NotFound);
    }

    #[tokio::test]
    async fn test_overflowing_amount_is_invalid() {
        let f = fixture().await;
        let draft = TransactionDraft {
            price_cents: Some(i64::MAX),
            ..buy(f.alice, f.widget, 2)
        };

        let err = f.engine.transactions.create(draft).await.unwrap_err();
        assert_eq!(err.kind(), StatusKind::Invalid);
        assert!(matches!(err.cause(), Some(ServiceError::Validation(_))));
    }

    #[tokio::test]
    async fn test_update_moves_balance_by_difference() {
        let f = fixture().await;
        let txs = &f.engine.transactions;
        let id = txs.create(buy(f.alice, f.widget, 3)).await.unwrap().value;
        assert_eq!(f.ledger.balance_of(f.alice).await, 7_000);

        // 30.00 → 50.00: balance drops by the 20.00 difference, not by 50.00
        let updated = txs.update(id, buy(f.alice, f.widget, 5)).await.unwrap();
        assert_eq!(updated.value.amount_cents, 5_000);
        assert_eq!(f.ledger.balance_of(f.alice).await, 5_000);

        // 50.00 → 10.00: 40.00 comes back
        txs.update(id, buy(f.alice, f.widget, 1)).await.unwrap();
        assert_eq!(f.ledger.balance_of(f.alice).await, 9_000);
    }

    #[tokio::test]
    async fn test_update_requires_current_balance_to_cover_new_amount() {
        let f = fixture().await;
        let txs = &f.engine.transactions;
        let id = txs.create(buy(f.alice, f.widget, 3)).await.unwrap().value;

        // balance 70.00 < new amount 80.00
        let err = txs.update(id, buy(f.alice, f.widget, 8)).await.unwrap_err();
        assert_eq!(err.kind(), StatusKind::Invalid);
        assert_eq!(f.ledger.balance_of(f.alice).await, 7_000);
        assert_eq!(txs.get_by_id(id).await.unwrap().value.qty, 3);
    }

    #[tokio::test]
    async fn test_update_missing_transaction() {
        let f = fixture().await;
        let err = f
            .engine
            .transactions
            .update(5, buy(f.alice, f.widget, 1))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), StatusKind::NotFound);
        assert_eq!(err.message(), "transaction 5 not found");
    }

    #[tokio::test]
    async fn test_delete_restores_balance_once() {
        let f = fixture().await;
        let txs = &f.engine.transactions;
        let id = txs.create(buy(f.alice, f.widget, 3)).await.unwrap().value;

        txs.delete(id).await.unwrap();
        assert_eq!(f.ledger.balance_of(f.alice).await, 10_000);
        assert_eq!(txs.get_by_id(id).await.unwrap_err().kind(), StatusKind::NotFound);

        assert_eq!(txs.delete(id).await.unwrap_err().kind(), StatusKind::NotFound);
        assert_eq!(f.ledger.balance_of(f.alice).await, 10_000);
    }

    #[tokio::test]
    async fn test_refund_that_would_overflow_is_refused() {
        let f = fixture().await;
        let txs = &f.engine.transactions;
        let id = txs.create(buy(f.alice, f.widget, 3)).await.unwrap().value;
        let nearly_full = i64::MAX - 100;
        f.ledger.set_balance(f.alice, nearly_full).await;

        let err = txs.delete(id).await.unwrap_err();
        assert_eq!(err.kind(), StatusKind::Invalid);
        assert_eq!(
            err.cause(),
            Some(&ServiceError::BalanceOverflow { transaction_id: id })
        );

        let err = txs.update(id, buy(f.alice, f.widget, 1)).await.unwrap_err();
        assert_eq!(err.kind(), StatusKind::Invalid);

        assert_eq!(f.ledger.balance_of(f.alice).await, nearly_full);
        assert_eq!(txs.get_by_id(id).await.unwrap().value.qty, 3);
    }

    #[tokio::test]
    async fn test_views_and_filters() {
        let f = fixture().await;
        let txs = &f.engine.transactions;
        let gadget = f
            .engine
            .items
            .create(ItemDraft {
                name: "Gadget".to_string(),
                cost_cents: 100,
                price_cents: 200,
                sort: 2,
            })
            .await
            .unwrap()
            .value;

        let first = txs.create(buy(f.alice, f.widget, 1)).await.unwrap().value;
        txs.create(buy(f.alice, gadget, 2)).await.unwrap();

        let view = txs.view_by_id(first).await.unwrap().value;
        assert_eq!(view.customer_name, "Alice");
        assert_eq!(view.item_name, "Widget");

        assert_eq!(txs.views(Page::all()).await.unwrap().value.len(), 2);

        let by_item = TransactionFilter {
            item_name: Some("Gadget".to_string()),
            ..Default::default()
        };
        let rows = txs.views_by_filter(by_item, Page::all()).await.unwrap().value;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].item_name, "Gadget");

        let both = TransactionFilter {
            id: Some(first),
            item_name: Some("Gadget".to_string()),
            ..Default::default()
        };
        assert!(txs
            .views_by_filter(both, Page::all())
            .await
            .unwrap()
            .value
            .is_empty());
    }

    #[tokio::test]
    async fn test_empty_filter_is_rejected() {
        let f = fixture().await;
        let err = f
            .engine
            .transactions
            .views_by_filter(TransactionFilter::default(), Page::all())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), StatusKind::Invalid);
        assert_eq!(err.cause(), Some(&ServiceError::EmptyFilter));
    }

    #[tokio::test]
    async fn test_store_failure_during_checks_is_internal() {
        let f = fixture().await;
        f.ledger.fail_next("connection reset").await;

        let err = f
            .engine
            .transactions
            .create(buy(f.alice, f.widget, 1))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), StatusKind::Internal);
        assert_eq!(f.ledger.balance_of(f.alice).await, 10_000);
    }
}
