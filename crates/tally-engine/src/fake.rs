//! In-memory implementation of all three store ports, for service tests.
//!
//! One mutex guards every table, so each call is trivially atomic. Ledger
//! writes check their guards before mutating anything.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::{Mutex, MutexGuard};

use tally_core::{
    Customer, CustomerDraft, Item, ItemDraft, Money, Page, Transaction, TransactionFilter,
    TransactionView, TransactionWrite,
};

use crate::ports::{
    CustomerStore, ItemStore, LedgerWrite, StoreError, StoreResult, TransactionStore,
};

#[derive(Default)]
struct Tables {
    customers: Vec<Customer>,
    items: Vec<Item>,
    transactions: Vec<Transaction>,
    fail_next: Option<String>,
}

impl Tables {
    fn customer_mut(&mut self, id: i64) -> Option<&mut Customer> {
        self.customers
            .iter_mut()
            .find(|c| c.id == id && c.deleted_at.is_none())
    }

    fn customer(&self, id: i64) -> Option<&Customer> {
        self.customers
            .iter()
            .find(|c| c.id == id && c.deleted_at.is_none())
    }

    fn item(&self, id: i64) -> Option<&Item> {
        self.items.iter().find(|i| i.id == id && i.deleted_at.is_none())
    }

    fn transaction(&self, id: i64) -> Option<&Transaction> {
        self.transactions
            .iter()
            .find(|t| t.id == id && t.deleted_at.is_none())
    }

    fn views(&self) -> Vec<TransactionView> {
        self.transactions
            .iter()
            .filter(|t| t.deleted_at.is_none())
            .filter_map(|t| {
                let customer = self.customer(t.customer_id)?;
                let item = self.item(t.item_id)?;
                Some(TransactionView {
                    id: t.id,
                    customer_id: t.customer_id,
                    customer_name: customer.name.clone(),
                    item_id: t.item_id,
                    item_name: item.name.clone(),
                    qty: t.qty,
                    price_cents: t.price_cents,
                    amount_cents: t.amount_cents,
                    created_at: t.created_at,
                    updated_at: t.updated_at,
                })
            })
            .collect()
    }
}

#[derive(Clone, Default)]
pub(crate) struct FakeLedger {
    tables: Arc<Mutex<Tables>>,
}

impl FakeLedger {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Makes the next store call fail with a backend error.
    pub(crate) async fn fail_next(&self, message: &str) {
        self.tables.lock().await.fail_next = Some(message.to_string());
    }

    /// Balance straight from the table, bypassing the ports.
    pub(crate) async fn balance_of(&self, id: i64) -> i64 {
        let tables = self.tables.lock().await;
        tables
            .customers
            .iter()
            .find(|c| c.id == id)
            .map(|c| c.balance_cents)
            .unwrap_or_default()
    }

    /// Overwrites a balance without going through validation.
    pub(crate) async fn set_balance(&self, id: i64, cents: i64) {
        let mut tables = self.tables.lock().await;
        if let Some(customer) = tables.customers.iter_mut().find(|c| c.id == id) {
            customer.balance_cents = cents;
        }
    }

    async fn lock(&self) -> StoreResult<MutexGuard<'_, Tables>> {
        let mut tables = self.tables.lock().await;
        match tables.fail_next.take() {
            Some(message) => Err(StoreError::Backend(message)),
            None => Ok(tables),
        }
    }
}

fn page_of<T: Clone>(rows: &[T], page: Page) -> Vec<T> {
    page.slice(rows).to_vec()
}

#[async_trait]
impl CustomerStore for FakeLedger {
    async fn create(&self, draft: &CustomerDraft) -> StoreResult<i64> {
        let mut t = self.lock().await?;
        if t.customers
            .iter()
            .any(|c| c.name == draft.name && c.deleted_at.is_none())
        {
            return Err(StoreError::Duplicate {
                field: "customers.name".to_string(),
            });
        }
        let now = Utc::now();
        let id = t.customers.len() as i64 + 1;
        t.customers.push(Customer {
            id,
            name: draft.name.clone(),
            balance_cents: draft.balance_cents,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        });
        Ok(id)
    }

    async fn id_exists(&self, id: i64) -> StoreResult<bool> {
        Ok(self.lock().await?.customer(id).is_some())
    }

    async fn id_by_name(&self, name: &str) -> StoreResult<Option<i64>> {
        let t = self.lock().await?;
        Ok(t.customers
            .iter()
            .find(|c| c.name == name && c.deleted_at.is_none())
            .map(|c| c.id))
    }

    async fn balance(&self, id: i64) -> StoreResult<Option<Money>> {
        Ok(self.lock().await?.customer(id).map(Customer::balance))
    }

    async fn get_by_id(&self, id: i64) -> StoreResult<Option<Customer>> {
        Ok(self.lock().await?.customer(id).cloned())
    }

    async fn get_all(&self, page: Page) -> StoreResult<Vec<Customer>> {
        let t = self.lock().await?;
        let active: Vec<Customer> = t
            .customers
            .iter()
            .filter(|c| c.deleted_at.is_none())
            .cloned()
            .collect();
        Ok(page_of(&active, page))
    }

    async fn update(&self, id: i64, draft: &CustomerDraft) -> StoreResult<Option<Customer>> {
        let mut t = self.lock().await?;
        Ok(t.customer_mut(id).map(|c| {
            c.name = draft.name.clone();
            c.balance_cents = draft.balance_cents;
            c.updated_at = Utc::now();
            c.clone()
        }))
    }

    async fn delete(&self, id: i64) -> StoreResult<bool> {
        let mut t = self.lock().await?;
        Ok(t.customer_mut(id)
            .map(|c| c.deleted_at = Some(Utc::now()))
            .is_some())
    }
}

#[async_trait]
impl ItemStore for FakeLedger {
    async fn create(&self, draft: &ItemDraft) -> StoreResult<i64> {
        let mut t = self.lock().await?;
        if t.items
            .iter()
            .any(|i| i.name == draft.name && i.deleted_at.is_none())
        {
            return Err(StoreError::Duplicate {
                field: "items.name".to_string(),
            });
        }
        let now = Utc::now();
        let id = t.items.len() as i64 + 1;
        t.items.push(Item {
            id,
            name: draft.name.clone(),
            cost_cents: draft.cost_cents,
            price_cents: draft.price_cents,
            sort: draft.sort,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        });
        Ok(id)
    }

    async fn id_exists(&self, id: i64) -> StoreResult<bool> {
        Ok(self.lock().await?.item(id).is_some())
    }

    async fn id_by_name(&self, name: &str) -> StoreResult<Option<i64>> {
        let t = self.lock().await?;
        Ok(t.items
            .iter()
            .find(|i| i.name == name && i.deleted_at.is_none())
            .map(|i| i.id))
    }

    async fn get_by_id(&self, id: i64) -> StoreResult<Option<Item>> {
        Ok(self.lock().await?.item(id).cloned())
    }

    async fn get_all(&self, page: Page) -> StoreResult<Vec<Item>> {
        let t = self.lock().await?;
        let active: Vec<Item> = t
            .items
            .iter()
            .filter(|i| i.deleted_at.is_none())
            .cloned()
            .collect();
        Ok(page_of(&active, page))
    }

    async fn update(&self, id: i64, draft: &ItemDraft) -> StoreResult<Option<Item>> {
        let mut t = self.lock().await?;
        Ok(t.items
            .iter_mut()
            .find(|i| i.id == id && i.deleted_at.is_none())
            .map(|i| {
                i.name = draft.name.clone();
                i.cost_cents = draft.cost_cents;
                i.price_cents = draft.price_cents;
                i.sort = draft.sort;
                i.updated_at = Utc::now();
                i.clone()
            }))
    }

    async fn delete(&self, id: i64) -> StoreResult<bool> {
        let mut t = self.lock().await?;
        Ok(t.items
            .iter_mut()
            .find(|i| i.id == id && i.deleted_at.is_none())
            .map(|i| i.deleted_at = Some(Utc::now()))
            .is_some())
    }
}

#[async_trait]
impl TransactionStore for FakeLedger {
    async fn create(&self, write: &TransactionWrite) -> StoreResult<LedgerWrite<i64>> {
        let mut t = self.lock().await?;
        let amount = write.amount.cents();
        let Some(customer) = t.customer_mut(write.customer_id) else {
            return Ok(LedgerWrite::CustomerMissing);
        };
        if customer.balance_cents < amount {
            return Ok(LedgerWrite::InsufficientBalance);
        }
        customer.balance_cents -= amount;

        let now = Utc::now();
        let id = t.transactions.len() as i64 + 1;
        t.transactions.push(Transaction {
            id,
            customer_id: write.customer_id,
            item_id: write.item_id,
            qty: write.qty,
            price_cents: write.price.cents(),
            amount_cents: amount,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        });
        Ok(LedgerWrite::Applied(id))
    }

    async fn id_exists(&self, id: i64) -> StoreResult<bool> {
        Ok(self.lock().await?.transaction(id).is_some())
    }

    async fn get_by_id(&self, id: i64) -> StoreResult<Option<Transaction>> {
        Ok(self.lock().await?.transaction(id).cloned())
    }

    async fn get_all(&self, page: Page) -> StoreResult<Vec<Transaction>> {
        let t = self.lock().await?;
        let active: Vec<Transaction> = t
            .transactions
            .iter()
            .filter(|tx| tx.deleted_at.is_none())
            .cloned()
            .collect();
        Ok(page_of(&active, page))
    }

    async fn update(
        &self,
        id: i64,
        write: &TransactionWrite,
    ) -> StoreResult<LedgerWrite<Transaction>> {
        let mut t = self.lock().await?;
        let Some(old) = t.transaction(id).cloned() else {
            return Ok(LedgerWrite::TransactionMissing);
        };
        let Some(target) = t.customer(write.customer_id) else {
            return Ok(LedgerWrite::CustomerMissing);
        };
        let refund = if old.customer_id == write.customer_id {
            old.amount_cents
        } else {
            0
        };
        if target.balance_cents + refund < write.amount.cents() {
            return Ok(LedgerWrite::InsufficientBalance);
        }

        let Some(previous) = t.customers.iter_mut().find(|c| c.id == old.customer_id) else {
            return Ok(LedgerWrite::TransactionMissing);
        };
        let Some(restored) = previous.balance_cents.checked_add(old.amount_cents) else {
            return Ok(LedgerWrite::BalanceOverflow);
        };
        previous.balance_cents = restored;
        if let Some(target) = t.customer_mut(write.customer_id) {
            target.balance_cents -= write.amount.cents();
        }

        let row = t
            .transactions
            .iter_mut()
            .find(|tx| tx.id == id)
            .ok_or_else(|| StoreError::Backend("row vanished".to_string()))?;
        row.customer_id = write.customer_id;
        row.item_id = write.item_id;
        row.qty = write.qty;
        row.price_cents = write.price.cents();
        row.amount_cents = write.amount.cents();
        row.updated_at = Utc::now();
        Ok(LedgerWrite::Applied(row.clone()))
    }

    async fn delete(&self, id: i64) -> StoreResult<LedgerWrite<()>> {
        let mut t = self.lock().await?;
        let Some(old) = t.transaction(id).cloned() else {
            return Ok(LedgerWrite::TransactionMissing);
        };
        let Some(customer) = t.customers.iter_mut().find(|c| c.id == old.customer_id) else {
            return Ok(LedgerWrite::TransactionMissing);
        };
        let Some(restored) = customer.balance_cents.checked_add(old.amount_cents) else {
            return Ok(LedgerWrite::BalanceOverflow);
        };
        customer.balance_cents = restored;
        if let Some(row) = t.transactions.iter_mut().find(|tx| tx.id == id) {
            row.deleted_at = Some(Utc::now());
        }
        Ok(LedgerWrite::Applied(()))
    }

    async fn views(&self, page: Page) -> StoreResult<Vec<TransactionView>> {
        Ok(page_of(&self.lock().await?.views(), page))
    }

    async fn view_by_id(&self, id: i64) -> StoreResult<Option<TransactionView>> {
        Ok(self.lock().await?.views().into_iter().find(|v| v.id == id))
    }

    async fn views_by_filter(
        &self,
        filter: &TransactionFilter,
        page: Page,
    ) -> StoreResult<Vec<TransactionView>> {
        let matching: Vec<TransactionView> = self
            .lock()
            .await?
            .views()
            .into_iter()
            .filter(|v| filter.id().map_or(true, |id| v.id == id))
            .filter(|v| filter.customer_name().map_or(true, |n| v.customer_name == n))
            .filter(|v| filter.item_name().map_or(true, |n| v.item_name == n))
            .collect();
        Ok(page_of(&matching, page))
    }
}
