//! # Domain Types
//!
//! Core domain types used throughout Tally.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Customer     │   │   Transaction   │   │      Item       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │◄──│  customer_id    │   │  id             │       │
//! │  │  name (unique)  │   │  item_id        │──►│  name (unique)  │       │
//! │  │  balance_cents  │   │  qty            │   │  cost_cents     │       │
//! │  └─────────────────┘   │  price_cents    │   │  price_cents    │       │
//! │                        │  amount_cents   │   │  sort           │       │
//! │                        └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  TransactionView = Transaction ⋈ Customer.name ⋈ Item.name (read-only) │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Drafts
//! `*Draft` types are what callers send: no id, no timestamps. Stores fill
//! those in. `TransactionWrite` is a draft after the engine has resolved the
//! unit price and computed the amount.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Customer
// =============================================================================

/// A customer holding a cash balance that transactions draw down.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Customer {
    pub id: i64,

    /// Display name, unique among non-deleted customers.
    pub name: String,

    /// Remaining balance in cents.
    pub balance_cents: i64,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,

    /// Set when the customer is soft-deleted. Normal reads never return
    /// such rows, so this is `None` on everything a caller sees.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(as = "Option<String>")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Customer {
    #[inline]
    pub fn balance(&self) -> Money {
        Money::from_cents(self.balance_cents)
    }
}

/// Fields a caller supplies to create or replace a customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CustomerDraft {
    pub name: String,
    pub balance_cents: i64,
}

// =============================================================================
// Item
// =============================================================================

/// A catalog item that transactions sell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Item {
    pub id: i64,

    /// Unique among non-deleted items.
    pub name: String,

    pub cost_cents: i64,

    /// Catalog unit price; used when a transaction omits its own price.
    pub price_cents: i64,

    /// Display rank.
    pub sort: i64,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(as = "Option<String>")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Item {
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }
}

/// Fields a caller supplies to create or replace an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ItemDraft {
    pub name: String,
    pub cost_cents: i64,
    pub price_cents: i64,
    pub sort: i64,
}

// =============================================================================
// Transaction
// =============================================================================

/// A sale of `qty` units of an item to a customer.
///
/// `amount_cents` is always `price_cents × qty` as computed by the engine
/// when the row was written; stores never recompute it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Transaction {
    pub id: i64,
    pub customer_id: i64,
    pub item_id: i64,
    pub qty: i64,
    pub price_cents: i64,
    pub amount_cents: i64,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(as = "Option<String>")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Transaction {
    #[inline]
    pub fn amount(&self) -> Money {
        Money::from_cents(self.amount_cents)
    }
}

/// What a caller sends to create or replace a transaction.
///
/// `price_cents` may be omitted, in which case the item's catalog price
/// applies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TransactionDraft {
    pub customer_id: i64,
    pub item_id: i64,
    pub qty: i64,
    #[serde(default)]
    #[ts(optional)]
    pub price_cents: Option<i64>,
}

/// A transaction ready for the store: unit price resolved, amount computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransactionWrite {
    pub customer_id: i64,
    pub item_id: i64,
    pub qty: i64,
    pub price: Money,
    pub amount: Money,
}

// =============================================================================
// Transaction View
// =============================================================================

/// Read-only reporting row: a transaction joined with its customer and
/// item names. Never stored; always derived at read time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct TransactionView {
    pub id: i64,
    pub customer_id: i64,
    pub customer_name: String,
    pub item_id: i64,
    pub item_name: String,
    pub qty: i64,
    pub price_cents: i64,
    pub amount_cents: i64,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

/// Narrows a transaction-view query.
///
/// A field counts as populated when it is present and non-zero (id) or
/// non-blank (names). Populated fields combine with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TransactionFilter {
    #[serde(default)]
    #[ts(optional)]
    pub id: Option<i64>,
    #[serde(default)]
    #[ts(optional)]
    pub customer_name: Option<String>,
    #[serde(default)]
    #[ts(optional)]
    pub item_name: Option<String>,
}

impl TransactionFilter {
    /// Transaction id, if populated.
    pub fn id(&self) -> Option<i64> {
        self.id.filter(|id| *id != 0)
    }

    /// Trimmed customer name, if populated.
    pub fn customer_name(&self) -> Option<&str> {
        non_blank(self.customer_name.as_deref())
    }

    /// Trimmed item name, if populated.
    pub fn item_name(&self) -> Option<&str> {
        non_blank(self.item_name.as_deref())
    }

    /// True when no field is populated.
    pub fn is_empty(&self) -> bool {
        self.id().is_none() && self.customer_name().is_none() && self.item_name().is_none()
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

// =============================================================================
// Paging
// =============================================================================

/// Limit/offset window for list reads. Zero means "no restriction" for each
/// value independently.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Page {
    #[serde(default)]
    pub limit: u32,
    #[serde(default)]
    pub offset: u32,
}

impl Page {
    pub const fn new(limit: u32, offset: u32) -> Self {
        Page { limit, offset }
    }

    /// Everything.
    pub const fn all() -> Self {
        Page { limit: 0, offset: 0 }
    }

    pub const fn is_unrestricted(&self) -> bool {
        self.limit == 0 && self.offset == 0
    }

    /// Applies the window to an already-ordered slice.
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = (self.offset as usize).min(items.len());
        let rest = &items[start..];
        if self.limit == 0 {
            rest
        } else {
            &rest[..(self.limit as usize).min(rest.len())]
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
