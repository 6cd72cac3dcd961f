//! # tally-engine: Business Rules for Tally
//!
//! Everything that decides whether a write is allowed lives here; everything
//! that performs it lives behind the store ports.
//!
//! ## Control Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  HTTP handler                                                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                tally-engine (THIS CRATE)                        │   │
//! │  │                                                                 │   │
//! │  │  CustomerService   ItemService   TransactionService            │   │
//! │  │        │                │          │      │      │             │   │
//! │  │        ▼                ▼          ▼      ▼      ▼             │   │
//! │  │  dyn CustomerStore  dyn ItemStore  ...  dyn TransactionStore   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  tally-db (SQLite) or any other implementation of the ports            │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every public operation returns [`ServiceResult`]: a [`Reply`] carrying the
//! value and its success [`Status`], or a failure `Status` classifying what
//! went wrong.

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod ports;
pub mod service;
pub mod status;

#[cfg(test)]
pub(crate) mod fake;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::ServiceError;
pub use ports::{CustomerStore, ItemStore, LedgerWrite, StoreError, StoreResult, TransactionStore};
pub use service::{CustomerService, ItemService, TransactionService};
pub use status::{Reply, ServiceResult, Status, StatusKind};

use std::sync::Arc;

/// The three services wired to one set of stores.
#[derive(Clone)]
pub struct Engine {
    pub customers: CustomerService,
    pub items: ItemService,
    pub transactions: TransactionService,
}

impl Engine {
    pub fn new(
        customers: Arc<dyn CustomerStore>,
        items: Arc<dyn ItemStore>,
        transactions: Arc<dyn TransactionStore>,
    ) -> Self {
        Engine {
            customers: CustomerService::new(customers.clone()),
            items: ItemService::new(items.clone()),
            transactions: TransactionService::new(customers, items, transactions),
        }
    }
}
