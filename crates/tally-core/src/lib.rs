//! # tally-core: Domain Types for Tally
//!
//! The vocabulary shared by every other crate in the workspace: the three
//! ledger entities, the reporting projection, money, and field validation.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Tally Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    apps/api (axum)                              │   │
//! │  │    /v1/customer  /v1/item  /v1/transaction  /v1/transaction-view│   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    tally-engine (business rules)                │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ tally-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐                  │   │
//! │  │   │   types   │  │   money   │  │ validation│                  │   │
//! │  │   │ Customer  │  │   Money   │  │   rules   │                  │   │
//! │  │   │ Item, Txn │  │           │  │           │                  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘                  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    tally-db (SQLite stores)                     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Customer, Item, Transaction, TransactionView, filters, paging
//! - [`money`] - Money type with integer arithmetic
//! - [`error`] - Validation error type
//! - [`validation`] - Field rules for request drafts
//!
//! ## Example Usage
//!
//! ```rust
//! use tally_core::money::Money;
//!
//! let price = Money::from_cents(1000);
//! let amount = price.checked_mul_qty(3).unwrap();
//! assert_eq!(amount.cents(), 3000);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::ValidationError;
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Minimum length of a customer name, in characters.
pub const CUSTOMER_NAME_MIN_LEN: usize = 5;

/// Minimum length of an item name, in characters.
pub const ITEM_NAME_MIN_LEN: usize = 3;

/// Upper bound on any entity name, in characters.
pub const NAME_MAX_LEN: usize = 100;

/// Largest balance a customer may be given directly: 10 trillion in whole
/// units. Refunds may still carry a balance above it.
pub const BALANCE_MAX_CENTS: i64 = 1_000_000_000_000_000;
