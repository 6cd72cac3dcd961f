//! # Validation Module
//!
//! Field rules for the drafts callers send in.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: HTTP extractors (apps/api)                                   │
//! │  └── Type validation (JSON / path / query deserialization)             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Engine                                                       │
//! │  ├── THIS MODULE: field rules                                          │
//! │  └── Cross-entity rules (existence, uniqueness, balance)               │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── Partial UNIQUE indexes on active names                            │
//! │  ├── Foreign keys                                                      │
//! │  └── Guarded balance deduction                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{CustomerDraft, ItemDraft, TransactionDraft};
use crate::{BALANCE_MAX_CENTS, CUSTOMER_NAME_MIN_LEN, ITEM_NAME_MIN_LEN, NAME_MAX_LEN};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a display name, counted in characters after trimming.
///
/// ## Example
/// ```rust
/// use tally_core::validation::validate_name;
///
/// assert!(validate_name("name", "Alice", 5).is_ok());
/// assert!(validate_name("name", "Bob", 5).is_err());
/// assert!(validate_name("name", "   ", 1).is_err());
/// ```
pub fn validate_name(field: &str, name: &str, min: usize) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::required(field));
    }

    let len = name.chars().count();

    if len < min {
        return Err(ValidationError::TooShort {
            field: field.to_string(),
            min,
        });
    }

    if len > NAME_MAX_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: NAME_MAX_LEN,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Strictly positive (> 0).
pub fn validate_positive(field: &str, value: i64) -> ValidationResult<()> {
    if value <= 0 {
        return Err(ValidationError::must_be_positive(field));
    }

    Ok(())
}

/// A customer balance may be zero but never negative, and never above
/// [`BALANCE_MAX_CENTS`].
pub fn validate_balance_cents(cents: i64) -> ValidationResult<()> {
    if !(0..=BALANCE_MAX_CENTS).contains(&cents) {
        return Err(ValidationError::OutOfRange {
            field: "balance_cents".to_string(),
            min: 0,
            max: BALANCE_MAX_CENTS,
        });
    }

    Ok(())
}

/// Referenced ids start at 1.
pub fn validate_reference(field: &str, id: i64) -> ValidationResult<()> {
    if id < 1 {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 1,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Computes `price × qty`, failing instead of wrapping.
///
/// ## Example
/// ```rust
/// use tally_core::money::Money;
/// use tally_core::validation::line_amount;
///
/// assert_eq!(line_amount(Money::from_cents(1000), 3).unwrap().cents(), 3000);
/// assert!(line_amount(Money::from_cents(i64::MAX), 2).is_err());
/// ```
pub fn line_amount(price: Money, qty: i64) -> ValidationResult<Money> {
    price.checked_mul_qty(qty).ok_or_else(|| ValidationError::Overflow {
        field: "amount".to_string(),
    })
}

// =============================================================================
// Draft Validators
// =============================================================================

/// Name 5..=100 characters, balance non-negative.
pub fn validate_customer_draft(draft: &CustomerDraft) -> ValidationResult<()> {
    validate_name("name", &draft.name, CUSTOMER_NAME_MIN_LEN)?;
    validate_balance_cents(draft.balance_cents)
}

/// Name 3..=100 characters; cost, price and sort all positive.
pub fn validate_item_draft(draft: &ItemDraft) -> ValidationResult<()> {
    validate_name("name", &draft.name, ITEM_NAME_MIN_LEN)?;
    validate_positive("cost_cents", draft.cost_cents)?;
    validate_positive("price_cents", draft.price_cents)?;
    validate_positive("sort", draft.sort)
}

/// Both references ≥ 1, qty ≥ 1, explicit price (when given) positive.
pub fn validate_transaction_draft(draft: &TransactionDraft) -> ValidationResult<()> {
    validate_reference("customer_id", draft.customer_id)?;
    validate_reference("item_id", draft.item_id)?;
    validate_positive("qty", draft.qty)?;

    if let Some(price) = draft.price_cents {
        validate_positive("price_cents", price)?;
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
