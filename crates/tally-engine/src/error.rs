//! # Service Errors
//!
//! The classified reasons an engine operation fails. Each one becomes the
//! cause of a failure [`Status`](crate::status::Status).

use thiserror::Error;

use tally_core::{Money, ValidationError};

use crate::ports::StoreError;

/// Why an engine operation was refused or could not complete.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    /// A referenced row does not exist or is soft-deleted.
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    /// A field rule was broken.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The customer cannot cover the transaction amount.
    #[error("customer {customer_id} has insufficient balance for {amount}")]
    InsufficientBalance { customer_id: i64, amount: Money },

    /// Refunding the transaction would overflow its customer's balance.
    #[error("refunding transaction {transaction_id} would overflow the customer balance")]
    BalanceOverflow { transaction_id: i64 },

    /// A view filter with nothing populated.
    #[error("at least one of id, customer_name or item_name is required")]
    EmptyFilter,

    /// Another active row already uses this name.
    #[error("{entity} name '{name}' already exists")]
    Duplicate { entity: &'static str, name: String },

    /// Storage failed for reasons unrelated to business rules.
    #[error("storage failure: {0}")]
    Store(#[from] StoreError),
}

impl ServiceError {
    pub(crate) fn not_found(entity: &'static str, id: i64) -> Self {
        ServiceError::NotFound { entity, id }
    }

    pub(crate) fn duplicate(entity: &'static str, name: &str) -> Self {
        ServiceError::Duplicate {
            entity,
            name: name.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            ServiceError::not_found("customer", 7).to_string(),
            "customer 7 not found"
        );
        assert_eq!(
            ServiceError::InsufficientBalance {
                customer_id: 1,
                amount: Money::from_cents(10_000),
            }
            .to_string(),
            "customer 1 has insufficient balance for 100.00"
        );
        assert_eq!(
            ServiceError::duplicate("item", "Widget").to_string(),
            "item name 'Widget' already exists"
        );
        assert_eq!(
            ServiceError::BalanceOverflow { transaction_id: 3 }.to_string(),
            "refunding transaction 3 would overflow the customer balance"
        );
    }

    #[test]
    fn test_validation_is_transparent() {
        let err: ServiceError = ValidationError::MustBePositive {
            field: "qty".to_string(),
        }
        .into();
        assert_eq!(err.to_string(), "qty must be positive");
    }
}
