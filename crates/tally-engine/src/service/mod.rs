//! # Services
//!
//! One service per entity. Each public method runs its checks through an
//! inner `Result<_, ServiceError>` and converts the outcome into a
//! [`ServiceResult`] in one place, so logging and classification stay
//! uniform.

pub mod customer;
pub mod item;
pub mod transaction;

pub use customer::CustomerService;
pub use item::ItemService;
pub use transaction::TransactionService;

use tracing::{error, warn};

use crate::error::ServiceError;
use crate::ports::{StoreError, StoreResult};
use crate::status::{Reply, ServiceResult, Status};

/// Wraps an inner outcome as a `ServiceResult`, logging failures.
pub(crate) fn respond<T>(
    op: &'static str,
    outcome: Result<T, ServiceError>,
    success: impl FnOnce() -> Status,
) -> ServiceResult<T> {
    match outcome {
        Ok(value) => Ok(Reply::new(value, success())),
        Err(err @ ServiceError::Store(_)) => {
            error!(op, error = %err, "Operation failed");
            Err(Status::failure(err))
        }
        Err(err) => {
            warn!(op, reason = %err, "Operation rejected");
            Err(Status::failure(err))
        }
    }
}

/// A row that must exist.
pub(crate) fn require<T>(
    entity: &'static str,
    id: i64,
    found: StoreResult<Option<T>>,
) -> Result<T, ServiceError> {
    found?.ok_or(ServiceError::not_found(entity, id))
}

/// A soft delete that must have hit an active row.
pub(crate) fn require_deleted(
    entity: &'static str,
    id: i64,
    deleted: StoreResult<bool>,
) -> Result<(), ServiceError> {
    if deleted? {
        Ok(())
    } else {
        Err(ServiceError::not_found(entity, id))
    }
}

/// A unique-index hit on write becomes a duplicate-name rejection.
pub(crate) fn classify_write(entity: &'static str, name: &str, err: StoreError) -> ServiceError {
    match err {
        StoreError::Duplicate { .. } => ServiceError::duplicate(entity, name),
        other => ServiceError::Store(other),
    }
}
