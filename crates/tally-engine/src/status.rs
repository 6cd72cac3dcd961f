//! # Status Carrier
//!
//! The envelope every engine operation returns, success or failure.
//!
//! ## Classification
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ServiceError                 StatusKind      (HTTP, chosen by apps/api)│
//! │  ────────────────────────     ──────────      ─────                     │
//! │  (none, create)           →   Created         201                       │
//! │  (none)                   →   Ok              200                       │
//! │  NotFound                 →   NotFound        404                       │
//! │  Validation               ┐                                             │
//! │  InsufficientBalance      │                                             │
//! │  EmptyFilter              ├→  Invalid         400                       │
//! │  Duplicate                ┘                                             │
//! │  Store                    →   Internal        500                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;

use crate::error::ServiceError;

/// Outcome class of an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusKind {
    Ok,
    Created,
    NotFound,
    Invalid,
    Internal,
}

impl StatusKind {
    pub fn is_success(self) -> bool {
        matches!(self, StatusKind::Ok | StatusKind::Created)
    }
}

/// Message, classification and (for failures) the underlying cause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    kind: StatusKind,
    message: String,
    cause: Option<ServiceError>,
}

impl Status {
    /// Plain success.
    pub fn success(message: impl Into<String>) -> Self {
        Status {
            kind: StatusKind::Ok,
            message: message.into(),
            cause: None,
        }
    }

    /// Success that created something.
    pub fn created(message: impl Into<String>) -> Self {
        Status {
            kind: StatusKind::Created,
            message: message.into(),
            cause: None,
        }
    }

    /// Failure classified from its cause.
    ///
    /// Storage failures get a fixed message; the details stay in the cause.
    pub fn failure(cause: ServiceError) -> Self {
        let kind = match cause {
            ServiceError::NotFound { .. } => StatusKind::NotFound,
            ServiceError::Validation(_)
            | ServiceError::InsufficientBalance { .. }
            | ServiceError::BalanceOverflow { .. }
            | ServiceError::EmptyFilter
            | ServiceError::Duplicate { .. } => StatusKind::Invalid,
            ServiceError::Store(_) => StatusKind::Internal,
        };
        let message = match kind {
            StatusKind::Internal => "internal storage error".to_string(),
            _ => cause.to_string(),
        };

        Status {
            kind,
            message,
            cause: Some(cause),
        }
    }

    /// True when there is no underlying cause.
    pub fn ok(&self) -> bool {
        self.cause.is_none()
    }

    pub fn kind(&self) -> StatusKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn cause(&self) -> Option<&ServiceError> {
        self.cause.as_ref()
    }
}

impl From<ServiceError> for Status {
    fn from(cause: ServiceError) -> Self {
        Status::failure(cause)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for Status {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.cause
            .as_ref()
            .map(|c| c as &(dyn std::error::Error + 'static))
    }
}

// =============================================================================
// Reply
// =============================================================================

/// A successful value together with its status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply<T> {
    pub value: T,
    pub status: Status,
}

impl<T> Reply<T> {
    pub fn new(value: T, status: Status) -> Self {
        Reply { value, status }
    }

    pub fn into_value(self) -> T {
        self.value
    }
}

/// What every engine operation returns.
pub type ServiceResult<T> = Result<Reply<T>, Status>;
