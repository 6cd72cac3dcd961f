//! # API Error Type
//!
//! Turns an engine [`Status`] (or a binding failure) into an HTTP response.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Extractor rejects body/path/query ─────────────────────┐              │
//! │                                                          ▼              │
//! │  Handler ── engine op ── Err(Status) ──► ApiError { status, message }  │
//! │                                                          │              │
//! │                                                          ▼              │
//! │                                   HTTP {status}  {"error": message}    │
//! │                                                                         │
//! │  StatusKind::NotFound  → 404                                           │
//! │  StatusKind::Invalid   → 400                                           │
//! │  StatusKind::Internal  → 500 (message is generic; cause already logged)│
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use tally_engine::{Status, StatusKind};

/// Error returned from handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

/// Body of every failed response.
#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

/// HTTP status for an engine outcome class.
pub fn http_status(kind: StatusKind) -> StatusCode {
    match kind {
        StatusKind::Ok => StatusCode::OK,
        StatusKind::Created => StatusCode::CREATED,
        StatusKind::NotFound => StatusCode::NOT_FOUND,
        StatusKind::Invalid => StatusCode::BAD_REQUEST,
        StatusKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl From<Status> for ApiError {
    fn from(status: Status) -> Self {
        ApiError {
            status: http_status(status.kind()),
            message: status.message().to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorBody {
            error: &self.message,
        });
        (self.status, body).into_response()
    }
}

/// Result type for handlers.
pub type ApiResult<T> = Result<T, ApiError>;
