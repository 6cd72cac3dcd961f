//! # Routes
//!
//! Every handler follows the same shape: extract, call one engine
//! operation, render the reply with the HTTP code its Status asks for.
//!
//! ```text
//! /v1
//!  ├── /healthz
//!  ├── /customer            GET (page)   POST
//!  ├── /customer/{id}       GET  PUT  DELETE
//!  ├── /item                GET (page)   POST
//!  ├── /item/{id}           GET  PUT  DELETE
//!  ├── /transaction         GET (page)   POST
//!  ├── /transaction/{id}    GET  PUT  DELETE
//!  ├── /transaction-view            GET (page)
//!  ├── /transaction-view/{id}       GET
//!  └── /transaction-view-filter     GET (filter + page)
//! ```

mod customer;
mod health;
mod item;
mod transaction;

use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use serde::Serialize;

use tally_engine::Reply;

use crate::error::http_status;
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(customer::router())
        .merge(item::router())
        .merge(transaction::router())
}

// =============================================================================
// Reply Rendering
// =============================================================================

#[derive(Debug, Serialize)]
struct CreatedBody {
    id: i64,
}

#[derive(Debug, Serialize)]
struct MessageBody<'a> {
    message: &'a str,
}

/// The value itself as the body.
fn render<T: Serialize>(reply: Reply<T>) -> Response {
    (http_status(reply.status.kind()), Json(reply.value)).into_response()
}

/// `{"id": n}`
fn render_created(reply: Reply<i64>) -> Response {
    let body = CreatedBody { id: reply.value };
    (http_status(reply.status.kind()), Json(body)).into_response()
}

/// `{"message": "..."}`
fn render_message(reply: Reply<()>) -> Response {
    let body = MessageBody {
        message: reply.status.message(),
    };
    (http_status(reply.status.kind()), Json(body)).into_response()
}
