//! # Tally API
//!
//! HTTP delivery layer for the Tally engine.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          API Server                                     │
//! │                                                                         │
//! │  Client ──► axum (8080) ──► TraceLayer ──► CORS ──► /v1 routes          │
//! │                                                          │              │
//! │                                                          ▼              │
//! │                                                  Engine (tally-engine)  │
//! │                                                          │              │
//! │                                                          ▼              │
//! │                                                  SQLite (tally-db)      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The router is built here rather than in `main.rs` so tests can drive it
//! in-process.

pub mod config;
pub mod error;
pub mod extract;
mod routes;

use axum::http::Method;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use tally_db::Database;
use tally_engine::Engine;

pub use config::{ApiConfig, ConfigError};
pub use error::{ApiError, ApiResult};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub engine: Engine,
    pub db: Database,
}

impl AppState {
    /// Wires the engine to `db`'s stores.
    pub fn new(db: Database) -> Self {
        AppState {
            engine: db.engine(),
            db,
        }
    }
}

/// The complete application: `/v1` routes plus request tracing and CORS.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    Router::new()
        .nest("/v1", routes::router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
