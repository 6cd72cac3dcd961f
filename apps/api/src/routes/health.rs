//! Liveness and database health.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use tracing::warn;

use crate::AppState;

#[derive(Debug, Serialize)]
struct HealthBody {
    status: &'static str,
    database: bool,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/healthz", get(healthz))
}

async fn healthz(State(state): State<AppState>) -> Response {
    let database = state.db.health_check().await;
    if database {
        let body = HealthBody {
            status: "ok",
            database,
        };
        (StatusCode::OK, Json(body)).into_response()
    } else {
        warn!("Health check failed: database unreachable");
        let body = HealthBody {
            status: "unavailable",
            database,
        };
        (StatusCode::SERVICE_UNAVAILABLE, Json(body)).into_response()
    }
}
