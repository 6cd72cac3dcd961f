//! Customer endpoints.

use axum::extract::State;
use axum::response::Response;
use axum::routing::get;
use axum::Router;

use tally_core::{CustomerDraft, Page};

use super::{render, render_created, render_message};
use crate::error::ApiResult;
use crate::extract::{IdPath, JsonBody, QueryParams};
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/customer", get(list).post(create))
        .route("/customer/{id}", get(fetch).put(update).delete(remove))
}

async fn create(
    State(state): State<AppState>,
    JsonBody(draft): JsonBody<CustomerDraft>,
) -> ApiResult<Response> {
    let reply = state.engine.customers.create(draft).await?;
    Ok(render_created(reply))
}

async fn list(
    State(state): State<AppState>,
    QueryParams(page): QueryParams<Page>,
) -> ApiResult<Response> {
    Ok(render(state.engine.customers.get_all(page).await?))
}

async fn fetch(State(state): State<AppState>, IdPath(id): IdPath) -> ApiResult<Response> {
    Ok(render(state.engine.customers.get_by_id(id).await?))
}

async fn update(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    JsonBody(draft): JsonBody<CustomerDraft>,
) -> ApiResult<Response> {
    Ok(render(state.engine.customers.update(id, draft).await?))
}

async fn remove(State(state): State<AppState>, IdPath(id): IdPath) -> ApiResult<Response> {
    Ok(render_message(state.engine.customers.delete(id).await?))
}
