//! Item endpoints.

use axum::extract::State;
use axum::response::Response;
use axum::routing::get;
use axum::Router;

use tally_core::{ItemDraft, Page};

use super::{render, render_created, render_message};
use crate::error::ApiResult;
use crate::extract::{IdPath, JsonBody, QueryParams};
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/item", get(list).post(create))
        .route("/item/{id}", get(fetch).put(update).delete(remove))
}

async fn create(
    State(state): State<AppState>,
    JsonBody(draft): JsonBody<ItemDraft>,
) -> ApiResult<Response> {
    Ok(render_created(state.engine.items.create(draft).await?))
}

async fn list(
    State(state): State<AppState>,
    QueryParams(page): QueryParams<Page>,
) -> ApiResult<Response> {
    Ok(render(state.engine.items.get_all(page).await?))
}

async fn fetch(State(state): State<AppState>, IdPath(id): IdPath) -> ApiResult<Response> {
    Ok(render(state.engine.items.get_by_id(id).await?))
}

async fn update(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    JsonBody(draft): JsonBody<ItemDraft>,
) -> ApiResult<Response> {
    Ok(render(state.engine.items.update(id, draft).await?))
}

async fn remove(State(state): State<AppState>, IdPath(id): IdPath) -> ApiResult<Response> {
    Ok(render_message(state.engine.items.delete(id).await?))
}
