//! Transaction and transaction-view endpoints.

use axum::extract::State;
use axum::response::Response;
use axum::routing::get;
use axum::Router;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};

use tally_core::{Page, TransactionDraft, TransactionFilter};

use super::{render, render_created, render_message};
use crate::error::ApiResult;
use crate::extract::{IdPath, JsonBody, QueryParams};
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/transaction", get(list).post(create))
        .route("/transaction/{id}", get(fetch).put(update).delete(remove))
        .route("/transaction-view", get(list_views))
        .route("/transaction-view/{id}", get(fetch_view))
        .route("/transaction-view-filter", get(filter_views))
}

async fn create(
    State(state): State<AppState>,
    JsonBody(draft): JsonBody<TransactionDraft>,
) -> ApiResult<Response> {
    Ok(render_created(state.engine.transactions.create(draft).await?))
}

async fn list(
    State(state): State<AppState>,
    QueryParams(page): QueryParams<Page>,
) -> ApiResult<Response> {
    Ok(render(state.engine.transactions.get_all(page).await?))
}

async fn fetch(State(state): State<AppState>, IdPath(id): IdPath) -> ApiResult<Response> {
    Ok(render(state.engine.transactions.get_by_id(id).await?))
}

async fn update(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    JsonBody(draft): JsonBody<TransactionDraft>,
) -> ApiResult<Response> {
    Ok(render(state.engine.transactions.update(id, draft).await?))
}

async fn remove(State(state): State<AppState>, IdPath(id): IdPath) -> ApiResult<Response> {
    Ok(render_message(state.engine.transactions.delete(id).await?))
}

// =============================================================================
// Views
// =============================================================================

async fn list_views(
    State(state): State<AppState>,
    QueryParams(page): QueryParams<Page>,
) -> ApiResult<Response> {
    Ok(render(state.engine.transactions.views(page).await?))
}

async fn fetch_view(State(state): State<AppState>, IdPath(id): IdPath) -> ApiResult<Response> {
    Ok(render(state.engine.transactions.view_by_id(id).await?))
}

/// `?id=&customer_name=&item_name=&limit=&offset=`
///
/// Forms submit unused fields as empty strings, so an empty `id` reads as
/// absent rather than as a parse error.
#[derive(Debug, Default, Deserialize)]
struct ViewFilterQuery {
    #[serde(default, deserialize_with = "blank_as_none")]
    id: Option<i64>,
    #[serde(default)]
    customer_name: Option<String>,
    #[serde(default)]
    item_name: Option<String>,
    #[serde(default)]
    limit: u32,
    #[serde(default)]
    offset: u32,
}

impl ViewFilterQuery {
    fn split(self) -> (TransactionFilter, Page) {
        let filter = TransactionFilter {
            id: self.id,
            customer_name: self.customer_name,
            item_name: self.item_name,
        };
        (filter, Page::new(self.limit, self.offset))
    }
}

fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(D::Error::custom),
    }
}

async fn filter_views(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<ViewFilterQuery>,
) -> ApiResult<Response> {
    let (filter, page) = query.split();
    Ok(render(
        state.engine.transactions.views_by_filter(filter, page).await?,
    ))
}
