//! # Item Service
//!
//! Same lifecycle rules as customers: validated fields, unique active names,
//! soft delete.

use std::sync::Arc;

use tracing::debug;

use tally_core::validation::validate_item_draft;
use tally_core::{Item, ItemDraft, Page};

use crate::error::ServiceError;
use crate::ports::ItemStore;
use crate::service::{classify_write, require, require_deleted, respond};
use crate::status::{ServiceResult, Status};

const ENTITY: &str = "item";

#[derive(Clone)]
pub struct ItemService {
    store: Arc<dyn ItemStore>,
}

impl ItemService {
    pub fn new(store: Arc<dyn ItemStore>) -> Self {
        ItemService { store }
    }

    pub async fn create(&self, draft: ItemDraft) -> ServiceResult<i64> {
        let outcome = self.try_create(normalize(draft)).await;
        respond("item.create", outcome, || Status::created("item created"))
    }

    async fn try_create(&self, draft: ItemDraft) -> Result<i64, ServiceError> {
        validate_item_draft(&draft)?;

        if self.store.id_by_name(&draft.name).await?.is_some() {
            return Err(ServiceError::duplicate(ENTITY, &draft.name));
        }

        let id = self
            .store
            .create(&draft)
            .await
            .map_err(|e| classify_write(ENTITY, &draft.name, e))?;

        debug!(id, "Item created");
        Ok(id)
    }

    pub async fn get_by_id(&self, id: i64) -> ServiceResult<Item> {
        let outcome = require(ENTITY, id, self.store.get_by_id(id).await);
        respond("item.get_by_id", outcome, || Status::success("item found"))
    }

    pub async fn get_all(&self, page: Page) -> ServiceResult<Vec<Item>> {
        let outcome = self.store.get_all(page).await.map_err(ServiceError::from);
        respond("item.get_all", outcome, || Status::success("items listed"))
    }

    pub async fn update(&self, id: i64, draft: ItemDraft) -> ServiceResult<Item> {
        let outcome = self.try_update(id, normalize(draft)).await;
        respond("item.update", outcome, || Status::success("item updated"))
    }

    async fn try_update(&self, id: i64, draft: ItemDraft) -> Result<Item, ServiceError> {
        validate_item_draft(&draft)?;

        if !self.store.id_exists(id).await? {
            return Err(ServiceError::not_found(ENTITY, id));
        }

        if let Some(owner) = self.store.id_by_name(&draft.name).await? {
            if owner != id {
                return Err(ServiceError::duplicate(ENTITY, &draft.name));
            }
        }

        self.store
            .update(id, &draft)
            .await
            .map_err(|e| classify_write(ENTITY, &draft.name, e))?
            .ok_or(ServiceError::not_found(ENTITY, id))
    }

    pub async fn delete(&self, id: i64) -> ServiceResult<()> {
        let outcome = require_deleted(ENTITY, id, self.store.delete(id).await);
        respond("item.delete", outcome, || Status::success("item deleted"))
    }
}

fn normalize(draft: ItemDraft) -> ItemDraft {
    ItemDraft {
        name: draft.name.trim().to_string(),
        ..draft
    }
}
