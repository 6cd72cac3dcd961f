//! # Customer Service
//!
//! Validation and name-uniqueness rules for customers.

use std::sync::Arc;

use tracing::debug;

use tally_core::validation::validate_customer_draft;
use tally_core::{Customer, CustomerDraft, Page};

use crate::error::ServiceError;
use crate::ports::CustomerStore;
use crate::service::{classify_write, require, require_deleted, respond};
use crate::status::{ServiceResult, Status};

const ENTITY: &str = "customer";

#[derive(Clone)]
pub struct CustomerService {
    store: Arc<dyn CustomerStore>,
}

impl CustomerService {
    pub fn new(store: Arc<dyn CustomerStore>) -> Self {
        CustomerService { store }
    }

    /// Creates a customer after checking no active customer has the name.
    pub async fn create(&self, draft: CustomerDraft) -> ServiceResult<i64> {
        let outcome = self.try_create(normalize(draft)).await;
        respond("customer.create", outcome, || Status::created("customer created"))
    }

    async fn try_create(&self, draft: CustomerDraft) -> Result<i64, ServiceError> {
        validate_customer_draft(&draft)?;

        if self.store.id_by_name(&draft.name).await?.is_some() {
            return Err(ServiceError::duplicate(ENTITY, &draft.name));
        }

        let id = self
            .store
            .create(&draft)
            .await
            .map_err(|e| classify_write(ENTITY, &draft.name, e))?;

        debug!(id, "Customer created");
        Ok(id)
    }

    pub async fn get_by_id(&self, id: i64) -> ServiceResult<Customer> {
        let outcome = require(ENTITY, id, self.store.get_by_id(id).await);
        respond("customer.get_by_id", outcome, || Status::success("customer found"))
    }

    /// Zero limit/offset means everything.
    pub async fn get_all(&self, page: Page) -> ServiceResult<Vec<Customer>> {
        let outcome = self.store.get_all(page).await.map_err(ServiceError::from);
        respond("customer.get_all", outcome, || Status::success("customers listed"))
    }

    /// Replaces name and balance. The name may stay the same but may not
    /// collide with a different active customer.
    pub async fn update(&self, id: i64, draft: CustomerDraft) -> ServiceResult<Customer> {
        let outcome = self.try_update(id, normalize(draft)).await;
        respond("customer.update", outcome, || Status::success("customer updated"))
    }

    async fn try_update(&self, id: i64, draft: CustomerDraft) -> Result<Customer, ServiceError> {
        validate_customer_draft(&draft)?;

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

    /// Soft-deletes. Transactions referencing the customer are untouched.
    pub async fn delete(&self, id: i64) -> ServiceResult<()> {
        let outcome = require_deleted(ENTITY, id, self.store.delete(id).await);
        respond("customer.delete", outcome, || Status::success("customer deleted"))
    }
}

fn normalize(draft: CustomerDraft) -> CustomerDraft {
    CustomerDraft {
        name: draft.name.trim().to_string(),
        ..draft
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
