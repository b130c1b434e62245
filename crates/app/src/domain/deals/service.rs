//! Deals service.

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    sync::Arc,
};

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use tracing::{error, info, warn};

use crate::domain::deals::{
    data::{DealUpdate, NewDeal},
    errors::{DealsServiceError, ErrorKind, Operation, translate},
    guard::{Uniqueness, check_uniqueness},
    records::{DealRecord, DealUuid},
    store::{DealsStore, StoreError},
};

/// Deal lifecycle over any [`DealsStore`].
#[derive(Clone)]
pub struct DealsController {
    store: Arc<dyn DealsStore>,
}

impl DealsController {
    #[must_use]
    pub fn new(store: Arc<dyn DealsStore>) -> Self {
        Self { store }
    }

    /// Translate a store failure and log it at a level matching its kind.
    fn fail(operation: Operation, error: StoreError) -> DealsServiceError {
        let failure = translate(operation, error);

        match failure.kind() {
            ErrorKind::InternalError => {
                error!(%operation, error = ?failure, "deal operation failed");
            }
            ErrorKind::Throttled | ErrorKind::Conflict => {
                warn!(%operation, %failure, "deal operation rejected by storage");
            }
            ErrorKind::InvalidInput | ErrorKind::NotFound => {
                info!(%operation, %failure, "deal operation did not apply");
            }
        }

        failure
    }
}

impl Debug for DealsController {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("DealsController").finish_non_exhaustive()
    }
}

#[async_trait]
impl DealsService for DealsController {
    #[tracing::instrument(
        name = "deals.service.create_deal",
        skip(self, deal),
        fields(owner_id = %deal.owner_id, deal_uuid = tracing::field::Empty)
    )]
    async fn create_deal(&self, deal: NewDeal) -> Result<DealRecord, DealsServiceError> {
        let uniqueness = check_uniqueness(self.store.as_ref(), &deal.owner_id, &deal.name)
            .await
            .map_err(|error| Self::fail(Operation::Create, error))?;

        if uniqueness == Uniqueness::Taken {
            warn!(name = %deal.name, "deal name already taken for owner");

            return Err(DealsServiceError::NameTaken { name: deal.name });
        }

        let uuid = DealUuid::new();
        let now = Timestamp::now();

        tracing::Span::current().record("deal_uuid", tracing::field::display(uuid));

        let created = self
            .store
            .put_if_absent(DealRecord {
                uuid,
                owner_id: deal.owner_id,
                name: deal.name,
                description: deal.description,
                value_in_gwp: deal.value_in_gwp,
                created_at: now,
                updated_at: now,
            })
            .await
            .map_err(|error| Self::fail(Operation::Create, error))?;

        info!("created deal");

        Ok(created)
    }

    #[tracing::instrument(name = "deals.service.get_deal", skip(self))]
    async fn get_deal(&self, deal: DealUuid) -> Result<DealRecord, DealsServiceError> {
        self.store
            .get_by_id(deal)
            .await
            .map_err(|error| Self::fail(Operation::Get(deal), error))?
            .ok_or(DealsServiceError::NotFound(deal))
    }

    #[tracing::instrument(name = "deals.service.list_deals_by_owner", skip(self))]
    async fn list_deals_by_owner(
        &self,
        owner_id: String,
    ) -> Result<Vec<DealRecord>, DealsServiceError> {
        self.store
            .query_by_owner(owner_id)
            .await
            .map_err(|error| Self::fail(Operation::ListByOwner, error))
    }

    #[tracing::instrument(name = "deals.service.update_deal", skip(self, update))]
    async fn update_deal(
        &self,
        deal: DealUuid,
        update: DealUpdate,
    ) -> Result<DealRecord, DealsServiceError> {
        let updated = self
            .store
            .update_if_exists(deal, update, Timestamp::now())
            .await
            .map_err(|error| Self::fail(Operation::Update(deal), error))?;

        info!("updated deal");

        Ok(updated)
    }

    #[tracing::instrument(name = "deals.service.delete_deal", skip(self))]
    async fn delete_deal(&self, deal: DealUuid) -> Result<DealRecord, DealsServiceError> {
        let prior = self
            .store
            .get_by_id(deal)
            .await
            .map_err(|error| Self::fail(Operation::Delete(deal), error))?
            .ok_or(DealsServiceError::NotFound(deal))?;

        let removed = self
            .store
            .delete_by_id(deal)
            .await
            .map_err(|error| Self::fail(Operation::Delete(deal), error))?;

        // Gone between the read and the delete; the caller's intent still holds.
        if removed.is_none() {
            warn!("deal removed concurrently, treating delete as applied");
        }

        info!("deleted deal");

        Ok(removed.unwrap_or(prior))
    }
}

#[automock]
#[async_trait]
pub trait DealsService: Send + Sync {
    /// Create a deal under a fresh id, unless the owner already has one with this name.
    async fn create_deal(&self, deal: NewDeal) -> Result<DealRecord, DealsServiceError>;

    /// Retrieve a single deal.
    async fn get_deal(&self, deal: DealUuid) -> Result<DealRecord, DealsServiceError>;

    /// Retrieve every deal belonging to an owner.
    async fn list_deals_by_owner(
        &self,
        owner_id: String,
    ) -> Result<Vec<DealRecord>, DealsServiceError>;

    /// Apply an update to an existing deal. Never creates one.
    async fn update_deal(
        &self,
        deal: DealUuid,
        update: DealUpdate,
    ) -> Result<DealRecord, DealsServiceError>;

    /// Delete a deal, returning its state before removal.
    async fn delete_deal(&self, deal: DealUuid) -> Result<DealRecord, DealsServiceError>;
}
