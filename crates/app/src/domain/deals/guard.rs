//! Owner and name uniqueness.
//!
//! The owner-index lookup and the later insert are two separate storage calls,
//! so two concurrent creates for the same owner and name can both pass. The
//! check is best-effort under concurrency.

use tracing::debug;

use crate::domain::deals::store::{DealsStore, StoreError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Uniqueness {
    Unique,
    Taken,
}

#[tracing::instrument(
    name = "deals.guard.check_uniqueness",
    skip(store),
    fields(owner_deal_count = tracing::field::Empty),
    err
)]
pub(crate) async fn check_uniqueness(
    store: &dyn DealsStore,
    owner_id: &str,
    name: &str,
) -> Result<Uniqueness, StoreError> {
    let deals = store.query_by_owner(owner_id.to_string()).await?;

    tracing::Span::current().record("owner_deal_count", deals.len());

    if deals.iter().any(|deal| deal.name == name) {
        debug!("name already taken for owner");

        return Ok(Uniqueness::Taken);
    }

    Ok(Uniqueness::Unique)
}
