//! Deal record store.
//!
//! The narrow interface the deal lifecycle uses against durable storage. Every
//! failure comes back as a [`StoreError`] signal, never as a bare driver error.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use thiserror::Error;

use crate::domain::deals::{
    data::DealUpdate,
    records::{DealRecord, DealUuid},
};

/// Failure signals raised by a [`DealsStore`].
#[derive(Debug, Error)]
pub enum StoreError {
    /// No table is configured; raised before any I/O.
    #[error("deals table is not configured")]
    MissingTable,

    #[error("storage throughput exceeded")]
    Throttled(#[source] sqlx::Error),

    #[error("storage rejected the request as malformed")]
    Malformed(#[source] sqlx::Error),

    /// A create-only or update-only precondition did not hold.
    #[error("storage precondition failed")]
    ConditionFailed,

    #[error("storage error")]
    Other(#[source] sqlx::Error),
}

/// How a storage failure should be treated, independent of the driver error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    Throttled,
    Malformed,
    ConditionFailed,
    Other,
}

/// SQLSTATE for a unique-key violation.
const UNIQUE_VIOLATION: &str = "23505";

/// Classify a `PostgreSQL` SQLSTATE code.
pub fn classify_sqlstate(code: &str) -> Signal {
    match code {
        UNIQUE_VIOLATION => Signal::ConditionFailed,
        // statement timeout, lock timeout, serialization failure, deadlock
        "57014" | "55P03" | "40001" | "40P01" => Signal::Throttled,
        // not-null and check violations
        "23502" | "23514" => Signal::Malformed,
        // insufficient resources
        code if code.starts_with("53") => Signal::Throttled,
        // data exceptions
        code if code.starts_with("22") => Signal::Malformed,
        _ => Signal::Other,
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(error: sqlx::Error) -> Self {
        let signal = match &error {
            sqlx::Error::PoolTimedOut => Signal::Throttled,
            sqlx::Error::Encode(_) | sqlx::Error::Decode(_) | sqlx::Error::ColumnDecode { .. } => {
                Signal::Malformed
            }
            sqlx::Error::Database(database_error) => database_error
                .code()
                .map_or(Signal::Other, |code| classify_sqlstate(&code)),
            _ => Signal::Other,
        };

        match signal {
            Signal::Throttled => Self::Throttled(error),
            Signal::Malformed => Self::Malformed(error),
            Signal::ConditionFailed => Self::ConditionFailed,
            Signal::Other => Self::Other(error),
        }
    }
}

#[automock]
#[async_trait]
/// Point and indexed access to stored deals.
pub trait DealsStore: Send + Sync {
    /// Point read by primary key.
    async fn get_by_id(&self, deal: DealUuid) -> Result<Option<DealRecord>, StoreError>;

    /// Insert a record, failing with [`StoreError::ConditionFailed`] when the id is taken.
    async fn put_if_absent(&self, deal: DealRecord) -> Result<DealRecord, StoreError>;

    /// Update the mutable fields of an existing record, failing with
    /// [`StoreError::ConditionFailed`] when it does not exist. Never inserts.
    async fn update_if_exists(
        &self,
        deal: DealUuid,
        update: DealUpdate,
        updated_at: Timestamp,
    ) -> Result<DealRecord, StoreError>;

    /// Remove a record, returning it if it was still there.
    async fn delete_by_id(&self, deal: DealUuid) -> Result<Option<DealRecord>, StoreError>;

    /// All records owned by `owner_id`, in no meaningful order.
    async fn query_by_owner(&self, owner_id: String) -> Result<Vec<DealRecord>, StoreError>;
}
