//! Deal Records

use jiff::Timestamp;

use crate::uuids::TypedUuid;

/// Deal UUID
pub type DealUuid = TypedUuid<DealRecord>;

/// Deal Record
#[derive(Debug, Clone, PartialEq)]
pub struct DealRecord {
    /// System-generated primary key. Never reused.
    pub uuid: DealUuid,

    /// Owning party. Immutable after creation.
    pub owner_id: String,

    /// Deal name, unique per owner. Immutable after creation.
    pub name: String,

    pub description: String,

    /// Monetary value; always strictly positive.
    pub value_in_gwp: f64,

    pub created_at: Timestamp,

    /// Equal to `created_at` until the first update.
    pub updated_at: Timestamp,
}
