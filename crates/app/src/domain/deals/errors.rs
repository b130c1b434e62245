//! Deals service errors.

use std::fmt::{Display, Formatter, Result as FmtResult};

use thiserror::Error;

use crate::domain::deals::{records::DealUuid, store::StoreError, validation::ValidationError};

/// Client-facing error taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidInput,
    NotFound,
    Conflict,
    /// Caller may retry.
    Throttled,
    InternalError,
}

impl ErrorKind {
    /// Stable snake-case label.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::InvalidInput => "invalid_input",
            Self::NotFound => "not_found",
            Self::Conflict => "conflict",
            Self::Throttled => "throttled",
            Self::InternalError => "internal_error",
        }
    }
}

/// The lifecycle operation a storage failure happened under, with its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Create,
    Get(DealUuid),
    ListByOwner,
    Update(DealUuid),
    Delete(DealUuid),
}

impl Operation {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Get(_) => "get",
            Self::ListByOwner => "list_by_owner",
            Self::Update(_) => "update",
            Self::Delete(_) => "delete",
        }
    }
}

impl Display for Operation {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum DealsServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Deal with the name \"{name}\" already exists for this owner.")]
    NameTaken { name: String },

    #[error("Deal id is already in use.")]
    IdCollision,

    #[error("Deal with ID {0} not found")]
    NotFound(DealUuid),

    #[error("Request throttled. Please try again later.")]
    Throttled(#[source] StoreError),

    #[error("Invalid request parameters.")]
    Rejected(#[source] StoreError),

    #[error("Server configuration error.")]
    Configuration,

    #[error("Could not complete the operation due to internal error.")]
    Storage(#[source] StoreError),
}

impl DealsServiceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) | Self::Rejected(_) => ErrorKind::InvalidInput,
            Self::NameTaken { .. } | Self::IdCollision => ErrorKind::Conflict,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Throttled(_) => ErrorKind::Throttled,
            Self::Configuration | Self::Storage(_) => ErrorKind::InternalError,
        }
    }

    /// Whether the request tried to change an immutable field.
    pub fn is_forbidden(&self) -> bool {
        matches!(self, Self::Validation(error) if error.is_forbidden())
    }
}

/// Map a store failure onto the service taxonomy.
///
/// A failed precondition means the id was taken when creating and the record was
/// missing when reading, updating or deleting.
pub fn translate(operation: Operation, error: StoreError) -> DealsServiceError {
    match error {
        StoreError::MissingTable => DealsServiceError::Configuration,
        StoreError::ConditionFailed => match operation {
            Operation::Create => DealsServiceError::IdCollision,
            Operation::Get(deal) | Operation::Update(deal) | Operation::Delete(deal) => {
                DealsServiceError::NotFound(deal)
            }
            Operation::ListByOwner => DealsServiceError::Storage(error),
        },
        error @ StoreError::Throttled(_) => DealsServiceError::Throttled(error),
        error @ StoreError::Malformed(_) => DealsServiceError::Rejected(error),
        error @ StoreError::Other(_) => DealsServiceError::Storage(error),
    }
}
