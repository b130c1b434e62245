//! Deals

pub mod data;
pub mod errors;
mod guard;
pub mod records;
mod repository;
pub mod service;
pub mod store;
pub mod validation;

pub use errors::{DealsServiceError, ErrorKind, Operation};
pub use repository::PgDealsStore;
pub use service::*;
