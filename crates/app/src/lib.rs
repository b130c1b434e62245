//! Deal record management: validation, the invariant-preserving write path, and
//! the `PostgreSQL` record store behind it.

pub mod context;
pub mod database;
pub mod domain;

#[cfg(test)]
mod test;

mod uuids;

pub use domain::deals;
