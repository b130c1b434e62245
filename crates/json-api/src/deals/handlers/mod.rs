//! Deal Handlers

pub(crate) mod create;
pub(crate) mod delete;
pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod update;

/// Brief returned when a request body is not JSON.
pub(crate) const INVALID_JSON: &str = "Request body must be valid JSON";
