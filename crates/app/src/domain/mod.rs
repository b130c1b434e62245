//! Deals Domain Concerns

pub mod deals;
