//! Deals Data

/// New Deal Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewDeal {
    pub owner_id: String,
    pub name: String,
    pub description: String,
    pub value_in_gwp: f64,
}

/// Deal Update Data
///
/// Only the mutable fields. A `None` value keeps the stored value.
#[derive(Debug, Clone, PartialEq)]
pub struct DealUpdate {
    pub description: String,
    pub value_in_gwp: Option<f64>,
}
