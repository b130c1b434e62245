//! Deal wire models

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use deals_app::deals::records::DealRecord;

/// Deal Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DealResponse {
    /// Deal identifier
    pub deal_id: Uuid,

    /// Owner of the deal
    pub deal_owner_id: String,

    /// Deal name, unique per owner
    pub deal_name: String,

    pub deal_description: String,

    /// Deal value, always positive
    #[serde(rename = "dealValueInGWP")]
    pub deal_value_in_gwp: f64,

    /// RFC 3339 creation time
    pub created_time: String,

    /// RFC 3339 time of the last update
    pub updated_time: String,
}

impl From<DealRecord> for DealResponse {
    fn from(deal: DealRecord) -> Self {
        DealResponse {
            deal_id: deal.uuid.into_uuid(),
            deal_owner_id: deal.owner_id,
            deal_name: deal.name,
            deal_description: deal.description,
            deal_value_in_gwp: deal.value_in_gwp,
            created_time: deal.created_at.to_string(),
            updated_time: deal.updated_at.to_string(),
        }
    }
}

/// Deal Created Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DealCreatedResponse {
    pub message: String,

    /// Generated deal identifier
    pub deal_id: Uuid,

    pub created_time: String,
}

/// Deals By Owner Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct DealsResponse {
    /// Every deal for the owner, in no particular order
    pub deals: Vec<DealResponse>,

    pub count: usize,
}

impl From<Vec<DealRecord>> for DealsResponse {
    fn from(deals: Vec<DealRecord>) -> Self {
        let deals: Vec<DealResponse> = deals.into_iter().map(Into::into).collect();

        DealsResponse {
            count: deals.len(),
            deals,
        }
    }
}

/// Deal Updated Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DealUpdatedResponse {
    pub message: String,

    /// The deal as stored after the update
    pub updated_attributes: DealResponse,
}

/// Deal Deleted Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct DealDeletedResponse {
    pub message: String,

    /// The deal as it was before removal
    pub deal: DealResponse,
}
