//! Test Helpers

use jiff::Timestamp;

use crate::domain::deals::{
    data::NewDeal,
    records::{DealRecord, DealUuid},
};

pub(crate) fn new_deal(owner_id: &str, name: &str) -> NewDeal {
    NewDeal {
        owner_id: owner_id.to_string(),
        name: name.to_string(),
        description: "Q3 renewal".to_string(),
        value_in_gwp: 5000.0,
    }
}

pub(crate) fn new_deal_record(owner_id: &str, name: &str) -> DealRecord {
    let now = Timestamp::now();

    DealRecord {
        uuid: DealUuid::new(),
        owner_id: owner_id.to_string(),
        name: name.to_string(),
        description: "Q3 renewal".to_string(),
        value_in_gwp: 5000.0,
        created_at: now,
        updated_at: now,
    }
}
