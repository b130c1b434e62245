//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{affix_state::inject, prelude::*};

use deals_app::deals::{
    MockDealsService,
    records::{DealRecord, DealUuid},
};

use crate::state::State;

pub(crate) fn make_deal(uuid: DealUuid) -> DealRecord {
    DealRecord {
        uuid,
        owner_id: "u1".to_string(),
        name: "Acme Renewal".to_string(),
        description: "Q3 renewal".to_string(),
        value_in_gwp: 5000.0,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn state_with_deals(deals: MockDealsService) -> Arc<State> {
    Arc::new(State::new(Arc::new(deals)))
}

pub(crate) fn deals_service(deals: MockDealsService, route: Router) -> Service {
    Service::new(Router::new().hoop(inject(state_with_deals(deals))).push(route))
}
