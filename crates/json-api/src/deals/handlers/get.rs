//! Get Deal Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use deals_app::deals::{DealsServiceError, records::DealRecord, validation::parse_deal_id};

use crate::{
    deals::{errors::observed, models::DealResponse},
    extensions::*,
    state::State,
};

const OPERATION: &str = "get";

/// Get Deal Handler
///
/// Returns a deal.
#[endpoint(
    tags("deals"),
    summary = "Get Deal",
    responses(
        (status_code = StatusCode::OK, description = "Deal found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::NOT_FOUND, description = "Deal not found"),
        (status_code = StatusCode::TOO_MANY_REQUESTS, description = "Request throttled"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    deal: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<DealResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let deal = observed(OPERATION, get(state, &deal.into_inner()).await)?;

    Ok(Json(deal.into()))
}

async fn get(state: &State, deal: &str) -> Result<DealRecord, DealsServiceError> {
    let deal = parse_deal_id(deal)?;

    state.deals.get_deal(deal).await
}
