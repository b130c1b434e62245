//! Delete Deal Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use deals_app::deals::{DealsServiceError, records::DealRecord, validation::parse_deal_id};

use crate::{
    deals::{errors::observed, models::DealDeletedResponse},
    extensions::*,
    state::State,
};

const OPERATION: &str = "delete";

/// Delete Deal Handler
#[endpoint(
    tags("deals"),
    summary = "Delete Deal",
    responses(
        (status_code = StatusCode::OK, description = "Deal deleted"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::NOT_FOUND, description = "Deal not found"),
        (status_code = StatusCode::TOO_MANY_REQUESTS, description = "Request throttled"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    deal: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<DealDeletedResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let deleted = observed(OPERATION, delete(state, &deal.into_inner()).await)?;

    Ok(Json(DealDeletedResponse {
        message: "Deal successfully deleted".to_string(),
        deal: deleted.into(),
    }))
}

async fn delete(state: &State, deal: &str) -> Result<DealRecord, DealsServiceError> {
    let deal = parse_deal_id(deal)?;

    state.deals.delete_deal(deal).await
}
