//! Update Deal Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use serde_json::Value;

use deals_app::deals::{
    DealsServiceError,
    records::DealRecord,
    validation::{parse_deal_id, validate_deal_update},
};

use crate::{
    deals::{errors::observed, handlers::INVALID_JSON, models::DealUpdatedResponse},
    extensions::*,
    state::State,
};

const OPERATION: &str = "update";

/// Deal Update Handler
///
/// Only `dealDescription` and `dealValueInGWP` can change; the description
/// must be sent on every update.
#[endpoint(
    tags("deals"),
    summary = "Update Deal",
    responses(
        (status_code = StatusCode::OK, description = "Deal updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::FORBIDDEN, description = "Owner or name cannot be updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Deal not found"),
        (status_code = StatusCode::TOO_MANY_REQUESTS, description = "Request throttled"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "deals.update",
    skip(deal, req, depot),
    fields(deal_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    deal: PathParam<String>,
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<DealUpdatedResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let body = req.parse_json::<Value>().await.or_400(INVALID_JSON)?;

    let updated = observed(OPERATION, update(state, &deal.into_inner(), &body).await)?;

    tracing::Span::current().record("deal_uuid", tracing::field::display(updated.uuid));

    Ok(Json(DealUpdatedResponse {
        message: "Deal successfully updated".to_string(),
        updated_attributes: updated.into(),
    }))
}

async fn update(state: &State, deal: &str, body: &Value) -> Result<DealRecord, DealsServiceError> {
    let deal = parse_deal_id(deal)?;
    let update = validate_deal_update(body)?;

    state.deals.update_deal(deal, update).await
}
