//! Create Deal Handler

use std::sync::Arc;

use salvo::{http::header::LOCATION, prelude::*};
use serde_json::Value;

use deals_app::deals::{
    DealsServiceError, records::DealRecord, validation::validate_new_deal,
};

use crate::{
    deals::{
        errors::observed,
        handlers::INVALID_JSON,
        models::DealCreatedResponse,
    },
    extensions::*,
    state::State,
};

const OPERATION: &str = "create";

/// Create Deal Handler
#[endpoint(
    tags("deals"),
    summary = "Create Deal",
    responses(
        (status_code = StatusCode::CREATED, description = "Deal created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::CONFLICT, description = "Deal name already taken for this owner"),
        (status_code = StatusCode::TOO_MANY_REQUESTS, description = "Request throttled"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<DealCreatedResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let body = req.parse_json::<Value>().await.or_400(INVALID_JSON)?;

    let created = observed(OPERATION, create(state, &body).await)?;

    res.add_header(LOCATION, format!("/v1/deals/{}", created.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(DealCreatedResponse {
        message: "Deal successfully created".to_string(),
        deal_id: created.uuid.into_uuid(),
        created_time: created.created_at.to_string(),
    }))
}

async fn create(state: &State, body: &Value) -> Result<DealRecord, DealsServiceError> {
    let deal = validate_new_deal(body)?;

    state.deals.create_deal(deal).await
}
