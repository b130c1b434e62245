//! Deals By Owner Handler

use std::sync::Arc;

use salvo::prelude::*;

use deals_app::deals::{
    DealsServiceError,
    records::DealRecord,
    validation::{OWNER_ID_FIELD, validate_owner_id},
};

use crate::{
    deals::{errors::observed, models::DealsResponse},
    extensions::*,
    state::State,
};

const OPERATION: &str = "list_by_owner";

/// Deals By Owner Handler
///
/// Returns every deal for the owner given in the `dealOwnerId` query parameter.
#[endpoint(
    tags("deals"),
    summary = "List Deals By Owner",
    responses(
        (status_code = StatusCode::OK, description = "Deals for the owner"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::TOO_MANY_REQUESTS, description = "Request throttled"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<DealsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let owner_id = req.query::<String>(OWNER_ID_FIELD);

    let deals = observed(OPERATION, list(state, owner_id).await)?;

    Ok(Json(deals.into()))
}

async fn list(state: &State, owner_id: Option<String>) -> Result<Vec<DealRecord>, DealsServiceError> {
    let owner_id = validate_owner_id(owner_id)?;

    state.deals.list_deals_by_owner(owner_id).await
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use deals_app::deals::{MockDealsService, records::DealUuid};

    use crate::test_helpers::{deals_service, make_deal};

    use super::*;

    fn make_service(deals: MockDealsService) -> Service {
        deals_service(deals, Router::with_path("v1/deals").get(handler))
    }

    #[tokio::test]
    async fn test_index_returns_owner_deals() -> TestResult {
        let uuid_a = DealUuid::new();
        let uuid_b = DealUuid::new();

        let mut deals = MockDealsService::new();

        deals
            .expect_list_deals_by_owner()
            .once()
            .withf(|owner| owner == "u1")
            .return_once(move |_| Ok(vec![make_deal(uuid_a), make_deal(uuid_b)]));

        deals.expect_get_deal().never();
        deals.expect_create_deal().never();
        deals.expect_update_deal().never();
        deals.expect_delete_deal().never();

        let response: DealsResponse = TestClient::get("http://example.com/v1/deals?dealOwnerId=u1")
            .send(&make_service(deals))
            .await
            .take_json()
            .await?;

        let uuids: Vec<_> = response.deals.iter().map(|deal| deal.deal_id).collect();

        assert_eq!(response.count, 2);
        assert_eq!(uuids, vec![uuid_a.into_uuid(), uuid_b.into_uuid()]);

        Ok(())
    }

    #[tokio::test]
    async fn test_index_returns_empty_list() -> TestResult {
        let mut deals = MockDealsService::new();

        deals
            .expect_list_deals_by_owner()
            .once()
            .return_once(|_| Ok(vec![]));

        deals.expect_get_deal().never();
        deals.expect_create_deal().never();
        deals.expect_update_deal().never();
        deals.expect_delete_deal().never();

        let response: DealsResponse = TestClient::get("http://example.com/v1/deals?dealOwnerId=u9")
            .send(&make_service(deals))
            .await
            .take_json()
            .await?;

        assert!(response.deals.is_empty());
        assert_eq!(response.count, 0);

        Ok(())
    }

    #[tokio::test]
    async fn test_index_without_owner_returns_400() -> TestResult {
        let mut deals = MockDealsService::new();

        deals.expect_list_deals_by_owner().never();
        deals.expect_get_deal().never();
        deals.expect_create_deal().never();
        deals.expect_update_deal().never();
        deals.expect_delete_deal().never();

        let mut res = TestClient::get("http://example.com/v1/deals")
            .send(&make_service(deals))
            .await;

        let body = res.take_string().await?;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert!(body.contains("dealOwnerId query parameter is required"), "{body}");

        Ok(())
    }

    #[tokio::test]
    async fn test_index_storage_error_returns_500() -> TestResult {
        let mut deals = MockDealsService::new();

        deals
            .expect_list_deals_by_owner()
            .once()
            .return_once(|_| Err(DealsServiceError::Configuration));

        deals.expect_get_deal().never();
        deals.expect_create_deal().never();
        deals.expect_update_deal().never();
        deals.expect_delete_deal().never();

        let res = TestClient::get("http://example.com/v1/deals?dealOwnerId=u1")
            .send(&make_service(deals))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));

        Ok(())
    }
}
