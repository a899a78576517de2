use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::CookieJar;
use color_eyre::eyre::eyre;
use serde::{Deserialize, Serialize};

use crate::{
    domain::{
        ExchangeAPIError, SwapRequestId, SwapRequestStatus, SwapStoreError,
    },
    utils::{auth::get_caller, swap::can_manage_swap},
    AppState,
};

#[tracing::instrument(name = "Cancel swap request route handler", skip_all)]
pub async fn cancel_request(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(request): Json<CancelSwapRequestRequest>,
) -> Result<(StatusCode, CookieJar, Json<CancelSwapRequestResponse>), ExchangeAPIError>
{
    let caller = get_caller(&jar)?;
    let swap_request_id = SwapRequestId::parse(&request.swap_request_id)?;

    let swap_request = state
        .swap_store
        .read()
        .await
        .get_request(&caller.org_id, &swap_request_id)
        .await
        .map_err(|e| match e {
            SwapStoreError::RequestNotFound => {
                ExchangeAPIError::IDNotFoundError(*swap_request_id.as_ref())
            }
            e => ExchangeAPIError::UnexpectedError(eyre!(e)),
        })?;
    can_manage_swap(&caller, &swap_request)?;

    let cancelled_offers = state
        .swap_store
        .write()
        .await
        .cancel_request(&caller.org_id, &swap_request_id)
        .await
        .map_err(|e| match e {
            SwapStoreError::RequestNotOpen => ExchangeAPIError::Conflict(
                String::from("Swap request is no longer open"),
            ),
            e => ExchangeAPIError::UnexpectedError(eyre!(e)),
        })?;

    let response = Json(CancelSwapRequestResponse {
        swap_request_id,
        status: SwapRequestStatus::Cancelled,
        cancelled_offer_ids: cancelled_offers
            .iter()
            .map(|id| id.as_ref().to_string())
            .collect(),
    });

    Ok((StatusCode::OK, jar, response))
}

#[derive(Debug, PartialEq, Deserialize)]
pub struct CancelSwapRequestRequest {
    #[serde(rename = "swapRequestId")]
    pub swap_request_id: String,
}

#[derive(Debug, PartialEq, Serialize)]
pub struct CancelSwapRequestResponse {
    #[serde(rename = "swapRequestId")]
    pub swap_request_id: SwapRequestId,
    pub status: SwapRequestStatus,
    #[serde(rename = "cancelledOfferIds")]
    pub cancelled_offer_ids: Vec<String>,
}
