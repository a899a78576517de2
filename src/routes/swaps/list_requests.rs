use axum::{extract::Query, extract::State, http::StatusCode, Json};
use axum_extra::extract::CookieJar;
use color_eyre::eyre::eyre;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::{
    domain::{
        ExchangeAPIError, SwapRequest, SwapRequestFilter, SwapRequestStatus,
        WorkerId,
    },
    utils::auth::get_caller,
    AppState,
};

#[derive(Deserialize)]
pub struct SwapRequestListQueryParams {
    status: Option<String>,
    #[serde(rename = "requesterId")]
    requester_id: Option<String>,
}

#[tracing::instrument(name = "Swap request list route handler", skip_all)]
pub async fn get_request_list(
    State(state): State<AppState>,
    jar: CookieJar,
    query_params: Query<SwapRequestListQueryParams>,
) -> Result<(StatusCode, CookieJar, Json<SwapRequestListResponse>), ExchangeAPIError>
{
    let caller = get_caller(&jar)?;

    let status = query_params
        .status
        .as_deref()
        .map(SwapRequestStatus::from_str)
        .transpose()?;
    let requester_id = query_params
        .requester_id
        .as_deref()
        .map(WorkerId::parse)
        .transpose()?;

    let swap_requests = state
        .swap_store
        .read()
        .await
        .list_requests(
            &caller.org_id,
            &SwapRequestFilter {
                status,
                requester_id,
            },
        )
        .await
        .map_err(|e| ExchangeAPIError::UnexpectedError(eyre!(e)))?;

    Ok((
        StatusCode::OK,
        jar,
        Json(SwapRequestListResponse { swap_requests }),
    ))
}

#[derive(Debug, PartialEq, Serialize)]
pub struct SwapRequestListResponse {
    #[serde(rename = "swapRequests")]
    pub swap_requests: Vec<SwapRequest>,
}
