use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::CookieJar;
use color_eyre::eyre::eyre;
use serde::{Deserialize, Serialize};

use crate::{
    domain::ExchangeAPIError,
    utils::{auth::get_caller, swap::require_admin},
    AppState,
};

// Admin sweep for requests whose shift date has passed. There are no
// background workers; expiry is this sweep plus the lazy check on accept.
#[tracing::instrument(name = "Expire swap requests route handler", skip_all)]
pub async fn expire_stale_requests(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(request): Json<ExpireRequestsRequest>,
) -> Result<(StatusCode, CookieJar, Json<ExpireRequestsResponse>), ExchangeAPIError>
{
    let caller = get_caller(&jar)?;
    require_admin(&caller)?;

    let expired = state
        .swap_store
        .write()
        .await
        .expire_requests(&caller.org_id, request.before)
        .await
        .map_err(|e| ExchangeAPIError::UnexpectedError(eyre!(e)))?;

    let response = Json(ExpireRequestsResponse {
        expired_request_ids: expired
            .iter()
            .map(|id| id.as_ref().to_string())
            .collect(),
    });

    Ok((StatusCode::OK, jar, response))
}

#[derive(Debug, PartialEq, Deserialize)]
pub struct ExpireRequestsRequest {
    pub before: chrono::NaiveDate,
}

#[derive(Debug, PartialEq, Serialize)]
pub struct ExpireRequestsResponse {
    #[serde(rename = "expiredRequestIds")]
    pub expired_request_ids: Vec<String>,
}
