use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::CookieJar;
use color_eyre::eyre::eyre;
use serde::{Deserialize, Serialize};

use crate::{
    domain::{
        AssignmentId, ExchangeAPIError, SwapOffer, SwapRequestId,
        SwapRequestStatus, SwapStoreError, ValidationError, WorkerId,
    },
    utils::{auth::get_caller, swap::can_manage_swap},
    AppState,
};

// Fans one PENDING offer out to each valid target. Invalid targets
// (unknown worker, self-target, mismatched target assignment) are skipped
// rather than failing the batch.
#[tracing::instrument(name = "Create swap offers route handler", skip_all)]
pub async fn create_offers(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(request): Json<CreateOffersRequest>,
) -> Result<(StatusCode, CookieJar, Json<CreateOffersResponse>), ExchangeAPIError>
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

    if swap_request.status != SwapRequestStatus::Open {
        return Err(ExchangeAPIError::Conflict(String::from(
            "Swap request is no longer open",
        )));
    }

    if request.target_worker_ids.is_empty() {
        return Err(ValidationError::new(String::from(
            "At least one target worker is required",
        ))
        .into());
    }
    if let Some(target_assignment_ids) = &request.target_assignment_ids {
        if target_assignment_ids.len() != request.target_worker_ids.len() {
            return Err(ValidationError::new(String::from(
                "targetAssignmentIds must match targetWorkerIds in length",
            ))
            .into());
        }
    }

    let mut offers = Vec::new();
    for (index, raw_worker_id) in
        request.target_worker_ids.iter().enumerate()
    {
        let Ok(target_worker_id) = WorkerId::parse(raw_worker_id) else {
            continue;
        };
        if target_worker_id == swap_request.requester_id {
            continue;
        }
        if state
            .roster_store
            .read()
            .await
            .get_worker(&caller.org_id, &target_worker_id)
            .await
            .is_err()
        {
            continue;
        }

        let raw_target_assignment = request
            .target_assignment_ids
            .as_ref()
            .and_then(|ids| ids.get(index).cloned())
            .flatten();
        let target_assignment_id = match raw_target_assignment {
            Some(raw) => {
                let Ok(assignment_id) = AssignmentId::parse(&raw) else {
                    continue;
                };
                let Ok(assignment) = state
                    .assignment_store
                    .read()
                    .await
                    .get_assignment(&caller.org_id, &assignment_id)
                    .await
                else {
                    continue;
                };
                if assignment.worker_id != target_worker_id {
                    continue;
                }
                Some(assignment_id)
            }
            None => None,
        };

        offers.push(SwapOffer::new(
            caller.org_id,
            swap_request_id,
            target_worker_id,
            target_assignment_id,
        ));
    }

    state
        .swap_store
        .write()
        .await
        .add_offers(offers.clone())
        .await
        .map_err(|e| ExchangeAPIError::UnexpectedError(eyre!(e)))?;

    let response = Json(CreateOffersResponse {
        swap_request_id,
        offers,
    });

    Ok((StatusCode::CREATED, jar, response))
}

#[derive(Debug, PartialEq, Deserialize)]
pub struct CreateOffersRequest {
    #[serde(rename = "swapRequestId")]
    pub swap_request_id: String,
    #[serde(rename = "targetWorkerIds")]
    pub target_worker_ids: Vec<String>,
    // Aligned with targetWorkerIds; a null entry makes that offer a
    // unilateral give-away.
    #[serde(rename = "targetAssignmentIds")]
    pub target_assignment_ids: Option<Vec<Option<String>>>,
}

#[derive(Debug, PartialEq, Serialize)]
pub struct CreateOffersResponse {
    #[serde(rename = "swapRequestId")]
    pub swap_request_id: SwapRequestId,
    pub offers: Vec<SwapOffer>,
}
