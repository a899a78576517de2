use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::CookieJar;
use color_eyre::eyre::eyre;
use serde::{Deserialize, Serialize};

use crate::{
    domain::{
        AssignmentId, AssignmentStoreError, ExchangeAPIError, SwapRequest,
        SwapStoreError, WorkerId,
    },
    utils::{auth::get_caller, swap::require_admin},
    AppState,
};

// Opens a swap request on an assignment the requester owns. Admins may
// file on behalf of the owning worker via `requesterId`.
#[tracing::instrument(name = "New swap request route handler", skip_all)]
pub async fn new_request(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(request): Json<NewSwapRequestRequest>,
) -> Result<(StatusCode, CookieJar, Json<SwapRequest>), ExchangeAPIError> {
    let caller = get_caller(&jar)?;
    let assignment_id = AssignmentId::parse(&request.assignment_id)?;

    let requester_id = match &request.requester_id {
        Some(raw) => {
            let requester_id = WorkerId::parse(raw)?;
            if requester_id != caller.worker_id {
                require_admin(&caller)?;
            }
            requester_id
        }
        None => caller.worker_id.clone(),
    };

    let assignment = state
        .assignment_store
        .read()
        .await
        .get_assignment(&caller.org_id, &assignment_id)
        .await
        .map_err(|e| match e {
            AssignmentStoreError::AssignmentNotFound => {
                ExchangeAPIError::IDNotFoundError(*assignment_id.as_ref())
            }
            e => ExchangeAPIError::UnexpectedError(eyre!(e)),
        })?;

    if assignment.worker_id != requester_id {
        return Err(ExchangeAPIError::Forbidden(String::from(
            "Assignment does not belong to the requester",
        )));
    }

    let swap_request = SwapRequest::new(
        caller.org_id,
        requester_id,
        assignment_id,
        request.notes.unwrap_or_default(),
        request.equivalence_code,
    );

    state
        .swap_store
        .write()
        .await
        .add_request(swap_request.clone())
        .await
        .map_err(|e| match e {
            SwapStoreError::OpenRequestExists => {
                ExchangeAPIError::Conflict(String::from(
                    "An open swap request already exists for this assignment",
                ))
            }
            e => ExchangeAPIError::UnexpectedError(eyre!(e)),
        })?;

    Ok((StatusCode::CREATED, jar, Json(swap_request)))
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct NewSwapRequestRequest {
    #[serde(rename = "assignmentId")]
    pub assignment_id: String,
    #[serde(rename = "requesterId")]
    pub requester_id: Option<String>,
    pub notes: Option<String>,
    #[serde(rename = "equivalenceCode")]
    pub equivalence_code: Option<String>,
}
