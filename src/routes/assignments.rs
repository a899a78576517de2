use axum::{extract::Query, extract::State, http::StatusCode, Json};
use axum_extra::extract::CookieJar;
use color_eyre::eyre::eyre;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::{
    domain::{
        Assignment, AssignmentFilter, AssignmentKind, ExchangeAPIError,
        ShiftTypeCode, ValidationError, WorkerId,
    },
    utils::{auth::get_caller, swap::require_admin},
    AppState,
};

// Manual ledger entry. Generated assignments arrive through the external
// schedule generator writing to the same ledger.
#[tracing::instrument(name = "Add assignment route handler", skip_all)]
pub async fn add_assignment(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(request): Json<AddAssignmentRequest>,
) -> Result<(StatusCode, CookieJar, Json<Assignment>), ExchangeAPIError> {
    let caller = get_caller(&jar)?;
    require_admin(&caller)?;

    let worker_id = WorkerId::parse(&request.worker_id)?;
    let shift_type = ShiftTypeCode::parse(&request.shift_type)?;
    let kind = match &request.kind {
        Some(raw) => AssignmentKind::from_str(raw)?,
        None => AssignmentKind::Manual,
    };

    if state.shift_catalog.get(&shift_type).is_none() {
        return Err(ValidationError::new(format!(
            "Unknown shift type: {shift_type}"
        ))
        .into());
    }
    state
        .roster_store
        .read()
        .await
        .get_worker(&caller.org_id, &worker_id)
        .await
        .map_err(|_| {
            ExchangeAPIError::ValidationError(ValidationError::new(format!(
                "Worker is not on the roster: {worker_id}"
            )))
        })?;

    let assignment = Assignment::new(
        caller.org_id,
        worker_id,
        request.date,
        shift_type,
        kind,
    );

    state
        .assignment_store
        .write()
        .await
        .add_assignment(assignment.clone())
        .await
        .map_err(|e| ExchangeAPIError::UnexpectedError(eyre!(e)))?;

    Ok((StatusCode::CREATED, jar, Json(assignment)))
}

#[derive(Deserialize)]
pub struct AssignmentListQueryParams {
    #[serde(rename = "workerId")]
    worker_id: Option<String>,
    from: Option<chrono::NaiveDate>,
    to: Option<chrono::NaiveDate>,
}

#[tracing::instrument(name = "Assignment list route handler", skip_all)]
pub async fn get_assignment_list(
    State(state): State<AppState>,
    jar: CookieJar,
    query_params: Query<AssignmentListQueryParams>,
) -> Result<(StatusCode, CookieJar, Json<AssignmentListResponse>), ExchangeAPIError>
{
    let caller = get_caller(&jar)?;

    let worker_id = query_params
        .worker_id
        .as_deref()
        .map(WorkerId::parse)
        .transpose()?;
    let date_range = match (query_params.from, query_params.to) {
        (Some(from), Some(to)) => Some((from, to)),
        (None, None) => None,
        _ => {
            return Err(ValidationError::new(String::from(
                "Both from and to are required for a date range",
            ))
            .into())
        }
    };

    let assignments = state
        .assignment_store
        .read()
        .await
        .list_assignments(
            &caller.org_id,
            &AssignmentFilter {
                worker_id,
                date_range,
            },
        )
        .await
        .map_err(|e| ExchangeAPIError::UnexpectedError(eyre!(e)))?;

    Ok((
        StatusCode::OK,
        jar,
        Json(AssignmentListResponse { assignments }),
    ))
}

#[derive(Debug, PartialEq, Deserialize)]
pub struct AddAssignmentRequest {
    #[serde(rename = "workerId")]
    pub worker_id: String,
    pub date: chrono::NaiveDate,
    #[serde(rename = "shiftType")]
    pub shift_type: String,
    pub kind: Option<String>,
}

#[derive(Debug, PartialEq, Serialize)]
pub struct AssignmentListResponse {
    pub assignments: Vec<Assignment>,
}
