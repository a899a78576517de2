use axum::{extract::Query, extract::State, http::StatusCode, Json};
use axum_extra::extract::CookieJar;
use color_eyre::eyre::eyre;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::{
    domain::{
        find_eligible_partners, AssignmentFilter, AssignmentId,
        AssignmentStoreError, EligiblePartner, ExchangeAPIError, Worker,
        WorkerId,
    },
    utils::auth::get_caller,
    AppState,
};

#[derive(Deserialize)]
pub struct FindPartnersQueryParams {
    #[serde(rename = "assignmentId")]
    assignment_id: String,
    #[serde(rename = "equivalenceCode")]
    equivalence_code: Option<String>,
}

// Discovers swappable same-date assignments for the given one. Both the
// requester and each candidate must be eligible for the other's shift.
#[tracing::instrument(name = "Find eligible partners route handler", skip_all)]
pub async fn find_partners(
    State(state): State<AppState>,
    jar: CookieJar,
    query_params: Query<FindPartnersQueryParams>,
) -> Result<(StatusCode, CookieJar, Json<FindPartnersResponse>), ExchangeAPIError>
{
    let caller = get_caller(&jar)?;
    let assignment_id = AssignmentId::parse(&query_params.assignment_id)?;

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

    if assignment.worker_id != caller.worker_id && !caller.is_admin() {
        return Err(ExchangeAPIError::Forbidden(String::from(
            "Only the assignment owner or an administrator may search for partners",
        )));
    }

    let requester = state
        .roster_store
        .read()
        .await
        .get_worker(&caller.org_id, &assignment.worker_id)
        .await
        .map_err(|e| ExchangeAPIError::UnexpectedError(eyre!(e)))?;

    let same_day = state
        .assignment_store
        .read()
        .await
        .list_assignments(
            &caller.org_id,
            &AssignmentFilter {
                worker_id: None,
                date_range: Some((assignment.date, assignment.date)),
            },
        )
        .await
        .map_err(|e| ExchangeAPIError::UnexpectedError(eyre!(e)))?;

    let roster: HashMap<WorkerId, Worker> = state
        .roster_store
        .read()
        .await
        .list_workers(&caller.org_id, None)
        .await
        .map_err(|e| ExchangeAPIError::UnexpectedError(eyre!(e)))?
        .into_iter()
        .map(|worker| (worker.id.clone(), worker))
        .collect();

    let partners = find_eligible_partners(
        &assignment,
        &requester,
        &same_day,
        &roster,
        &state.shift_catalog,
        &state.equivalence_registry,
        query_params.equivalence_code.as_deref(),
    );

    let response = Json(FindPartnersResponse {
        assignment_id,
        partners,
    });

    Ok((StatusCode::OK, jar, response))
}

#[derive(Debug, PartialEq, Serialize)]
pub struct FindPartnersResponse {
    #[serde(rename = "assignmentId")]
    pub assignment_id: AssignmentId,
    pub partners: Vec<EligiblePartner>,
}
