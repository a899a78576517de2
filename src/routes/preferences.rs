use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::CookieJar;
use color_eyre::eyre::eyre;
use serde::{Deserialize, Serialize};

use crate::{
    domain::{
        ExchangeAPIError, PreferenceRank, PreferenceStoreError,
        SchedulePeriod, VacationPreference, ValidationError, WorkerId,
    },
    utils::{auth::get_caller, swap::require_admin},
    AppState,
};

const MAX_RANKED_PREFERENCES: usize = 3;

// Replaces the worker's ranked time-off requests for the period. Staff
// submit their own; admins may submit on behalf of any worker.
#[tracing::instrument(name = "Submit preferences route handler", skip_all)]
pub async fn submit_preferences(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(request): Json<SubmitPreferencesRequest>,
) -> Result<
    (StatusCode, CookieJar, Json<SubmitPreferencesResponse>),
    ExchangeAPIError,
> {
    let caller = get_caller(&jar)?;
    let period = SchedulePeriod::parse(request.year, request.month)?;

    let worker_id = match &request.worker_id {
        Some(raw) => {
            let worker_id = WorkerId::parse(raw)?;
            if worker_id != caller.worker_id {
                require_admin(&caller)?;
            }
            worker_id
        }
        None => caller.worker_id.clone(),
    };

    if request.preferences.len() > MAX_RANKED_PREFERENCES {
        return Err(ValidationError::new(String::from(
            "At most three ranked preferences per period",
        ))
        .into());
    }

    let mut preferences = Vec::with_capacity(request.preferences.len());
    for entry in &request.preferences {
        let rank = PreferenceRank::try_from(entry.rank)?;
        preferences.push(VacationPreference::new(
            caller.org_id,
            worker_id.clone(),
            period,
            rank,
            entry.week_start,
            entry.week_end,
        )?);
    }
    let count = preferences.len();

    state
        .preference_store
        .write()
        .await
        .replace_preferences(&caller.org_id, &worker_id, &period, preferences)
        .await
        .map_err(|e| match e {
            PreferenceStoreError::DuplicateRank => {
                ExchangeAPIError::ValidationError(ValidationError::new(
                    String::from("Duplicate preference rank for period"),
                ))
            }
            e => ExchangeAPIError::UnexpectedError(eyre!(e)),
        })?;

    let response = Json(SubmitPreferencesResponse {
        worker_id,
        year: period.year(),
        month: period.month(),
        count,
    });

    Ok((StatusCode::CREATED, jar, response))
}

#[derive(Debug, PartialEq, Deserialize)]
pub struct RankedWeek {
    pub rank: i16,
    #[serde(rename = "weekStart")]
    pub week_start: chrono::NaiveDate,
    #[serde(rename = "weekEnd")]
    pub week_end: chrono::NaiveDate,
}

#[derive(Debug, PartialEq, Deserialize)]
pub struct SubmitPreferencesRequest {
    #[serde(rename = "workerId")]
    pub worker_id: Option<String>,
    pub year: i32,
    pub month: u32,
    pub preferences: Vec<RankedWeek>,
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct SubmitPreferencesResponse {
    #[serde(rename = "workerId")]
    pub worker_id: WorkerId,
    pub year: i32,
    pub month: u32,
    pub count: usize,
}
