use axum::{extract::Query, extract::State, http::StatusCode, Json};
use axum_extra::extract::CookieJar;
use color_eyre::eyre::eyre;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::{
    domain::{
        granted_preference, month_points, AssignmentFilter, ExchangeAPIError,
        FairnessScore, SchedulePeriod, VacationPreference, WorkerId,
    },
    utils::auth::get_caller,
    AppState,
};

#[derive(Deserialize)]
pub struct FairnessReportQueryParams {
    year: i32,
    month: u32,
}

// Scores every roster worker for the requested month plus the
// year-to-date total, each month recomputed independently.
#[tracing::instrument(name = "Fairness report route handler", skip_all)]
pub async fn get_fairness_report(
    State(state): State<AppState>,
    jar: CookieJar,
    query_params: Query<FairnessReportQueryParams>,
) -> Result<(StatusCode, CookieJar, Json<FairnessReportResponse>), ExchangeAPIError>
{
    let caller = get_caller(&jar)?;
    let period =
        SchedulePeriod::parse(query_params.year, query_params.month)?;

    let workers = state
        .roster_store
        .read()
        .await
        .list_workers(&caller.org_id, None)
        .await
        .map_err(|e| ExchangeAPIError::UnexpectedError(eyre!(e)))?;

    // One preference listing per year-to-date month, grouped by worker.
    let mut months: Vec<(
        SchedulePeriod,
        HashMap<WorkerId, Vec<VacationPreference>>,
    )> = Vec::new();
    for month in period.year_to_date() {
        let listed = state
            .preference_store
            .read()
            .await
            .list_preferences(&caller.org_id, &month)
            .await
            .map_err(|e| ExchangeAPIError::UnexpectedError(eyre!(e)))?;

        let mut grouped: HashMap<WorkerId, Vec<VacationPreference>> =
            HashMap::new();
        for preference in listed {
            grouped
                .entry(preference.worker_id.clone())
                .or_default()
                .push(preference);
        }
        months.push((month, grouped));
    }

    let mut scores = Vec::with_capacity(workers.len());
    for worker in workers {
        let assignments = state
            .assignment_store
            .read()
            .await
            .list_assignments(
                &caller.org_id,
                &AssignmentFilter {
                    worker_id: Some(worker.id.clone()),
                    date_range: None,
                },
            )
            .await
            .map_err(|e| ExchangeAPIError::UnexpectedError(eyre!(e)))?;

        let mut ytd_points: u16 = 0;
        let mut report_points = month_points(None);
        let mut report_rank = 0u8;
        let empty = Vec::new();

        for (month, grouped) in &months {
            let preferences = grouped.get(&worker.id).unwrap_or(&empty);
            let granted = granted_preference(preferences, &assignments);
            let points = month_points(granted.map(|g| g.rank));
            ytd_points += u16::from(points);

            if *month == period {
                report_points = points;
                report_rank = granted
                    .map(|g| i16::from(g.rank) as u8)
                    .unwrap_or(0);
            }
        }

        scores.push(FairnessScore {
            worker_id: worker.id,
            month_points: report_points,
            granted_rank: report_rank,
            ytd_points,
        });
    }

    let response = Json(FairnessReportResponse {
        year: period.year(),
        month: period.month(),
        scores,
    });

    Ok((StatusCode::OK, jar, response))
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct FairnessReportResponse {
    pub year: i32,
    pub month: u32,
    pub scores: Vec<FairnessScore>,
}
