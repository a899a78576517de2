use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{Assignment, PreferenceRank, VacationPreference, WorkerId};

// Score for a month in which no preference was granted, including months
// with no submitted preferences at all. Granted rank r scores r - 1, so
// lower totals mean better-honored requests.
pub const NO_GRANT_POINTS: u8 = 3;

pub fn points_for_rank(rank: PreferenceRank) -> u8 {
    match rank {
        PreferenceRank::First => 0,
        PreferenceRank::Second => 1,
        PreferenceRank::Third => 2,
    }
}

// A week is free iff the worker has zero assignments dated inside
// [week_start, week_end]. Both boundaries count as occupied.
pub fn week_is_free(
    assignments: &[Assignment],
    week_start: NaiveDate,
    week_end: NaiveDate,
) -> bool {
    !assignments
        .iter()
        .any(|a| a.date >= week_start && a.date <= week_end)
}

// The granted preference is the first, in ascending rank order, whose week
// the worker is entirely unassigned for. Scanning stops at the first match.
pub fn granted_preference<'a>(
    preferences: &'a [VacationPreference],
    assignments: &[Assignment],
) -> Option<&'a VacationPreference> {
    let mut ordered: Vec<&VacationPreference> = preferences.iter().collect();
    ordered.sort_by_key(|p| p.rank);
    ordered
        .into_iter()
        .find(|p| week_is_free(assignments, p.week_start, p.week_end))
}

pub fn month_points(granted: Option<PreferenceRank>) -> u8 {
    match granted {
        Some(rank) => points_for_rank(rank),
        None => NO_GRANT_POINTS,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FairnessScore {
    #[serde(rename = "workerId")]
    pub worker_id: WorkerId,
    #[serde(rename = "monthPoints")]
    pub month_points: u8,
    // The matched rank for the requested month, or 0 when nothing matched.
    #[serde(rename = "grantedRank")]
    pub granted_rank: u8,
    #[serde(rename = "ytdPoints")]
    pub ytd_points: u16,
}
