use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{OrgId, ValidationError, WorkerId};

#[repr(i16)]
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
)]
pub enum PreferenceRank {
    First = 1,
    Second = 2,
    Third = 3,
}

impl TryFrom<i16> for PreferenceRank {
    type Error = ValidationError;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(PreferenceRank::First),
            2 => Ok(PreferenceRank::Second),
            3 => Ok(PreferenceRank::Third),
            _ => Err(ValidationError::new(String::from(
                "Preference rank must be between 1 and 3",
            ))),
        }
    }
}

impl From<PreferenceRank> for i16 {
    fn from(rank: PreferenceRank) -> Self {
        rank as i16
    }
}

impl fmt::Display for PreferenceRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", *self as i16)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PreferenceStatus {
    Pending,
    Approved,
    Rejected,
}

impl FromStr for PreferenceStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(PreferenceStatus::Pending),
            "APPROVED" => Ok(PreferenceStatus::Approved),
            "REJECTED" => Ok(PreferenceStatus::Rejected),
            _ => Err(ValidationError::new(String::from(
                "Invalid preference status",
            ))),
        }
    }
}

impl fmt::Display for PreferenceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                PreferenceStatus::Pending => "PENDING",
                PreferenceStatus::Approved => "APPROVED",
                PreferenceStatus::Rejected => "REJECTED",
            }
        )
    }
}

const YEAR_MIN: i32 = 1970;
const YEAR_MAX: i32 = 9999;

// A calendar (year, month) pair, validated once at the boundary so the
// scoring and preference paths never see an out-of-range month.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
pub struct SchedulePeriod {
    year: i32,
    month: u32,
}

impl SchedulePeriod {
    pub fn parse(year: i32, month: u32) -> Result<Self, ValidationError> {
        if !(1..=12).contains(&month) {
            return Err(ValidationError::new(String::from(
                "Month must be between 1 and 12",
            )));
        }
        if !(YEAR_MIN..=YEAR_MAX).contains(&year) {
            return Err(ValidationError::new(String::from(
                "Year is out of range",
            )));
        }
        Ok(Self { year, month })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    // January through this period's month of the same year, in order.
    pub fn year_to_date(&self) -> impl Iterator<Item = SchedulePeriod> + '_ {
        let year = self.year;
        (1..=self.month).map(move |month| SchedulePeriod { year, month })
    }
}

impl fmt::Display for SchedulePeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VacationPreference {
    #[serde(skip_serializing)]
    pub org_id: OrgId,
    #[serde(rename = "workerId")]
    pub worker_id: WorkerId,
    pub year: i32,
    pub month: u32,
    pub rank: PreferenceRank,
    #[serde(rename = "weekStart")]
    pub week_start: NaiveDate,
    #[serde(rename = "weekEnd")]
    pub week_end: NaiveDate,
    pub status: PreferenceStatus,
}

impl VacationPreference {
    pub fn new(
        org_id: OrgId,
        worker_id: WorkerId,
        period: SchedulePeriod,
        rank: PreferenceRank,
        week_start: NaiveDate,
        week_end: NaiveDate,
    ) -> Result<Self, ValidationError> {
        if week_start > week_end {
            return Err(ValidationError::new(String::from(
                "Week start must not be after week end",
            )));
        }
        Ok(Self {
            org_id,
            worker_id,
            year: period.year(),
            month: period.month(),
            rank,
            week_start,
            week_end,
            status: PreferenceStatus::Pending,
        })
    }
}
