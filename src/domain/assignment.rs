use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::{OrgId, ValidationError, WorkerId};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
pub struct AssignmentId(Uuid);

impl AssignmentId {
    pub fn parse(id: &str) -> Result<Self, ValidationError> {
        let parsed = uuid::Uuid::try_parse(id).map_err(|e| {
            ValidationError::new(format!("Invalid assignment ID: {e}"))
        })?;
        Ok(Self(parsed))
    }

    pub fn new(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for AssignmentId {
    fn default() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl AsRef<Uuid> for AssignmentId {
    fn as_ref(&self) -> &Uuid {
        &self.0
    }
}

#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ShiftTypeCode(String);

impl ShiftTypeCode {
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::new(String::from(
                "Shift type code must not be empty",
            )));
        }
        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ShiftTypeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// How an assignment came to exist. Only the swap accept path may move an
// assignment to Swapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssignmentKind {
    Generated,
    Manual,
    Swapped,
}

impl AssignmentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssignmentKind::Generated => "GENERATED",
            AssignmentKind::Manual => "MANUAL",
            AssignmentKind::Swapped => "SWAPPED",
        }
    }
}

impl FromStr for AssignmentKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "GENERATED" => Ok(AssignmentKind::Generated),
            "MANUAL" => Ok(AssignmentKind::Manual),
            "SWAPPED" => Ok(AssignmentKind::Swapped),
            _ => Err(ValidationError::new(String::from(
                "Invalid assignment kind",
            ))),
        }
    }
}

impl fmt::Display for AssignmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    pub id: AssignmentId,
    #[serde(skip_serializing)]
    pub org_id: OrgId,
    #[serde(rename = "workerId")]
    pub worker_id: WorkerId,
    pub date: NaiveDate,
    #[serde(rename = "shiftType")]
    pub shift_type: ShiftTypeCode,
    pub kind: AssignmentKind,
}

impl Assignment {
    pub fn new(
        org_id: OrgId,
        worker_id: WorkerId,
        date: NaiveDate,
        shift_type: ShiftTypeCode,
        kind: AssignmentKind,
    ) -> Self {
        Self {
            id: AssignmentId::default(),
            org_id,
            worker_id,
            date,
            shift_type,
            kind,
        }
    }
}
