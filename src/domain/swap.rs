use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::{AssignmentId, OrgId, ValidationError, WorkerId};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
pub struct SwapRequestId(Uuid);

impl SwapRequestId {
    pub fn parse(id: &str) -> Result<Self, ValidationError> {
        let parsed = uuid::Uuid::try_parse(id).map_err(|e| {
            ValidationError::new(format!("Invalid swap request ID: {e}"))
        })?;
        Ok(Self(parsed))
    }

    pub fn new(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for SwapRequestId {
    fn default() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl AsRef<Uuid> for SwapRequestId {
    fn as_ref(&self) -> &Uuid {
        &self.0
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
pub struct SwapOfferId(Uuid);

impl SwapOfferId {
    pub fn parse(id: &str) -> Result<Self, ValidationError> {
        let parsed = uuid::Uuid::try_parse(id).map_err(|e| {
            ValidationError::new(format!("Invalid swap offer ID: {e}"))
        })?;
        Ok(Self(parsed))
    }

    pub fn new(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for SwapOfferId {
    fn default() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl AsRef<Uuid> for SwapOfferId {
    fn as_ref(&self) -> &Uuid {
        &self.0
    }
}

// OPEN -> ACCEPTED | CANCELLED | EXPIRED; everything but OPEN is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SwapRequestStatus {
    Open,
    Accepted,
    Cancelled,
    Expired,
}

impl SwapRequestStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, SwapRequestStatus::Open)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SwapRequestStatus::Open => "OPEN",
            SwapRequestStatus::Accepted => "ACCEPTED",
            SwapRequestStatus::Cancelled => "CANCELLED",
            SwapRequestStatus::Expired => "EXPIRED",
        }
    }
}

impl FromStr for SwapRequestStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "OPEN" => Ok(SwapRequestStatus::Open),
            "ACCEPTED" => Ok(SwapRequestStatus::Accepted),
            "CANCELLED" => Ok(SwapRequestStatus::Cancelled),
            "EXPIRED" => Ok(SwapRequestStatus::Expired),
            _ => Err(ValidationError::new(String::from(
                "Invalid swap request status",
            ))),
        }
    }
}

impl fmt::Display for SwapRequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// PENDING -> ACCEPTED | DECLINED | CANCELLED; everything but PENDING is
// terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SwapOfferStatus {
    Pending,
    Accepted,
    Declined,
    Cancelled,
}

impl SwapOfferStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, SwapOfferStatus::Pending)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SwapOfferStatus::Pending => "PENDING",
            SwapOfferStatus::Accepted => "ACCEPTED",
            SwapOfferStatus::Declined => "DECLINED",
            SwapOfferStatus::Cancelled => "CANCELLED",
        }
    }
}

impl FromStr for SwapOfferStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(SwapOfferStatus::Pending),
            "ACCEPTED" => Ok(SwapOfferStatus::Accepted),
            "DECLINED" => Ok(SwapOfferStatus::Declined),
            "CANCELLED" => Ok(SwapOfferStatus::Cancelled),
            _ => Err(ValidationError::new(String::from(
                "Invalid swap offer status",
            ))),
        }
    }
}

impl fmt::Display for SwapOfferStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SwapDecision {
    Accepted,
    Declined,
}

impl FromStr for SwapDecision {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ACCEPTED" => Ok(SwapDecision::Accepted),
            "DECLINED" => Ok(SwapDecision::Declined),
            _ => Err(ValidationError::new(String::from(
                "Decision must be ACCEPTED or DECLINED",
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwapRequest {
    pub id: SwapRequestId,
    #[serde(skip_serializing)]
    pub org_id: OrgId,
    #[serde(rename = "requesterId")]
    pub requester_id: WorkerId,
    #[serde(rename = "sourceAssignmentId")]
    pub source_assignment_id: AssignmentId,
    pub status: SwapRequestStatus,
    pub notes: String,
    #[serde(rename = "equivalenceCode")]
    pub equivalence_code: Option<String>,
}

impl SwapRequest {
    pub fn new(
        org_id: OrgId,
        requester_id: WorkerId,
        source_assignment_id: AssignmentId,
        notes: String,
        equivalence_code: Option<String>,
    ) -> Self {
        Self {
            id: SwapRequestId::default(),
            org_id,
            requester_id,
            source_assignment_id,
            status: SwapRequestStatus::Open,
            notes,
            equivalence_code,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwapOffer {
    pub id: SwapOfferId,
    #[serde(skip_serializing)]
    pub org_id: OrgId,
    #[serde(rename = "swapRequestId")]
    pub swap_request_id: SwapRequestId,
    #[serde(rename = "targetWorkerId")]
    pub target_worker_id: WorkerId,
    #[serde(rename = "targetAssignmentId")]
    pub target_assignment_id: Option<AssignmentId>,
    pub status: SwapOfferStatus,
    #[serde(rename = "responseNotes")]
    pub response_notes: Option<String>,
}

impl SwapOffer {
    pub fn new(
        org_id: OrgId,
        swap_request_id: SwapRequestId,
        target_worker_id: WorkerId,
        target_assignment_id: Option<AssignmentId>,
    ) -> Self {
        Self {
            id: SwapOfferId::default(),
            org_id,
            swap_request_id,
            target_worker_id,
            target_assignment_id,
            status: SwapOfferStatus::Pending,
            response_notes: None,
        }
    }

    // A bilateral offer trades assignments both ways; without a target
    // assignment the offer is a unilateral give-away.
    pub fn is_bilateral(&self) -> bool {
        self.target_assignment_id.is_some()
    }
}
