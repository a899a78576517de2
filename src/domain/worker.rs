use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

// Worker identity is the stable staff identifier used across the rota:
// an email address, as issued by the upstream directory.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct WorkerId(String);

impl WorkerId {
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        if !validator::validate_email(s) {
            return Err(ValidationError::new(format!(
                "Invalid worker ID: {s}"
            )));
        }
        Ok(Self(s.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for WorkerId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WorkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct CapabilityCode(String);

impl CapabilityCode {
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::new(String::from(
                "Capability code must not be empty",
            )));
        }
        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CapabilityCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StaffRole {
    Staff,
    Admin,
}

impl FromStr for StaffRole {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Staff" | "staff" => Ok(StaffRole::Staff),
            "Admin" | "admin" => Ok(StaffRole::Admin),
            _ => Err(ValidationError::new(String::from("Invalid staff role"))),
        }
    }
}

impl fmt::Display for StaffRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                StaffRole::Staff => "staff",
                StaffRole::Admin => "admin",
            }
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Worker {
    pub id: WorkerId,
    #[serde(rename = "capabilityCode")]
    pub capability: Option<CapabilityCode>,
}

impl Worker {
    pub fn new(id: WorkerId, capability: Option<CapabilityCode>) -> Self {
        Self { id, capability }
    }
}
