use serde::Deserialize;
use std::collections::HashMap;

use super::{
    CapabilityCode, ShiftTypeCode, ValidationError, Worker, WorkerId,
};

// Exactly one rule applies per shift type. Raw configuration may populate
// more than one shape; `RawShiftType::resolve` collapses it with the fixed
// precedence AllowAny > RequiredCapability > NamedAllowlist.
#[derive(Debug, Clone, PartialEq)]
pub enum EligibilityRule {
    AllowAny,
    RequiredCapability(CapabilityCode),
    NamedAllowlist(Vec<WorkerId>),
}

impl EligibilityRule {
    pub fn can_work(&self, worker: &Worker) -> bool {
        match self {
            EligibilityRule::AllowAny => true,
            EligibilityRule::RequiredCapability(code) => {
                worker.capability.as_ref() == Some(code)
            }
            EligibilityRule::NamedAllowlist(ids) => ids.contains(&worker.id),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShiftType {
    pub code: ShiftTypeCode,
    pub rule: EligibilityRule,
}

// Configuration-file shape for one shift type entry.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawShiftType {
    pub code: String,
    #[serde(rename = "allowAny", default)]
    pub allow_any: bool,
    #[serde(rename = "requiredCapability", default)]
    pub required_capability: Option<String>,
    #[serde(rename = "allowedWorkers", default)]
    pub allowed_workers: Option<Vec<String>>,
}

impl RawShiftType {
    pub fn resolve(self) -> Result<ShiftType, ValidationError> {
        let code = ShiftTypeCode::parse(&self.code)?;

        if self.allow_any {
            return Ok(ShiftType {
                code,
                rule: EligibilityRule::AllowAny,
            });
        }

        if let Some(capability) = self.required_capability {
            let capability = CapabilityCode::parse(&capability)?;
            return Ok(ShiftType {
                code,
                rule: EligibilityRule::RequiredCapability(capability),
            });
        }

        if let Some(workers) = self.allowed_workers {
            let ids = workers
                .iter()
                .map(|w| WorkerId::parse(w))
                .collect::<Result<Vec<WorkerId>, ValidationError>>()?;
            return Ok(ShiftType {
                code,
                rule: EligibilityRule::NamedAllowlist(ids),
            });
        }

        Err(ValidationError::new(format!(
            "Shift type {} has no eligibility rule configured",
            code
        )))
    }
}

// All shift types an organization runs, keyed by code. Codes missing from
// the catalog fail closed: nobody may work them.
#[derive(Debug, Clone, Default)]
pub struct ShiftCatalog {
    types: HashMap<ShiftTypeCode, ShiftType>,
}

impl ShiftCatalog {
    pub fn from_raw(
        raw: Vec<RawShiftType>,
    ) -> Result<Self, ValidationError> {
        let mut types = HashMap::new();
        for entry in raw {
            let shift_type = entry.resolve()?;
            if types
                .insert(shift_type.code.clone(), shift_type.clone())
                .is_some()
            {
                return Err(ValidationError::new(format!(
                    "Duplicate shift type code: {}",
                    shift_type.code
                )));
            }
        }
        Ok(Self { types })
    }

    pub fn get(&self, code: &ShiftTypeCode) -> Option<&ShiftType> {
        self.types.get(code)
    }

    pub fn can_work(&self, worker: &Worker, code: &ShiftTypeCode) -> bool {
        match self.types.get(code) {
            Some(shift_type) => shift_type.rule.can_work(worker),
            None => false,
        }
    }
}
