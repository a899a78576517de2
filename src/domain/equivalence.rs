use serde::Deserialize;
use std::collections::{HashMap, HashSet};

use super::{ShiftTypeCode, ValidationError};

// Configuration-file shape for one named set of interchangeable shift types.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EquivalenceSet {
    pub code: String,
    pub members: Vec<String>,
}

// Injected per-organization lookup: two shift types are equivalent under a
// named set iff both are members. Unknown set codes fail closed.
#[derive(Debug, Clone, Default)]
pub struct EquivalenceRegistry {
    sets: HashMap<String, HashSet<ShiftTypeCode>>,
}

impl EquivalenceRegistry {
    pub fn from_sets(
        sets: Vec<EquivalenceSet>,
    ) -> Result<Self, ValidationError> {
        let mut resolved = HashMap::new();
        for set in sets {
            let members = set
                .members
                .iter()
                .map(|m| ShiftTypeCode::parse(m))
                .collect::<Result<HashSet<ShiftTypeCode>, ValidationError>>(
                )?;
            if resolved.insert(set.code.clone(), members).is_some() {
                return Err(ValidationError::new(format!(
                    "Duplicate equivalence set code: {}",
                    set.code
                )));
            }
        }
        Ok(Self { sets: resolved })
    }

    pub fn are_equivalent(
        &self,
        a: &ShiftTypeCode,
        b: &ShiftTypeCode,
        equivalence_code: &str,
    ) -> bool {
        match self.sets.get(equivalence_code) {
            Some(members) => members.contains(a) && members.contains(b),
            None => false,
        }
    }
}
