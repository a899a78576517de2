use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::{
    Assignment, AssignmentId, EquivalenceRegistry, ShiftCatalog,
    ShiftTypeCode, Worker, WorkerId,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SwapType {
    SameType,
    Equivalent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EligiblePartner {
    #[serde(rename = "workerId")]
    pub worker_id: WorkerId,
    #[serde(rename = "assignmentId")]
    pub assignment_id: AssignmentId,
    #[serde(rename = "shiftType")]
    pub shift_type: ShiftTypeCode,
    #[serde(rename = "swapType")]
    pub swap_type: SwapType,
}

// Candidate discovery over same-date assignments. Both directions of
// eligibility must hold because a completed swap puts each party on the
// other's shift. Candidates whose worker is missing from the roster are
// skipped. The result carries no ordering guarantee.
pub fn find_eligible_partners(
    source: &Assignment,
    requester: &Worker,
    candidates: &[Assignment],
    roster: &HashMap<WorkerId, Worker>,
    catalog: &ShiftCatalog,
    registry: &EquivalenceRegistry,
    equivalence_code: Option<&str>,
) -> Vec<EligiblePartner> {
    let mut partners = Vec::new();

    for candidate in candidates {
        if candidate.id == source.id
            || candidate.worker_id == source.worker_id
            || candidate.date != source.date
        {
            continue;
        }

        let swap_type = if candidate.shift_type == source.shift_type {
            SwapType::SameType
        } else {
            match equivalence_code {
                Some(code)
                    if registry.are_equivalent(
                        &candidate.shift_type,
                        &source.shift_type,
                        code,
                    ) =>
                {
                    SwapType::Equivalent
                }
                _ => continue,
            }
        };

        let Some(candidate_worker) = roster.get(&candidate.worker_id) else {
            continue;
        };

        if catalog.can_work(requester, &candidate.shift_type)
            && catalog.can_work(candidate_worker, &source.shift_type)
        {
            partners.push(EligiblePartner {
                worker_id: candidate.worker_id.clone(),
                assignment_id: candidate.id,
                shift_type: candidate.shift_type.clone(),
                swap_type,
            });
        }
    }

    partners
}
