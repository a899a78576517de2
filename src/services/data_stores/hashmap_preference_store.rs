use std::collections::{HashMap, HashSet};

use crate::domain::{
    OrgId, PreferenceRank, PreferenceStore, PreferenceStoreError,
    SchedulePeriod, VacationPreference, WorkerId,
};

type PeriodKey = (OrgId, WorkerId, i32, u32);

#[derive(Default)]
pub struct HashmapPreferenceStore {
    preferences: HashMap<PeriodKey, Vec<VacationPreference>>,
}

#[async_trait::async_trait]
impl PreferenceStore for HashmapPreferenceStore {
    async fn list_preferences(
        &self,
        org_id: &OrgId,
        period: &SchedulePeriod,
    ) -> Result<Vec<VacationPreference>, PreferenceStoreError> {
        Ok(self
            .preferences
            .iter()
            .filter(|((org, _, year, month), _)| {
                org == org_id
                    && *year == period.year()
                    && *month == period.month()
            })
            .flat_map(|(_, prefs)| prefs.iter().cloned())
            .collect())
    }

    async fn replace_preferences(
        &mut self,
        org_id: &OrgId,
        worker_id: &WorkerId,
        period: &SchedulePeriod,
        preferences: Vec<VacationPreference>,
    ) -> Result<(), PreferenceStoreError> {
        let mut seen = HashSet::<PreferenceRank>::new();
        for preference in &preferences {
            if !seen.insert(preference.rank) {
                return Err(PreferenceStoreError::DuplicateRank);
            }
        }

        let key =
            (*org_id, worker_id.clone(), period.year(), period.month());
        if preferences.is_empty() {
            self.preferences.remove(&key);
        } else {
            self.preferences.insert(key, preferences);
        }
        Ok(())
    }
}
