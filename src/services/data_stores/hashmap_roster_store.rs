use std::collections::HashMap;

use crate::domain::{
    OrgId, RosterStore, RosterStoreError, StaffRole, Worker, WorkerId,
};

#[derive(Default)]
pub struct HashmapRosterStore {
    workers: HashMap<(OrgId, WorkerId), (Worker, StaffRole)>,
}

#[async_trait::async_trait]
impl RosterStore for HashmapRosterStore {
    async fn add_worker(
        &mut self,
        org_id: &OrgId,
        worker: Worker,
        role: StaffRole,
    ) -> Result<(), RosterStoreError> {
        let key = (*org_id, worker.id.clone());
        if self.workers.contains_key(&key) {
            return Err(RosterStoreError::WorkerAlreadyExists);
        }
        self.workers.insert(key, (worker, role));
        Ok(())
    }

    async fn get_worker(
        &self,
        org_id: &OrgId,
        worker_id: &WorkerId,
    ) -> Result<Worker, RosterStoreError> {
        self.workers
            .get(&(*org_id, worker_id.clone()))
            .map(|(worker, _)| worker.clone())
            .ok_or(RosterStoreError::WorkerNotFound)
    }

    async fn list_workers(
        &self,
        org_id: &OrgId,
        role: Option<StaffRole>,
    ) -> Result<Vec<Worker>, RosterStoreError> {
        Ok(self
            .workers
            .iter()
            .filter(|((org, _), _)| org == org_id)
            .filter(|(_, (_, worker_role))| match role {
                Some(wanted) => *worker_role == wanted,
                None => true,
            })
            .map(|(_, (worker, _))| worker.clone())
            .collect())
    }
}
