use chrono::NaiveDate;
use std::collections::HashMap;

use crate::domain::{
    Assignment, AssignmentFilter, AssignmentId, AssignmentKind,
    AssignmentStore, AssignmentStoreError, OrgId, SwapAcceptance, SwapOffer,
    SwapOfferId, SwapOfferStatus, SwapRequest, SwapRequestFilter,
    SwapRequestId, SwapRequestStatus, SwapStore, SwapStoreError,
};

// In-memory ledger holding assignments alongside the swap records that
// mutate them, so an accept can touch all of them under one store lock.
#[derive(Default)]
pub struct HashmapExchangeStore {
    assignments: HashMap<AssignmentId, Assignment>,
    requests: HashMap<SwapRequestId, SwapRequest>,
    offers: HashMap<SwapOfferId, SwapOffer>,
}

impl HashmapExchangeStore {
    fn cancel_pending_offers(
        &mut self,
        request_id: &SwapRequestId,
        except: Option<&SwapOfferId>,
    ) -> Vec<SwapOfferId> {
        let mut cancelled = Vec::new();
        for offer in self.offers.values_mut() {
            if offer.swap_request_id == *request_id
                && offer.status == SwapOfferStatus::Pending
                && Some(&offer.id) != except
            {
                offer.status = SwapOfferStatus::Cancelled;
                cancelled.push(offer.id);
            }
        }
        cancelled
    }

    fn expire(&mut self, request_id: &SwapRequestId) {
        if let Some(request) = self.requests.get_mut(request_id) {
            request.status = SwapRequestStatus::Expired;
        }
        self.cancel_pending_offers(request_id, None);
    }
}

#[async_trait::async_trait]
impl AssignmentStore for HashmapExchangeStore {
    async fn add_assignment(
        &mut self,
        assignment: Assignment,
    ) -> Result<(), AssignmentStoreError> {
        if self.assignments.contains_key(&assignment.id) {
            return Err(AssignmentStoreError::AssignmentIdExists);
        }
        self.assignments.insert(assignment.id, assignment);
        Ok(())
    }

    async fn get_assignment(
        &self,
        org_id: &OrgId,
        id: &AssignmentId,
    ) -> Result<Assignment, AssignmentStoreError> {
        self.assignments
            .get(id)
            .filter(|a| a.org_id == *org_id)
            .cloned()
            .ok_or(AssignmentStoreError::AssignmentNotFound)
    }

    async fn list_assignments(
        &self,
        org_id: &OrgId,
        filter: &AssignmentFilter,
    ) -> Result<Vec<Assignment>, AssignmentStoreError> {
        Ok(self
            .assignments
            .values()
            .filter(|a| a.org_id == *org_id)
            .filter(|a| match &filter.worker_id {
                Some(worker_id) => a.worker_id == *worker_id,
                None => true,
            })
            .filter(|a| match filter.date_range {
                Some((from, to)) => a.date >= from && a.date <= to,
                None => true,
            })
            .cloned()
            .collect())
    }
}

#[async_trait::async_trait]
impl SwapStore for HashmapExchangeStore {
    async fn add_request(
        &mut self,
        request: SwapRequest,
    ) -> Result<(), SwapStoreError> {
        let duplicate = self.requests.values().any(|r| {
            r.source_assignment_id == request.source_assignment_id
                && r.status == SwapRequestStatus::Open
        });
        if duplicate {
            return Err(SwapStoreError::OpenRequestExists);
        }
        self.requests.insert(request.id, request);
        Ok(())
    }

    async fn get_request(
        &self,
        org_id: &OrgId,
        id: &SwapRequestId,
    ) -> Result<SwapRequest, SwapStoreError> {
        self.requests
            .get(id)
            .filter(|r| r.org_id == *org_id)
            .cloned()
            .ok_or(SwapStoreError::RequestNotFound)
    }

    async fn list_requests(
        &self,
        org_id: &OrgId,
        filter: &SwapRequestFilter,
    ) -> Result<Vec<SwapRequest>, SwapStoreError> {
        Ok(self
            .requests
            .values()
            .filter(|r| r.org_id == *org_id)
            .filter(|r| match filter.status {
                Some(status) => r.status == status,
                None => true,
            })
            .filter(|r| match &filter.requester_id {
                Some(requester_id) => r.requester_id == *requester_id,
                None => true,
            })
            .cloned()
            .collect())
    }

    async fn add_offers(
        &mut self,
        offers: Vec<SwapOffer>,
    ) -> Result<(), SwapStoreError> {
        for offer in offers {
            self.offers.insert(offer.id, offer);
        }
        Ok(())
    }

    async fn get_offer(
        &self,
        org_id: &OrgId,
        id: &SwapOfferId,
    ) -> Result<SwapOffer, SwapStoreError> {
        self.offers
            .get(id)
            .filter(|o| o.org_id == *org_id)
            .cloned()
            .ok_or(SwapStoreError::OfferNotFound)
    }

    async fn list_offers(
        &self,
        org_id: &OrgId,
        request_id: &SwapRequestId,
    ) -> Result<Vec<SwapOffer>, SwapStoreError> {
        Ok(self
            .offers
            .values()
            .filter(|o| {
                o.org_id == *org_id && o.swap_request_id == *request_id
            })
            .cloned()
            .collect())
    }

    async fn decline_offer(
        &mut self,
        org_id: &OrgId,
        id: &SwapOfferId,
        response_notes: Option<String>,
    ) -> Result<SwapOffer, SwapStoreError> {
        let offer = self
            .offers
            .get_mut(id)
            .filter(|o| o.org_id == *org_id)
            .ok_or(SwapStoreError::OfferNotFound)?;
        if offer.status != SwapOfferStatus::Pending {
            return Err(SwapStoreError::OfferNotPending);
        }
        offer.status = SwapOfferStatus::Declined;
        offer.response_notes = response_notes;
        Ok(offer.clone())
    }

    async fn accept_offer(
        &mut self,
        org_id: &OrgId,
        id: &SwapOfferId,
        response_notes: Option<String>,
        today: NaiveDate,
    ) -> Result<SwapAcceptance, SwapStoreError> {
        // Validate every precondition before touching anything, so a
        // failure leaves the ledger exactly as it was.
        let offer = self
            .offers
            .get(id)
            .filter(|o| o.org_id == *org_id)
            .cloned()
            .ok_or(SwapStoreError::OfferNotFound)?;
        if offer.status != SwapOfferStatus::Pending {
            return Err(SwapStoreError::OfferNotPending);
        }

        let request = self
            .requests
            .get(&offer.swap_request_id)
            .filter(|r| r.org_id == *org_id)
            .cloned()
            .ok_or(SwapStoreError::RequestNotFound)?;
        if request.status != SwapRequestStatus::Open {
            return Err(SwapStoreError::RequestNotOpen);
        }

        let source = self
            .assignments
            .get(&request.source_assignment_id)
            .filter(|a| a.org_id == *org_id)
            .cloned()
            .ok_or(SwapStoreError::AssignmentNotFound)?;
        if source.worker_id != request.requester_id {
            return Err(SwapStoreError::StaleAssignment);
        }
        if source.date < today {
            self.expire(&request.id);
            return Err(SwapStoreError::RequestExpired);
        }

        if let Some(target_id) = offer.target_assignment_id {
            let target = self
                .assignments
                .get(&target_id)
                .filter(|a| a.org_id == *org_id)
                .ok_or(SwapStoreError::AssignmentNotFound)?;
            if target.worker_id != offer.target_worker_id {
                return Err(SwapStoreError::StaleAssignment);
            }
        }

        // Commit. Mutations only from here on.
        let mut reassigned = Vec::new();

        let source = self
            .assignments
            .get_mut(&request.source_assignment_id)
            .ok_or(SwapStoreError::AssignmentNotFound)?;
        source.worker_id = offer.target_worker_id.clone();
        source.kind = AssignmentKind::Swapped;
        reassigned.push(source.clone());

        if let Some(target_id) = offer.target_assignment_id {
            let target = self
                .assignments
                .get_mut(&target_id)
                .ok_or(SwapStoreError::AssignmentNotFound)?;
            target.worker_id = request.requester_id.clone();
            target.kind = AssignmentKind::Swapped;
            reassigned.push(target.clone());
        }

        let accepted_offer = {
            let offer = self
                .offers
                .get_mut(id)
                .ok_or(SwapStoreError::OfferNotFound)?;
            offer.status = SwapOfferStatus::Accepted;
            offer.response_notes = response_notes;
            offer.clone()
        };

        let accepted_request = {
            let request = self
                .requests
                .get_mut(&offer.swap_request_id)
                .ok_or(SwapStoreError::RequestNotFound)?;
            request.status = SwapRequestStatus::Accepted;
            request.clone()
        };

        let cancelled_offers =
            self.cancel_pending_offers(&accepted_request.id, Some(id));

        Ok(SwapAcceptance {
            request: accepted_request,
            offer: accepted_offer,
            reassigned,
            cancelled_offers,
        })
    }

    async fn cancel_request(
        &mut self,
        org_id: &OrgId,
        id: &SwapRequestId,
    ) -> Result<Vec<SwapOfferId>, SwapStoreError> {
        let request = self
            .requests
            .get_mut(id)
            .filter(|r| r.org_id == *org_id)
            .ok_or(SwapStoreError::RequestNotFound)?;
        if request.status != SwapRequestStatus::Open {
            return Err(SwapStoreError::RequestNotOpen);
        }
        request.status = SwapRequestStatus::Cancelled;
        Ok(self.cancel_pending_offers(id, None))
    }

    async fn expire_requests(
        &mut self,
        org_id: &OrgId,
        before: NaiveDate,
    ) -> Result<Vec<SwapRequestId>, SwapStoreError> {
        let stale: Vec<SwapRequestId> = self
            .requests
            .values()
            .filter(|r| {
                r.org_id == *org_id && r.status == SwapRequestStatus::Open
            })
            .filter(|r| {
                self.assignments
                    .get(&r.source_assignment_id)
                    .map(|a| a.date < before)
                    .unwrap_or(false)
            })
            .map(|r| r.id)
            .collect();

        for request_id in &stale {
            self.expire(request_id);
        }
        Ok(stale)
    }
}
