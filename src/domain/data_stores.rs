use chrono::NaiveDate;
use color_eyre::eyre::Report;
use thiserror::Error;

use super::{
    Assignment, AssignmentId, OrgId, SchedulePeriod, StaffRole, SwapOffer,
    SwapOfferId, SwapRequest, SwapRequestId, SwapRequestStatus,
    VacationPreference, Worker, WorkerId,
};

#[derive(Debug, Clone, Default)]
pub struct AssignmentFilter {
    pub worker_id: Option<WorkerId>,
    pub date_range: Option<(NaiveDate, NaiveDate)>,
}

#[async_trait::async_trait]
pub trait AssignmentStore {
    async fn add_assignment(
        &mut self,
        assignment: Assignment,
    ) -> Result<(), AssignmentStoreError>;
    async fn get_assignment(
        &self,
        org_id: &OrgId,
        id: &AssignmentId,
    ) -> Result<Assignment, AssignmentStoreError>;
    async fn list_assignments(
        &self,
        org_id: &OrgId,
        filter: &AssignmentFilter,
    ) -> Result<Vec<Assignment>, AssignmentStoreError>;
}

#[derive(Debug, Error)]
pub enum AssignmentStoreError {
    #[error("Assignment ID exists")]
    AssignmentIdExists,
    #[error("Assignment not found")]
    AssignmentNotFound,
    #[error("Unexpected error")]
    UnexpectedError(#[source] Report),
}

impl PartialEq for AssignmentStoreError {
    fn eq(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::AssignmentIdExists, Self::AssignmentIdExists)
                | (Self::AssignmentNotFound, Self::AssignmentNotFound)
                | (Self::UnexpectedError(_), Self::UnexpectedError(_))
        )
    }
}

#[async_trait::async_trait]
pub trait PreferenceStore {
    async fn list_preferences(
        &self,
        org_id: &OrgId,
        period: &SchedulePeriod,
    ) -> Result<Vec<VacationPreference>, PreferenceStoreError>;
    // Submission replaces the whole (worker, year, month) period:
    // delete + recreate, never a partial merge.
    async fn replace_preferences(
        &mut self,
        org_id: &OrgId,
        worker_id: &WorkerId,
        period: &SchedulePeriod,
        preferences: Vec<VacationPreference>,
    ) -> Result<(), PreferenceStoreError>;
}

#[derive(Debug, Error)]
pub enum PreferenceStoreError {
    #[error("Duplicate preference rank for period")]
    DuplicateRank,
    #[error("Unexpected error")]
    UnexpectedError(#[source] Report),
}

impl PartialEq for PreferenceStoreError {
    fn eq(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::DuplicateRank, Self::DuplicateRank)
                | (Self::UnexpectedError(_), Self::UnexpectedError(_))
        )
    }
}

#[async_trait::async_trait]
pub trait RosterStore {
    async fn add_worker(
        &mut self,
        org_id: &OrgId,
        worker: Worker,
        role: StaffRole,
    ) -> Result<(), RosterStoreError>;
    async fn get_worker(
        &self,
        org_id: &OrgId,
        worker_id: &WorkerId,
    ) -> Result<Worker, RosterStoreError>;
    async fn list_workers(
        &self,
        org_id: &OrgId,
        role: Option<StaffRole>,
    ) -> Result<Vec<Worker>, RosterStoreError>;
}

#[derive(Debug, Error)]
pub enum RosterStoreError {
    #[error("Worker already exists")]
    WorkerAlreadyExists,
    #[error("Worker not found")]
    WorkerNotFound,
    #[error("Unexpected error")]
    UnexpectedError(#[source] Report),
}

impl PartialEq for RosterStoreError {
    fn eq(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::WorkerAlreadyExists, Self::WorkerAlreadyExists)
                | (Self::WorkerNotFound, Self::WorkerNotFound)
                | (Self::UnexpectedError(_), Self::UnexpectedError(_))
        )
    }
}

#[derive(Debug, Clone, Default)]
pub struct SwapRequestFilter {
    pub status: Option<SwapRequestStatus>,
    pub requester_id: Option<WorkerId>,
}

// Everything the accept path changed, for the caller to report back.
#[derive(Debug, Clone, PartialEq)]
pub struct SwapAcceptance {
    pub request: SwapRequest,
    pub offer: SwapOffer,
    pub reassigned: Vec<Assignment>,
    pub cancelled_offers: Vec<SwapOfferId>,
}

#[async_trait::async_trait]
pub trait SwapStore {
    // Enforces the at-most-one-OPEN-request-per-assignment invariant.
    async fn add_request(
        &mut self,
        request: SwapRequest,
    ) -> Result<(), SwapStoreError>;
    async fn get_request(
        &self,
        org_id: &OrgId,
        id: &SwapRequestId,
    ) -> Result<SwapRequest, SwapStoreError>;
    async fn list_requests(
        &self,
        org_id: &OrgId,
        filter: &SwapRequestFilter,
    ) -> Result<Vec<SwapRequest>, SwapStoreError>;
    async fn add_offers(
        &mut self,
        offers: Vec<SwapOffer>,
    ) -> Result<(), SwapStoreError>;
    async fn get_offer(
        &self,
        org_id: &OrgId,
        id: &SwapOfferId,
    ) -> Result<SwapOffer, SwapStoreError>;
    async fn list_offers(
        &self,
        org_id: &OrgId,
        request_id: &SwapRequestId,
    ) -> Result<Vec<SwapOffer>, SwapStoreError>;
    async fn decline_offer(
        &mut self,
        org_id: &OrgId,
        id: &SwapOfferId,
        response_notes: Option<String>,
    ) -> Result<SwapOffer, SwapStoreError>;
    // The atomic exchange. Re-checks every precondition (offer PENDING,
    // request OPEN and unexpired, source still the requester's, target
    // still the responder's) and applies the reassignment, the request
    // transition, and sibling cancellation as one unit. Any failed
    // precondition leaves the store untouched.
    async fn accept_offer(
        &mut self,
        org_id: &OrgId,
        id: &SwapOfferId,
        response_notes: Option<String>,
        today: NaiveDate,
    ) -> Result<SwapAcceptance, SwapStoreError>;
    async fn cancel_request(
        &mut self,
        org_id: &OrgId,
        id: &SwapRequestId,
    ) -> Result<Vec<SwapOfferId>, SwapStoreError>;
    // Moves OPEN requests whose source assignment date is before `before`
    // to EXPIRED and cancels their pending offers.
    async fn expire_requests(
        &mut self,
        org_id: &OrgId,
        before: NaiveDate,
    ) -> Result<Vec<SwapRequestId>, SwapStoreError>;
}

#[derive(Debug, Error)]
pub enum SwapStoreError {
    #[error("Assignment not found")]
    AssignmentNotFound,
    #[error("Offer is no longer pending")]
    OfferNotPending,
    #[error("Offer not found")]
    OfferNotFound,
    #[error("An open swap request already exists for this assignment")]
    OpenRequestExists,
    #[error("Request has expired")]
    RequestExpired,
    #[error("Request is no longer open")]
    RequestNotOpen,
    #[error("Request not found")]
    RequestNotFound,
    #[error("An exchanged assignment changed hands since the offer was made")]
    StaleAssignment,
    #[error("Unexpected error")]
    UnexpectedError(#[source] Report),
}

impl PartialEq for SwapStoreError {
    fn eq(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::AssignmentNotFound, Self::AssignmentNotFound)
                | (Self::OfferNotPending, Self::OfferNotPending)
                | (Self::OfferNotFound, Self::OfferNotFound)
                | (Self::OpenRequestExists, Self::OpenRequestExists)
                | (Self::RequestExpired, Self::RequestExpired)
                | (Self::RequestNotOpen, Self::RequestNotOpen)
                | (Self::RequestNotFound, Self::RequestNotFound)
                | (Self::StaleAssignment, Self::StaleAssignment)
                | (Self::UnexpectedError(_), Self::UnexpectedError(_))
        )
    }
}
