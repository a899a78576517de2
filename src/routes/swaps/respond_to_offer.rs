use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::CookieJar;
use chrono::Utc;
use color_eyre::eyre::eyre;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::{
    domain::{
        Assignment, ExchangeAPIError, SwapDecision, SwapOffer, SwapOfferId,
        SwapRequest, SwapStoreError,
    },
    utils::auth::get_caller,
    AppState,
};

// A decline simply resolves the offer. An accept runs the atomic
// exchange: reassignment, request transition and sibling cancellation
// commit together or not at all; any staleness surfaces as Conflict so
// the caller can refresh and pick another partner.
#[tracing::instrument(name = "Respond to offer route handler", skip_all)]
pub async fn respond_to_offer(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(request): Json<RespondToOfferRequest>,
) -> Result<(StatusCode, CookieJar, Json<RespondToOfferResponse>), ExchangeAPIError>
{
    let caller = get_caller(&jar)?;
    let offer_id = SwapOfferId::parse(&request.offer_id)?;
    let decision = SwapDecision::from_str(&request.decision)?;

    let offer = state
        .swap_store
        .read()
        .await
        .get_offer(&caller.org_id, &offer_id)
        .await
        .map_err(|e| match e {
            SwapStoreError::OfferNotFound => {
                ExchangeAPIError::IDNotFoundError(*offer_id.as_ref())
            }
            e => ExchangeAPIError::UnexpectedError(eyre!(e)),
        })?;

    if offer.target_worker_id != caller.worker_id {
        return Err(ExchangeAPIError::Forbidden(String::from(
            "Offer does not belong to the caller",
        )));
    }

    match decision {
        SwapDecision::Declined => {
            let declined = state
                .swap_store
                .write()
                .await
                .decline_offer(&caller.org_id, &offer_id, request.notes)
                .await
                .map_err(map_swap_store_error)?;

            let response = Json(RespondToOfferResponse {
                offer: declined,
                swap_request: None,
                reassigned: Vec::new(),
                cancelled_offer_ids: Vec::new(),
            });
            Ok((StatusCode::OK, jar, response))
        }
        SwapDecision::Accepted => {
            let today = Utc::now().date_naive();
            let acceptance = state
                .swap_store
                .write()
                .await
                .accept_offer(&caller.org_id, &offer_id, request.notes, today)
                .await
                .map_err(map_swap_store_error)?;

            let response = Json(RespondToOfferResponse {
                offer: acceptance.offer,
                swap_request: Some(acceptance.request),
                reassigned: acceptance.reassigned,
                cancelled_offer_ids: acceptance
                    .cancelled_offers
                    .iter()
                    .map(|id| id.as_ref().to_string())
                    .collect(),
            });
            Ok((StatusCode::OK, jar, response))
        }
    }
}

fn map_swap_store_error(e: SwapStoreError) -> ExchangeAPIError {
    match e {
        // Everything that was valid when the offer was made but is not
        // valid any more is a conflict, not a validation failure.
        SwapStoreError::OfferNotPending
        | SwapStoreError::RequestNotOpen
        | SwapStoreError::RequestExpired
        | SwapStoreError::StaleAssignment
        | SwapStoreError::AssignmentNotFound => {
            ExchangeAPIError::Conflict(e.to_string())
        }
        SwapStoreError::OfferNotFound
        | SwapStoreError::RequestNotFound
        | SwapStoreError::OpenRequestExists => {
            ExchangeAPIError::UnexpectedError(eyre!(e))
        }
        SwapStoreError::UnexpectedError(report) => {
            ExchangeAPIError::UnexpectedError(report)
        }
    }
}

#[derive(Debug, PartialEq, Deserialize)]
pub struct RespondToOfferRequest {
    #[serde(rename = "offerId")]
    pub offer_id: String,
    pub decision: String,
    pub notes: Option<String>,
}

#[derive(Debug, PartialEq, Serialize)]
pub struct RespondToOfferResponse {
    pub offer: SwapOffer,
    #[serde(rename = "swapRequest")]
    pub swap_request: Option<SwapRequest>,
    pub reassigned: Vec<Assignment>,
    #[serde(rename = "cancelledOfferIds")]
    pub cancelled_offer_ids: Vec<String>,
}
