use crate::domain::{ExchangeAPIError, SwapRequest};

use super::auth::Caller;

// Single capability predicate for all swap management operations: the
// requester manages their own request, admins manage any in their org.
#[tracing::instrument(name = "Check swap management permission", skip_all)]
pub fn can_manage_swap(
    caller: &Caller,
    request: &SwapRequest,
) -> Result<(), ExchangeAPIError> {
    if caller.is_admin() || caller.worker_id == request.requester_id {
        return Ok(());
    }
    Err(ExchangeAPIError::Forbidden(String::from(
        "Only the requester or an administrator may manage this swap request",
    )))
}

#[tracing::instrument(name = "Check administrator permission", skip_all)]
pub fn require_admin(caller: &Caller) -> Result<(), ExchangeAPIError> {
    if caller.is_admin() {
        return Ok(());
    }
    Err(ExchangeAPIError::Forbidden(String::from(
        "Administrator role required",
    )))
}
