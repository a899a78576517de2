use crate::helpers::{
    add_assignment, get_json_response_body, log_in_as, open_swap_request,
    seed_admin_session, seed_worker, TestApp,
};
use rota_exchange::domain::StaffRole;
use serde_json::{json, Value};
use test_context::test_context;

struct OfferFixture {
    source: String,
    target: String,
    offer_to_y: String,
    offer_to_z: String,
}

// x requests a swap on their Jun 10 shift and offers it to y (bilateral,
// against y's shift) and z (give-away).
async fn open_request_with_two_offers(app: &mut TestApp) -> OfferFixture {
    seed_admin_session(app, "admin@example.com").await;
    seed_worker(app, "x@example.com", None, StaffRole::Staff).await;
    seed_worker(app, "y@example.com", None, StaffRole::Staff).await;
    seed_worker(app, "z@example.com", None, StaffRole::Staff).await;

    let source =
        add_assignment(app, "x@example.com", "2030-06-10", "DAY1").await;
    let target =
        add_assignment(app, "y@example.com", "2030-06-10", "DAY1").await;

    log_in_as(app, "x@example.com", StaffRole::Staff);
    let request_id = open_swap_request(app, &source).await;

    let response = app
        .post_offers(&json!({
            "swapRequestId": request_id,
            "targetWorkerIds": ["y@example.com", "z@example.com"],
            "targetAssignmentIds": [target, null]
        }))
        .await;
    assert_eq!(response.status().as_u16(), 201);

    let body = get_json_response_body(response).await;
    let offers = body.get("offers").unwrap().as_array().unwrap();
    let offer_id_for = |worker: &str| {
        offers
            .iter()
            .find(|o| o.get("targetWorkerId").unwrap() == worker)
            .and_then(|o| o.get("id"))
            .and_then(Value::as_str)
            .expect("offer id")
            .to_owned()
    };

    OfferFixture {
        source,
        target,
        offer_to_y: offer_id_for("y@example.com"),
        offer_to_z: offer_id_for("z@example.com"),
    }
}

#[test_context(TestApp)]
#[tokio::test]
async fn accept_swaps_assignments_and_cancels_siblings(app: &mut TestApp) {
    let fixture = open_request_with_two_offers(app).await;

    log_in_as(app, "y@example.com", StaffRole::Staff);
    let response = app
        .put_respond(&json!({
            "offerId": fixture.offer_to_y,
            "decision": "ACCEPTED",
            "notes": "happy to help"
        }))
        .await;
    assert_eq!(response.status().as_u16(), 200);

    let body = get_json_response_body(response).await;
    assert_eq!(
        body.pointer("/swapRequest/status").unwrap(),
        "ACCEPTED"
    );
    assert_eq!(body.pointer("/offer/status").unwrap(), "ACCEPTED");

    let reassigned = body.get("reassigned").unwrap().as_array().unwrap();
    assert_eq!(reassigned.len(), 2);
    for assignment in reassigned {
        assert_eq!(assignment.get("kind").unwrap(), "SWAPPED");
    }
    let by_id = |id: &str| {
        reassigned
            .iter()
            .find(|a| a.get("id").unwrap() == id)
            .expect("reassigned entry")
    };
    assert_eq!(
        by_id(&fixture.source).get("workerId").unwrap(),
        "y@example.com"
    );
    assert_eq!(
        by_id(&fixture.target).get("workerId").unwrap(),
        "x@example.com"
    );

    let cancelled = body
        .get("cancelledOfferIds")
        .unwrap()
        .as_array()
        .unwrap();
    assert_eq!(cancelled.len(), 1);
    assert_eq!(cancelled[0], Value::String(fixture.offer_to_z.clone()));

    // The race loser gets a conflict, not a second exchange.
    log_in_as(app, "z@example.com", StaffRole::Staff);
    let response = app
        .put_respond(&json!({
            "offerId": fixture.offer_to_z,
            "decision": "ACCEPTED"
        }))
        .await;
    assert_eq!(response.status().as_u16(), 409);
}

#[test_context(TestApp)]
#[tokio::test]
async fn give_away_reassigns_only_the_source(app: &mut TestApp) {
    let fixture = open_request_with_two_offers(app).await;

    log_in_as(app, "z@example.com", StaffRole::Staff);
    let response = app
        .put_respond(&json!({
            "offerId": fixture.offer_to_z,
            "decision": "ACCEPTED"
        }))
        .await;
    assert_eq!(response.status().as_u16(), 200);

    let body = get_json_response_body(response).await;
    let reassigned = body.get("reassigned").unwrap().as_array().unwrap();
    assert_eq!(reassigned.len(), 1);
    assert_eq!(reassigned[0].get("id").unwrap(), &fixture.source);
    assert_eq!(reassigned[0].get("workerId").unwrap(), "z@example.com");

    // y's own shift is untouched.
    log_in_as(app, "admin@example.com", StaffRole::Admin);
    let response = app
        .get_assignments(&[("workerId", "y@example.com".to_owned())])
        .await;
    let body = get_json_response_body(response).await;
    let assignments = body.get("assignments").unwrap().as_array().unwrap();
    assert_eq!(assignments.len(), 1);
    assert_eq!(assignments[0].get("id").unwrap(), &fixture.target);
    assert_eq!(assignments[0].get("kind").unwrap(), "GENERATED");
}

#[test_context(TestApp)]
#[tokio::test]
async fn decline_resolves_the_offer_and_nothing_else(app: &mut TestApp) {
    let fixture = open_request_with_two_offers(app).await;

    log_in_as(app, "y@example.com", StaffRole::Staff);
    let response = app
        .put_respond(&json!({
            "offerId": fixture.offer_to_y,
            "decision": "DECLINED",
            "notes": "on leave myself"
        }))
        .await;
    assert_eq!(response.status().as_u16(), 200);

    let body = get_json_response_body(response).await;
    assert_eq!(body.pointer("/offer/status").unwrap(), "DECLINED");
    assert!(body.get("swapRequest").unwrap().is_null());
    assert!(body.get("reassigned").unwrap().as_array().unwrap().is_empty());

    // The request stays open for the remaining offer.
    let response = app
        .get_swap_requests(&[("status", "OPEN".to_owned())])
        .await;
    let body = get_json_response_body(response).await;
    assert_eq!(
        body.get("swapRequests").unwrap().as_array().unwrap().len(),
        1
    );

    // Declining twice conflicts.
    let response = app
        .put_respond(&json!({
            "offerId": fixture.offer_to_y,
            "decision": "DECLINED"
        }))
        .await;
    assert_eq!(response.status().as_u16(), 409);
}

#[test_context(TestApp)]
#[tokio::test]
async fn only_the_target_worker_may_respond(app: &mut TestApp) {
    let fixture = open_request_with_two_offers(app).await;

    log_in_as(app, "x@example.com", StaffRole::Staff);
    let response = app
        .put_respond(&json!({
            "offerId": fixture.offer_to_y,
            "decision": "ACCEPTED"
        }))
        .await;
    assert_eq!(response.status().as_u16(), 403);
}

#[test_context(TestApp)]
#[tokio::test]
async fn unknown_offer_returns_404_and_bad_decision_400(app: &mut TestApp) {
    let fixture = open_request_with_two_offers(app).await;

    log_in_as(app, "y@example.com", StaffRole::Staff);
    let response = app
        .put_respond(&json!({
            "offerId": "2a6af785-e170-4ab6-ac1f-691772640f31",
            "decision": "ACCEPTED"
        }))
        .await;
    assert_eq!(response.status().as_u16(), 404);

    let response = app
        .put_respond(&json!({
            "offerId": fixture.offer_to_y,
            "decision": "MAYBE"
        }))
        .await;
    assert_eq!(response.status().as_u16(), 400);
}
