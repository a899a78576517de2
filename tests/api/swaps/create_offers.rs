use crate::helpers::{
    add_assignment, get_json_response_body, log_in_as, open_swap_request,
    seed_admin_session, seed_worker, TestApp,
};
use rota_exchange::domain::StaffRole;
use serde_json::json;
use test_context::test_context;

#[test_context(TestApp)]
#[tokio::test]
async fn creates_one_pending_offer_per_valid_target(app: &mut TestApp) {
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
    assert_eq!(offers.len(), 2);
    for offer in offers {
        assert_eq!(offer.get("status").unwrap(), "PENDING");
    }
    let bilateral = offers
        .iter()
        .find(|o| o.get("targetWorkerId").unwrap() == "y@example.com")
        .unwrap();
    assert_eq!(bilateral.get("targetAssignmentId").unwrap(), &target);
    let give_away = offers
        .iter()
        .find(|o| o.get("targetWorkerId").unwrap() == "z@example.com")
        .unwrap();
    assert!(give_away.get("targetAssignmentId").unwrap().is_null());
}

#[test_context(TestApp)]
#[tokio::test]
async fn invalid_targets_are_skipped_silently(app: &mut TestApp) {
    seed_admin_session(app, "admin@example.com").await;
    seed_worker(app, "x@example.com", None, StaffRole::Staff).await;
    seed_worker(app, "y@example.com", None, StaffRole::Staff).await;
    seed_worker(app, "z@example.com", None, StaffRole::Staff).await;

    let source =
        add_assignment(app, "x@example.com", "2030-06-10", "DAY1").await;
    let y_assignment =
        add_assignment(app, "y@example.com", "2030-06-10", "DAY1").await;

    log_in_as(app, "x@example.com", StaffRole::Staff);
    let request_id = open_swap_request(app, &source).await;

    // ghost is not on the roster; z's entry names an assignment owned by
    // y; only the y offer survives.
    let response = app
        .post_offers(&json!({
            "swapRequestId": request_id,
            "targetWorkerIds": [
                "y@example.com",
                "ghost@example.com",
                "z@example.com"
            ],
            "targetAssignmentIds": [y_assignment, null, y_assignment]
        }))
        .await;
    assert_eq!(response.status().as_u16(), 201);

    let body = get_json_response_body(response).await;
    let offers = body.get("offers").unwrap().as_array().unwrap();
    assert_eq!(offers.len(), 1);
    assert_eq!(offers[0].get("targetWorkerId").unwrap(), "y@example.com");
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_400_if_invalid_input(app: &mut TestApp) {
    seed_admin_session(app, "admin@example.com").await;
    seed_worker(app, "x@example.com", None, StaffRole::Staff).await;
    seed_worker(app, "y@example.com", None, StaffRole::Staff).await;
    let source =
        add_assignment(app, "x@example.com", "2030-06-10", "DAY1").await;

    log_in_as(app, "x@example.com", StaffRole::Staff);
    let request_id = open_swap_request(app, &source).await;

    let empty_targets = app
        .post_offers(&json!({
            "swapRequestId": request_id,
            "targetWorkerIds": []
        }))
        .await;
    assert_eq!(empty_targets.status().as_u16(), 400);

    let mismatched_arrays = app
        .post_offers(&json!({
            "swapRequestId": request_id,
            "targetWorkerIds": ["y@example.com"],
            "targetAssignmentIds": []
        }))
        .await;
    assert_eq!(mismatched_arrays.status().as_u16(), 400);
}

#[test_context(TestApp)]
#[tokio::test]
async fn only_the_requester_or_admin_may_create_offers(app: &mut TestApp) {
    seed_admin_session(app, "admin@example.com").await;
    seed_worker(app, "x@example.com", None, StaffRole::Staff).await;
    seed_worker(app, "y@example.com", None, StaffRole::Staff).await;
    let source =
        add_assignment(app, "x@example.com", "2030-06-10", "DAY1").await;

    log_in_as(app, "x@example.com", StaffRole::Staff);
    let request_id = open_swap_request(app, &source).await;

    log_in_as(app, "y@example.com", StaffRole::Staff);
    let response = app
        .post_offers(&json!({
            "swapRequestId": request_id,
            "targetWorkerIds": ["y@example.com"]
        }))
        .await;
    assert_eq!(response.status().as_u16(), 403);

    // The admin may fan offers out for any request.
    log_in_as(app, "admin@example.com", StaffRole::Admin);
    let response = app
        .post_offers(&json!({
            "swapRequestId": request_id,
            "targetWorkerIds": ["y@example.com"]
        }))
        .await;
    assert_eq!(response.status().as_u16(), 201);
}

#[test_context(TestApp)]
#[tokio::test]
async fn offers_on_a_cancelled_request_conflict(app: &mut TestApp) {
    seed_admin_session(app, "admin@example.com").await;
    seed_worker(app, "x@example.com", None, StaffRole::Staff).await;
    seed_worker(app, "y@example.com", None, StaffRole::Staff).await;
    let source =
        add_assignment(app, "x@example.com", "2030-06-10", "DAY1").await;

    log_in_as(app, "x@example.com", StaffRole::Staff);
    let request_id = open_swap_request(app, &source).await;

    let cancel = app
        .put_cancel(&json!({ "swapRequestId": request_id }))
        .await;
    assert_eq!(cancel.status().as_u16(), 200);

    let response = app
        .post_offers(&json!({
            "swapRequestId": request_id,
            "targetWorkerIds": ["y@example.com"]
        }))
        .await;
    assert_eq!(response.status().as_u16(), 409);
}
