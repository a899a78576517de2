use crate::helpers::{
    add_assignment, get_json_response_body, log_in_as, open_swap_request,
    seed_admin_session, seed_worker, TestApp,
};
use rota_exchange::domain::StaffRole;
use serde_json::json;
use test_context::test_context;

#[test_context(TestApp)]
#[tokio::test]
async fn filters_by_status_and_requester(app: &mut TestApp) {
    seed_admin_session(app, "admin@example.com").await;
    seed_worker(app, "x@example.com", None, StaffRole::Staff).await;
    seed_worker(app, "y@example.com", None, StaffRole::Staff).await;

    let x_assignment =
        add_assignment(app, "x@example.com", "2030-06-10", "DAY1").await;
    let y_assignment =
        add_assignment(app, "y@example.com", "2030-06-11", "DAY1").await;

    log_in_as(app, "x@example.com", StaffRole::Staff);
    let x_request = open_swap_request(app, &x_assignment).await;
    log_in_as(app, "y@example.com", StaffRole::Staff);
    let _y_request = open_swap_request(app, &y_assignment).await;

    log_in_as(app, "admin@example.com", StaffRole::Admin);
    let response = app
        .get_swap_requests(&[("status", "OPEN".to_owned())])
        .await;
    assert_eq!(response.status().as_u16(), 200);
    let body = get_json_response_body(response).await;
    assert_eq!(
        body.get("swapRequests").unwrap().as_array().unwrap().len(),
        2
    );

    let response = app
        .get_swap_requests(&[("requesterId", "x@example.com".to_owned())])
        .await;
    let body = get_json_response_body(response).await;
    let requests = body.get("swapRequests").unwrap().as_array().unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].get("id").unwrap(), &x_request);

    // Cancel one and the status filters diverge.
    log_in_as(app, "x@example.com", StaffRole::Staff);
    let cancel = app
        .put_cancel(&json!({ "swapRequestId": x_request }))
        .await;
    assert_eq!(cancel.status().as_u16(), 200);

    log_in_as(app, "admin@example.com", StaffRole::Admin);
    let open = get_json_response_body(
        app.get_swap_requests(&[("status", "OPEN".to_owned())]).await,
    )
    .await;
    assert_eq!(
        open.get("swapRequests").unwrap().as_array().unwrap().len(),
        1
    );
    let cancelled = get_json_response_body(
        app.get_swap_requests(&[("status", "CANCELLED".to_owned())])
            .await,
    )
    .await;
    assert_eq!(
        cancelled
            .get("swapRequests")
            .unwrap()
            .as_array()
            .unwrap()
            .len(),
        1
    );
}

#[test_context(TestApp)]
#[tokio::test]
async fn rejects_unknown_status_values(app: &mut TestApp) {
    seed_admin_session(app, "admin@example.com").await;

    let response = app
        .get_swap_requests(&[("status", "SIDEWAYS".to_owned())])
        .await;
    assert_eq!(response.status().as_u16(), 400);
}
