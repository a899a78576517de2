use crate::helpers::{
    add_assignment, get_json_response_body, log_in_as, seed_admin_session,
    seed_staff_session, seed_worker, TestApp,
};
use rota_exchange::domain::StaffRole;
use serde_json::json;
use test_context::test_context;

#[test_context(TestApp)]
#[tokio::test]
async fn owner_can_open_a_request(app: &mut TestApp) {
    seed_admin_session(app, "admin@example.com").await;
    seed_worker(app, "x@example.com", None, StaffRole::Staff).await;
    let assignment_id =
        add_assignment(app, "x@example.com", "2030-06-10", "DAY1").await;

    log_in_as(app, "x@example.com", StaffRole::Staff);
    let response = app
        .post_swap_request(&json!({
            "assignmentId": assignment_id,
            "notes": "school play",
            "equivalenceCode": "DAYS"
        }))
        .await;

    assert_eq!(response.status().as_u16(), 201);
    let body = get_json_response_body(response).await;
    assert_eq!(body.get("status").unwrap(), "OPEN");
    assert_eq!(body.get("requesterId").unwrap(), "x@example.com");
    assert_eq!(body.get("sourceAssignmentId").unwrap(), &assignment_id);
    assert_eq!(body.get("notes").unwrap(), "school play");
    assert_eq!(body.get("equivalenceCode").unwrap(), "DAYS");
}

#[test_context(TestApp)]
#[tokio::test]
async fn duplicate_open_request_returns_409(app: &mut TestApp) {
    seed_admin_session(app, "admin@example.com").await;
    seed_worker(app, "x@example.com", None, StaffRole::Staff).await;
    let assignment_id =
        add_assignment(app, "x@example.com", "2030-06-10", "DAY1").await;

    log_in_as(app, "x@example.com", StaffRole::Staff);
    let first = app
        .post_swap_request(&json!({ "assignmentId": assignment_id }))
        .await;
    assert_eq!(first.status().as_u16(), 201);

    let second = app
        .post_swap_request(&json!({ "assignmentId": assignment_id }))
        .await;
    assert_eq!(
        second.status().as_u16(),
        409,
        "Second open request for the same assignment should conflict"
    );
}

#[test_context(TestApp)]
#[tokio::test]
async fn cannot_request_on_someone_elses_assignment(app: &mut TestApp) {
    seed_admin_session(app, "admin@example.com").await;
    seed_worker(app, "x@example.com", None, StaffRole::Staff).await;
    seed_worker(app, "y@example.com", None, StaffRole::Staff).await;
    let assignment_id =
        add_assignment(app, "x@example.com", "2030-06-10", "DAY1").await;

    log_in_as(app, "y@example.com", StaffRole::Staff);
    let response = app
        .post_swap_request(&json!({ "assignmentId": assignment_id }))
        .await;
    assert_eq!(response.status().as_u16(), 403);
}

#[test_context(TestApp)]
#[tokio::test]
async fn admin_can_open_on_behalf_of_the_owner(app: &mut TestApp) {
    seed_admin_session(app, "admin@example.com").await;
    seed_worker(app, "x@example.com", None, StaffRole::Staff).await;
    let assignment_id =
        add_assignment(app, "x@example.com", "2030-06-10", "DAY1").await;

    let response = app
        .post_swap_request(&json!({
            "assignmentId": assignment_id,
            "requesterId": "x@example.com"
        }))
        .await;
    assert_eq!(response.status().as_u16(), 201);
    let body = get_json_response_body(response).await;
    assert_eq!(body.get("requesterId").unwrap(), "x@example.com");
}

#[test_context(TestApp)]
#[tokio::test]
async fn unknown_assignment_returns_404(app: &mut TestApp) {
    seed_staff_session(app, "x@example.com", None).await;

    let response = app
        .post_swap_request(&json!({
            "assignmentId": "2a6af785-e170-4ab6-ac1f-691772640f31"
        }))
        .await;
    assert_eq!(response.status().as_u16(), 404);
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_401_if_not_authenticated(app: &mut TestApp) {
    let response = app
        .post_swap_request(&json!({
            "assignmentId": "2a6af785-e170-4ab6-ac1f-691772640f31"
        }))
        .await;
    assert_eq!(response.status().as_u16(), 401);
}
