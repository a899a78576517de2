use crate::helpers::{
    add_assignment, get_json_response_body, log_in_as, seed_admin_session,
    seed_worker, TestApp,
};
use rota_exchange::domain::StaffRole;
use test_context::test_context;

#[test_context(TestApp)]
#[tokio::test]
async fn same_type_same_date_partner_is_found(app: &mut TestApp) {
    seed_admin_session(app, "admin@example.com").await;
    seed_worker(app, "x@example.com", None, StaffRole::Staff).await;
    seed_worker(app, "y@example.com", None, StaffRole::Staff).await;

    let source =
        add_assignment(app, "x@example.com", "2030-06-10", "DAY1").await;
    let candidate =
        add_assignment(app, "y@example.com", "2030-06-10", "DAY1").await;
    // Same worker pair on another date must not appear.
    add_assignment(app, "y@example.com", "2030-06-11", "DAY1").await;

    log_in_as(app, "x@example.com", StaffRole::Staff);
    let response =
        app.get_partners(&[("assignmentId", source.clone())]).await;
    assert_eq!(response.status().as_u16(), 200);

    let body = get_json_response_body(response).await;
    let partners = body.get("partners").unwrap().as_array().unwrap();
    assert_eq!(partners.len(), 1);
    assert_eq!(partners[0].get("workerId").unwrap(), "y@example.com");
    assert_eq!(partners[0].get("assignmentId").unwrap(), &candidate);
    assert_eq!(partners[0].get("swapType").unwrap(), "SAME_TYPE");
}

#[test_context(TestApp)]
#[tokio::test]
async fn capability_rule_excludes_ineligible_partner(app: &mut TestApp) {
    // X holds a NEURO-restricted shift; Y works the same type that day
    // but lacks the capability, so Y cannot take X's shift.
    seed_admin_session(app, "admin@example.com").await;
    seed_worker(app, "x@example.com", Some("NEURO"), StaffRole::Staff).await;
    seed_worker(app, "y@example.com", None, StaffRole::Staff).await;

    let source =
        add_assignment(app, "x@example.com", "2030-06-10", "NEURO1").await;
    add_assignment(app, "y@example.com", "2030-06-10", "NEURO1").await;

    log_in_as(app, "x@example.com", StaffRole::Staff);
    let response = app.get_partners(&[("assignmentId", source)]).await;
    assert_eq!(response.status().as_u16(), 200);

    let body = get_json_response_body(response).await;
    assert!(
        body.get("partners").unwrap().as_array().unwrap().is_empty(),
        "ineligible partner should be excluded"
    );
}

#[test_context(TestApp)]
#[tokio::test]
async fn equivalent_types_match_only_under_the_named_set(app: &mut TestApp) {
    seed_admin_session(app, "admin@example.com").await;
    seed_worker(app, "x@example.com", None, StaffRole::Staff).await;
    seed_worker(app, "y@example.com", None, StaffRole::Staff).await;

    let source =
        add_assignment(app, "x@example.com", "2030-06-10", "DAY1").await;
    add_assignment(app, "y@example.com", "2030-06-10", "DAY2").await;

    log_in_as(app, "x@example.com", StaffRole::Staff);

    let response =
        app.get_partners(&[("assignmentId", source.clone())]).await;
    let body = get_json_response_body(response).await;
    assert!(
        body.get("partners").unwrap().as_array().unwrap().is_empty(),
        "different types should not match without an equivalence code"
    );

    let response = app
        .get_partners(&[
            ("assignmentId", source.clone()),
            ("equivalenceCode", "DAYS".to_owned()),
        ])
        .await;
    let body = get_json_response_body(response).await;
    let partners = body.get("partners").unwrap().as_array().unwrap();
    assert_eq!(partners.len(), 1);
    assert_eq!(partners[0].get("swapType").unwrap(), "EQUIVALENT");

    // Unknown set codes fail closed.
    let response = app
        .get_partners(&[
            ("assignmentId", source),
            ("equivalenceCode", "WEEKENDS".to_owned()),
        ])
        .await;
    let body = get_json_response_body(response).await;
    assert!(body.get("partners").unwrap().as_array().unwrap().is_empty());
}

#[test_context(TestApp)]
#[tokio::test]
async fn other_staff_cannot_search_for_someone_elses_partners(
    app: &mut TestApp,
) {
    seed_admin_session(app, "admin@example.com").await;
    seed_worker(app, "x@example.com", None, StaffRole::Staff).await;
    seed_worker(app, "y@example.com", None, StaffRole::Staff).await;
    let source =
        add_assignment(app, "x@example.com", "2030-06-10", "DAY1").await;

    log_in_as(app, "y@example.com", StaffRole::Staff);
    let response = app.get_partners(&[("assignmentId", source)]).await;
    assert_eq!(response.status().as_u16(), 403);
}
