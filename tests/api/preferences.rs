use crate::helpers::{
    get_json_response_body, seed_admin_session, seed_staff_session,
    seed_worker, TestApp,
};
use rota_exchange::domain::StaffRole;
use serde_json::json;
use test_context::test_context;

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_201_for_valid_submission(app: &mut TestApp) {
    seed_staff_session(app, "wanda@example.com", None).await;

    let response = app
        .post_preferences(&json!({
            "year": 2024,
            "month": 6,
            "preferences": [
                { "rank": 1, "weekStart": "2024-06-03", "weekEnd": "2024-06-09" },
                { "rank": 2, "weekStart": "2024-06-10", "weekEnd": "2024-06-16" }
            ]
        }))
        .await;

    assert_eq!(response.status().as_u16(), 201);
    let body = get_json_response_body(response).await;
    assert_eq!(body.get("workerId").unwrap(), "wanda@example.com");
    assert_eq!(body.get("count").unwrap(), 2);
}

#[test_context(TestApp)]
#[tokio::test]
async fn resubmission_replaces_the_period(app: &mut TestApp) {
    seed_staff_session(app, "wanda@example.com", None).await;

    // First submission's top choice is this week.
    let response = app
        .post_preferences(&json!({
            "year": 2024,
            "month": 6,
            "preferences": [
                { "rank": 1, "weekStart": "2024-06-03", "weekEnd": "2024-06-09" }
            ]
        }))
        .await;
    assert_eq!(response.status().as_u16(), 201);

    // Resubmission swaps in a different week at rank 1.
    let response = app
        .post_preferences(&json!({
            "year": 2024,
            "month": 6,
            "preferences": [
                { "rank": 1, "weekStart": "2024-06-17", "weekEnd": "2024-06-23" }
            ]
        }))
        .await;
    assert_eq!(response.status().as_u16(), 201);

    // A fully free calendar grants the new rank 1; if the old row had
    // survived the score would be unchanged anyway, so occupy nothing and
    // check the grant is rank 1 with a single preference left.
    let report = get_json_response_body(
        app.get_fairness_report(2024, 6).await,
    )
    .await;
    let wanda = report
        .get("scores")
        .unwrap()
        .as_array()
        .unwrap()
        .iter()
        .find(|s| s.get("workerId").unwrap() == "wanda@example.com")
        .expect("wanda should be scored");
    assert_eq!(wanda.get("grantedRank").unwrap(), 1);
    assert_eq!(wanda.get("monthPoints").unwrap(), 0);
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_400_if_invalid_input(app: &mut TestApp) {
    seed_staff_session(app, "wanda@example.com", None).await;

    let test_cases = [
        (
            json!({
                "year": 2024,
                "month": 0,
                "preferences": []
            }),
            "month outside 1-12",
        ),
        (
            json!({
                "year": 2024,
                "month": 6,
                "preferences": [
                    { "rank": 4, "weekStart": "2024-06-03", "weekEnd": "2024-06-09" }
                ]
            }),
            "rank outside 1-3",
        ),
        (
            json!({
                "year": 2024,
                "month": 6,
                "preferences": [
                    { "rank": 1, "weekStart": "2024-06-09", "weekEnd": "2024-06-03" }
                ]
            }),
            "inverted week bounds",
        ),
        (
            json!({
                "year": 2024,
                "month": 6,
                "preferences": [
                    { "rank": 1, "weekStart": "2024-06-03", "weekEnd": "2024-06-09" },
                    { "rank": 1, "weekStart": "2024-06-10", "weekEnd": "2024-06-16" }
                ]
            }),
            "duplicate rank",
        ),
        (
            json!({
                "year": 2024,
                "month": 6,
                "preferences": [
                    { "rank": 1, "weekStart": "2024-06-03", "weekEnd": "2024-06-09" },
                    { "rank": 2, "weekStart": "2024-06-03", "weekEnd": "2024-06-09" },
                    { "rank": 3, "weekStart": "2024-06-03", "weekEnd": "2024-06-09" },
                    { "rank": 3, "weekStart": "2024-06-03", "weekEnd": "2024-06-09" }
                ]
            }),
            "more than three preferences",
        ),
    ];

    for (body, case) in test_cases.iter() {
        let response = app.post_preferences(body).await;
        assert_eq!(
            response.status().as_u16(),
            400,
            "Should fail with HTTP400 for case: {case}"
        );
    }
}

#[test_context(TestApp)]
#[tokio::test]
async fn staff_cannot_submit_for_someone_else(app: &mut TestApp) {
    seed_staff_session(app, "wanda@example.com", None).await;
    seed_worker(app, "carl@example.com", None, StaffRole::Staff).await;

    let response = app
        .post_preferences(&json!({
            "workerId": "carl@example.com",
            "year": 2024,
            "month": 6,
            "preferences": []
        }))
        .await;
    assert_eq!(response.status().as_u16(), 403);
}

#[test_context(TestApp)]
#[tokio::test]
async fn admin_can_submit_on_behalf(app: &mut TestApp) {
    seed_admin_session(app, "admin@example.com").await;
    seed_worker(app, "carl@example.com", None, StaffRole::Staff).await;

    let response = app
        .post_preferences(&json!({
            "workerId": "carl@example.com",
            "year": 2024,
            "month": 6,
            "preferences": [
                { "rank": 1, "weekStart": "2024-06-03", "weekEnd": "2024-06-09" }
            ]
        }))
        .await;
    assert_eq!(response.status().as_u16(), 201);
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_401_if_not_authenticated(app: &mut TestApp) {
    let response = app
        .post_preferences(&json!({
            "year": 2024,
            "month": 6,
            "preferences": []
        }))
        .await;
    assert_eq!(response.status().as_u16(), 401);
}
