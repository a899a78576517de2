use crate::helpers::{
    add_assignment, get_json_response_body, seed_admin_session, seed_worker,
    TestApp,
};
use rota_exchange::domain::StaffRole;
use rota_exchange::ErrorResponse;
use serde_json::json;
use test_context::test_context;

#[test_context(TestApp)]
#[tokio::test]
async fn should_grant_first_free_week_in_rank_order(app: &mut TestApp) {
    seed_admin_session(app, "admin@example.com").await;
    seed_worker(app, "wanda@example.com", None, StaffRole::Staff).await;
    seed_worker(app, "nopref@example.com", None, StaffRole::Staff).await;

    // Wanda is assigned during her first-choice week, free in her second.
    add_assignment(app, "wanda@example.com", "2024-01-03", "DAY1").await;

    let response = app
        .post_preferences(&json!({
            "workerId": "wanda@example.com",
            "year": 2024,
            "month": 1,
            "preferences": [
                { "rank": 1, "weekStart": "2024-01-01", "weekEnd": "2024-01-07" },
                { "rank": 2, "weekStart": "2024-01-08", "weekEnd": "2024-01-14" },
                { "rank": 3, "weekStart": "2024-01-15", "weekEnd": "2024-01-21" }
            ]
        }))
        .await;
    assert_eq!(response.status().as_u16(), 201);

    let response = app.get_fairness_report(2024, 1).await;
    assert_eq!(response.status().as_u16(), 200);
    let body = get_json_response_body(response).await;

    let schema = json!({
        "$schema": "http://json-schema.org/draft-04/schema#",
        "type": "object",
        "properties": {
            "year": { "type": "number" },
            "month": { "type": "number" },
            "scores": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "workerId": { "type": "string" },
                        "monthPoints": { "type": "number" },
                        "grantedRank": { "type": "number" },
                        "ytdPoints": { "type": "number" }
                    },
                    "required": [
                        "workerId",
                        "monthPoints",
                        "grantedRank",
                        "ytdPoints"
                    ]
                }
            }
        },
        "required": ["year", "month", "scores"]
    });
    assert!(
        jsonschema::is_valid(&schema, &body),
        "response does not match schema"
    );

    let scores = body.get("scores").unwrap().as_array().unwrap();
    let wanda = scores
        .iter()
        .find(|s| s.get("workerId").unwrap() == "wanda@example.com")
        .expect("wanda should be scored");
    assert_eq!(wanda.get("grantedRank").unwrap(), 2);
    assert_eq!(wanda.get("monthPoints").unwrap(), 1);
    assert_eq!(wanda.get("ytdPoints").unwrap(), 1);

    // No submitted preferences scores the worst value, not an error.
    let nopref = scores
        .iter()
        .find(|s| s.get("workerId").unwrap() == "nopref@example.com")
        .expect("worker without preferences should be scored");
    assert_eq!(nopref.get("grantedRank").unwrap(), 0);
    assert_eq!(nopref.get("monthPoints").unwrap(), 3);
    assert_eq!(nopref.get("ytdPoints").unwrap(), 3);
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_sum_independent_month_scores_into_ytd(app: &mut TestApp) {
    seed_admin_session(app, "admin@example.com").await;
    seed_worker(app, "carl@example.com", None, StaffRole::Staff).await;

    // January: first choice is free. February: the only choice is
    // occupied, so the month scores 3.
    add_assignment(app, "carl@example.com", "2024-02-06", "DAY1").await;

    for (month, week_start, week_end) in [
        (1, "2024-01-08", "2024-01-14"),
        (2, "2024-02-05", "2024-02-11"),
    ] {
        let response = app
            .post_preferences(&json!({
                "workerId": "carl@example.com",
                "year": 2024,
                "month": month,
                "preferences": [
                    { "rank": 1, "weekStart": week_start, "weekEnd": week_end }
                ]
            }))
            .await;
        assert_eq!(response.status().as_u16(), 201);
    }

    let score_for = |body: &serde_json::Value| {
        body.get("scores")
            .unwrap()
            .as_array()
            .unwrap()
            .iter()
            .find(|s| s.get("workerId").unwrap() == "carl@example.com")
            .expect("carl should be scored")
            .clone()
    };

    let january =
        score_for(&get_json_response_body(app.get_fairness_report(2024, 1).await).await);
    let february =
        score_for(&get_json_response_body(app.get_fairness_report(2024, 2).await).await);

    assert_eq!(january.get("monthPoints").unwrap(), 0);
    assert_eq!(january.get("grantedRank").unwrap(), 1);
    assert_eq!(february.get("monthPoints").unwrap(), 3);
    assert_eq!(february.get("grantedRank").unwrap(), 0);

    // YTD is the sum of the independently computed month scores.
    let january_points =
        january.get("monthPoints").unwrap().as_u64().unwrap();
    let february_points =
        february.get("monthPoints").unwrap().as_u64().unwrap();
    assert_eq!(
        february.get("ytdPoints").unwrap().as_u64().unwrap(),
        january_points + february_points
    );
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_400_for_invalid_month(app: &mut TestApp) {
    seed_admin_session(app, "admin@example.com").await;

    let response = app.get_fairness_report(2024, 13).await;
    assert_eq!(response.status().as_u16(), 400);
    assert_eq!(
        response
            .json::<ErrorResponse>()
            .await
            .expect("Could not deserialise response body to ErrorResponse")
            .error,
        "Validation error: Month must be between 1 and 12"
    );
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_401_if_not_authenticated(app: &mut TestApp) {
    let response = app.get_fairness_report(2024, 1).await;
    assert_eq!(
        response.status().as_u16(),
        401,
        "Should return 401 for unauthenticated requests",
    );
}
