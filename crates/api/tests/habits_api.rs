//! HTTP-level integration tests for the `/habits` endpoints.

mod common;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use common::{body_json, get_auth, post_auth, post_json_auth, signup};
use sqlx::PgPool;

async fn create_habit(app: axum::Router, token: &str, todo: i32, period: &str) -> i64 {
    let body = serde_json::json!({ "description": "Stretch", "todo": todo, "period": period });
    let response = post_json_auth(app, "/api/v1/habits", body, token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["id"].as_i64().unwrap()
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_habit(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = signup(app.clone(), "habits@habitcat.net").await;

    let body = serde_json::json!({
        "description": "Stretch",
        "todo": 4,
        "period": "week",
        "start": "2009-11-10T23:00:00Z",
    });
    let response = post_json_auth(app, "/api/v1/habits", body, &token).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["kind"], "habit");
    assert_eq!(json["period"], "week");
    assert_eq!(json["start"], "2009-11-10T23:00:00Z");
    assert_eq!(json["done"], 0);
    assert_eq!(json["total"], 4);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_habit_rejects_unknown_period(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = signup(app.clone(), "habits@habitcat.net").await;

    let body = serde_json::json!({ "description": "Stretch", "todo": 4, "period": "fortnight" });
    let response = post_json_auth(app, "/api/v1/habits", body, &token).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_habit_progress_ignores_previous_periods(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let token = signup(app.clone(), "habits@habitcat.net").await;
    let id = create_habit(app.clone(), &token, 2, "week").await;

    sqlx::query("INSERT INTO progress_entries (item_id, delta, created_at) VALUES ($1, 1, $2)")
        .bind(id)
        .bind(Utc::now() - Duration::days(8))
        .execute(&pool)
        .await
        .unwrap();

    let response = get_auth(app.clone(), &format!("/api/v1/habits/{id}"), &token).await;
    assert_eq!(body_json(response).await["done"], 0);

    let uri = format!("/api/v1/habits/{id}/progress");
    let response = post_auth(app, &uri, &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["done"], 1);
    assert_eq!(json["pct_done"], 50);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_habits_with_totals(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = signup(app.clone(), "habits@habitcat.net").await;
    let weekly = create_habit(app.clone(), &token, 2, "week").await;
    create_habit(app.clone(), &token, 2, "month").await;

    let uri = format!("/api/v1/habits/{weekly}/progress");
    assert_eq!(post_auth(app.clone(), &uri, &token).await.status(), StatusCode::OK);

    let response = get_auth(app, "/api/v1/habits", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let data = &body_json(response).await["data"];
    assert_eq!(data["habits"].as_array().unwrap().len(), 2);
    assert_eq!(data["totals"]["done"], 1);
    assert_eq!(data["totals"]["todo"], 4);
    assert_eq!(data["totals"]["pct_done"], 25);
    let week = data["totals"]["week_number"].as_u64().unwrap();
    assert!((1..=53).contains(&week));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_habit_route_does_not_serve_goals(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = signup(app.clone(), "habits@habitcat.net").await;

    let body = serde_json::json!({ "description": "Goal", "todo": 3 });
    let response = post_json_auth(app.clone(), "/api/v1/goals", body, &token).await;
    let goal_id = body_json(response).await["id"].as_i64().unwrap();

    let response = get_auth(app.clone(), &format!("/api/v1/habits/{goal_id}"), &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["error"], format!("Habit with id {goal_id} not found"));

    let response = get_auth(app, &format!("/api/v1/goals/{goal_id}"), &token).await;
    assert_eq!(body_json(response).await["done"], 0);
}
