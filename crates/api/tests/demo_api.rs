//! HTTP-level integration tests for demo mode.

mod common;

use axum::http::StatusCode;
use common::{body_json, get_auth, post_json};
use sqlx::SqlitePool;

async fn row_counts(pool: &SqlitePool) -> (i64, i64, i64, i64) {
    let mut counts = [0i64; 4];
    for (i, table) in ["users", "relationships", "tracks", "history"]
        .iter()
        .enumerate()
    {
        counts[i] = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(pool)
            .await
            .unwrap();
    }
    (counts[0], counts[1], counts[2], counts[3])
}

async fn start_demo(pool: &SqlitePool) -> serde_json::Value {
    let app = common::build_test_app(pool.clone());
    let response = post_json(app, "/api/v1/demo/start", serde_json::json!({})).await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await
}

// ---------------------------------------------------------------------------
// Test: starting demo mode seeds data and issues a working token
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_start_seeds_and_issues_token(pool: SqlitePool) {
    let json = start_demo(&pool).await;

    assert!(json["user_id"].is_number());
    assert!(json["access_token"].is_string());
    assert!(json["expires_in"].is_number());
    assert_eq!(row_counts(&pool).await, (2, 1, 4, 5));

    // The issued token authenticates as the demo identity.
    let token = json["access_token"].as_str().unwrap();
    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/users/me", token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let me = body_json(response).await;
    assert_eq!(me["id"], json["user_id"]);
    assert_eq!(me["name"], "Demo User");
}

// ---------------------------------------------------------------------------
// Test: restarting demo mode is idempotent
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_start_twice_is_idempotent(pool: SqlitePool) {
    let first = start_demo(&pool).await;
    let counts = row_counts(&pool).await;

    let second = start_demo(&pool).await;
    assert_eq!(row_counts(&pool).await, counts);
    assert_eq!(first["user_id"], second["user_id"]);
}

// ---------------------------------------------------------------------------
// Test: the demo identity can drive the normal API surface
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_demo_user_sees_seeded_relationships(pool: SqlitePool) {
    let json = start_demo(&pool).await;
    let token = json["access_token"].as_str().unwrap();

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/relationships", token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let list = body_json(response).await;
    let relationships = list.as_array().unwrap();
    assert_eq!(relationships.len(), 1);
    assert_eq!(relationships[0]["tracks"].as_array().unwrap().len(), 4);
}
