//! Integration tests for the deletion cascade chain:
//! user -> relationship -> track -> history.

use sqlx::SqlitePool;
use turnwise_core::types::DbId;
use turnwise_db::models::user::CreateUser;
use turnwise_db::repositories::{RelationshipRepo, TrackRepo, UserRepo};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn create_user(pool: &SqlitePool, email: &str, name: &str) -> DbId {
    UserRepo::create(
        pool,
        &CreateUser {
            email: email.to_string(),
            name: name.to_string(),
            nickname: None,
            unique_identifier: None,
            image: None,
        },
    )
    .await
    .unwrap()
    .id
}

async fn count(pool: &SqlitePool, table: &str) -> i64 {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(pool)
        .await
        .unwrap()
}

/// Users A and B paired with one toggled coffee track; returns
/// (a, b, relationship_id, track_id).
async fn setup_full_chain(pool: &SqlitePool) -> (DbId, DbId, DbId, DbId) {
    let a = create_user(pool, "a@test.com", "User A").await;
    let b = create_user(pool, "b@test.com", "User B").await;
    let relationship = RelationshipRepo::create(pool, a, b).await.unwrap();
    let track = TrackRepo::create(pool, relationship.id, "coffee", None, a)
        .await
        .unwrap();
    TrackRepo::toggle_turn(pool, track.id, a).await.unwrap();
    TrackRepo::toggle_turn(pool, track.id, b).await.unwrap();
    (a, b, relationship.id, track.id)
}

// ---------------------------------------------------------------------------
// Test: deleting a user removes the whole chain, both pair directions
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_user_delete_cascades_whole_chain(pool: SqlitePool) {
    let (a, b, _, _) = setup_full_chain(&pool).await;

    let deleted = UserRepo::delete(&pool, a).await.unwrap();
    assert!(deleted);

    assert_eq!(count(&pool, "relationships").await, 0);
    assert_eq!(count(&pool, "tracks").await, 0);
    assert_eq!(count(&pool, "history").await, 0);

    // The other member is unaffected.
    assert!(UserRepo::find_by_id(&pool, b).await.unwrap().is_some());
    assert!(UserRepo::find_by_id(&pool, a).await.unwrap().is_none());
}

// Rows are canonicalized, so the same user can sit in either column;
// the cascade must fire from both.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_user_delete_cascades_from_second_column(pool: SqlitePool) {
    let (a, b, _, _) = setup_full_chain(&pool).await;

    // Whichever column `b` landed in, deleting it clears the chain.
    let deleted = UserRepo::delete(&pool, b).await.unwrap();
    assert!(deleted);

    assert_eq!(count(&pool, "relationships").await, 0);
    assert_eq!(count(&pool, "tracks").await, 0);
    assert_eq!(count(&pool, "history").await, 0);
    assert!(UserRepo::find_by_id(&pool, a).await.unwrap().is_some());
}

// ---------------------------------------------------------------------------
// Test: deleting a relationship removes tracks and history, not users
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_relationship_delete_cascades_tracks_and_history(pool: SqlitePool) {
    let (a, b, relationship_id, _) = setup_full_chain(&pool).await;

    let deleted = RelationshipRepo::delete(&pool, relationship_id).await.unwrap();
    assert!(deleted);

    assert_eq!(count(&pool, "tracks").await, 0);
    assert_eq!(count(&pool, "history").await, 0);
    assert_eq!(count(&pool, "users").await, 2);
    assert!(UserRepo::find_by_id(&pool, a).await.unwrap().is_some());
    assert!(UserRepo::find_by_id(&pool, b).await.unwrap().is_some());
}

// ---------------------------------------------------------------------------
// Test: deleting a track removes only its history
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_track_delete_cascades_history_only(pool: SqlitePool) {
    let (a, b, relationship_id, track_id) = setup_full_chain(&pool).await;

    // A second track on the same relationship must survive.
    let other_track = TrackRepo::create(&pool, relationship_id, "lunch", None, b)
        .await
        .unwrap();
    TrackRepo::toggle_turn(&pool, other_track.id, a).await.unwrap();

    let deleted = TrackRepo::delete(&pool, track_id).await.unwrap();
    assert!(deleted);

    assert!(TrackRepo::find_by_id(&pool, track_id).await.unwrap().is_none());
    assert_eq!(count(&pool, "relationships").await, 1);
    assert_eq!(count(&pool, "tracks").await, 1);
    // Only the surviving track's single entry remains.
    assert_eq!(count(&pool, "history").await, 1);
}

// ---------------------------------------------------------------------------
// Test: cascades leave nothing behind across multiple relationships
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_user_delete_clears_every_relationship(pool: SqlitePool) {
    let a = create_user(&pool, "a@test.com", "User A").await;
    let b = create_user(&pool, "b@test.com", "User B").await;
    let c = create_user(&pool, "c@test.com", "User C").await;

    let ab = RelationshipRepo::create(&pool, a, b).await.unwrap();
    let ac = RelationshipRepo::create(&pool, a, c).await.unwrap();
    let bc = RelationshipRepo::create(&pool, b, c).await.unwrap();

    let t_ab = TrackRepo::create(&pool, ab.id, "coffee", None, a).await.unwrap();
    let t_ac = TrackRepo::create(&pool, ac.id, "beer", None, c).await.unwrap();
    let t_bc = TrackRepo::create(&pool, bc.id, "lunch", None, b).await.unwrap();
    TrackRepo::toggle_turn(&pool, t_ab.id, a).await.unwrap();
    TrackRepo::toggle_turn(&pool, t_ac.id, c).await.unwrap();
    TrackRepo::toggle_turn(&pool, t_bc.id, b).await.unwrap();

    UserRepo::delete(&pool, a).await.unwrap();

    // Only the B-C relationship and its chain survive.
    assert_eq!(count(&pool, "relationships").await, 1);
    assert_eq!(count(&pool, "tracks").await, 1);
    assert_eq!(count(&pool, "history").await, 1);

    let survivor = RelationshipRepo::find_by_id(&pool, bc.id).await.unwrap();
    assert!(survivor.is_some());
}
