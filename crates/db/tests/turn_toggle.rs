//! Integration tests for the turn-toggle engine.
//!
//! Exercises the full repository layer against a real database:
//! - Turn moves to the member who is not the requester
//! - Exactly one ledger entry per toggle, with correct from/to
//! - Toggling on someone else's turn (requester is not the holder)
//! - NotFound / Forbidden failures leave state unchanged

use assert_matches::assert_matches;
use sqlx::SqlitePool;
use turnwise_core::error::CoreError;
use turnwise_core::types::DbId;
use turnwise_db::error::DbError;
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

/// Two users, one relationship, one coffee track with `holder` on turn.
async fn setup_track(pool: &SqlitePool, holder_is_first: bool) -> (DbId, DbId, DbId) {
    let a = create_user(pool, "a@test.com", "User A").await;
    let b = create_user(pool, "b@test.com", "User B").await;
    let relationship = RelationshipRepo::create(pool, a, b).await.unwrap();
    let holder = if holder_is_first { a } else { b };
    let track = TrackRepo::create(pool, relationship.id, "coffee", None, holder)
        .await
        .unwrap();
    (a, b, track.id)
}

async fn history_count(pool: &SqlitePool, track_id: DbId) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM history WHERE track_id = $1")
        .bind(track_id)
        .fetch_one(pool)
        .await
        .unwrap()
}

// ---------------------------------------------------------------------------
// Test: toggle moves the turn to the other member
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_toggle_moves_turn_to_other_member(pool: SqlitePool) {
    let (a, b, track_id) = setup_track(&pool, true).await;

    let result = TrackRepo::toggle_turn(&pool, track_id, a).await.unwrap();

    assert_eq!(result.track.track.current_turn_user_id, b);
    assert_eq!(result.track.current_turn_user.id, b);
    assert_eq!(result.history_entry.track_id, track_id);
    assert_eq!(result.history_entry.from_user_id, a);
    assert_eq!(result.history_entry.to_user_id, b);

    // The committed row agrees with the returned value.
    let track = TrackRepo::find_by_id(&pool, track_id).await.unwrap().unwrap();
    assert_eq!(track.current_turn_user_id, b);
    assert_eq!(history_count(&pool, track_id).await, 1);
}

// ---------------------------------------------------------------------------
// Test: the two-user back-and-forth scenario
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_toggle_back_and_forth(pool: SqlitePool) {
    let (a, b, track_id) = setup_track(&pool, true).await;

    let first = TrackRepo::toggle_turn(&pool, track_id, a).await.unwrap();
    assert_eq!(first.track.track.current_turn_user_id, b);

    let second = TrackRepo::toggle_turn(&pool, track_id, b).await.unwrap();
    assert_eq!(second.track.track.current_turn_user_id, a);
    assert_eq!(second.history_entry.from_user_id, b);
    assert_eq!(second.history_entry.to_user_id, a);

    assert_eq!(history_count(&pool, track_id).await, 2);
}

// ---------------------------------------------------------------------------
// Test: toggling while it is already the other party's turn
// ---------------------------------------------------------------------------

// The new holder is computed relative to the requester, not the current
// holder: when B toggles while A already holds the turn, the turn stays
// with A and the ledger records the from == to transition.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_toggle_on_other_partys_turn(pool: SqlitePool) {
    let (a, b, track_id) = setup_track(&pool, true).await;

    let result = TrackRepo::toggle_turn(&pool, track_id, b).await.unwrap();

    assert_eq!(result.track.track.current_turn_user_id, a);
    assert_eq!(result.history_entry.from_user_id, a);
    assert_eq!(result.history_entry.to_user_id, a);
    assert_eq!(history_count(&pool, track_id).await, 1);
}

// ---------------------------------------------------------------------------
// Test: each toggle appends exactly one entry matching the new holder
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_every_toggle_appends_one_matching_entry(pool: SqlitePool) {
    let (a, b, track_id) = setup_track(&pool, false).await;

    for (i, requester) in [a, b, b, a, a].into_iter().enumerate() {
        let before = history_count(&pool, track_id).await;
        let result = TrackRepo::toggle_turn(&pool, track_id, requester).await.unwrap();

        assert_eq!(history_count(&pool, track_id).await, before + 1, "toggle {i}");
        assert_eq!(
            result.history_entry.to_user_id,
            result.track.track.current_turn_user_id,
            "toggle {i}: entry target must equal the new holder"
        );
    }
}

// ---------------------------------------------------------------------------
// Test: missing track is NotFound
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_toggle_missing_track(pool: SqlitePool) {
    let a = create_user(&pool, "a@test.com", "User A").await;

    let err = TrackRepo::toggle_turn(&pool, 999_999, a).await.unwrap_err();
    assert_matches!(
        err,
        DbError::Core(CoreError::NotFound { entity: "Track", .. })
    );
}

// ---------------------------------------------------------------------------
// Test: a non-member is Forbidden and state is untouched
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_toggle_by_outsider_is_forbidden(pool: SqlitePool) {
    let (a, _b, track_id) = setup_track(&pool, true).await;
    let outsider = create_user(&pool, "c@test.com", "User C").await;

    let err = TrackRepo::toggle_turn(&pool, track_id, outsider)
        .await
        .unwrap_err();
    assert_matches!(err, DbError::Core(CoreError::Forbidden(_)));

    // Rolled back: holder unchanged, no ledger entry.
    let track = TrackRepo::find_by_id(&pool, track_id).await.unwrap().unwrap();
    assert_eq!(track.current_turn_user_id, a);
    assert_eq!(history_count(&pool, track_id).await, 0);
}

// ---------------------------------------------------------------------------
// Test: back-to-back toggles each observe the previous committed state
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_repeated_toggles_read_committed_state(pool: SqlitePool) {
    let (a, _b, track_id) = setup_track(&pool, true).await;

    // Same requester twice: both flips target the other member, and the
    // second's `from` is the first's committed `to`.
    let first = TrackRepo::toggle_turn(&pool, track_id, a).await.unwrap();
    let second = TrackRepo::toggle_turn(&pool, track_id, a).await.unwrap();

    assert_eq!(second.history_entry.from_user_id, first.history_entry.to_user_id);
    assert_eq!(history_count(&pool, track_id).await, 2);
}
