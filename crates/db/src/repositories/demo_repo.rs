//! Demo dataset seeding and cleanup.
//!
//! Trial users get a fixed fictional dataset instead of registering. The
//! demo identities are reserved by email; `seed` is idempotent on the
//! primary identity's existence and `cleanup` removes everything reachable
//! from the reserved emails in dependency order.

use chrono::{Duration, Utc};
use sqlx::SqliteConnection;
use turnwise_core::types::{DbId, Timestamp};

use crate::DbPool;

/// Primary demo identity; its existence is the seed sentinel.
pub const DEMO_USER_EMAIL: &str = "demo@turnwise.app";
/// The demo user's fictional counterpart.
pub const DEMO_FRIEND_EMAIL: &str = "demo.friend@turnwise.app";

/// Seeds and removes the fixed demo dataset.
pub struct DemoRepo;

impl DemoRepo {
    /// Seed the demo dataset. No-op if the primary demo user already
    /// exists; otherwise all rows are created in one transaction.
    pub async fn seed(pool: &DbPool) -> Result<(), sqlx::Error> {
        let sentinel: Option<DbId> = sqlx::query_scalar("SELECT id FROM users WHERE email = $1")
            .bind(DEMO_USER_EMAIL)
            .fetch_optional(pool)
            .await?;
        if sentinel.is_some() {
            return Ok(());
        }

        let now = Utc::now();
        let mut tx = pool.begin().await?;

        let demo_user_id =
            insert_user(&mut tx, DEMO_USER_EMAIL, "Demo User", "Demo", "demo_user", now).await?;
        let friend_id =
            insert_user(&mut tx, DEMO_FRIEND_EMAIL, "Alex", "Alex", "demo_friend", now).await?;

        // The two ids are freshly inserted distinct rows.
        let (user1_id, user2_id) = if demo_user_id < friend_id {
            (demo_user_id, friend_id)
        } else {
            (friend_id, demo_user_id)
        };
        let relationship_id: DbId = sqlx::query_scalar(
            "INSERT INTO relationships (user1_id, user2_id, created_at)
             VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(user1_id)
        .bind(user2_id)
        .bind(now)
        .fetch_one(&mut *tx)
        .await?;

        let coffee = insert_track(&mut tx, relationship_id, "coffee", None, friend_id, now).await?;
        let lunch = insert_track(&mut tx, relationship_id, "lunch", None, demo_user_id, now).await?;
        let beer = insert_track(&mut tx, relationship_id, "beer", None, friend_id, now).await?;
        insert_track(
            &mut tx,
            relationship_id,
            "custom",
            Some("Movie Night"),
            demo_user_id,
            now,
        )
        .await?;

        // Backdated entries so the dataset looks lived-in.
        let one_day_ago = now - Duration::days(1);
        let two_days_ago = now - Duration::days(2);
        let three_days_ago = now - Duration::days(3);

        insert_history(&mut tx, coffee, demo_user_id, friend_id, three_days_ago).await?;
        insert_history(&mut tx, coffee, friend_id, demo_user_id, two_days_ago).await?;
        insert_history(&mut tx, coffee, demo_user_id, friend_id, one_day_ago).await?;
        insert_history(&mut tx, lunch, friend_id, demo_user_id, two_days_ago).await?;
        insert_history(&mut tx, beer, demo_user_id, friend_id, one_day_ago).await?;

        tx.commit().await?;

        tracing::info!("demo dataset seeded");
        Ok(())
    }

    /// Remove every row reachable from the reserved demo emails, children
    /// first (history, tracks, relationships, users), in one transaction.
    /// Safe to call when no demo data exists.
    pub async fn cleanup(pool: &DbPool) -> Result<(), sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query(
            "DELETE FROM history
             WHERE from_user_id IN (SELECT id FROM users WHERE email IN ($1, $2))
                OR to_user_id IN (SELECT id FROM users WHERE email IN ($3, $4))",
        )
        .bind(DEMO_USER_EMAIL)
        .bind(DEMO_FRIEND_EMAIL)
        .bind(DEMO_USER_EMAIL)
        .bind(DEMO_FRIEND_EMAIL)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            "DELETE FROM tracks
             WHERE relationship_id IN (
                 SELECT r.id FROM relationships r
                 WHERE r.user1_id IN (SELECT id FROM users WHERE email IN ($1, $2))
                    OR r.user2_id IN (SELECT id FROM users WHERE email IN ($3, $4)))",
        )
        .bind(DEMO_USER_EMAIL)
        .bind(DEMO_FRIEND_EMAIL)
        .bind(DEMO_USER_EMAIL)
        .bind(DEMO_FRIEND_EMAIL)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            "DELETE FROM relationships
             WHERE user1_id IN (SELECT id FROM users WHERE email IN ($1, $2))
                OR user2_id IN (SELECT id FROM users WHERE email IN ($3, $4))",
        )
        .bind(DEMO_USER_EMAIL)
        .bind(DEMO_FRIEND_EMAIL)
        .bind(DEMO_USER_EMAIL)
        .bind(DEMO_FRIEND_EMAIL)
        .execute(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM users WHERE email IN ($1, $2)")
            .bind(DEMO_USER_EMAIL)
            .bind(DEMO_FRIEND_EMAIL)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }
}

async fn insert_user(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    email: &str,
    name: &str,
    nickname: &str,
    identifier: &str,
    now: Timestamp,
) -> Result<DbId, sqlx::Error> {
    let conn: &mut SqliteConnection = &mut *tx;
    sqlx::query_scalar(
        "INSERT INTO users (email, name, nickname, unique_identifier, image, created_at, updated_at)
         VALUES ($1, $2, $3, $4, NULL, $5, $6) RETURNING id",
    )
    .bind(email)
    .bind(name)
    .bind(nickname)
    .bind(identifier)
    .bind(now)
    .bind(now)
    .fetch_one(conn)
    .await
}

async fn insert_track(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    relationship_id: DbId,
    name: &str,
    custom_name: Option<&str>,
    current_turn_user_id: DbId,
    now: Timestamp,
) -> Result<DbId, sqlx::Error> {
    let conn: &mut SqliteConnection = &mut *tx;
    sqlx::query_scalar(
        "INSERT INTO tracks (relationship_id, name, custom_name, current_turn_user_id, created_at)
         VALUES ($1, $2, $3, $4, $5) RETURNING id",
    )
    .bind(relationship_id)
    .bind(name)
    .bind(custom_name)
    .bind(current_turn_user_id)
    .bind(now)
    .fetch_one(conn)
    .await
}

async fn insert_history(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    track_id: DbId,
    from_user_id: DbId,
    to_user_id: DbId,
    timestamp: Timestamp,
) -> Result<DbId, sqlx::Error> {
    let conn: &mut SqliteConnection = &mut *tx;
    sqlx::query_scalar(
        "INSERT INTO history (track_id, from_user_id, to_user_id, timestamp)
         VALUES ($1, $2, $3, $4) RETURNING id",
    )
    .bind(track_id)
    .bind(from_user_id)
    .bind(to_user_id)
    .bind(timestamp)
    .fetch_one(conn)
    .await
}
