//! Repository for the `relationships` table.

use std::collections::HashMap;

use chrono::Utc;
use sqlx::FromRow;
use turnwise_core::error::CoreError;
use turnwise_core::pairing::canonical_pair;
use turnwise_core::types::{DbId, Timestamp};

use crate::error::DbError;
use crate::models::relationship::{Relationship, RelationshipOverview, RelationshipWithUsers};
use crate::models::track::{Track, TrackWithTurnUser};
use crate::models::user::UserSummary;
use crate::DbPool;

const COLUMNS: &str = "id, user1_id, user2_id, created_at";

/// Flat row for a relationship joined with both members' display fields.
#[derive(FromRow)]
struct RelationshipUsersRow {
    id: DbId,
    created_at: Timestamp,
    user1_id: DbId,
    user1_name: String,
    user1_nickname: Option<String>,
    user1_image: Option<String>,
    user2_id: DbId,
    user2_name: String,
    user2_nickname: Option<String>,
    user2_image: Option<String>,
}

impl From<RelationshipUsersRow> for RelationshipWithUsers {
    fn from(row: RelationshipUsersRow) -> Self {
        RelationshipWithUsers {
            id: row.id,
            created_at: row.created_at,
            user1: UserSummary {
                id: row.user1_id,
                name: row.user1_name,
                nickname: row.user1_nickname,
                image: row.user1_image,
            },
            user2: UserSummary {
                id: row.user2_id,
                name: row.user2_name,
                nickname: row.user2_nickname,
                image: row.user2_image,
            },
        }
    }
}

/// Flat row for a track joined with its current turn holder's display fields.
#[derive(FromRow)]
struct TrackTurnUserRow {
    id: DbId,
    relationship_id: DbId,
    name: String,
    custom_name: Option<String>,
    current_turn_user_id: DbId,
    created_at: Timestamp,
    turn_user_name: String,
    turn_user_nickname: Option<String>,
    turn_user_image: Option<String>,
}

impl From<TrackTurnUserRow> for TrackWithTurnUser {
    fn from(row: TrackTurnUserRow) -> Self {
        TrackWithTurnUser {
            current_turn_user: UserSummary {
                id: row.current_turn_user_id,
                name: row.turn_user_name,
                nickname: row.turn_user_nickname,
                image: row.turn_user_image,
            },
            track: Track {
                id: row.id,
                relationship_id: row.relationship_id,
                name: row.name,
                custom_name: row.custom_name,
                current_turn_user_id: row.current_turn_user_id,
                created_at: row.created_at,
            },
        }
    }
}

const WITH_USERS_QUERY: &str = "SELECT r.id, r.created_at,
        u1.id AS user1_id, u1.name AS user1_name, u1.nickname AS user1_nickname, u1.image AS user1_image,
        u2.id AS user2_id, u2.name AS user2_name, u2.nickname AS user2_nickname, u2.image AS user2_image
 FROM relationships r
 JOIN users u1 ON u1.id = r.user1_id
 JOIN users u2 ON u2.id = r.user2_id";

/// Provides pairing creation, membership-aware reads, and deletion.
pub struct RelationshipRepo;

impl RelationshipRepo {
    /// Create the pairing between `requester_id` and `target_id`.
    ///
    /// The pair is canonicalized before insert and checked for an existing
    /// row inside the same transaction. The unique index on
    /// `(user1_id, user2_id)` remains the backstop under concurrent
    /// creation; a violation there is classified as a conflict at the API
    /// boundary.
    pub async fn create(
        pool: &DbPool,
        requester_id: DbId,
        target_id: DbId,
    ) -> Result<Relationship, DbError> {
        let (user1_id, user2_id) = canonical_pair(requester_id, target_id)?;

        let mut tx = pool.begin().await?;

        let existing: Option<DbId> =
            sqlx::query_scalar("SELECT id FROM relationships WHERE user1_id = $1 AND user2_id = $2")
                .bind(user1_id)
                .bind(user2_id)
                .fetch_optional(&mut *tx)
                .await?;
        if existing.is_some() {
            return Err(CoreError::Conflict("Relationship already exists".to_string()).into());
        }

        let query = format!(
            "INSERT INTO relationships (user1_id, user2_id, created_at)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        let relationship = sqlx::query_as::<_, Relationship>(&query)
            .bind(user1_id)
            .bind(user2_id)
            .bind(Utc::now())
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(relationship)
    }

    /// Find a relationship by id.
    pub async fn find_by_id(pool: &DbPool, id: DbId) -> Result<Option<Relationship>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM relationships WHERE id = $1");
        sqlx::query_as::<_, Relationship>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// A relationship with both members' display fields.
    pub async fn with_users(
        pool: &DbPool,
        id: DbId,
    ) -> Result<Option<RelationshipWithUsers>, sqlx::Error> {
        let query = format!("{WITH_USERS_QUERY} WHERE r.id = $1");
        let row = sqlx::query_as::<_, RelationshipUsersRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(RelationshipWithUsers::from))
    }

    /// All relationships the user belongs to, newest first, each with both
    /// members' display fields and its tracks.
    pub async fn list_for_user(
        pool: &DbPool,
        user_id: DbId,
    ) -> Result<Vec<RelationshipOverview>, sqlx::Error> {
        let query = format!(
            "{WITH_USERS_QUERY}
             WHERE r.user1_id = $1 OR r.user2_id = $1
             ORDER BY r.created_at DESC, r.id DESC"
        );
        let rows = sqlx::query_as::<_, RelationshipUsersRow>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await?;

        let track_rows = sqlx::query_as::<_, TrackTurnUserRow>(
            "SELECT t.id, t.relationship_id, t.name, t.custom_name, t.current_turn_user_id, t.created_at,
                    u.name AS turn_user_name, u.nickname AS turn_user_nickname, u.image AS turn_user_image
             FROM tracks t
             JOIN relationships r ON r.id = t.relationship_id
             JOIN users u ON u.id = t.current_turn_user_id
             WHERE r.user1_id = $1 OR r.user2_id = $1
             ORDER BY t.created_at ASC, t.id ASC",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        let mut tracks_by_relationship: HashMap<DbId, Vec<TrackWithTurnUser>> = HashMap::new();
        for row in track_rows {
            tracks_by_relationship
                .entry(row.relationship_id)
                .or_default()
                .push(row.into());
        }

        Ok(rows
            .into_iter()
            .map(|row| {
                let tracks = tracks_by_relationship.remove(&row.id).unwrap_or_default();
                let with_users = RelationshipWithUsers::from(row);
                RelationshipOverview {
                    id: with_users.id,
                    created_at: with_users.created_at,
                    user1: with_users.user1,
                    user2: with_users.user2,
                    tracks,
                }
            })
            .collect())
    }

    /// Delete a relationship by id. The declared cascade removes its tracks
    /// and their history. Returns `true` if a row was removed.
    pub async fn delete(pool: &DbPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM relationships WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
