//! Repository for the `tracks` table and the turn-toggle engine.

use chrono::Utc;
use sqlx::FromRow;
use turnwise_core::error::CoreError;
use turnwise_core::pairing;
use turnwise_core::types::{DbId, Timestamp};

use crate::error::DbError;
use crate::models::history::HistoryEntry;
use crate::models::relationship::Relationship;
use crate::models::track::{Track, TrackWithRelationship, TrackWithTurnUser, TurnToggle};
use crate::models::user::UserSummary;
use crate::DbPool;

const COLUMNS: &str = "id, relationship_id, name, custom_name, current_turn_user_id, created_at";

const HISTORY_COLUMNS: &str = "id, track_id, from_user_id, to_user_id, timestamp";

/// Flat row for a track joined with its owning relationship.
#[derive(FromRow)]
struct TrackRelationshipRow {
    id: DbId,
    relationship_id: DbId,
    name: String,
    custom_name: Option<String>,
    current_turn_user_id: DbId,
    created_at: Timestamp,
    user1_id: DbId,
    user2_id: DbId,
    relationship_created_at: Timestamp,
}

impl From<TrackRelationshipRow> for TrackWithRelationship {
    fn from(row: TrackRelationshipRow) -> Self {
        TrackWithRelationship {
            relationship: Relationship {
                id: row.relationship_id,
                user1_id: row.user1_id,
                user2_id: row.user2_id,
                created_at: row.relationship_created_at,
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

const TRACK_RELATIONSHIP_QUERY: &str =
    "SELECT t.id, t.relationship_id, t.name, t.custom_name, t.current_turn_user_id, t.created_at,
            r.user1_id, r.user2_id, r.created_at AS relationship_created_at
     FROM tracks t
     JOIN relationships r ON r.id = t.relationship_id
     WHERE t.id = $1";

/// Provides track CRUD plus the turn-toggle transaction.
pub struct TrackRepo;

impl TrackRepo {
    /// Insert a new track. The caller has already validated the kind and
    /// custom name and verified membership; the creator holds the first
    /// turn.
    pub async fn create(
        pool: &DbPool,
        relationship_id: DbId,
        name: &str,
        custom_name: Option<&str>,
        current_turn_user_id: DbId,
    ) -> Result<Track, sqlx::Error> {
        let query = format!(
            "INSERT INTO tracks (relationship_id, name, custom_name, current_turn_user_id, created_at)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Track>(&query)
            .bind(relationship_id)
            .bind(name)
            .bind(custom_name)
            .bind(current_turn_user_id)
            .bind(Utc::now())
            .fetch_one(pool)
            .await
    }

    /// Find a track by id.
    pub async fn find_by_id(pool: &DbPool, id: DbId) -> Result<Option<Track>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tracks WHERE id = $1");
        sqlx::query_as::<_, Track>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// A track joined with its owning relationship, for membership checks.
    pub async fn find_with_relationship(
        pool: &DbPool,
        id: DbId,
    ) -> Result<Option<TrackWithRelationship>, sqlx::Error> {
        let row = sqlx::query_as::<_, TrackRelationshipRow>(TRACK_RELATIONSHIP_QUERY)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(TrackWithRelationship::from))
    }

    /// Atomically flip whose turn it is on a track.
    ///
    /// Inside one transaction: load the track with its owning relationship,
    /// verify the requester is a member, append the ledger entry, and move
    /// the turn. The append and the update commit together or not at all;
    /// concurrent toggles on the same track serialize at the storage layer,
    /// so the second one reads the first's committed holder.
    ///
    /// The new holder is the member who is not the *requester* (not the
    /// complement of the current holder): toggling while it is already the
    /// other party's turn leaves the turn with them and records the
    /// no-op-looking transition in the ledger.
    pub async fn toggle_turn(
        pool: &DbPool,
        track_id: DbId,
        requester_id: DbId,
    ) -> Result<TurnToggle, DbError> {
        let mut tx = pool.begin().await?;

        let row: Option<TrackRelationshipRow> =
            sqlx::query_as(TRACK_RELATIONSHIP_QUERY)
                .bind(track_id)
                .fetch_optional(&mut *tx)
                .await?;
        let row = row.ok_or(CoreError::NotFound {
            entity: "Track",
            id: track_id,
        })?;

        let to_user_id = pairing::other_member(row.user1_id, row.user2_id, requester_id)
            .ok_or_else(|| {
                CoreError::Forbidden("Not a member of this relationship".to_string())
            })?;
        let from_user_id = row.current_turn_user_id;

        let history_query = format!(
            "INSERT INTO history (track_id, from_user_id, to_user_id, timestamp)
             VALUES ($1, $2, $3, $4)
             RETURNING {HISTORY_COLUMNS}"
        );
        let history_entry = sqlx::query_as::<_, HistoryEntry>(&history_query)
            .bind(track_id)
            .bind(from_user_id)
            .bind(to_user_id)
            .bind(Utc::now())
            .fetch_one(&mut *tx)
            .await?;

        let update_query = format!(
            "UPDATE tracks SET current_turn_user_id = $2 WHERE id = $1 RETURNING {COLUMNS}"
        );
        let track = sqlx::query_as::<_, Track>(&update_query)
            .bind(track_id)
            .bind(to_user_id)
            .fetch_one(&mut *tx)
            .await?;

        let current_turn_user = sqlx::query_as::<_, UserSummary>(
            "SELECT id, name, nickname, image FROM users WHERE id = $1",
        )
        .bind(to_user_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::debug!(track_id, from_user_id, to_user_id, "turn toggled");

        Ok(TurnToggle {
            track: TrackWithTurnUser {
                track,
                current_turn_user,
            },
            history_entry,
        })
    }

    /// Delete a track by id. The declared cascade removes its history.
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &DbPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tracks WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
