//! Read side of the `history` ledger.
//!
//! Entries are written only inside the turn-toggle transaction
//! (`TrackRepo::toggle_turn`) and removed only by cascade; this repository
//! exposes the display queries.

use sqlx::FromRow;
use turnwise_core::types::{DbId, Timestamp};

use crate::models::history::{HistoryEntry, HistoryWithUsers};
use crate::models::user::UserSummary;
use crate::DbPool;

/// Flat row for a ledger entry joined with both parties' display fields.
#[derive(FromRow)]
struct HistoryUsersRow {
    id: DbId,
    track_id: DbId,
    from_user_id: DbId,
    to_user_id: DbId,
    timestamp: Timestamp,
    from_user_name: String,
    from_user_nickname: Option<String>,
    from_user_image: Option<String>,
    to_user_name: String,
    to_user_nickname: Option<String>,
    to_user_image: Option<String>,
}

impl From<HistoryUsersRow> for HistoryWithUsers {
    fn from(row: HistoryUsersRow) -> Self {
        HistoryWithUsers {
            from_user: UserSummary {
                id: row.from_user_id,
                name: row.from_user_name,
                nickname: row.from_user_nickname,
                image: row.from_user_image,
            },
            to_user: UserSummary {
                id: row.to_user_id,
                name: row.to_user_name,
                nickname: row.to_user_nickname,
                image: row.to_user_image,
            },
            entry: HistoryEntry {
                id: row.id,
                track_id: row.track_id,
                from_user_id: row.from_user_id,
                to_user_id: row.to_user_id,
                timestamp: row.timestamp,
            },
        }
    }
}

/// Read-only queries over the append-only ledger.
pub struct HistoryRepo;

impl HistoryRepo {
    /// All entries for a track, newest first, with both parties' display
    /// fields. The id tie-break keeps same-timestamp entries stable.
    pub async fn list_for_track(
        pool: &DbPool,
        track_id: DbId,
    ) -> Result<Vec<HistoryWithUsers>, sqlx::Error> {
        let rows = sqlx::query_as::<_, HistoryUsersRow>(
            "SELECT h.id, h.track_id, h.from_user_id, h.to_user_id, h.timestamp,
                    fu.name AS from_user_name, fu.nickname AS from_user_nickname, fu.image AS from_user_image,
                    tu.name AS to_user_name, tu.nickname AS to_user_nickname, tu.image AS to_user_image
             FROM history h
             JOIN users fu ON fu.id = h.from_user_id
             JOIN users tu ON tu.id = h.to_user_id
             WHERE h.track_id = $1
             ORDER BY h.timestamp DESC, h.id DESC",
        )
        .bind(track_id)
        .fetch_all(pool)
        .await?;

        Ok(rows.into_iter().map(HistoryWithUsers::from).collect())
    }
}
