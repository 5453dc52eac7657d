//! Track entity model, DTOs, and read models.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use turnwise_core::types::{DbId, Timestamp};

use crate::models::history::{HistoryEntry, HistoryWithUsers};
use crate::models::relationship::{Relationship, RelationshipWithUsers};
use crate::models::user::UserSummary;

/// Full track row from the `tracks` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Track {
    pub id: DbId,
    pub relationship_id: DbId,
    /// One of `coffee`, `lunch`, `beer`, `custom` (see `TrackKind`).
    pub name: String,
    /// Present iff `name` is `custom`.
    pub custom_name: Option<String>,
    /// Always one of the owning relationship's two members.
    pub current_turn_user_id: DbId,
    pub created_at: Timestamp,
}

/// Track with the current turn holder's display fields.
#[derive(Debug, Serialize)]
pub struct TrackWithTurnUser {
    #[serde(flatten)]
    pub track: Track,
    pub current_turn_user: UserSummary,
}

/// Internal read shape for membership checks: a track joined with its
/// owning relationship. Not serialized.
#[derive(Debug)]
pub struct TrackWithRelationship {
    pub track: Track,
    pub relationship: Relationship,
}

/// Full track read model: owning relationship members and the ledger,
/// newest entry first.
#[derive(Debug, Serialize)]
pub struct TrackDetail {
    #[serde(flatten)]
    pub track: Track,
    pub current_turn_user: UserSummary,
    pub relationship: RelationshipWithUsers,
    pub history: Vec<HistoryWithUsers>,
}

/// Result of a turn toggle: the updated track and the new ledger entry,
/// produced by one committed transaction.
#[derive(Debug, Serialize)]
pub struct TurnToggle {
    pub track: TrackWithTurnUser,
    pub history_entry: HistoryEntry,
}

/// DTO for creating a track.
#[derive(Debug, Deserialize)]
pub struct CreateTrack {
    pub relationship_id: DbId,
    pub name: String,
    pub custom_name: Option<String>,
}
