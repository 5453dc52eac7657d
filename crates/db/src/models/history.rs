//! History ledger entry model and read model.

use serde::Serialize;
use sqlx::FromRow;
use turnwise_core::types::{DbId, Timestamp};

use crate::models::user::UserSummary;

/// Immutable turn-transition row from the `history` table.
///
/// Written only by the turn-toggle transaction, never updated, removed
/// only by cascade from its track.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct HistoryEntry {
    pub id: DbId,
    pub track_id: DbId,
    /// Turn holder before the flip.
    pub from_user_id: DbId,
    /// Turn holder after the flip.
    pub to_user_id: DbId,
    pub timestamp: Timestamp,
}

/// History entry with both parties' display fields.
#[derive(Debug, Serialize)]
pub struct HistoryWithUsers {
    #[serde(flatten)]
    pub entry: HistoryEntry,
    pub from_user: UserSummary,
    pub to_user: UserSummary,
}
