//! Relationship entity model and read models.

use serde::Serialize;
use sqlx::FromRow;
use turnwise_core::pairing;
use turnwise_core::types::{DbId, Timestamp};

use crate::models::track::TrackWithTurnUser;
use crate::models::user::UserSummary;

/// Full relationship row from the `relationships` table.
///
/// `user1_id`/`user2_id` are canonicalized (`user1_id < user2_id`) and
/// carry no initiator semantics; the pair is logically unordered.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Relationship {
    pub id: DbId,
    pub user1_id: DbId,
    pub user2_id: DbId,
    pub created_at: Timestamp,
}

impl Relationship {
    /// Whether `user_id` is one of the two members.
    pub fn is_member(&self, user_id: DbId) -> bool {
        user_id == self.user1_id || user_id == self.user2_id
    }

    /// The member that is not `user_id`, if `user_id` is a member.
    pub fn other_member(&self, user_id: DbId) -> Option<DbId> {
        pairing::other_member(self.user1_id, self.user2_id, user_id)
    }
}

/// Relationship with both members' display fields.
#[derive(Debug, Serialize)]
pub struct RelationshipWithUsers {
    pub id: DbId,
    pub created_at: Timestamp,
    pub user1: UserSummary,
    pub user2: UserSummary,
}

/// Dashboard read model: relationship, members, and its tracks.
#[derive(Debug, Serialize)]
pub struct RelationshipOverview {
    pub id: DbId,
    pub created_at: Timestamp,
    pub user1: UserSummary,
    pub user2: UserSummary,
    pub tracks: Vec<TrackWithTurnUser>,
}
