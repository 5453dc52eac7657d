//! User entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use turnwise_core::types::{DbId, Timestamp};

/// Full user row from the `users` table.
///
/// Only serialized back to its owner (profile endpoints); other members
/// see [`UserSummary`].
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: DbId,
    pub email: String,
    pub name: String,
    pub nickname: Option<String>,
    /// Public handle other users search for. Unset until the owner picks one.
    pub unique_identifier: Option<String>,
    pub image: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Display fields other members are allowed to see.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserSummary {
    pub id: DbId,
    pub name: String,
    pub nickname: Option<String>,
    pub image: Option<String>,
}

/// Handle-search result: display fields plus the handle itself.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserSearchResult {
    pub id: DbId,
    pub name: String,
    pub nickname: Option<String>,
    pub unique_identifier: Option<String>,
    pub image: Option<String>,
}

/// DTO for creating a user (sign-in provisioning and demo seeding).
#[derive(Debug, Deserialize)]
pub struct CreateUser {
    pub email: String,
    pub name: String,
    pub nickname: Option<String>,
    pub unique_identifier: Option<String>,
    pub image: Option<String>,
}

/// DTO for profile updates. Absent fields are left unchanged.
#[derive(Debug, Deserialize)]
pub struct UpdateProfile {
    pub nickname: Option<String>,
    pub unique_identifier: Option<String>,
}
