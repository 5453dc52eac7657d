//! Repository for the `users` table.

use chrono::Utc;
use turnwise_core::types::DbId;

use crate::models::user::{CreateUser, UpdateProfile, User, UserSearchResult, UserSummary};
use crate::DbPool;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, email, name, nickname, unique_identifier, image, created_at, updated_at";

/// Display-field column list for [`UserSummary`] reads.
const SUMMARY_COLUMNS: &str = "id, name, nickname, image";

/// Provides user CRUD plus handle lookups.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    pub async fn create(pool: &DbPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let now = Utc::now();
        let query = format!(
            "INSERT INTO users (email, name, nickname, unique_identifier, image, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.email)
            .bind(&input.name)
            .bind(&input.nickname)
            .bind(&input.unique_identifier)
            .bind(&input.image)
            .bind(now)
            .bind(now)
            .fetch_one(pool)
            .await
    }

    /// Find a user by internal id.
    pub async fn find_by_id(pool: &DbPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by email (the unique sign-in key).
    pub async fn find_by_email(pool: &DbPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE email = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Look up a user by public handle, returning the search read model.
    pub async fn search_by_identifier(
        pool: &DbPool,
        identifier: &str,
    ) -> Result<Option<UserSearchResult>, sqlx::Error> {
        sqlx::query_as::<_, UserSearchResult>(
            "SELECT id, name, nickname, unique_identifier, image
             FROM users WHERE unique_identifier = $1",
        )
        .bind(identifier)
        .fetch_optional(pool)
        .await
    }

    /// Display fields for a single user.
    pub async fn summary_by_id(
        pool: &DbPool,
        id: DbId,
    ) -> Result<Option<UserSummary>, sqlx::Error> {
        let query = format!("SELECT {SUMMARY_COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, UserSummary>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Whether `identifier` is already claimed by a user other than
    /// `current_user_id`.
    pub async fn identifier_taken(
        pool: &DbPool,
        identifier: &str,
        current_user_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM users WHERE unique_identifier = $1 AND id != $2)",
        )
        .bind(identifier)
        .bind(current_user_id)
        .fetch_one(pool)
        .await
    }

    /// Update a user's profile. Only non-`None` fields in `input` are
    /// applied. Returns `None` if no row with the given `id` exists.
    pub async fn update_profile(
        pool: &DbPool,
        id: DbId,
        input: &UpdateProfile,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET
                nickname = COALESCE($2, nickname),
                unique_identifier = COALESCE($3, unique_identifier),
                updated_at = $4
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(&input.nickname)
            .bind(&input.unique_identifier)
            .bind(Utc::now())
            .fetch_optional(pool)
            .await
    }

    /// Delete a user by id. The declared cascade removes every relationship
    /// the user belongs to, those relationships' tracks, and the tracks'
    /// history. Returns `true` if a row was removed.
    pub async fn delete(pool: &DbPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
