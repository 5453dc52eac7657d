//! Handlers for the current user's profile and user discovery.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use turnwise_core::error::CoreError;
use turnwise_db::models::user::{UpdateProfile, User, UserSearchResult};
use turnwise_db::repositories::UserRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::AuthUser;
use crate::state::AppState;

/// GET /api/v1/users/me
pub async fn profile(State(state): State<AppState>, user: AuthUser) -> AppResult<Json<User>> {
    let profile = UserRepo::find_by_id(&state.pool, user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: user.user_id,
        }))?;
    Ok(Json(profile))
}

/// PATCH /api/v1/users/me
///
/// Updates nickname and/or the public handle. Claiming a handle another
/// user already holds is a conflict; the unique index on
/// `unique_identifier` is the backstop under concurrency.
pub async fn update_profile(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<UpdateProfile>,
) -> AppResult<Json<User>> {
    if let Some(identifier) = input.unique_identifier.as_deref() {
        if UserRepo::identifier_taken(&state.pool, identifier, user.user_id).await? {
            return Err(AppError::Core(CoreError::Conflict(
                "Unique identifier already taken".to_string(),
            )));
        }
    }

    let updated = UserRepo::update_profile(&state.pool, user.user_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: user.user_id,
        }))?;
    Ok(Json(updated))
}

/// DELETE /api/v1/users/me
///
/// Deletes the account. The declared cascade removes every relationship
/// the user belongs to, those relationships' tracks, and their history.
pub async fn delete_account(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<StatusCode> {
    let deleted = UserRepo::delete(&state.pool, user.user_id).await?;
    if deleted {
        tracing::info!(user_id = user.user_id, "account deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: user.user_id,
        }))
    }
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub identifier: Option<String>,
}

/// GET /api/v1/users/search?identifier=...
///
/// Looks up a user by public handle for the pairing flow.
pub async fn search(
    State(state): State<AppState>,
    user: AuthUser,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<UserSearchResult>> {
    let identifier = params.identifier.as_deref().unwrap_or("").trim();
    if identifier.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "identifier query parameter required".to_string(),
        )));
    }

    let found = UserRepo::search_by_identifier(&state.pool, identifier)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No user with handle '{identifier}'")))?;

    if found.id == user.user_id {
        return Err(AppError::Core(CoreError::Validation(
            "Cannot search for yourself".to_string(),
        )));
    }

    Ok(Json(found))
}
