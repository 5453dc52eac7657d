//! Handlers for the `/relationships` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use turnwise_core::error::CoreError;
use turnwise_core::types::DbId;
use turnwise_db::models::relationship::{RelationshipOverview, RelationshipWithUsers};
use turnwise_db::repositories::{RelationshipRepo, UserRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::AuthUser;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateRelationshipRequest {
    /// The user to pair with (discovered via handle search).
    pub user_id: DbId,
}

/// GET /api/v1/relationships
///
/// All relationships of the current actor, newest first, with both
/// members' display fields and their tracks.
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<Vec<RelationshipOverview>>> {
    let relationships = RelationshipRepo::list_for_user(&state.pool, user.user_id).await?;
    Ok(Json(relationships))
}

/// POST /api/v1/relationships
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateRelationshipRequest>,
) -> AppResult<(StatusCode, Json<RelationshipWithUsers>)> {
    let target = UserRepo::find_by_id(&state.pool, input.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: input.user_id,
        }))?;

    let relationship = RelationshipRepo::create(&state.pool, user.user_id, target.id).await?;

    let with_users = RelationshipRepo::with_users(&state.pool, relationship.id)
        .await?
        .ok_or_else(|| AppError::InternalError("Relationship vanished after creation".into()))?;

    Ok((StatusCode::CREATED, Json(with_users)))
}

/// DELETE /api/v1/relationships/{id}
///
/// Only a member may unpair. The declared cascade removes the
/// relationship's tracks and their history.
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let relationship = RelationshipRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Relationship",
            id,
        }))?;

    if !relationship.is_member(user.user_id) {
        return Err(AppError::Core(CoreError::Forbidden(
            "Not a member of this relationship".to_string(),
        )));
    }

    RelationshipRepo::delete(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
