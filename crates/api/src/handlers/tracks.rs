//! Handlers for the `/tracks` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use turnwise_core::error::CoreError;
use turnwise_core::tracks::{normalize_custom_name, TrackKind};
use turnwise_core::types::DbId;
use turnwise_db::models::track::{CreateTrack, TrackDetail, TrackWithTurnUser, TurnToggle};
use turnwise_db::repositories::{HistoryRepo, RelationshipRepo, TrackRepo, UserRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::AuthUser;
use crate::state::AppState;

/// POST /api/v1/tracks
///
/// Creates a track inside one of the requester's relationships; the
/// requester holds the first turn.
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateTrack>,
) -> AppResult<(StatusCode, Json<TrackWithTurnUser>)> {
    let kind: TrackKind = input.name.parse()?;
    let custom_name = normalize_custom_name(kind, input.custom_name.as_deref())?;

    let relationship = RelationshipRepo::find_by_id(&state.pool, input.relationship_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Relationship",
            id: input.relationship_id,
        }))?;

    if !relationship.is_member(user.user_id) {
        return Err(AppError::Core(CoreError::Forbidden(
            "Not a member of this relationship".to_string(),
        )));
    }

    let track = TrackRepo::create(
        &state.pool,
        relationship.id,
        kind.as_str(),
        custom_name.as_deref(),
        user.user_id,
    )
    .await?;

    let current_turn_user = UserRepo::summary_by_id(&state.pool, user.user_id)
        .await?
        .ok_or_else(|| AppError::InternalError("Track creator vanished".into()))?;

    Ok((
        StatusCode::CREATED,
        Json(TrackWithTurnUser {
            track,
            current_turn_user,
        }),
    ))
}

/// GET /api/v1/tracks/{id}
///
/// The full track read model: owning relationship with both members'
/// display fields, current turn holder, and the ledger newest-first.
pub async fn get_by_id(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<TrackDetail>> {
    let found = TrackRepo::find_with_relationship(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Track",
            id,
        }))?;

    if !found.relationship.is_member(user.user_id) {
        return Err(AppError::Core(CoreError::Forbidden(
            "Not a member of this relationship".to_string(),
        )));
    }

    let relationship = RelationshipRepo::with_users(&state.pool, found.relationship.id)
        .await?
        .ok_or_else(|| AppError::InternalError("Relationship vanished".into()))?;

    let current_turn_user = UserRepo::summary_by_id(&state.pool, found.track.current_turn_user_id)
        .await?
        .ok_or_else(|| AppError::InternalError("Turn holder vanished".into()))?;

    let history = HistoryRepo::list_for_track(&state.pool, id).await?;

    Ok(Json(TrackDetail {
        track: found.track,
        current_turn_user,
        relationship,
        history,
    }))
}

/// POST /api/v1/tracks/{id}/toggle
///
/// Flips whose turn it is. The repository runs the whole
/// load-authorize-append-update sequence in one transaction.
pub async fn toggle(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<TurnToggle>> {
    let result = TrackRepo::toggle_turn(&state.pool, id, user.user_id).await?;
    Ok(Json(result))
}

/// DELETE /api/v1/tracks/{id}
///
/// Only a relationship member may delete. The declared cascade removes
/// the track's history.
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let found = TrackRepo::find_with_relationship(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Track",
            id,
        }))?;

    if !found.relationship.is_member(user.user_id) {
        return Err(AppError::Core(CoreError::Forbidden(
            "Not a member of this relationship".to_string(),
        )));
    }

    TrackRepo::delete(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
