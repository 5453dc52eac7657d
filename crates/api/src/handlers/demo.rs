//! Demo mode: seed the fixed dataset and hand out a demo token.
//!
//! After this endpoint runs, the demo session flows through the same
//! `AuthUser` extractor as any real user -- there is no ambient demo flag
//! anywhere below the boundary.

use axum::extract::State;
use axum::Json;
use serde::Serialize;
use turnwise_core::types::DbId;
use turnwise_db::repositories::demo_repo::DEMO_USER_EMAIL;
use turnwise_db::repositories::{DemoRepo, UserRepo};

use crate::auth::jwt::generate_access_token;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct DemoStartResponse {
    pub user_id: DbId,
    pub access_token: String,
    /// Token lifetime in seconds.
    pub expires_in: i64,
}

/// POST /api/v1/demo/start
pub async fn start(State(state): State<AppState>) -> AppResult<Json<DemoStartResponse>> {
    DemoRepo::seed(&state.pool).await?;

    let demo_user = UserRepo::find_by_email(&state.pool, DEMO_USER_EMAIL)
        .await?
        .ok_or_else(|| AppError::InternalError("Demo user missing after seeding".into()))?;

    let access_token = generate_access_token(demo_user.id, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Failed to issue demo token: {e}")))?;

    tracing::info!(user_id = demo_user.id, "demo session started");

    Ok(Json(DemoStartResponse {
        user_id: demo_user.id,
        access_token,
        expires_in: state.config.jwt.access_token_expiry_mins * 60,
    }))
}
