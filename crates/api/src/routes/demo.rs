//! Route definitions for demo mode.

use axum::routing::post;
use axum::Router;

use crate::handlers::demo;
use crate::state::AppState;

/// Routes mounted at `/demo`.
///
/// ```text
/// POST /start  -> start
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/start", post(demo::start))
}
