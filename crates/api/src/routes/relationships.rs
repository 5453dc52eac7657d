//! Route definitions for the `/relationships` resource.

use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::relationships;
use crate::state::AppState;

/// Routes mounted at `/relationships`.
///
/// ```text
/// GET    /      -> list
/// POST   /      -> create
/// DELETE /{id}  -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(relationships::list).post(relationships::create))
        .route("/{id}", delete(relationships::delete))
}
