//! Route definitions for the `/tracks` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::tracks;
use crate::state::AppState;

/// Routes mounted at `/tracks`.
///
/// ```text
/// POST   /             -> create
/// GET    /{id}         -> get_by_id
/// DELETE /{id}         -> delete
/// POST   /{id}/toggle  -> toggle
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(tracks::create))
        .route("/{id}", get(tracks::get_by_id).delete(tracks::delete))
        .route("/{id}/toggle", post(tracks::toggle))
}
