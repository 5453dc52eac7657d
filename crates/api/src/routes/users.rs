//! Route definitions for the current user's profile and user discovery.

use axum::routing::get;
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// Routes mounted at `/users`.
///
/// ```text
/// GET    /me       -> profile
/// PATCH  /me       -> update_profile
/// DELETE /me       -> delete_account
/// GET    /search   -> search
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/me",
            get(users::profile)
                .patch(users::update_profile)
                .delete(users::delete_account),
        )
        .route("/search", get(users::search))
}
