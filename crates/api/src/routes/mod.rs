pub mod demo;
pub mod health;
pub mod relationships;
pub mod tracks;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /demo/start              POST    seed the demo dataset, issue a demo token
///
/// /users/me                GET     current user's profile
/// /users/me                PATCH   update nickname / public handle
/// /users/me                DELETE  delete account (cascades)
/// /users/search            GET     look up a user by public handle
///
/// /relationships           GET     list with members and tracks
/// /relationships           POST    pair with another user
/// /relationships/{id}      DELETE  unpair (cascades to tracks, history)
///
/// /tracks                  POST    create a track in a relationship
/// /tracks/{id}             GET     track with members and history
/// /tracks/{id}             DELETE  delete a track (cascades to history)
/// /tracks/{id}/toggle      POST    flip whose turn it is
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/demo", demo::router())
        .nest("/users", users::router())
        .nest("/relationships", relationships::router())
        .nest("/tracks", tracks::router())
}
