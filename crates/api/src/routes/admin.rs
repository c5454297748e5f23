//! Route definitions for the `/admin` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// All routes require the `admin` role (enforced by handler extractors).
///
/// ```text
/// GET    /users           -> list
/// POST   /users           -> create
/// GET    /users/{id}      -> get_by_id
/// PUT    /users/{id}      -> update
/// PUT    /users/{id}/pin  -> set_pin
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", get(users::list).post(users::create))
        .route("/users/{id}", get(users::get_by_id).put(users::update))
        .route("/users/{id}/pin", put(users::set_pin))
}
