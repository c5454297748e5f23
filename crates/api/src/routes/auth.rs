//! Route definitions for the `/auth` resource.

use axum::routing::post;
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Routes mounted at `/auth`.
///
/// ```text
/// POST /login       -> login
/// POST /verify-pin  -> verify_pin (pin-scoped token required)
/// POST /refresh     -> refresh
/// POST /logout      -> logout (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::login))
        .route("/verify-pin", post(auth::verify_pin))
        .route("/refresh", post(auth::refresh))
        .route("/logout", post(auth::logout))
}
