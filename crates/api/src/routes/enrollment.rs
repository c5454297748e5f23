//! Route definitions for the `/enrollments` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{enrollments, payments};
use crate::state::AppState;

/// Enrollment routes, mounted at the API root.
///
/// ```text
/// GET  /enrollments                 -> list (staff: all, student: own)
/// POST /enrollments                 -> submit
/// GET  /enrollments/{id}            -> get_by_id (row + approvals + projection)
/// GET  /enrollments/{id}/status     -> get_status (projection only)
/// POST /enrollments/{id}/decision   -> decide (staff)
/// GET  /enrollments/{id}/payments   -> ledger (staff)
/// POST /enrollments/{id}/payments   -> record (cashier)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/enrollments",
            get(enrollments::list).post(enrollments::submit),
        )
        .route("/enrollments/{id}", get(enrollments::get_by_id))
        .route("/enrollments/{id}/status", get(enrollments::get_status))
        .route("/enrollments/{id}/decision", post(enrollments::decide))
        .route(
            "/enrollments/{id}/payments",
            get(payments::ledger).post(payments::record),
        )
}
