//! Route definitions for the subject-change and course-shift request
//! workflows.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{course_shifts, subject_changes};
use crate::state::AppState;

/// Request-workflow routes, mounted at the API root.
///
/// ```text
/// GET  /subject-changes               -> list
/// POST /subject-changes               -> submit
/// GET  /subject-changes/{id}          -> get_by_id
/// POST /subject-changes/{id}/decision -> decide (staff)
/// GET  /course-shifts                 -> list
/// POST /course-shifts                 -> submit
/// GET  /course-shifts/{id}            -> get_by_id
/// POST /course-shifts/{id}/decision   -> decide (staff)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/subject-changes",
            get(subject_changes::list).post(subject_changes::submit),
        )
        .route("/subject-changes/{id}", get(subject_changes::get_by_id))
        .route(
            "/subject-changes/{id}/decision",
            post(subject_changes::decide),
        )
        .route(
            "/course-shifts",
            get(course_shifts::list).post(course_shifts::submit),
        )
        .route("/course-shifts/{id}", get(course_shifts::get_by_id))
        .route("/course-shifts/{id}/decision", post(course_shifts::decide))
}
