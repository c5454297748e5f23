pub mod academics;
pub mod admin;
pub mod auth;
pub mod enrollment;
pub mod health;
pub mod requests;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                          login (public)
/// /auth/verify-pin                     PIN second factor (public, pin token)
/// /auth/refresh                        refresh (public)
/// /auth/logout                         logout (requires auth)
///
/// /admin/users                         list, create (admin only)
/// /admin/users/{id}                    get, update
/// /admin/users/{id}/pin                set/remove login PIN (PUT)
///
/// /programs                            list, create
/// /programs/{id}                       get, update, delete
/// /courses                             list (?program_id), create
/// /courses/{id}                        get, update, delete
/// /subjects                            list, create
/// /subjects/{id}                       get, update, delete
/// /sections                            list (?course_id), create
/// /sections/{id}                       get, update, delete
/// /sections/{id}/schedules             list, create
/// /sections/{id}/schedules/{sched_id}  delete
/// /instructors                         list, create
/// /instructors/{id}                    get, update, delete
/// /students                            list, create (staff)
/// /students/{id}                       get, update
/// /students/{id}/subjects              enrolled subject ids (GET)
///
/// /enrollments                         list, submit
/// /enrollments/{id}                    detail with approvals (GET)
/// /enrollments/{id}/status             workflow projection (GET)
/// /enrollments/{id}/decision           record stage decision (POST, staff)
/// /enrollments/{id}/payments           ledger (GET), record (POST, cashier)
///
/// /subject-changes                     list, submit
/// /subject-changes/{id}                detail with items (GET)
/// /subject-changes/{id}/decision       record decision (POST, staff)
/// /course-shifts                       list, submit
/// /course-shifts/{id}                  get
/// /course-shifts/{id}/decision         record decision (POST, staff)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Authentication routes (login, PIN, refresh, logout).
        .nest("/auth", auth::router())
        // Admin routes (user management).
        .nest("/admin", admin::router())
        // Academic catalog (programs, courses, subjects, sections, staff).
        .merge(academics::router())
        // Enrollment workflow + payments.
        .merge(enrollment::router())
        // Subject-change and course-shift request workflows.
        .merge(requests::router())
}
