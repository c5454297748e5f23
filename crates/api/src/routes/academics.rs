//! Route definitions for the academic catalog: programs, courses, subjects,
//! sections (with schedules), instructors, and student records.

use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::{courses, instructors, programs, sections, students, subjects};
use crate::state::AppState;

/// Catalog routes, mounted at the API root.
///
/// Mutations require the `admin` role (student records: any staff role);
/// reads require authentication.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/programs", get(programs::list).post(programs::create))
        .route(
            "/programs/{id}",
            get(programs::get_by_id)
                .put(programs::update)
                .delete(programs::delete),
        )
        .route("/courses", get(courses::list).post(courses::create))
        .route(
            "/courses/{id}",
            get(courses::get_by_id)
                .put(courses::update)
                .delete(courses::delete),
        )
        .route("/subjects", get(subjects::list).post(subjects::create))
        .route(
            "/subjects/{id}",
            get(subjects::get_by_id)
                .put(subjects::update)
                .delete(subjects::delete),
        )
        .route("/sections", get(sections::list).post(sections::create))
        .route(
            "/sections/{id}",
            get(sections::get_by_id)
                .put(sections::update)
                .delete(sections::delete),
        )
        .route(
            "/sections/{id}/schedules",
            get(sections::list_schedules).post(sections::create_schedule),
        )
        .route(
            "/sections/{id}/schedules/{sched_id}",
            delete(sections::delete_schedule),
        )
        .route(
            "/instructors",
            get(instructors::list).post(instructors::create),
        )
        .route(
            "/instructors/{id}",
            get(instructors::get_by_id)
                .put(instructors::update)
                .delete(instructors::delete),
        )
        .route("/students", get(students::list).post(students::create))
        .route(
            "/students/{id}",
            get(students::get_by_id).put(students::update),
        )
        .route("/students/{id}/subjects", get(students::list_subjects))
}
