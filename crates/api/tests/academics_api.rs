//! HTTP-level integration tests for the academic catalog:
//! programs, courses, subjects, sections, schedules, instructors, students.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete_auth, get_auth, post_json_auth, put_json_auth, seed_user};
use sqlx::PgPool;

/// Seed an admin and a registrar and return their tokens as (admin, staff).
async fn seed_tokens(pool: &PgPool) -> (String, String) {
    seed_user(pool, "catadmin", "admin").await;
    seed_user(pool, "catreg", "registrar").await;
    (
        common::login_token(pool, "catadmin").await,
        common::login_token(pool, "catreg").await,
    )
}

/// Create a program via the API and return its id.
async fn create_program(pool: &PgPool, admin_token: &str, code: &str) -> i64 {
    let app = common::build_test_app(pool.clone()).await;
    let body = serde_json::json!({ "code": code, "name": format!("Program {code}") });
    let response = post_json_auth(app, "/api/v1/programs", body, admin_token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["id"].as_i64().unwrap()
}

/// Create a course under a program via the API and return its id.
async fn create_course(pool: &PgPool, admin_token: &str, program_id: i64, code: &str) -> i64 {
    let app = common::build_test_app(pool.clone()).await;
    let body = serde_json::json!({
        "program_id": program_id,
        "code": code,
        "name": format!("Course {code}")
    });
    let response = post_json_auth(app, "/api/v1/courses", body, admin_token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["id"].as_i64().unwrap()
}

// ---------------------------------------------------------------------------
// Programs
// ---------------------------------------------------------------------------

/// Program CRUD round trip: create, read, update, delete.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_program_crud(pool: PgPool) {
    let (admin_token, staff_token) = seed_tokens(&pool).await;

    let program_id = create_program(&pool, &admin_token, "CAS").await;

    let app = common::build_test_app(pool.clone()).await;
    let response = get_auth(app, &format!("/api/v1/programs/{program_id}"), &staff_token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["code"], "CAS");

    let app = common::build_test_app(pool.clone()).await;
    let response = put_json_auth(
        app,
        &format!("/api/v1/programs/{program_id}"),
        serde_json::json!({ "name": "College of Arts and Sciences" }),
        &admin_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await["name"],
        "College of Arts and Sciences"
    );

    let app = common::build_test_app(pool.clone()).await;
    let response = delete_auth(app, &format!("/api/v1/programs/{program_id}"), &admin_token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let app = common::build_test_app(pool).await;
    let response = get_auth(app, &format!("/api/v1/programs/{program_id}"), &staff_token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// Catalog mutations are admin-only.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_catalog_mutation_requires_admin(pool: PgPool) {
    let (_admin_token, staff_token) = seed_tokens(&pool).await;

    let app = common::build_test_app(pool).await;
    let body = serde_json::json!({ "code": "CAS", "name": "College of Arts and Sciences" });
    let response = post_json_auth(app, "/api/v1/programs", body, &staff_token).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

/// Duplicate program codes violate the unique constraint and return 409.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_duplicate_program_code(pool: PgPool) {
    let (admin_token, _staff_token) = seed_tokens(&pool).await;
    create_program(&pool, &admin_token, "CAS").await;

    let app = common::build_test_app(pool).await;
    let body = serde_json::json!({ "code": "CAS", "name": "Duplicate" });
    let response = post_json_auth(app, "/api/v1/programs", body, &admin_token).await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

// ---------------------------------------------------------------------------
// Courses
// ---------------------------------------------------------------------------

/// Courses can be filtered by program.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_course_list_filtered_by_program(pool: PgPool) {
    let (admin_token, staff_token) = seed_tokens(&pool).await;
    let program_a = create_program(&pool, &admin_token, "CITA").await;
    let program_b = create_program(&pool, &admin_token, "CITB").await;
    create_course(&pool, &admin_token, program_a, "BSIT").await;
    create_course(&pool, &admin_token, program_b, "BSCS").await;

    let app = common::build_test_app(pool).await;
    let response = get_auth(
        app,
        &format!("/api/v1/courses?program_id={program_a}"),
        &staff_token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let courses = json.as_array().unwrap();
    assert_eq!(courses.len(), 1);
    assert_eq!(courses[0]["code"], "BSIT");
}

/// Creating a course under a nonexistent program fails.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_course_unknown_program(pool: PgPool) {
    let (admin_token, _staff_token) = seed_tokens(&pool).await;

    let app = common::build_test_app(pool).await;
    let body = serde_json::json!({ "program_id": 999_999, "code": "BSX", "name": "Nowhere" });
    let response = post_json_auth(app, "/api/v1/courses", body, &admin_token).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Subjects
// ---------------------------------------------------------------------------

/// Subject units must be positive.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_subject_units_validation(pool: PgPool) {
    let (admin_token, _staff_token) = seed_tokens(&pool).await;

    let app = common::build_test_app(pool.clone()).await;
    let body = serde_json::json!({ "code": "NSTP1", "title": "NSTP 1", "units": 0 });
    let response = post_json_auth(app, "/api/v1/subjects", body, &admin_token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let app = common::build_test_app(pool).await;
    let body = serde_json::json!({ "code": "NSTP1", "title": "NSTP 1", "units": 3 });
    let response = post_json_auth(app, "/api/v1/subjects", body, &admin_token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_json(response).await["units"], 3);
}

// ---------------------------------------------------------------------------
// Sections and schedules
// ---------------------------------------------------------------------------

/// Section with a nested schedule: create both, list, then delete the slot.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_section_schedule_lifecycle(pool: PgPool) {
    let (admin_token, staff_token) = seed_tokens(&pool).await;
    let program_id = create_program(&pool, &admin_token, "CIT").await;
    let course_id = create_course(&pool, &admin_token, program_id, "BSIT").await;

    let app = common::build_test_app(pool.clone()).await;
    let body = serde_json::json!({
        "course_id": course_id,
        "name": "BSIT-1A",
        "year_level": 1,
        "capacity": 35
    });
    let response = post_json_auth(app, "/api/v1/sections", body, &admin_token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let section_id = body_json(response).await["id"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone()).await;
    let body = serde_json::json!({ "code": "IT101", "title": "Intro to Computing" });
    let response = post_json_auth(app, "/api/v1/subjects", body, &admin_token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let subject_id = body_json(response).await["id"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone()).await;
    let body = serde_json::json!({
        "subject_id": subject_id,
        "day_of_week": 1,
        "start_time": "08:00:00",
        "end_time": "09:30:00",
        "room": "Room 204"
    });
    let response = post_json_auth(
        app,
        &format!("/api/v1/sections/{section_id}/schedules"),
        body,
        &admin_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let schedule_id = body_json(response).await["id"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone()).await;
    let response = get_auth(
        app,
        &format!("/api/v1/sections/{section_id}/schedules"),
        &staff_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json.as_array().unwrap().len(), 1);
    assert_eq!(json[0]["room"], "Room 204");

    let app = common::build_test_app(pool).await;
    let response = delete_auth(
        app,
        &format!("/api/v1/sections/{section_id}/schedules/{schedule_id}"),
        &admin_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

/// Schedule validation: bad weekday and inverted time range are rejected.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_schedule_validation(pool: PgPool) {
    let (admin_token, _staff_token) = seed_tokens(&pool).await;
    let program_id = create_program(&pool, &admin_token, "CIT").await;
    let course_id = create_course(&pool, &admin_token, program_id, "BSIT").await;

    let app = common::build_test_app(pool.clone()).await;
    let body = serde_json::json!({ "course_id": course_id, "name": "BSIT-1A", "year_level": 1 });
    let response = post_json_auth(app, "/api/v1/sections", body, &admin_token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let section_id = body_json(response).await["id"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone()).await;
    let body = serde_json::json!({ "code": "IT101", "title": "Intro to Computing" });
    let response = post_json_auth(app, "/api/v1/subjects", body, &admin_token).await;
    let subject_id = body_json(response).await["id"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone()).await;
    let body = serde_json::json!({
        "subject_id": subject_id,
        "day_of_week": 8,
        "start_time": "08:00:00",
        "end_time": "09:30:00"
    });
    let response = post_json_auth(
        app,
        &format!("/api/v1/sections/{section_id}/schedules"),
        body,
        &admin_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let app = common::build_test_app(pool).await;
    let body = serde_json::json!({
        "subject_id": subject_id,
        "day_of_week": 1,
        "start_time": "10:00:00",
        "end_time": "09:00:00"
    });
    let response = post_json_auth(
        app,
        &format!("/api/v1/sections/{section_id}/schedules"),
        body,
        &admin_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Instructors
// ---------------------------------------------------------------------------

/// Instructor creation and duplicate email conflict.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_instructor_create_and_duplicate_email(pool: PgPool) {
    let (admin_token, _staff_token) = seed_tokens(&pool).await;

    let app = common::build_test_app(pool.clone()).await;
    let body = serde_json::json!({
        "first_name": "Maria",
        "last_name": "Santos",
        "email": "msantos@test.com"
    });
    let response = post_json_auth(app, "/api/v1/instructors", body.clone(), &admin_token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_json(response).await["last_name"], "Santos");

    let app = common::build_test_app(pool).await;
    let response = post_json_auth(app, "/api/v1/instructors", body, &admin_token).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

// ---------------------------------------------------------------------------
// Students
// ---------------------------------------------------------------------------

/// Staff create student records; a student can read their own but not
/// another student's record.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_student_record_access(pool: PgPool) {
    let (admin_token, staff_token) = seed_tokens(&pool).await;
    let program_id = create_program(&pool, &admin_token, "CIT").await;
    let course_id = create_course(&pool, &admin_token, program_id, "BSIT").await;

    let user_a = seed_user(&pool, "recstud1", "student").await;
    let user_b = seed_user(&pool, "recstud2", "student").await;

    let app = common::build_test_app(pool.clone()).await;
    let body = serde_json::json!({
        "user_id": user_a.id,
        "student_number": "2026-00001",
        "course_id": course_id
    });
    let response = post_json_auth(app, "/api/v1/students", body, &staff_token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let student_a = body_json(response).await["id"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone()).await;
    let body = serde_json::json!({
        "user_id": user_b.id,
        "student_number": "2026-00002",
        "course_id": course_id
    });
    let response = post_json_auth(app, "/api/v1/students", body, &staff_token).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let token_a = common::login_token(&pool, "recstud1").await;
    let token_b = common::login_token(&pool, "recstud2").await;

    let app = common::build_test_app(pool.clone()).await;
    let response = get_auth(app, &format!("/api/v1/students/{student_a}"), &token_a).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["student_number"], "2026-00001");

    let app = common::build_test_app(pool.clone()).await;
    let response = get_auth(app, &format!("/api/v1/students/{student_a}"), &token_b).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // Students may not create records.
    let app = common::build_test_app(pool).await;
    let body = serde_json::json!({ "user_id": user_a.id, "student_number": "2026-00003" });
    let response = post_json_auth(app, "/api/v1/students", body, &token_a).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
