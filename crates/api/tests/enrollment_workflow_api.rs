//! HTTP-level integration tests for the enrollment approval workflow.
//!
//! Covers submission, the sequential Program Head -> Registrar -> Cashier
//! approval chain, out-of-turn and unauthorized decisions, rejection,
//! status projection, and the payment ledger.

mod common;

use axum::http::StatusCode;
use common::{body_json, get_auth, post_json_auth, seed_user};
use registra_db::models::course::CreateCourse;
use registra_db::models::program::CreateProgram;
use registra_db::models::student::CreateStudent;
use registra_db::models::user::User;
use registra_db::repositories::{CourseRepo, ProgramRepo, StudentRepo};
use sqlx::PgPool;

/// Seeded fixture: the staff chain, one student with a record, and a course
/// the student can enroll in.
struct Fixture {
    course_id: i64,
    student_token: String,
    program_head_token: String,
    registrar_token: String,
    cashier_token: String,
}

async fn seed_course(pool: &PgPool) -> i64 {
    let program = ProgramRepo::create(
        pool,
        &CreateProgram {
            code: "CIT".to_string(),
            name: "College of Information Technology".to_string(),
            description: None,
        },
    )
    .await
    .expect("program creation should succeed");

    CourseRepo::create(
        pool,
        &CreateCourse {
            program_id: program.id,
            code: "BSIT".to_string(),
            name: "BS Information Technology".to_string(),
            years: 4,
        },
    )
    .await
    .expect("course creation should succeed")
    .id
}

async fn seed_student_record(pool: &PgPool, user: &User, course_id: Option<i64>) -> i64 {
    StudentRepo::create(
        pool,
        &CreateStudent {
            user_id: user.id,
            student_number: format!("2026-{:05}", user.id),
            course_id,
            section_id: None,
        },
    )
    .await
    .expect("student record creation should succeed")
    .id
}

async fn seed_fixture(pool: &PgPool) -> Fixture {
    let course_id = seed_course(pool).await;

    let student_user = seed_user(pool, "stud1", "student").await;
    seed_student_record(pool, &student_user, Some(course_id)).await;
    seed_user(pool, "ph1", "program_head").await;
    seed_user(pool, "reg1", "registrar").await;
    seed_user(pool, "cash1", "cashier").await;

    Fixture {
        course_id,
        student_token: common::login_token(pool, "stud1").await,
        program_head_token: common::login_token(pool, "ph1").await,
        registrar_token: common::login_token(pool, "reg1").await,
        cashier_token: common::login_token(pool, "cash1").await,
    }
}

/// Submit an enrollment as the fixture student and return its id.
async fn submit_enrollment(pool: &PgPool, fixture: &Fixture) -> i64 {
    let app = common::build_test_app(pool.clone()).await;
    let body = serde_json::json!({
        "course_id": fixture.course_id,
        "school_year": 2026,
        "semester": 1,
        "total_fee": 25_000_00
    });
    let response =
        post_json_auth(app, "/api/v1/enrollments", body, &fixture.student_token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    json["id"].as_i64().expect("enrollment id expected")
}

/// Post a decision on an enrollment and return the response.
async fn decide(
    pool: &PgPool,
    enrollment_id: i64,
    token: &str,
    decision: &str,
) -> axum::http::Response<axum::body::Body> {
    let app = common::build_test_app(pool.clone()).await;
    post_json_auth(
        app,
        &format!("/api/v1/enrollments/{enrollment_id}/decision"),
        serde_json::json!({ "decision": decision }),
        token,
    )
    .await
}

// ---------------------------------------------------------------------------
// Submission
// ---------------------------------------------------------------------------

/// Submitting an enrollment returns 201 with a generated ENR- code and
/// pending status.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_submit_enrollment(pool: PgPool) {
    let fixture = seed_fixture(&pool).await;

    let app = common::build_test_app(pool).await;
    let body = serde_json::json!({
        "course_id": fixture.course_id,
        "school_year": 2026,
        "semester": 1,
        "total_fee": 25_000_00
    });
    let response = post_json_auth(app, "/api/v1/enrollments", body, &fixture.student_token).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["status"], "pending");
    assert_eq!(json["school_year"], 2026);
    assert_eq!(json["semester"], 1);
    let code = json["enrollment_code"].as_str().unwrap();
    assert!(code.starts_with("ENR-2026-"), "unexpected code: {code}");
}

/// A second submission for the same school year and semester is a conflict
/// while the first is still pending.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_duplicate_submission_conflict(pool: PgPool) {
    let fixture = seed_fixture(&pool).await;
    submit_enrollment(&pool, &fixture).await;

    let app = common::build_test_app(pool).await;
    let body = serde_json::json!({
        "course_id": fixture.course_id,
        "school_year": 2026,
        "semester": 1
    });
    let response = post_json_auth(app, "/api/v1/enrollments", body, &fixture.student_token).await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

/// Submission with an invalid semester returns 400.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_submit_invalid_semester(pool: PgPool) {
    let fixture = seed_fixture(&pool).await;

    let app = common::build_test_app(pool).await;
    let body = serde_json::json!({
        "course_id": fixture.course_id,
        "school_year": 2026,
        "semester": 3
    });
    let response = post_json_auth(app, "/api/v1/enrollments", body, &fixture.student_token).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// A staff user with no student record cannot submit an enrollment.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_submit_without_student_record(pool: PgPool) {
    let fixture = seed_fixture(&pool).await;

    let app = common::build_test_app(pool).await;
    let body = serde_json::json!({
        "course_id": fixture.course_id,
        "school_year": 2026,
        "semester": 1
    });
    let response =
        post_json_auth(app, "/api/v1/enrollments", body, &fixture.registrar_token).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

// ---------------------------------------------------------------------------
// Sequential approval chain
// ---------------------------------------------------------------------------

/// Full happy path: program head, registrar, then cashier approve, and the
/// enrollment lands in `enrolled` with 100% progress.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_full_approval_chain(pool: PgPool) {
    let fixture = seed_fixture(&pool).await;
    let enrollment_id = submit_enrollment(&pool, &fixture).await;

    let response = decide(&pool, enrollment_id, &fixture.program_head_token, "approved").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["enrollment"]["status"], "pending");
    assert_eq!(json["approval"]["role"], "program_head");
    assert_eq!(json["approval"]["decided_by_username"], "ph1");
    assert_eq!(json["projection"]["label"], "Registrar Review");
    assert_eq!(json["projection"]["progress"], 33);

    let response = decide(&pool, enrollment_id, &fixture.registrar_token, "approved").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["projection"]["label"], "Pending Payment");
    assert_eq!(json["projection"]["progress"], 66);

    let response = decide(&pool, enrollment_id, &fixture.cashier_token, "approved").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["enrollment"]["status"], "enrolled");
    assert_eq!(json["projection"]["label"], "Enrolled");
    assert_eq!(json["projection"]["progress"], 100);
}

/// The cashier may not decide before the registrar has approved.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_out_of_turn_decision_forbidden(pool: PgPool) {
    let fixture = seed_fixture(&pool).await;
    let enrollment_id = submit_enrollment(&pool, &fixture).await;

    let response = decide(&pool, enrollment_id, &fixture.cashier_token, "approved").await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // Status must be unchanged.
    let app = common::build_test_app(pool).await;
    let response = get_auth(
        app,
        &format!("/api/v1/enrollments/{enrollment_id}/status"),
        &fixture.student_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["label"], "Program Head Review");
    assert_eq!(json["data"]["progress"], 0);
}

/// The registrar may not decide before the program head; the admin role can
/// act at the program head stage.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_registrar_blocked_until_program_head_approves(pool: PgPool) {
    let fixture = seed_fixture(&pool).await;
    seed_user(&pool, "admin1", "admin").await;
    let admin_token = common::login_token(&pool, "admin1").await;
    let enrollment_id = submit_enrollment(&pool, &fixture).await;

    let response = decide(&pool, enrollment_id, &fixture.registrar_token, "approved").await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // Admin substitutes for the program head at the first stage.
    let response = decide(&pool, enrollment_id, &admin_token, "approved").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["projection"]["label"], "Registrar Review");
}

/// A student may not post decisions at all.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_student_cannot_decide(pool: PgPool) {
    let fixture = seed_fixture(&pool).await;
    let enrollment_id = submit_enrollment(&pool, &fixture).await;

    let response = decide(&pool, enrollment_id, &fixture.student_token, "approved").await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

/// A rejection at any stage marks the whole enrollment rejected.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_rejection(pool: PgPool) {
    let fixture = seed_fixture(&pool).await;
    let enrollment_id = submit_enrollment(&pool, &fixture).await;

    let app = common::build_test_app(pool.clone()).await;
    let response = post_json_auth(
        app,
        &format!("/api/v1/enrollments/{enrollment_id}/decision"),
        serde_json::json!({ "decision": "rejected", "remarks": "Incomplete requirements" }),
        &fixture.program_head_token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["enrollment"]["status"], "rejected");
    assert_eq!(json["projection"]["label"], "Rejected");
    assert_eq!(json["approval"]["remarks"], "Incomplete requirements");
    assert_eq!(json["approval"]["decided_by_username"], "ph1");
}

/// Re-approval by the rejecting stage supersedes an earlier rejection.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_reapproval_supersedes_rejection(pool: PgPool) {
    let fixture = seed_fixture(&pool).await;
    let enrollment_id = submit_enrollment(&pool, &fixture).await;

    let response = decide(&pool, enrollment_id, &fixture.program_head_token, "rejected").await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = decide(&pool, enrollment_id, &fixture.program_head_token, "approved").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["enrollment"]["status"], "pending");
    assert_eq!(json["projection"]["label"], "Registrar Review");
}

/// An unknown decision value is rejected with 422.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_invalid_decision_value(pool: PgPool) {
    let fixture = seed_fixture(&pool).await;
    let enrollment_id = submit_enrollment(&pool, &fixture).await;

    let response = decide(&pool, enrollment_id, &fixture.program_head_token, "maybe").await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

/// Remarks longer than the limit are rejected with 400.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_overlong_remarks(pool: PgPool) {
    let fixture = seed_fixture(&pool).await;
    let enrollment_id = submit_enrollment(&pool, &fixture).await;

    let app = common::build_test_app(pool).await;
    let response = post_json_auth(
        app,
        &format!("/api/v1/enrollments/{enrollment_id}/decision"),
        serde_json::json!({ "decision": "approved", "remarks": "x".repeat(1001) }),
        &fixture.program_head_token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Read access
// ---------------------------------------------------------------------------

/// A student can read their own enrollment detail, including approvals and
/// the status projection.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_student_reads_own_enrollment(pool: PgPool) {
    let fixture = seed_fixture(&pool).await;
    let enrollment_id = submit_enrollment(&pool, &fixture).await;

    let response = decide(&pool, enrollment_id, &fixture.program_head_token, "approved").await;
    assert_eq!(response.status(), StatusCode::OK);

    let app = common::build_test_app(pool).await;
    let response = get_auth(
        app,
        &format!("/api/v1/enrollments/{enrollment_id}"),
        &fixture.student_token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["id"], enrollment_id);
    assert_eq!(json["approvals"].as_array().unwrap().len(), 1);
    assert_eq!(json["approvals"][0]["role"], "program_head");
    assert_eq!(json["projection"]["label"], "Registrar Review");
}

/// A student cannot read another student's enrollment.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_student_cannot_read_others_enrollment(pool: PgPool) {
    let fixture = seed_fixture(&pool).await;
    let enrollment_id = submit_enrollment(&pool, &fixture).await;

    let other_user = seed_user(&pool, "stud2", "student").await;
    seed_student_record(&pool, &other_user, Some(fixture.course_id)).await;
    let other_token = common::login_token(&pool, "stud2").await;

    let app = common::build_test_app(pool).await;
    let response = get_auth(
        app,
        &format!("/api/v1/enrollments/{enrollment_id}"),
        &other_token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

// ---------------------------------------------------------------------------
// Payments
// ---------------------------------------------------------------------------

/// The cashier records payments and the ledger tracks the running balance.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_payment_ledger(pool: PgPool) {
    let fixture = seed_fixture(&pool).await;
    let enrollment_id = submit_enrollment(&pool, &fixture).await;

    let app = common::build_test_app(pool.clone()).await;
    let response = post_json_auth(
        app,
        &format!("/api/v1/enrollments/{enrollment_id}/payments"),
        serde_json::json!({ "amount": 10_000_00, "method": "cash" }),
        &fixture.cashier_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let app = common::build_test_app(pool.clone()).await;
    let response = post_json_auth(
        app,
        &format!("/api/v1/enrollments/{enrollment_id}/payments"),
        serde_json::json!({ "amount": 5_000_00 }),
        &fixture.cashier_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let app = common::build_test_app(pool).await;
    let response = get_auth(
        app,
        &format!("/api/v1/enrollments/{enrollment_id}/payments"),
        &fixture.registrar_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["payments"].as_array().unwrap().len(), 2);
    assert_eq!(json["total_paid"], 15_000_00);
    assert_eq!(json["balance"], 10_000_00);
}

/// Only the cashier (or admin) may record payments.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_payment_requires_cashier(pool: PgPool) {
    let fixture = seed_fixture(&pool).await;
    let enrollment_id = submit_enrollment(&pool, &fixture).await;

    let app = common::build_test_app(pool.clone()).await;
    let response = post_json_auth(
        app,
        &format!("/api/v1/enrollments/{enrollment_id}/payments"),
        serde_json::json!({ "amount": 1_000_00 }),
        &fixture.registrar_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // Non-positive amounts are rejected.
    let app = common::build_test_app(pool).await;
    let response = post_json_auth(
        app,
        &format!("/api/v1/enrollments/{enrollment_id}/payments"),
        serde_json::json!({ "amount": 0 }),
        &fixture.cashier_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
