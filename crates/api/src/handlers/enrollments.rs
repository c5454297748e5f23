//! Handlers for the `/enrollments` resource: submission, status, decisions.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use registra_core::enrollment_code::generate_enrollment_code;
use registra_core::error::CoreError;
use registra_core::roles::ROLE_STUDENT;
use registra_core::types::DbId;
use registra_core::workflow::enrollment::StatusProjection;
use registra_core::workflow::Decision;
use registra_db::models::approval::{ApprovalWithActor, DecisionRequest, EnrollmentApproval};
use registra_db::models::enrollment::{Enrollment, SubmitEnrollment};
use registra_db::repositories::{ApprovalRepo, CourseRepo, EnrollmentRepo, StudentRepo};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireStaff;
use crate::response::DataResponse;
use crate::state::AppState;
use crate::workflow;
use crate::workflow::enrollment::approval_set_from_rows;

/// Maximum length of decision remarks.
pub const MAX_REMARKS_LEN: usize = 1000;

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// Full enrollment view: the row, its per-role approvals, and the derived
/// workflow projection.
#[derive(Debug, Serialize)]
pub struct EnrollmentDetail {
    #[serde(flatten)]
    pub enrollment: Enrollment,
    pub approvals: Vec<EnrollmentApproval>,
    pub projection: StatusProjection,
}

/// Response from the decision endpoint. The approval carries the deciding
/// actor's username for display.
#[derive(Debug, Serialize)]
pub struct DecisionResponse {
    pub enrollment: Enrollment,
    pub approval: ApprovalWithActor,
    pub projection: StatusProjection,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/enrollments
///
/// Submit an enrollment application for the authenticated student. A student
/// may hold at most one non-rejected application per school year + semester.
pub async fn submit(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<SubmitEnrollment>,
) -> AppResult<(StatusCode, Json<Enrollment>)> {
    let student = StudentRepo::find_by_user_id(&state.pool, auth.user_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Forbidden(
                "Only students with a student record may enroll".into(),
            ))
        })?;

    if input.semester != 1 && input.semester != 2 {
        return Err(AppError::Core(CoreError::Validation(
            "Semester must be 1 or 2".into(),
        )));
    }
    if input.total_fee < 0 {
        return Err(AppError::Core(CoreError::Validation(
            "Total fee must not be negative".into(),
        )));
    }
    CourseRepo::find_by_id(&state.pool, input.course_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Course",
            id: input.course_id,
        }))?;

    // Reject duplicates before touching the code generator: one live
    // application per term.
    let existing = EnrollmentRepo::list(&state.pool, Some(student.id)).await?;
    let duplicate = existing.iter().any(|e| {
        e.school_year == input.school_year
            && e.semester == input.semester
            && e.status != "rejected"
    });
    if duplicate {
        return Err(AppError::Core(CoreError::Conflict(
            "An active enrollment already exists for this school year and semester".into(),
        )));
    }

    let taken = EnrollmentRepo::list_codes_for_year(&state.pool, input.school_year).await?;
    let code = {
        let mut rng = rand::rng();
        generate_enrollment_code(&mut rng, input.school_year, |candidate| {
            taken.iter().any(|c| c == candidate)
        })
    };

    let enrollment = EnrollmentRepo::create(
        &state.pool,
        student.id,
        input.course_id,
        input.school_year,
        input.semester,
        &code,
        input.total_fee,
    )
    .await?;

    tracing::info!(
        enrollment_id = enrollment.id,
        student_id = student.id,
        code = %enrollment.enrollment_code,
        "Enrollment submitted"
    );

    Ok((StatusCode::CREATED, Json(enrollment)))
}

/// GET /api/v1/enrollments
///
/// Staff see every application; students only their own.
pub async fn list(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Enrollment>>>> {
    let student_filter = if auth.role == ROLE_STUDENT {
        let student = StudentRepo::find_by_user_id(&state.pool, auth.user_id)
            .await?
            .ok_or_else(|| {
                AppError::Core(CoreError::Forbidden("No student record".into()))
            })?;
        Some(student.id)
    } else {
        None
    };
    let enrollments = EnrollmentRepo::list(&state.pool, student_filter).await?;
    Ok(Json(DataResponse { data: enrollments }))
}

/// GET /api/v1/enrollments/{id}
pub async fn get_by_id(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<EnrollmentDetail>> {
    let enrollment = find_readable(&state, &auth, id).await?;
    let approvals = ApprovalRepo::list_for_enrollment(&state.pool, id).await?;
    let projection =
        registra_core::workflow::enrollment::project(&approval_set_from_rows(&approvals));
    Ok(Json(EnrollmentDetail {
        enrollment,
        approvals,
        projection,
    }))
}

/// GET /api/v1/enrollments/{id}/status
///
/// The derived workflow projection only: status, display label, progress.
pub async fn get_status(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<StatusProjection>>> {
    find_readable(&state, &auth, id).await?;
    let approvals = ApprovalRepo::list_for_enrollment(&state.pool, id).await?;
    let projection =
        registra_core::workflow::enrollment::project(&approval_set_from_rows(&approvals));
    Ok(Json(DataResponse { data: projection }))
}

/// POST /api/v1/enrollments/{id}/decision
///
/// Record the acting staff role's decision. The stage sequence (Program
/// Head, Registrar, Cashier) is enforced by the workflow policy; acting out
/// of turn returns 403 without writing anything.
pub async fn decide(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<DecisionRequest>,
) -> AppResult<Json<DecisionResponse>> {
    let decision = Decision::parse(&input.decision).map_err(CoreError::from)?;
    let remarks = validate_remarks(input.remarks.as_deref())?;

    let outcome = workflow::enrollment::decide(
        &state.pool,
        id,
        staff.user_id,
        &staff.role,
        decision,
        remarks,
    )
    .await?;

    Ok(Json(DecisionResponse {
        enrollment: outcome.enrollment,
        approval: outcome.approval,
        projection: outcome.projection,
    }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Reject over-long remarks; empty strings become `None`.
///
/// The limit counts characters, not bytes, so multibyte text is not
/// penalized.
pub fn validate_remarks(remarks: Option<&str>) -> AppResult<Option<&str>> {
    match remarks {
        Some(r) if r.chars().count() > MAX_REMARKS_LEN => Err(AppError::Core(
            CoreError::Validation(format!(
                "Remarks must be at most {MAX_REMARKS_LEN} characters"
            )),
        )),
        Some(r) if r.is_empty() => Ok(None),
        other => Ok(other),
    }
}

/// Load an enrollment, enforcing that students only see their own.
async fn find_readable(state: &AppState, auth: &AuthUser, id: DbId) -> AppResult<Enrollment> {
    let enrollment = EnrollmentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Enrollment",
            id,
        }))?;
    if auth.role == ROLE_STUDENT {
        let student = StudentRepo::find_by_user_id(&state.pool, auth.user_id)
            .await?
            .ok_or_else(|| AppError::Core(CoreError::Forbidden("No student record".into())))?;
        if enrollment.student_id != student.id {
            return Err(AppError::Core(CoreError::Forbidden(
                "Students may only access their own enrollments".into(),
            )));
        }
    }
    Ok(enrollment)
}
