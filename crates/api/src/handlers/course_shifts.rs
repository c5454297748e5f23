//! Handlers for the `/course-shifts` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use registra_core::error::CoreError;
use registra_core::roles::ROLE_STUDENT;
use registra_core::types::DbId;
use registra_core::workflow::Decision;
use registra_db::models::approval::DecisionRequest;
use registra_db::models::course_shift::{CourseShiftRequest, SubmitCourseShift};
use registra_db::repositories::{CourseRepo, CourseShiftRepo, StudentRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::enrollments::validate_remarks;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireStaff;
use crate::response::DataResponse;
use crate::state::AppState;
use crate::workflow;

/// POST /api/v1/course-shifts
///
/// Request a shift from the student's current course to another. Requires
/// the student to be assigned to a course already, and at most one pending
/// request per student.
pub async fn submit(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<SubmitCourseShift>,
) -> AppResult<(StatusCode, Json<CourseShiftRequest>)> {
    let student = StudentRepo::find_by_user_id(&state.pool, auth.user_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Forbidden(
                "Only students with a student record may request a course shift".into(),
            ))
        })?;

    let from_course_id = student.course_id.ok_or_else(|| {
        AppError::Core(CoreError::Validation(
            "Student is not assigned to a course yet".into(),
        ))
    })?;
    if from_course_id == input.to_course_id {
        return Err(AppError::Core(CoreError::Validation(
            "Target course must differ from the current course".into(),
        )));
    }
    CourseRepo::find_by_id(&state.pool, input.to_course_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Course",
            id: input.to_course_id,
        }))?;

    if CourseShiftRepo::has_pending_for_student(&state.pool, student.id).await? {
        return Err(AppError::Core(CoreError::Conflict(
            "A course-shift request is already pending for this student".into(),
        )));
    }

    let request = CourseShiftRepo::create(
        &state.pool,
        student.id,
        from_course_id,
        input.to_course_id,
        input.reason.as_deref(),
    )
    .await?;

    tracing::info!(
        request_id = request.id,
        student_id = student.id,
        from_course_id,
        to_course_id = input.to_course_id,
        "Course-shift request submitted"
    );

    Ok((StatusCode::CREATED, Json(request)))
}

/// GET /api/v1/course-shifts
pub async fn list(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<CourseShiftRequest>>>> {
    let student_filter = if auth.role == ROLE_STUDENT {
        let student = StudentRepo::find_by_user_id(&state.pool, auth.user_id)
            .await?
            .ok_or_else(|| AppError::Core(CoreError::Forbidden("No student record".into())))?;
        Some(student.id)
    } else {
        None
    };
    let requests = CourseShiftRepo::list(&state.pool, student_filter).await?;
    Ok(Json(DataResponse { data: requests }))
}

/// GET /api/v1/course-shifts/{id}
pub async fn get_by_id(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<CourseShiftRequest>> {
    let request = CourseShiftRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "CourseShiftRequest",
            id,
        }))?;

    if auth.role == ROLE_STUDENT {
        let student = StudentRepo::find_by_user_id(&state.pool, auth.user_id)
            .await?
            .ok_or_else(|| AppError::Core(CoreError::Forbidden("No student record".into())))?;
        if request.student_id != student.id {
            return Err(AppError::Core(CoreError::Forbidden(
                "Students may only access their own requests".into(),
            )));
        }
    }

    Ok(Json(request))
}

/// POST /api/v1/course-shifts/{id}/decision
///
/// Single Program Head (or admin) decision. Approval reassigns the student
/// and marks their standing irregular in the same transaction.
pub async fn decide(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<DecisionRequest>,
) -> AppResult<Json<CourseShiftRequest>> {
    let decision = Decision::parse(&input.decision).map_err(CoreError::from)?;
    let remarks = validate_remarks(input.remarks.as_deref())?;

    let updated = workflow::course_shift::decide(
        &state.pool,
        id,
        staff.user_id,
        &staff.role,
        decision,
        remarks,
    )
    .await?;

    Ok(Json(updated))
}
