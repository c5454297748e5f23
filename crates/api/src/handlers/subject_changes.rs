//! Handlers for the `/subject-changes` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use registra_core::error::CoreError;
use registra_core::roles::ROLE_STUDENT;
use registra_core::types::DbId;
use registra_core::workflow::Decision;
use registra_db::models::approval::DecisionRequest;
use registra_db::models::subject_change::{
    SubjectChangeItem, SubjectChangeRequest, SubmitSubjectChange,
};
use registra_db::repositories::{StudentRepo, SubjectChangeRepo, SubjectRepo};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::handlers::enrollments::validate_remarks;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireStaff;
use crate::response::DataResponse;
use crate::state::AppState;
use crate::workflow;

/// A request together with its add/drop items.
#[derive(Debug, Serialize)]
pub struct SubjectChangeDetail {
    #[serde(flatten)]
    pub request: SubjectChangeRequest,
    pub items: Vec<SubjectChangeItem>,
}

/// POST /api/v1/subject-changes
///
/// Submit an add/drop request for the authenticated student. A student may
/// have at most one request in flight; the conflict check runs before any
/// write.
pub async fn submit(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<SubmitSubjectChange>,
) -> AppResult<(StatusCode, Json<SubjectChangeDetail>)> {
    let student = StudentRepo::find_by_user_id(&state.pool, auth.user_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Forbidden(
                "Only students with a student record may request subject changes".into(),
            ))
        })?;

    if input.items.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "At least one add/drop item is required".into(),
        )));
    }
    for item in &input.items {
        if item.action != "add" && item.action != "drop" {
            return Err(AppError::Core(CoreError::Validation(format!(
                "Invalid action '{}'. Must be 'add' or 'drop'",
                item.action
            ))));
        }
        SubjectRepo::find_by_id(&state.pool, item.subject_id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "Subject",
                id: item.subject_id,
            }))?;
    }

    if SubjectChangeRepo::has_pending_for_student(&state.pool, student.id).await? {
        return Err(AppError::Core(CoreError::Conflict(
            "A subject-change request is already pending for this student".into(),
        )));
    }

    let request = SubjectChangeRepo::create_with_items(&state.pool, student.id, &input.items).await?;
    let items = SubjectChangeRepo::list_items(&state.pool, request.id).await?;

    tracing::info!(
        request_id = request.id,
        student_id = student.id,
        item_count = items.len(),
        "Subject-change request submitted"
    );

    Ok((
        StatusCode::CREATED,
        Json(SubjectChangeDetail { request, items }),
    ))
}

/// GET /api/v1/subject-changes
pub async fn list(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<SubjectChangeRequest>>>> {
    let student_filter = if auth.role == ROLE_STUDENT {
        let student = StudentRepo::find_by_user_id(&state.pool, auth.user_id)
            .await?
            .ok_or_else(|| AppError::Core(CoreError::Forbidden("No student record".into())))?;
        Some(student.id)
    } else {
        None
    };
    let requests = SubjectChangeRepo::list(&state.pool, student_filter).await?;
    Ok(Json(DataResponse { data: requests }))
}

/// GET /api/v1/subject-changes/{id}
pub async fn get_by_id(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<SubjectChangeDetail>> {
    let request = SubjectChangeRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "SubjectChangeRequest",
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

    let items = SubjectChangeRepo::list_items(&state.pool, id).await?;
    Ok(Json(SubjectChangeDetail { request, items }))
}

/// POST /api/v1/subject-changes/{id}/decision
///
/// Program Head (or admin) decides first; the Cashier confirms, unless the
/// student is a shiftee, in which case the Program Head's approval is final.
pub async fn decide(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<DecisionRequest>,
) -> AppResult<Json<SubjectChangeRequest>> {
    let decision = Decision::parse(&input.decision).map_err(CoreError::from)?;
    let remarks = validate_remarks(input.remarks.as_deref())?;

    let updated = workflow::subject_change::decide(
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
