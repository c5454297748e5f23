//! Transactional applier for course-shift decisions.

use registra_core::error::CoreError;
use registra_core::types::DbId;
use registra_core::workflow::course_shift::CourseShiftStatus;
use registra_core::workflow::{CourseShiftPolicy, Decision, WorkflowPolicy};
use registra_db::models::course_shift::CourseShiftRequest;
use registra_db::repositories::{CourseShiftRepo, StudentRepo};
use registra_db::DbPool;

use crate::error::{AppError, AppResult};

/// Record a decision on a course-shift request. On approval the student is
/// reassigned to the target course and marked irregular in the same
/// transaction as the status write.
pub async fn decide(
    pool: &DbPool,
    request_id: DbId,
    actor_id: DbId,
    actor_role: &str,
    decision: Decision,
    remarks: Option<&str>,
) -> AppResult<CourseShiftRequest> {
    let mut tx = pool.begin().await?;

    let request = CourseShiftRepo::find_by_id_for_update(&mut tx, request_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "CourseShiftRequest",
            id: request_id,
        })?;

    let status = CourseShiftStatus::parse(&request.status).ok_or_else(|| {
        AppError::InternalError(format!(
            "course_shift_request {request_id} has unknown status '{}'",
            request.status
        ))
    })?;

    let policy = CourseShiftPolicy;
    let transition = policy
        .transition(actor_role, &status, decision)
        .map_err(CoreError::from)?;

    if transition.effect.is_some() {
        StudentRepo::reassign_course(&mut tx, request.student_id, request.to_course_id).await?;
    }

    let updated = CourseShiftRepo::update_decision(
        &mut tx,
        request_id,
        transition.next.as_str(),
        remarks,
        actor_id,
    )
    .await?;

    tx.commit().await?;

    tracing::info!(
        request_id,
        actor_id,
        decision = decision.as_str(),
        status = transition.next.as_str(),
        "Course-shift decision recorded"
    );

    Ok(updated)
}
